//! IEEE754 bit-level building blocks.
//!
//! Everything here works on the raw bit pattern of each lane: lanes are
//! classified with mask compares and results are blended with
//! [`Lanes::select`], so subnormals, zeros and non-finite values never take
//! a branch of their own.

use num::traits::{One, Zero};

use crate::simd::{Element, Lanes, Mask};

/// Splits `x` into a mantissa in `[0.5, 1)` and a power-of-two exponent,
/// so that `x == mantissa * 2^exponent`.
///
/// # Algorithm
///
/// 1. Classify lanes as zero, non-finite, subnormal or normal from the
///    exponent field.
/// 2. Scale subnormal lanes by `2^MANTISSA_BITS` so their exponent field
///    becomes meaningful, and remember the correction.
/// 3. Read the biased exponent and overwrite the field with the bias of
///    `0.5`, keeping sign and mantissa bits.
///
/// Zero, infinite and NaN lanes pass through unchanged with exponent 0.
#[inline(always)]
pub fn frexp<T: Element, const W: usize>(x: Lanes<T, W>) -> (Lanes<T, W>, Lanes<T::Int, W>) {
    let exp_mask = Lanes::splat(T::EXPONENT_MASK);
    let no_bits = Lanes::splat(T::Bits::zero());

    let bits = x.to_bits();
    let field = bits & exp_mask;
    let is_zero = (bits & !Lanes::splat(T::SIGN_MASK)).cmp_eq(no_bits);
    let is_special = field.cmp_eq(exp_mask);
    let is_subnormal = field.cmp_eq(no_bits).and_not(is_zero);

    let scale = Lanes::splat(T::from_bits(T::int_to_bits(T::int(
        T::EXPONENT_BIAS + T::MANTISSA_BITS as i32,
    )) << T::MANTISSA_BITS as usize));
    let scaled = Lanes::select(is_subnormal, x * scale, x);
    let correction = Lanes::select(
        is_subnormal,
        Lanes::splat(T::int(T::MANTISSA_BITS as i32)),
        Lanes::splat(T::Int::zero()),
    );

    let sbits = scaled.to_bits();
    let biased = (sbits & exp_mask)
        .shift_right(T::MANTISSA_BITS)
        .map_into(T::bits_to_int);
    let exponent = biased - Lanes::splat(T::int(T::EXPONENT_BIAS - 1)) - correction;

    let half_field = T::int_to_bits(T::int(T::EXPONENT_BIAS - 1)) << T::MANTISSA_BITS as usize;
    let mantissa = Lanes::from_bits((sbits & !exp_mask) | Lanes::splat(half_field));

    let passthrough = is_zero | is_special;
    (
        Lanes::select(passthrough, x, mantissa),
        Lanes::select(passthrough, Lanes::splat(T::Int::zero()), exponent),
    )
}

/// Builds `2^e` for every integer lane.
///
/// Normal exponents are placed directly into the exponent field. Exponents
/// in the subnormal range become a single mantissa bit. Below the smallest
/// subnormal the result is 0, above `MAX_EXPONENT` it is `+inf`.
#[inline(always)]
pub fn exp2n<T: Element, const W: usize>(e: Lanes<T::Int, W>) -> Lanes<T, W> {
    let min_normal = T::MIN_EXPONENT;
    let min_subnormal = T::MIN_EXPONENT - T::MANTISSA_BITS as i32;

    let normal_e = e.clamp_int(T::int(min_normal), T::int(T::MAX_EXPONENT));
    let normal = Lanes::from_bits(
        (normal_e + Lanes::splat(T::int(T::EXPONENT_BIAS)))
            .map_into(T::int_to_bits)
            .shift_left(T::MANTISSA_BITS),
    );

    let sub_shift = (e.clamp_int(T::int(min_subnormal), T::int(min_normal - 1))
        - Lanes::splat(T::int(min_subnormal)))
    .map_into(T::int_as_u32);
    let subnormal = Lanes::from_bits(Lanes::splat(T::Bits::one()).shift_left_each(sub_shift));

    let r = Lanes::select(e.cmp_lt(Lanes::splat(T::int(min_normal))), subnormal, normal);
    let r = Lanes::select(
        e.cmp_lt(Lanes::splat(T::int(min_subnormal))),
        Lanes::zero(),
        r,
    );
    Lanes::select(
        e.cmp_gt(Lanes::splat(T::int(T::MAX_EXPONENT))),
        Lanes::splat(T::infinity()),
        r,
    )
}

/// Computes `x * 2^e`.
///
/// Exponents inside `[MIN_EXPONENT, MAX_EXPONENT]` cost one multiply by
/// [`exp2n`], so the result is rounded exactly once. Exponents outside that
/// range are first stepped towards it by at most two exact multiplies, by
/// `2^MAX_EXPONENT` going up or `2^(MIN_EXPONENT + MANTISSA_BITS)` going
/// down, so a tiny `x` with a large `e` (or the reverse) never passes
/// through an intermediate overflow and a subnormal result is still rounded
/// once. `ldexp(frexp(x))` is exact for every finite `x`.
#[inline(always)]
pub fn ldexp<T: Element, const W: usize>(x: Lanes<T, W>, e: Lanes<T::Int, W>) -> Lanes<T, W> {
    let min_normal = T::MIN_EXPONENT;
    let max_normal = T::MAX_EXPONENT;
    let down_step = T::MIN_EXPONENT + T::MANTISSA_BITS as i32;

    // Past three exponent ranges every finite `x` saturates to 0 or inf.
    let mut e = e.clamp_int(
        T::int(3 * (min_normal - T::MANTISSA_BITS as i32)),
        T::int(3 * max_normal),
    );
    let mut x = x;
    let up = exp2n::<T, W>(Lanes::splat(T::int(max_normal)));
    let down = exp2n::<T, W>(Lanes::splat(T::int(down_step)));

    for _ in 0..2 {
        let high = e.cmp_gt(Lanes::splat(T::int(max_normal)));
        x = Lanes::select(high, x * up, x);
        e = Lanes::select(high, e - Lanes::splat(T::int(max_normal)), e);

        let low = e.cmp_lt(Lanes::splat(T::int(min_normal)));
        x = Lanes::select(low, x * down, x);
        e = Lanes::select(low, e - Lanes::splat(T::int(down_step)), e);
    }

    x * exp2n::<T, W>(e.clamp_int(T::int(min_normal), T::int(max_normal)))
}

/// Clears the sign bit of every lane.
#[inline(always)]
pub fn abs<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    Lanes::from_bits(x.to_bits() & !Lanes::splat(T::SIGN_MASK))
}

/// `±1` carrying the sign bit of `x`, so `sign(-0.0) == -1`.
#[inline(always)]
pub fn sign<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let sign_bits = x.to_bits() & Lanes::splat(T::SIGN_MASK);
    Lanes::from_bits(Lanes::splat(T::one().to_bits()) | sign_bits)
}

/// Magnitude of `x` with the sign bit of `y`.
#[inline(always)]
pub fn copysign<T: Element, const W: usize>(x: Lanes<T, W>, y: Lanes<T, W>) -> Lanes<T, W> {
    let sign_mask = Lanes::splat(T::SIGN_MASK);
    Lanes::from_bits((x.to_bits() & !sign_mask) | (y.to_bits() & sign_mask))
}

/// Set where the sign bit is set, `-0.0` and negative NaN included.
#[inline(always)]
pub fn sign_bit<T: Element, const W: usize>(x: Lanes<T, W>) -> Mask<W> {
    (x.to_bits() & Lanes::splat(T::SIGN_MASK)).cmp_ne(Lanes::splat(T::Bits::zero()))
}

/// Set where `|x| < T::SMALL`.
#[inline(always)]
pub fn small<T: Element, const W: usize>(x: Lanes<T, W>) -> Mask<W> {
    abs(x).cmp_lt(Lanes::splat(T::SMALL))
}

/// Smaller-magnitude operand when `a` and `b` share a sign, 0 otherwise.
#[inline(always)]
pub fn modmin<T: Element, const W: usize>(a: Lanes<T, W>, b: Lanes<T, W>) -> Lanes<T, W> {
    let smaller = Lanes::select(abs(a).cmp_lt(abs(b)), a, b);
    Lanes::select((a * b).cmp_le(Lanes::zero()), Lanes::zero(), smaller)
}
