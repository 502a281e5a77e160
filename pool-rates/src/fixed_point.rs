use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::{constants::MAX_DECIMALS, errors::RateError};

/// Fixed point multiplication and division with an explicit rounding direction.
///
/// Every operation treats `denominator` as the scalar of the fixed point values involved, such
/// that `fixed_mul_*` computes `self * y / denominator` and `fixed_div_*` computes
/// `self * denominator / y`. Floor rounds towards negative infinity and ceil rounds towards
/// positive infinity.
///
/// The product is computed in `i128` when it fits and in an arbitrary precision integer
/// otherwise, so only the final result needs to be representable.
pub trait FixedPoint: Sized {
    /// Safely calculates floor(x * y / denominator).
    ///
    /// ### Errors
    /// `DivisionByZero` if `denominator` is zero, `Overflow` if the result does not fit
    fn fixed_mul_floor(self, y: Self, denominator: Self) -> Result<Self, RateError>;

    /// Safely calculates ceil(x * y / denominator).
    ///
    /// ### Errors
    /// `DivisionByZero` if `denominator` is zero, `Overflow` if the result does not fit
    fn fixed_mul_ceil(self, y: Self, denominator: Self) -> Result<Self, RateError>;

    /// Safely calculates floor(x * denominator / y).
    ///
    /// ### Errors
    /// `DivisionByZero` if `y` is zero, `Overflow` if the result does not fit
    fn fixed_div_floor(self, y: Self, denominator: Self) -> Result<Self, RateError>;

    /// Safely calculates ceil(x * denominator / y).
    ///
    /// ### Errors
    /// `DivisionByZero` if `y` is zero, `Overflow` if the result does not fit
    fn fixed_div_ceil(self, y: Self, denominator: Self) -> Result<Self, RateError>;
}

impl FixedPoint for i128 {
    fn fixed_mul_floor(self, y: i128, denominator: i128) -> Result<i128, RateError> {
        mul_div_floor(self, y, denominator)
    }

    fn fixed_mul_ceil(self, y: i128, denominator: i128) -> Result<i128, RateError> {
        mul_div_ceil(self, y, denominator)
    }

    fn fixed_div_floor(self, y: i128, denominator: i128) -> Result<i128, RateError> {
        mul_div_floor(self, denominator, y)
    }

    fn fixed_div_ceil(self, y: i128, denominator: i128) -> Result<i128, RateError> {
        mul_div_ceil(self, denominator, y)
    }
}

/// floor(x * y / z)
fn mul_div_floor(x: i128, y: i128, z: i128) -> Result<i128, RateError> {
    if z == 0 {
        return Err(RateError::DivisionByZero);
    }
    match x.checked_mul(y) {
        Some(r) => div_floor(r, z),
        None => wide_div_floor(BigInt::from(x) * BigInt::from(y), BigInt::from(z)),
    }
}

/// ceil(x * y / z)
fn mul_div_ceil(x: i128, y: i128, z: i128) -> Result<i128, RateError> {
    if z == 0 {
        return Err(RateError::DivisionByZero);
    }
    match x.checked_mul(y) {
        Some(r) => div_ceil(r, z),
        None => wide_div_ceil(BigInt::from(x) * BigInt::from(y), BigInt::from(z)),
    }
}

fn div_floor(r: i128, z: i128) -> Result<i128, RateError> {
    let q = r.checked_div(z).ok_or(RateError::Overflow)?;
    let rem = r.checked_rem(z).ok_or(RateError::Overflow)?;
    if rem != 0 && ((rem < 0) != (z < 0)) {
        return q.checked_sub(1).ok_or(RateError::Overflow);
    }
    Ok(q)
}

fn div_ceil(r: i128, z: i128) -> Result<i128, RateError> {
    let q = r.checked_div(z).ok_or(RateError::Overflow)?;
    let rem = r.checked_rem(z).ok_or(RateError::Overflow)?;
    if rem != 0 && ((rem < 0) == (z < 0)) {
        return q.checked_add(1).ok_or(RateError::Overflow);
    }
    Ok(q)
}

fn wide_div_floor(r: BigInt, z: BigInt) -> Result<i128, RateError> {
    let mut q = &r / &z;
    let rem = &r % &z;
    if !rem.is_zero() && (rem.is_negative() != z.is_negative()) {
        q -= BigInt::one();
    }
    q.to_i128().ok_or(RateError::Overflow)
}

fn wide_div_ceil(r: BigInt, z: BigInt) -> Result<i128, RateError> {
    let mut q = &r / &z;
    let rem = &r % &z;
    if !rem.is_zero() && (rem.is_negative() == z.is_negative()) {
        q += BigInt::one();
    }
    q.to_i128().ok_or(RateError::Overflow)
}

/// The scalar `10^decimals`
fn scalar(decimals: u32) -> Result<i128, RateError> {
    10i128.checked_pow(decimals).ok_or(RateError::Overflow)
}

/// Move a fixed point value from one decimal scale to another. Scaling down rounds towards
/// negative infinity.
///
/// ### Arguments
/// * `value` - The fixed point value expressed in `from` decimals
/// * `from` - The decimals `value` is expressed in
/// * `to` - The decimals of the result
///
/// ### Errors
/// `Overflow` if the rescaled value is not representable
pub fn rescale(value: i128, from: u32, to: u32) -> Result<i128, RateError> {
    if to >= from {
        value
            .checked_mul(scalar(to - from)?)
            .ok_or(RateError::Overflow)
    } else {
        div_floor(value, scalar(from - to)?)
    }
}

/// Convert a decimal value into its fixed point representation with `decimals` places.
/// Digits beyond `decimals` are floored.
///
/// ### Errors
/// `Overflow` if the scaled value is not representable, `InvalidConfiguration` if `decimals`
/// is larger than `MAX_DECIMALS`
pub fn to_fixed(value: Decimal, decimals: u32) -> Result<i128, RateError> {
    if decimals > MAX_DECIMALS {
        return Err(RateError::InvalidConfiguration);
    }
    let scalar = Decimal::from(10u64.pow(decimals));
    value
        .checked_mul(scalar)
        .ok_or(RateError::Overflow)?
        .floor()
        .to_i128()
        .ok_or(RateError::Overflow)
}

/// Convert a fixed point value with `decimals` places into an exact decimal value.
///
/// ### Errors
/// `Overflow` if the value is outside the range of `Decimal`, `InvalidConfiguration` if
/// `decimals` is larger than `MAX_DECIMALS`
pub fn to_decimal(value: i128, decimals: u32) -> Result<Decimal, RateError> {
    if decimals > MAX_DECIMALS {
        return Err(RateError::InvalidConfiguration);
    }
    Decimal::try_from_i128_with_scale(value, decimals).map_err(|_| RateError::Overflow)
}

/// Convert a fixed point value with `decimals` places into a float for display. The result is
/// lossy and must not be fed back into a rate computation.
pub fn to_float(value: i128, decimals: u32) -> f64 {
    value as f64 / 10f64.powi(decimals as i32)
}
