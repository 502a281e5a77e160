use cast::i128;

use crate::{
    constants::{
        BORROW_COMPOUNDING_PERIODS, FIXED_5_PERCENT, FIXED_95_PERCENT, SCALAR_12, SCALAR_7,
        SUPPLY_COMPOUNDING_PERIODS, SECONDS_PER_YEAR,
    },
    errors::RateError,
    fixed_point::{rescale, FixedPoint},
    types::InterestRateConfig,
};

/// Calculates the borrow rate of a reserve from the three slope interest rate curve.
///
/// The curve is expressed in annual terms. The rate modifier scales the slope terms up to the
/// 95% kink, while `r_base` and the `r_three` penalty above the kink are never scaled.
///
/// ### Arguments
/// * `config` - The interest rate configuration of the reserve
/// * `cur_util` - The current utilization rate of the reserve (7 decimals)
/// * `ir_mod` - The current interest rate modifier of the reserve (7 decimals)
///
/// ### Returns
/// * i128 - The annual borrow rate (7 decimals)
///
/// ### Errors
/// `DivisionByZero` if the target utilization is zero, `Overflow` if the rate is not representable
#[allow(clippy::zero_prefixed_literal)]
pub fn calc_kinked_rate(
    config: &InterestRateConfig,
    cur_util: i128,
    ir_mod: i128,
) -> Result<i128, RateError> {
    let target_util: i128 = i128(config.util);
    let r_base = i128(config.r_base);
    let r_one = i128(config.r_one);
    let r_two = i128(config.r_two);
    let r_three = i128(config.r_three);

    if target_util == 0 {
        return Err(RateError::DivisionByZero);
    }

    if cur_util <= target_util {
        let util_scalar = cur_util.fixed_div_floor(target_util, SCALAR_7)?;
        let slope_rate = util_scalar.fixed_mul_floor(r_one, SCALAR_7)?;

        add_base_rate(r_base, slope_rate.fixed_mul_ceil(ir_mod, SCALAR_7)?)
    } else if cur_util <= FIXED_95_PERCENT {
        let util_scalar =
            (cur_util - target_util).fixed_div_floor(FIXED_95_PERCENT - target_util, SCALAR_7)?;
        let slope_rate = util_scalar.fixed_mul_floor(r_two, SCALAR_7)? + r_one;

        add_base_rate(r_base, slope_rate.fixed_mul_ceil(ir_mod, SCALAR_7)?)
    } else {
        let util_scalar =
            (cur_util - FIXED_95_PERCENT).fixed_div_floor(FIXED_5_PERCENT, SCALAR_7)?;
        let extra_rate = util_scalar.fixed_mul_floor(r_three, SCALAR_7)?;

        let intersection = (r_one + r_two).fixed_mul_ceil(ir_mod, SCALAR_7)?;
        add_base_rate(r_base, intersection)?
            .checked_add(extra_rate)
            .ok_or(RateError::Overflow)
    }
}

fn add_base_rate(r_base: i128, modified_rate: i128) -> Result<i128, RateError> {
    r_base
        .checked_add(modified_rate)
        .ok_or(RateError::Overflow)
}

/// Calculates the borrow APR of a reserve. Interest accrues linearly over the year at the curve
/// rate, so the APR is the curve rate itself.
///
/// ### Arguments
/// * `config` - The interest rate configuration of the reserve
/// * `cur_util` - The current utilization rate of the reserve (7 decimals)
/// * `ir_mod` - The current interest rate modifier of the reserve (7 decimals)
pub fn calc_borrow_apr(
    config: &InterestRateConfig,
    cur_util: i128,
    ir_mod: i128,
) -> Result<i128, RateError> {
    calc_kinked_rate(config, cur_util, ir_mod)
}

/// Calculates the supply APR of a reserve. Suppliers earn the borrow interest in proportion to
/// utilization, less the share taken by the backstop.
///
/// ### Arguments
/// * `borrow_apr` - The borrow APR of the reserve (7 decimals)
/// * `cur_util` - The current utilization rate of the reserve (7 decimals)
/// * `bstop_rate` - The backstop take rate of the pool (7 decimals)
pub fn calc_supply_apr(
    borrow_apr: i128,
    cur_util: i128,
    bstop_rate: i128,
) -> Result<i128, RateError> {
    borrow_apr
        .fixed_mul_floor(cur_util, SCALAR_7)?
        .fixed_mul_floor(SCALAR_7 - bstop_rate, SCALAR_7)
}

/// Calculates the borrow APY of a reserve with daily compounding.
pub fn calc_borrow_apy(borrow_apr: i128) -> Result<i128, RateError> {
    calc_compounded_apy(borrow_apr, BORROW_COMPOUNDING_PERIODS)
}

/// Calculates the supply APY of a reserve with weekly compounding.
pub fn calc_supply_apy(supply_apr: i128) -> Result<i128, RateError> {
    calc_compounded_apy(supply_apr, SUPPLY_COMPOUNDING_PERIODS)
}

/// Calculates `(1 + apr / periods)^periods - 1`.
///
/// The compounding is carried out at 12 decimals and every intermediate product rounds down.
///
/// ### Arguments
/// * `apr` - The annual rate (7 decimals)
/// * `periods` - The number of compounding periods per year
///
/// ### Returns
/// * i128 - The annual yield (7 decimals)
///
/// ### Errors
/// `DivisionByZero` if `periods` is zero
pub fn calc_compounded_apy(apr: i128, periods: u32) -> Result<i128, RateError> {
    let apr_scaled = rescale(apr, 7, 12)?;
    let period_rate = apr_scaled.fixed_div_floor(i128(periods) * SCALAR_12, SCALAR_12)?;
    let growth = fixed_pow_floor(SCALAR_12 + period_rate, periods, SCALAR_12)?;
    rescale(growth - SCALAR_12, 12, 7)
}

/// Raise a fixed point number to an integer power by repeated squaring, rounding down
fn fixed_pow_floor(base: i128, exp: u32, scalar: i128) -> Result<i128, RateError> {
    let mut result = scalar;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.fixed_mul_floor(base, scalar)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.fixed_mul_floor(base, scalar)?;
        }
    }
    Ok(result)
}

/// Calculates the growth of the debt index over `delta_time` seconds at `rate`, the way the pool
/// accrues interest on chain.
///
/// ### Arguments
/// * `rate` - The annual borrow rate (7 decimals)
/// * `delta_time` - The seconds elapsed since the last accrual
///
/// ### Returns
/// * i128 - The accrual factor (12 decimals)
pub fn calc_accrual_factor(rate: i128, delta_time: u64) -> Result<i128, RateError> {
    let delta_time_scaled = i128(delta_time)
        .checked_mul(1_000_000_000)
        .ok_or(RateError::Overflow)?;
    let time_weight = delta_time_scaled / SECONDS_PER_YEAR;
    let rate_scaled = rate.checked_mul(100_000).ok_or(RateError::Overflow)?;
    SCALAR_12
        .checked_add(time_weight.fixed_mul_ceil(rate_scaled, 1_000_000_000)?)
        .ok_or(RateError::Overflow)
}
