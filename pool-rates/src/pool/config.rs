use cast::i128;

use crate::{
    constants::{FIXED_95_PERCENT, MAX_DECIMALS, MAX_REACTIVITY, SCALAR_7},
    errors::RateError,
    types::{InterestRateConfig, PoolConfig, ReserveConfig, ReserveData},
};

/// Require the pool configuration to be valid
///
/// ### Errors
/// If the backstop take rate is not in [0, 1)
pub fn require_valid_pool_config(config: &PoolConfig) -> Result<(), RateError> {
    if i128(config.bstop_rate) >= SCALAR_7 {
        return Err(RateError::InvalidConfiguration);
    }
    Ok(())
}

/// Require the interest rate curve configuration to be valid
///
/// A zero target utilization passes validation; the curve and the rate modifier both fail on
/// it with `DivisionByZero` for any utilization.
pub fn require_valid_interest_config(config: &InterestRateConfig) -> Result<(), RateError> {
    if i128(config.util) > FIXED_95_PERCENT
        || (config.r_one > config.r_two || config.r_two > config.r_three)
        || i128(config.reactivity) > MAX_REACTIVITY
    {
        return Err(RateError::InvalidConfiguration);
    }
    Ok(())
}

/// Require the reserve configuration, including its interest rate curve, to be valid
pub fn require_valid_reserve_config(config: &ReserveConfig) -> Result<(), RateError> {
    if config.decimals > MAX_DECIMALS
        || i128(config.c_factor) > SCALAR_7
        || i128(config.l_factor) > SCALAR_7
        || (i128(config.max_util) > SCALAR_7 || config.max_util <= config.interest.util)
        || config.supply_cap < 0
    {
        return Err(RateError::InvalidConfiguration);
    }
    require_valid_interest_config(&config.interest)
}

/// Require the raw reserve data to be inside the domain the chain can produce
pub fn require_valid_reserve_data(data: &ReserveData) -> Result<(), RateError> {
    if data.total_supplied < 0
        || data.total_borrowed < 0
        || data.d_rate <= 0
        || data.backstop_credit < 0
        || data.ir_mod <= 0
    {
        return Err(RateError::InvalidConfiguration);
    }
    Ok(())
}
