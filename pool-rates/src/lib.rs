mod constants;
mod dependencies;
mod errors;
mod events;
mod fixed_point;
mod pool;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use crate::constants::*;
pub use crate::dependencies::{Clock, RateSink, ReserveDataSource, SystemClock};
pub use crate::errors::RateError;
pub use crate::events::RateEvent;
pub use crate::fixed_point::{rescale, to_decimal, to_fixed, to_float, FixedPoint};
pub use crate::pool::{
    calc_accrual_factor, calc_borrow_apr, calc_borrow_apy, calc_compounded_apy,
    calc_kinked_rate, calc_supply_apr, calc_supply_apy, require_valid_interest_config,
    require_valid_pool_config, require_valid_reserve_config, require_valid_reserve_data,
    InterestMode, Pool, ReactiveRateModifier, Reserve, ReserveRates, ReserveRatesDisplay,
};
pub use crate::types::{InterestRateConfig, PoolConfig, ReserveConfig, ReserveData};
