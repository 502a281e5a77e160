mod config;
pub use config::{
    require_valid_interest_config, require_valid_pool_config, require_valid_reserve_config,
    require_valid_reserve_data,
};

mod interest;
pub use interest::{
    calc_accrual_factor, calc_borrow_apr, calc_borrow_apy, calc_compounded_apy, calc_kinked_rate,
    calc_supply_apr, calc_supply_apy,
};

#[allow(clippy::module_inception)]
mod pool;
pub use pool::Pool;

mod rate_modifier;
pub use rate_modifier::ReactiveRateModifier;

mod reserve;
pub use reserve::{InterestMode, Reserve, ReserveRates, ReserveRatesDisplay};
