use serde::{Deserialize, Serialize};

/// The interest rate curve configuration of a reserve
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRateConfig {
    pub util: u32,       // the target utilization rate expressed in 7 decimals
    pub r_base: u32,     // the R0 value (base rate) in the interest rate formula, 7 decimals
    pub r_one: u32,      // the R1 value in the interest rate formula expressed in 7 decimals
    pub r_two: u32,      // the R2 value in the interest rate formula expressed in 7 decimals
    pub r_three: u32,    // the R3 value in the interest rate formula expressed in 7 decimals
    pub reactivity: u32, // the reactivity constant for the reserve expressed in 7 decimals
}

/// The configuration information about a reserve asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveConfig {
    pub decimals: u32,    // the decimals used in both the bToken and underlying contract
    pub c_factor: u32,    // the collateral factor for the reserve expressed in 7 decimals
    pub l_factor: u32,    // the liability factor for the reserve expressed in 7 decimals
    pub max_util: u32,    // the maximum allowed utilization rate expressed in 7 decimals
    pub supply_cap: i128, // the total amount of underlying tokens that can be supplied
    pub enabled: bool,    // the flag of the reserve
    pub interest: InterestRateConfig,
}

/// The raw data of a reserve asset as last recorded on chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveData {
    pub total_supplied: i128,   // the total underlying supplied as of `last_time`
    pub total_borrowed: i128,   // the total underlying borrowed as of `last_time`
    pub last_borrow_rate: i128, // the borrow rate recorded at `last_time` expressed in 7 decimals
    pub last_supply_rate: i128, // the supply rate recorded at `last_time` expressed in 7 decimals
    pub d_rate: i128,           // the debt index accrued since `last_time` expressed in 12 decimals
    pub backstop_credit: i128,  // the amount of underlying tokens currently owed to the backstop
    pub ir_mod: i128,           // the interest rate curve modifier expressed in 7 decimals
    pub last_time: u64,         // the last time the data was updated
    pub price: i128,            // the oracle price of the underlying expressed in 7 decimals
}

/// The pool's config
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub bstop_rate: u32, // the backstop's take rate on accrued debt interest, 7 decimals
}
