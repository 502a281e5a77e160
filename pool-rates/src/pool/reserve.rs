use cast::i128;

use crate::{
    constants::{SCALAR_12, SCALAR_7},
    errors::RateError,
    fixed_point::{to_float, FixedPoint},
    types::{InterestRateConfig, PoolConfig, ReserveConfig, ReserveData},
};

use super::{
    config::{require_valid_pool_config, require_valid_reserve_config, require_valid_reserve_data},
    interest::{
        calc_accrual_factor, calc_borrow_apr, calc_borrow_apy, calc_supply_apr, calc_supply_apy,
    },
    rate_modifier::ReactiveRateModifier,
};

/// How outstanding liabilities are measured when computing utilization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterestMode {
    /// The last recorded borrowed amount
    Recorded,
    /// The recorded borrowed amount grown by the debt index
    Accrued,
}

/// An immutable snapshot of a reserve
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reserve {
    pub asset: String,                 // the underlying asset identifier
    pub scalar: i128,                  // scalar used for balances
    pub c_factor: u32,                 // the collateral factor for the reserve
    pub l_factor: u32,                 // the liability factor for the reserve
    pub max_util: u32,                 // the maximum utilization rate for the reserve
    pub supply_cap: i128,              // the maximum amount of underlying that can be supplied
    pub enabled: bool,                 // whether the reserve accepts new positions
    pub interest: InterestRateConfig,  // the interest rate curve of the reserve
    pub total_supplied: i128,          // the total underlying supplied
    pub total_borrowed: i128,          // the total underlying borrowed, as last recorded
    pub last_borrow_rate: i128,        // the last recorded borrow rate (7 decimals)
    pub last_supply_rate: i128,        // the last recorded supply rate (7 decimals)
    pub d_rate: i128,                  // the debt index (12 decimals)
    pub backstop_credit: i128,         // the total amount of underlying owed to the backstop
    pub ir_mod: i128,                  // the raw interest rate modifier (7 decimals)
    pub last_time: u64,                // the last time the reserve data was recorded
    pub price: i128,                   // the oracle price of the asset (7 decimals)
}

impl Reserve {
    /// Build a reserve snapshot from its configuration and recorded data
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset identifier
    /// * `config` - The reserve configuration
    /// * `data` - The last recorded reserve data
    ///
    /// ### Errors
    /// `InvalidConfiguration` if the configuration or the data is out of range
    pub fn load(
        asset: &str,
        config: &ReserveConfig,
        data: &ReserveData,
    ) -> Result<Reserve, RateError> {
        require_valid_reserve_config(config)?;
        require_valid_reserve_data(data)?;

        Ok(Reserve {
            asset: asset.to_string(),
            scalar: 10i128.pow(config.decimals),
            c_factor: config.c_factor,
            l_factor: config.l_factor,
            max_util: config.max_util,
            supply_cap: config.supply_cap,
            enabled: config.enabled,
            interest: config.interest.clone(),
            total_supplied: data.total_supplied,
            total_borrowed: data.total_borrowed,
            last_borrow_rate: data.last_borrow_rate,
            last_supply_rate: data.last_supply_rate,
            d_rate: data.d_rate,
            backstop_credit: data.backstop_credit,
            ir_mod: data.ir_mod,
            last_time: data.last_time,
            price: data.price,
        })
    }

    /// The rate modifier recorded with the reserve data
    pub fn rate_modifier(&self) -> ReactiveRateModifier {
        ReactiveRateModifier::from_raw(self.ir_mod, self.last_time, &self.interest)
    }

    /// Fetch the utilization rate for the reserve normalized to 7 decimals
    ///
    /// Utilization above 100% is reported as is.
    ///
    /// ### Errors
    /// `DivisionByZero` if nothing is supplied
    pub fn utilization(&self, mode: InterestMode) -> Result<i128, RateError> {
        self.liabilities(mode)?
            .fixed_div_floor(self.total_supplied, SCALAR_7)
    }

    /// Require that the utilization rate, with accrued interest, is at or below the maximum
    pub fn require_utilization_below_max(&self) -> Result<(), RateError> {
        if self.utilization(InterestMode::Accrued)? > i128(self.max_util) {
            return Err(RateError::InvalidUtilRate);
        }
        Ok(())
    }

    /// Fetch the total liabilities for the reserve in underlying tokens
    pub fn liabilities(&self, mode: InterestMode) -> Result<i128, RateError> {
        match mode {
            InterestMode::Recorded => Ok(self.total_borrowed),
            InterestMode::Accrued => self.accrued_liabilities(),
        }
    }

    /// Fetch the total liabilities for the reserve including interest accrued into the debt index
    pub fn accrued_liabilities(&self) -> Result<i128, RateError> {
        self.total_borrowed.fixed_mul_ceil(self.d_rate, SCALAR_12)
    }

    /// The amount of underlying that can still be borrowed before reaching the max utilization
    pub fn available_to_borrow(&self) -> Result<i128, RateError> {
        let max_liabilities = self
            .total_supplied
            .fixed_mul_floor(i128(self.max_util), SCALAR_7)?;
        Ok((max_liabilities - self.accrued_liabilities()?).max(0))
    }

    pub fn is_supply_capped(&self) -> bool {
        self.total_supplied >= self.supply_cap
    }

    /// Convert an amount of supplied underlying to its effective collateral value. This
    /// takes into account the collateral factor.
    ///
    /// ### Arguments
    /// * `amount` - The amount of underlying
    pub fn to_effective_collateral(&self, amount: i128) -> Result<i128, RateError> {
        amount.fixed_mul_floor(i128(self.c_factor), SCALAR_7)
    }

    /// Convert an amount of borrowed underlying to its effective liability value. This
    /// takes into account the liability factor.
    ///
    /// ### Arguments
    /// * `amount` - The amount of underlying
    pub fn to_effective_liability(&self, amount: i128) -> Result<i128, RateError> {
        amount.fixed_div_ceil(i128(self.l_factor), SCALAR_7)
    }

    /// The value of everything supplied to the reserve, in oracle price units (7 decimals)
    pub fn market_value(&self) -> Result<i128, RateError> {
        self.total_supplied.fixed_mul_floor(self.price, self.scalar)
    }

    /// Project the debt index forward to `now` at the given borrow rate
    ///
    /// ### Arguments
    /// * `borrow_rate` - The annual borrow rate (7 decimals)
    /// * `now` - The current timestamp
    pub fn project_d_rate(&self, borrow_rate: i128, now: u64) -> Result<i128, RateError> {
        let loan_accrual = calc_accrual_factor(borrow_rate, now.saturating_sub(self.last_time))?;
        loan_accrual.fixed_mul_ceil(self.d_rate, SCALAR_12)
    }

    /// Project the backstop credit forward to `now`. The backstop takes `bstop_rate` of the
    /// interest accrued on the liabilities.
    ///
    /// ### Arguments
    /// * `borrow_rate` - The annual borrow rate (7 decimals)
    /// * `now` - The current timestamp
    /// * `bstop_rate` - The backstop take rate of the pool (7 decimals)
    pub fn accrued_backstop_credit(
        &self,
        borrow_rate: i128,
        now: u64,
        bstop_rate: u32,
    ) -> Result<i128, RateError> {
        let new_d_rate = self.project_d_rate(borrow_rate, now)?;
        let new_liabilities = self.total_borrowed.fixed_mul_ceil(new_d_rate, SCALAR_12)?;
        let accrued_interest = new_liabilities - self.accrued_liabilities()?;
        if bstop_rate == 0 || accrued_interest <= 0 {
            return Ok(self.backstop_credit);
        }
        let new_backstop_credit = accrued_interest.fixed_mul_floor(i128(bstop_rate), SCALAR_7)?;
        self.backstop_credit
            .checked_add(new_backstop_credit)
            .ok_or(RateError::Overflow)
    }

    /// Compute the current rates of the reserve and the modifier that follows from them.
    ///
    /// The utilization includes interest accrued into the debt index. Nothing is returned unless
    /// every figure can be computed.
    ///
    /// ### Arguments
    /// * `pool_config` - The pool configuration
    /// * `ir_mod` - The current rate modifier of the reserve
    /// * `now` - The current timestamp
    pub fn calc_rates(
        &self,
        pool_config: &PoolConfig,
        ir_mod: &ReactiveRateModifier,
        now: u64,
    ) -> Result<ReserveRates, RateError> {
        require_valid_pool_config(pool_config)?;

        let cur_util = self.utilization(InterestMode::Accrued)?;
        let borrow_apr = calc_borrow_apr(&self.interest, cur_util, ir_mod.ir_mod())?;
        let borrow_apy = calc_borrow_apy(borrow_apr)?;
        let supply_apr = calc_supply_apr(borrow_apr, cur_util, i128(pool_config.bstop_rate))?;
        let supply_apy = calc_supply_apy(supply_apr)?;
        let next_ir_mod = ir_mod.recompute(cur_util, now)?;

        Ok(ReserveRates {
            asset: self.asset.clone(),
            utilization: cur_util,
            borrow_apr,
            borrow_apy,
            supply_apr,
            supply_apy,
            ir_mod: ir_mod.ir_mod(),
            next_ir_mod,
        })
    }
}

/// The rates of a reserve at a point in time. All figures are 7 decimals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReserveRates {
    pub asset: String,
    pub utilization: i128,
    pub borrow_apr: i128,
    pub borrow_apy: i128,
    pub supply_apr: i128,
    pub supply_apy: i128,
    /// The modifier the rates were computed with
    pub ir_mod: i128,
    /// The modifier after accounting for the observed utilization
    pub next_ir_mod: ReactiveRateModifier,
}

/// Floating point view of [`ReserveRates`], for display only
#[derive(Clone, Debug, PartialEq)]
pub struct ReserveRatesDisplay {
    pub asset: String,
    pub utilization: f64,
    pub borrow_apr: f64,
    pub borrow_apy: f64,
    pub supply_apr: f64,
    pub supply_apy: f64,
    pub ir_mod: f64,
}

impl ReserveRates {
    pub fn to_display(&self) -> ReserveRatesDisplay {
        ReserveRatesDisplay {
            asset: self.asset.clone(),
            utilization: to_float(self.utilization, 7),
            borrow_apr: to_float(self.borrow_apr, 7),
            borrow_apy: to_float(self.borrow_apy, 7),
            supply_apr: to_float(self.supply_apr, 7),
            supply_apy: to_float(self.supply_apy, 7),
            ir_mod: to_float(self.ir_mod, 7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils;

    fn scenario_reserve() -> Reserve {
        let (mut reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_config.interest = InterestRateConfig {
            util: 0_7500000,
            r_base: 0_0005000,
            r_one: 0_0300000,
            r_two: 0_1000000,
            r_three: 1_0000000,
            reactivity: 0_0000100,
        };
        reserve_data.total_supplied = 253242521580;
        reserve_data.total_borrowed = 189569995217;
        reserve_data.d_rate = 1_002_192_732_109;
        reserve_data.ir_mod = 0_2870000;
        reserve_data.last_time = 1700000000;
        Reserve::load("USDC", &reserve_config, &reserve_data).unwrap()
    }

    #[test]
    fn test_load_reserve() {
        let (mut reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_config.decimals = 9;
        reserve_data.d_rate = 1_345_678_123_000;
        reserve_data.total_borrowed = 65_0000000;
        reserve_data.total_supplied = 99_0000000;

        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.asset, "XLM");
        assert_eq!(reserve.scalar, 1_000_000_000);
        assert_eq!(reserve.d_rate, 1_345_678_123_000);
        assert_eq!(reserve.total_borrowed, 65_0000000);
        assert_eq!(reserve.total_supplied, 99_0000000);
        assert_eq!(reserve.interest, reserve_config.interest);
    }

    #[test]
    fn test_load_reserve_invalid_config() {
        let (mut reserve_config, reserve_data) = testutils::default_reserve_meta();
        reserve_config.interest.r_one = reserve_config.interest.r_two + 1;

        assert_eq!(
            Reserve::load("XLM", &reserve_config, &reserve_data),
            Err(RateError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_utilization() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.d_rate = 1_345_678_123_000;
        reserve_data.total_borrowed = 65_0000000;
        reserve_data.total_supplied = 99_0000000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.accrued_liabilities(), Ok(87_4690780));
        assert_eq!(reserve.utilization(InterestMode::Recorded), Ok(0_6565656));
        assert_eq!(reserve.utilization(InterestMode::Accrued), Ok(0_8835260));
    }

    #[test]
    fn test_utilization_scenario() {
        let reserve = scenario_reserve();

        assert_eq!(reserve.utilization(InterestMode::Recorded), Ok(0_7485709));
        assert_eq!(reserve.utilization(InterestMode::Accrued), Ok(0_7502123));
    }

    #[test]
    fn test_utilization_zero_supply() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.total_supplied = 0;
        reserve_data.total_borrowed = 0;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(
            reserve.utilization(InterestMode::Recorded),
            Err(RateError::DivisionByZero)
        );
        assert_eq!(
            reserve.utilization(InterestMode::Accrued),
            Err(RateError::DivisionByZero)
        );
    }

    #[test]
    fn test_utilization_over_one_is_reported() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.total_supplied = 100_0000000;
        reserve_data.total_borrowed = 120_0000000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.utilization(InterestMode::Accrued), Ok(1_2000000));
        assert_eq!(
            reserve.require_utilization_below_max(),
            Err(RateError::InvalidUtilRate)
        );
    }

    #[test]
    fn test_require_utilization_below_max() {
        let (reserve_config, reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.require_utilization_below_max(), Ok(()));
    }

    #[test]
    fn test_available_to_borrow() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.available_to_borrow(), Ok(20_0000000));

        reserve_data.total_borrowed = 96_0000000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.available_to_borrow(), Ok(0));
    }

    #[test]
    fn test_is_supply_capped() {
        let (mut reserve_config, reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();
        assert!(!reserve.is_supply_capped());

        reserve_config.supply_cap = reserve_data.total_supplied;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();
        assert!(reserve.is_supply_capped());
    }

    #[test]
    fn test_to_effective_values() {
        let (reserve_config, reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.to_effective_collateral(1_1234567), Ok(0_8425925));
        assert_eq!(reserve.to_effective_liability(1_1234567), Ok(1_4979423));
    }

    #[test]
    fn test_to_effective_liability_zero_l_factor() {
        let (mut reserve_config, reserve_data) = testutils::default_reserve_meta();
        reserve_config.l_factor = 0;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(
            reserve.to_effective_liability(1_0000000),
            Err(RateError::DivisionByZero)
        );
    }

    #[test]
    fn test_market_value() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.price = 1_5000000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(reserve.market_value(), Ok(150_0000000));
    }

    #[test]
    fn test_project_d_rate() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.d_rate = 1_345_678_123_000;
        reserve_data.last_time = 1000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        // (accrual: 1_000_002_852_915)
        assert_eq!(reserve.project_d_rate(0_1799492, 1500), Ok(1_345_681_962_106));
        assert_eq!(reserve.project_d_rate(0_1799492, 1000), Ok(1_345_678_123_000));
    }

    #[test]
    fn test_accrued_backstop_credit() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.backstop_credit = 0_0001000;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        // 75 borrowed accrues 0.0002140 over 500 seconds
        assert_eq!(
            reserve.accrued_backstop_credit(0_1799492, 500, 0_2000000),
            Ok(0_0001428)
        );
        assert_eq!(
            reserve.accrued_backstop_credit(0_1799492, 500, 0),
            Ok(0_0001000)
        );
    }

    #[test]
    fn test_calc_rates() {
        let (reserve_config, reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();
        let pool_config = PoolConfig {
            bstop_rate: 0_2000000,
        };

        let rates = reserve
            .calc_rates(&pool_config, &reserve.rate_modifier(), 1000)
            .unwrap();

        assert_eq!(rates.asset, "XLM");
        assert_eq!(rates.utilization, 0_7500000);
        assert_eq!(rates.borrow_apr, 0_0600000);
        assert_eq!(rates.borrow_apy, 0_0618313);
        assert_eq!(rates.supply_apr, 0_0360000);
        assert_eq!(rates.supply_apy, 0_0366429);
        assert_eq!(rates.ir_mod, 1_0000000);
        assert_eq!(rates.next_ir_mod.ir_mod(), 1_0000000);
        assert_eq!(rates.next_ir_mod.last_time(), 1000);
    }

    #[test]
    fn test_calc_rates_scenario() {
        let reserve = scenario_reserve();
        let pool_config = PoolConfig {
            bstop_rate: 0_1000000,
        };

        let rates = reserve
            .calc_rates(&pool_config, &reserve.rate_modifier(), 1700003600)
            .unwrap();

        assert_eq!(rates.utilization, 0_7502123);
        assert_eq!(rates.borrow_apr, 0_0091405);
        assert_eq!(rates.borrow_apy, 0_0091822);
        assert_eq!(rates.supply_apr, 0_0061715);
        assert_eq!(rates.supply_apy, 0_0061902);
        assert_eq!(rates.ir_mod, 0_2870000);
        assert_eq!(rates.next_ir_mod.ir_mod(), 0_2873600);
        assert_eq!(rates.next_ir_mod.last_time(), 1700003600);

        // the snapshot is untouched
        assert_eq!(reserve.ir_mod, 0_2870000);
        assert_eq!(reserve.last_time, 1700000000);
    }

    #[test]
    fn test_calc_rates_idempotent() {
        let reserve = scenario_reserve();
        let pool_config = PoolConfig {
            bstop_rate: 0_1000000,
        };
        let ir_mod = reserve.rate_modifier();

        let first = reserve.calc_rates(&pool_config, &ir_mod, 1700003600);
        let second = reserve.calc_rates(&pool_config, &ir_mod, 1700003600);

        assert_eq!(first, second);
    }

    #[test]
    fn test_calc_rates_zero_supply() {
        let (reserve_config, mut reserve_data) = testutils::default_reserve_meta();
        reserve_data.total_supplied = 0;
        reserve_data.total_borrowed = 0;
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();

        assert_eq!(
            reserve.calc_rates(&PoolConfig::default(), &reserve.rate_modifier(), 1000),
            Err(RateError::DivisionByZero)
        );
    }

    #[test]
    fn test_calc_rates_invalid_pool_config() {
        let (reserve_config, reserve_data) = testutils::default_reserve_meta();
        let reserve = Reserve::load("XLM", &reserve_config, &reserve_data).unwrap();
        let pool_config = PoolConfig {
            bstop_rate: 1_0000000,
        };

        assert_eq!(
            reserve.calc_rates(&pool_config, &reserve.rate_modifier(), 1000),
            Err(RateError::InvalidConfiguration)
        );
    }

    #[test]
    fn test_to_display() {
        let reserve = scenario_reserve();
        let rates = reserve
            .calc_rates(&PoolConfig::default(), &reserve.rate_modifier(), 1700000000)
            .unwrap();

        let display = rates.to_display();

        assert_eq!(display.asset, "USDC");
        assert!((display.utilization - 0.7502123).abs() < 1e-9);
        assert!((display.borrow_apr - 0.0091405).abs() < 1e-9);
        assert!((display.ir_mod - 0.287).abs() < 1e-9);
    }
}
