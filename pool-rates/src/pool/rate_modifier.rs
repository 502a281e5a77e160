use cast::i128;

use crate::{
    constants::{DEFAULT_IR_MOD, MAX_IR_MOD, MIN_IR_MOD, SCALAR_7},
    dependencies::Clock,
    errors::RateError,
    fixed_point::FixedPoint,
    types::InterestRateConfig,
};

/// The reactive interest rate modifier of a reserve.
///
/// The modifier drifts up while the reserve is utilized above its target and down while it is
/// utilized below, at a speed proportional to the elapsed time and the reserve's reactivity. It
/// always stays within [`MIN_IR_MOD`, `MAX_IR_MOD`].
///
/// A modifier is never updated in place. `recompute` returns the next modifier and leaves the
/// current one untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReactiveRateModifier {
    ir_mod: i128,      // the current modifier (7 decimals)
    last_time: u64,    // the last time the modifier was recomputed
    target_util: i128, // the target utilization of the reserve (7 decimals)
    reactivity: i128,  // the reactivity constant of the reserve (7 decimals)
}

impl ReactiveRateModifier {
    /// Create a modifier for a new reserve, starting at 1x
    ///
    /// ### Arguments
    /// * `config` - The interest rate configuration of the reserve
    /// * `now` - The current timestamp
    pub fn new(config: &InterestRateConfig, now: u64) -> Self {
        ReactiveRateModifier {
            ir_mod: DEFAULT_IR_MOD,
            last_time: now,
            target_util: i128(config.util),
            reactivity: i128(config.reactivity),
        }
    }

    /// Create a modifier from its raw on-chain value. Values outside the modifier bounds are
    /// clamped into them.
    ///
    /// ### Arguments
    /// * `ir_mod` - The raw modifier (7 decimals)
    /// * `last_time` - The last time the modifier was updated
    /// * `config` - The interest rate configuration of the reserve
    pub fn from_raw(ir_mod: i128, last_time: u64, config: &InterestRateConfig) -> Self {
        ReactiveRateModifier {
            ir_mod: ir_mod.clamp(MIN_IR_MOD, MAX_IR_MOD),
            last_time,
            target_util: i128(config.util),
            reactivity: i128(config.reactivity),
        }
    }

    /// The current modifier (7 decimals)
    pub fn ir_mod(&self) -> i128 {
        self.ir_mod
    }

    /// The last time the modifier was recomputed
    pub fn last_time(&self) -> u64 {
        self.last_time
    }

    pub fn target_util(&self) -> i128 {
        self.target_util
    }

    pub fn reactivity(&self) -> i128 {
        self.reactivity
    }

    pub fn is_at_minimum(&self) -> bool {
        self.ir_mod == MIN_IR_MOD
    }

    pub fn is_at_maximum(&self) -> bool {
        self.ir_mod == MAX_IR_MOD
    }

    /// Seconds since the modifier was last recomputed. For display only.
    pub fn time_since_last_update<C: Clock>(&self, clock: &C) -> u64 {
        clock.timestamp().saturating_sub(self.last_time)
    }

    /// Compute the next modifier for the observed utilization.
    ///
    /// A `now` earlier than the last update applies no change and keeps the last update time.
    ///
    /// ### Arguments
    /// * `cur_util` - The current utilization of the reserve (7 decimals)
    /// * `now` - The current timestamp
    ///
    /// ### Errors
    /// `DivisionByZero` if the target utilization is 0, or 1 with utilization above it,
    /// `Overflow` if an intermediate value is not representable
    pub fn recompute(&self, cur_util: i128, now: u64) -> Result<Self, RateError> {
        if self.target_util == 0 {
            return Err(RateError::DivisionByZero);
        }
        // scale delta time to 7 decimals
        let delta_time_scaled = i128(now.saturating_sub(self.last_time))
            .checked_mul(SCALAR_7)
            .ok_or(RateError::Overflow)?;

        let next_ir_mod = if cur_util > self.target_util {
            // rate modifier increasing
            let util_error = (cur_util - self.target_util)
                .fixed_div_ceil(SCALAR_7 - self.target_util, SCALAR_7)?;
            let rate_dif = util_error
                .fixed_mul_ceil(self.reactivity, SCALAR_7)?
                .fixed_mul_ceil(delta_time_scaled, SCALAR_7)?;
            self.ir_mod.saturating_add(rate_dif)
        } else if cur_util < self.target_util {
            // rate modifier decreasing
            let util_error = (self.target_util - cur_util)
                .fixed_div_ceil(self.target_util, SCALAR_7)?;
            let rate_dif = util_error
                .fixed_mul_ceil(self.reactivity, SCALAR_7)?
                .fixed_mul_ceil(delta_time_scaled, SCALAR_7)?;
            MIN_IR_MOD.max(self.ir_mod.saturating_sub(rate_dif))
        } else {
            self.ir_mod
        };

        Ok(ReactiveRateModifier {
            ir_mod: next_ir_mod.clamp(MIN_IR_MOD, MAX_IR_MOD),
            last_time: self.last_time.max(now),
            target_util: self.target_util,
            reactivity: self.reactivity,
        })
    }
}
