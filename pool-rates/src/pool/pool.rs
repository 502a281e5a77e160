use std::collections::BTreeMap;

use crate::{
    dependencies::{Clock, RateSink, ReserveDataSource},
    errors::RateError,
    events,
    types::PoolConfig,
};

use super::{
    config::require_valid_pool_config,
    rate_modifier::ReactiveRateModifier,
    reserve::{Reserve, ReserveRates},
};

/// Estimates the rates of every reserve in a pool.
///
/// The pool owns the rate modifier of each reserve it has seen. A modifier is seeded from the
/// recorded reserve data the first time the reserve is updated, and from then on only moves
/// through `update_reserve`.
pub struct Pool<D, S, C> {
    pub config: PoolConfig,
    source: D,
    sink: S,
    clock: C,
    modifiers: BTreeMap<String, ReactiveRateModifier>,
}

impl<D: ReserveDataSource, S: RateSink, C: Clock> Pool<D, S, C> {
    /// Create a pool estimator
    ///
    /// ### Arguments
    /// * `config` - The pool configuration
    /// * `source` - Where reserve data is loaded from
    /// * `sink` - Where computed rates are published
    /// * `clock` - The source of the current timestamp
    ///
    /// ### Errors
    /// `InvalidConfiguration` if the pool configuration is invalid
    pub fn new(config: PoolConfig, source: D, sink: S, clock: C) -> Result<Self, RateError> {
        require_valid_pool_config(&config)?;
        Ok(Pool {
            config,
            source,
            sink,
            clock,
            modifiers: BTreeMap::new(),
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The rate modifier currently held for a reserve, if the reserve was updated before
    pub fn rate_modifier(&self, asset: &str) -> Option<&ReactiveRateModifier> {
        self.modifiers.get(asset)
    }

    /// Load a reserve snapshot from the data source
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset identifier
    ///
    /// ### Errors
    /// `ReserveNotFound` if the pool has no reserve for the asset, `InvalidConfiguration` if the
    /// loaded reserve is invalid
    pub fn load_reserve(&self, asset: &str) -> Result<Reserve, RateError> {
        let (reserve_config, reserve_data) = self
            .source
            .load_reserve(asset)
            .ok_or(RateError::ReserveNotFound)?;
        Reserve::load(asset, &reserve_config, &reserve_data)
    }

    /// Compute the rates of a reserve at the current time and keep the next rate modifier.
    ///
    /// Publishes the rates, and a modifier event when the modifier moved. A failure is published
    /// as well and leaves the held modifier untouched.
    ///
    /// ### Arguments
    /// * `asset` - The underlying asset identifier
    pub fn update_reserve(&mut self, asset: &str) -> Result<ReserveRates, RateError> {
        match self.calc_reserve_rates(asset) {
            Ok(rates) => {
                self.modifiers.insert(asset.to_string(), rates.next_ir_mod);
                events::reserve_rates(&mut self.sink, asset, &rates);
                if rates.next_ir_mod.ir_mod() != rates.ir_mod {
                    events::rate_modifier(
                        &mut self.sink,
                        asset,
                        rates.ir_mod,
                        rates.next_ir_mod.ir_mod(),
                    );
                }
                Ok(rates)
            }
            Err(error) => {
                events::rate_failure(&mut self.sink, asset, error);
                Err(error)
            }
        }
    }

    /// Update every reserve of the pool, in the order the data source lists them
    pub fn update_all(&mut self) -> Vec<(String, Result<ReserveRates, RateError>)> {
        self.source
            .reserve_list()
            .into_iter()
            .map(|asset| {
                let result = self.update_reserve(&asset);
                (asset, result)
            })
            .collect()
    }

    fn calc_reserve_rates(&self, asset: &str) -> Result<ReserveRates, RateError> {
        let reserve = self.load_reserve(asset)?;
        let ir_mod = match self.modifiers.get(asset) {
            // a held modifier follows the latest curve configuration of the reserve
            Some(held) if held.last_time() >= reserve.last_time => {
                ReactiveRateModifier::from_raw(held.ir_mod(), held.last_time(), &reserve.interest)
            }
            _ => reserve.rate_modifier(),
        };
        reserve.calc_rates(&self.config, &ir_mod, self.clock.timestamp())
    }
}
