use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use crate::{
    dependencies::{Clock, RateSink, ReserveDataSource},
    events::RateEvent,
    types::{InterestRateConfig, ReserveConfig, ReserveData},
};

pub fn default_interest_config() -> InterestRateConfig {
    InterestRateConfig {
        util: 0_7500000,
        r_base: 0_0100000,
        r_one: 0_0500000,
        r_two: 0_5000000,
        r_three: 1_5000000,
        reactivity: 0_0000020, // 2e-6
    }
}

pub fn default_reserve_meta() -> (ReserveConfig, ReserveData) {
    (
        ReserveConfig {
            decimals: 7,
            c_factor: 0_7500000,
            l_factor: 0_7500000,
            max_util: 0_9500000,
            supply_cap: 1_000_000_000_0000000,
            enabled: true,
            interest: default_interest_config(),
        },
        ReserveData {
            total_supplied: 100_0000000,
            total_borrowed: 75_0000000,
            last_borrow_rate: 0,
            last_supply_rate: 0,
            d_rate: 1_000_000_000_000,
            backstop_credit: 0,
            ir_mod: 1_0000000,
            last_time: 0,
            price: 1_0000000,
        },
    )
}

//************************************************
//           Collaborator Mocks
//************************************************

/// A clock stuck at a single timestamp
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn timestamp(&self) -> u64 {
        self.0
    }
}

/// A clock that can be moved by hand, like setting the ledger timestamp in a contract test
#[derive(Debug, Default)]
pub struct MockClock {
    time: Cell<u64>,
}

impl MockClock {
    pub fn new(time: u64) -> Self {
        MockClock {
            time: Cell::new(time),
        }
    }

    pub fn set(&self, time: u64) {
        self.time.set(time);
    }

    pub fn advance(&self, seconds: u64) {
        self.time.set(self.time.get() + seconds);
    }
}

impl Clock for MockClock {
    fn timestamp(&self) -> u64 {
        self.time.get()
    }
}

/// An in-memory reserve data source. Reserves are listed in the order they were first set.
#[derive(Debug, Default)]
pub struct MockReserveSource {
    reserves: RefCell<BTreeMap<String, (ReserveConfig, ReserveData)>>,
    list: RefCell<Vec<String>>,
}

impl MockReserveSource {
    pub fn set_reserve(&self, asset: &str, config: ReserveConfig, data: ReserveData) {
        let previous = self
            .reserves
            .borrow_mut()
            .insert(asset.to_string(), (config, data));
        if previous.is_none() {
            self.list.borrow_mut().push(asset.to_string());
        }
    }
}

impl ReserveDataSource for MockReserveSource {
    fn reserve_list(&self) -> Vec<String> {
        self.list.borrow().clone()
    }

    fn load_reserve(&self, asset: &str) -> Option<(ReserveConfig, ReserveData)> {
        self.reserves.borrow().get(asset).cloned()
    }
}

/// A sink that keeps every published event
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<RateEvent>,
}

impl RateSink for RecordingSink {
    fn publish(&mut self, event: RateEvent) {
        self.events.push(event);
    }
}
