use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    events::RateEvent,
    types::{ReserveConfig, ReserveData},
};

/// Source of raw reserve data, usually a chain data client
pub trait ReserveDataSource {
    /// The assets of every reserve in the pool
    fn reserve_list(&self) -> Vec<String>;

    /// Fetch the configuration and the last recorded data of a reserve, or None if the pool has
    /// no reserve for `asset`
    fn load_reserve(&self, asset: &str) -> Option<(ReserveConfig, ReserveData)>;
}

/// Consumer of computed rates
pub trait RateSink {
    fn publish(&mut self, event: RateEvent);
}

/// Source of the current timestamp in seconds
pub trait Clock {
    fn timestamp(&self) -> u64;
}

/// Clock backed by the local wall time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

impl<T: RateSink + ?Sized> RateSink for &mut T {
    fn publish(&mut self, event: RateEvent) {
        (**self).publish(event)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn timestamp(&self) -> u64 {
        (**self).timestamp()
    }
}

impl<T: ReserveDataSource + ?Sized> ReserveDataSource for &T {
    fn reserve_list(&self) -> Vec<String> {
        (**self).reserve_list()
    }

    fn load_reserve(&self, asset: &str) -> Option<(ReserveConfig, ReserveData)> {
        (**self).load_reserve(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_after_epoch() {
        // 2023-01-01
        assert!(SystemClock.timestamp() > 1672531200);
    }
}
