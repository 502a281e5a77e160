use crate::{dependencies::RateSink, errors::RateError, pool::ReserveRates};

/// Events published by the estimator to its sink
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateEvent {
    /// Rates were computed for a reserve
    ReserveRates { asset: String, rates: ReserveRates },
    /// The interest rate modifier of a reserve moved (7 decimals)
    RateModifier { asset: String, old: i128, new: i128 },
    /// Rates could not be computed for a reserve
    RateFailure { asset: String, error: RateError },
}

impl RateEvent {
    /// The topic the event is published under
    pub fn topic(&self) -> &'static str {
        match self {
            RateEvent::ReserveRates { .. } => "reserve_rates",
            RateEvent::RateModifier { .. } => "rate_modifier",
            RateEvent::RateFailure { .. } => "rate_failure",
        }
    }

    /// The reserve asset the event is about
    pub fn asset(&self) -> &str {
        match self {
            RateEvent::ReserveRates { asset, .. }
            | RateEvent::RateModifier { asset, .. }
            | RateEvent::RateFailure { asset, .. } => asset,
        }
    }
}

pub(crate) fn reserve_rates<S: RateSink>(sink: &mut S, asset: &str, rates: &ReserveRates) {
    sink.publish(RateEvent::ReserveRates {
        asset: asset.to_string(),
        rates: rates.clone(),
    });
}

pub(crate) fn rate_modifier<S: RateSink>(sink: &mut S, asset: &str, old: i128, new: i128) {
    sink.publish(RateEvent::RateModifier {
        asset: asset.to_string(),
        old,
        new,
    });
}

pub(crate) fn rate_failure<S: RateSink>(sink: &mut S, asset: &str, error: RateError) {
    sink.publish(RateEvent::RateFailure {
        asset: asset.to_string(),
        error,
    });
}
