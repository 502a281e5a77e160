use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Error)]
#[repr(u32)]
/// Error codes for the rate estimator. Codes shared with the pool contract keep the contract's
/// numbering so a failure can be matched against on-chain results. Estimator specific errors
/// start at 1220.
pub enum RateError {
    // Common Errors
    #[error("fixed point result is not representable")]
    Overflow = 12,

    // Pool Request Errors
    #[error("reserve configuration is outside the admissible domain")]
    InvalidConfiguration = 1202,

    // Pool State Errors
    #[error("utilization is above the reserve maximum")]
    InvalidUtilRate = 1207,
    #[error("reserve not found")]
    ReserveNotFound = 1209,

    // Estimator Errors (start at 1220)
    #[error("division by zero")]
    DivisionByZero = 1220,
}

impl RateError {
    /// The numeric error code, matching the pool contract where the error is shared
    pub fn code(&self) -> u32 {
        *self as u32
    }
}
