/********** Numbers **********/

/// Fixed-point scalar for 7 decimal numbers
pub const SCALAR_7: i128 = 1_0000000;

/// Fixed-point scalar for 12 decimal numbers
pub const SCALAR_12: i128 = 1_000_000_000_000;

// seconds per year
pub const SECONDS_PER_YEAR: i128 = 31536000;

/// The largest decimal scale supported for reserves and conversions
pub const MAX_DECIMALS: u32 = 18;

/********** Interest Rate Curve **********/

/// Utilization at which the curve switches from `r_two` to `r_three` (7 decimals)
pub const FIXED_95_PERCENT: i128 = 0_9500000;

/// Width of the final curve segment (7 decimals)
pub const FIXED_5_PERCENT: i128 = 0_0500000;

/// Upper bound of the reactivity constant (7 decimals)
pub const MAX_REACTIVITY: i128 = 0_0005000;

/********** Rate Modifier **********/

/// Lower bound of the interest rate modifier (7 decimals)
pub const MIN_IR_MOD: i128 = 0_1000000;

/// Upper bound of the interest rate modifier (7 decimals)
pub const MAX_IR_MOD: i128 = 10_0000000;

/// Modifier assigned to a freshly created reserve (7 decimals)
pub const DEFAULT_IR_MOD: i128 = 1_0000000;

/********** Compounding **********/

// borrower interest compounds roughly daily through pool actions
pub const BORROW_COMPOUNDING_PERIODS: u32 = 365;

// supplier interest is realized roughly weekly through backstop interest auctions
pub const SUPPLY_COMPOUNDING_PERIODS: u32 = 52;
