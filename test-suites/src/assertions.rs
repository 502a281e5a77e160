use pool_rates::{FixedPoint, SCALAR_7};

/// Assert `a` is within `delta` of `b`, exclusive
pub fn assert_approx_eq_abs(a: i128, b: i128, delta: i128) {
    assert!(
        a > b - delta && a < b + delta,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        delta
    );
}

/// Assert `a` is within `delta` percent of `b`, exclusive. `delta` is expressed in 7 decimals,
/// such that 1_0000000 is 1%.
pub fn assert_approx_eq_rel(a: i128, b: i128, delta: i128) {
    let epsilon = b
        .abs()
        .fixed_mul_floor(delta, SCALAR_7)
        .and_then(|scaled| scaled.fixed_div_floor(100_0000000, SCALAR_7))
        .unwrap();
    assert!(
        a > b - epsilon && a < b + epsilon,
        "assertion failed: `(left != right)` \
         (left: `{:?}`, right: `{:?}`, epsilon: `{:?}`)",
        a,
        b,
        epsilon
    );
}
