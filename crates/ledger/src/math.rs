//! Pure balance arithmetic over integer cents.
//!
//! These functions are stateless and total over their numeric domain: no
//! overflow checks, no sufficiency checks. Values are assumed to fit `i64`.

/// New balance after adding funds.
pub fn deposit(balance: i64, amount: i64) -> i64 {
    balance + amount
}

/// New balance after removing funds.
///
/// No sufficiency check; the result may be negative. Overdraft is a
/// bookkeeping fact here, not a credit decision.
pub fn withdraw(balance: i64, amount: i64) -> i64 {
    balance - amount
}

/// New balance after deducting a fee.
pub fn fee(balance: i64, fee_amount: i64) -> i64 {
    balance - fee_amount
}

/// Simple interest earned on `balance` at `apr` over `days`, truncated
/// toward zero to whole cents.
///
/// The `days / basis` fraction is computed in floating point before the
/// multiply; the final cast truncates, it does not round. `basis` must be
/// non-zero (conventionally 360 or 365); callers guard that.
pub fn simple_interest(balance: i64, apr: f64, days: i32, basis: i32) -> i64 {
    let fraction = f64::from(days) / f64::from(basis);
    (balance as f64 * apr * fraction) as i64
}
