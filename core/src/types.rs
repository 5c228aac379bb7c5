//! Shared primitive types used across the entire model.

/// A simulated month. Month 1 is the first simulated month.
pub type Month = u32;

/// Labor hours.
pub type Hours = f64;

/// A monetary amount in the catalog's currency.
pub type Currency = f64;

/// Billable hours one team member covers per month.
pub const HOURS_PER_PERSON_PER_MONTH: Hours = 180.0;

/// `part / whole * 100`, or 0 when `whole` is not positive.
///
/// Zero capacity reports 0% utilization rather than dividing by zero.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}
