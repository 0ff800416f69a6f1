//! Request validation for the assessment endpoint
//!
//! These checks run before the pipeline starts; a failure here produces a
//! client error and no external call is made.

use chrono::NaiveDate;

pub const MIN_ADDRESS_LENGTH: usize = 5;
pub const MAX_ADDRESS_LENGTH: usize = 200;

/// Validate a site address is within the accepted length bounds
pub fn validate_site_address(address: &str) -> Result<(), &'static str> {
    let length = address.trim().chars().count();
    if length < MIN_ADDRESS_LENGTH {
        return Err("Site address must be at least 5 characters");
    }
    if length > MAX_ADDRESS_LENGTH {
        return Err("Site address must be at most 200 characters");
    }
    Ok(())
}

/// Parse a pour date. Accepts a plain ISO calendar date; a trailing time
/// component is tolerated and ignored.
pub fn parse_pour_date(raw: &str) -> Result<NaiveDate, &'static str> {
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be a valid ISO calendar date (YYYY-MM-DD)")
}
