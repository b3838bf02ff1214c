//! Boundary validation for everything arriving over the wire.
//!
//! Pure functions; handlers translate the errors into 400 responses
//! before anything reaches the store or the calculator.

use meter_client::domain::{Baseline, MeterId, Reading};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::api::ApiError;

/// Wire format for reading dates.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

pub fn parse_meter_id(raw: i64) -> Result<MeterId, ApiError> {
    MeterId::try_from(raw).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Query-string variant: the parameter arrives as text, when it arrives
/// at all.
pub fn parse_meter_id_param(raw: Option<&str>) -> Result<MeterId, ApiError> {
    let raw = raw.ok_or_else(|| {
        ApiError::Validation("meter_id query parameter is required".to_string())
    })?;
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("meter_id must be a valid number".to_string()))?;
    parse_meter_id(id)
}

pub fn parse_reading_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), DATE_FORMAT).map_err(|_| {
        ApiError::Validation("reading_date must be a valid YYYY-MM-DD date".to_string())
    })
}

pub fn parse_units(field: &str, value: f64) -> Result<f64, ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

pub fn new_reading(meter_id: i64, reading_date: &str, total_units: f64) -> Result<Reading, ApiError> {
    Ok(Reading {
        meter_id: parse_meter_id(meter_id)?,
        reading_date: parse_reading_date(reading_date)?,
        units: parse_units("total_units", total_units)?,
    })
}

pub fn new_baseline(meter_id: i64, reading_date: &str, units: f64) -> Result<Baseline, ApiError> {
    Ok(Baseline {
        meter_id: parse_meter_id(meter_id)?,
        reading_date: parse_reading_date(reading_date)?,
        units: parse_units("units", units)?,
    })
}
