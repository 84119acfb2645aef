use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipLine {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub rating: f64,
    pub reviews: u64,
    #[serde(default)]
    pub image: Option<String>,
    pub line: ShipLine,
}

/// One bookable travel package as returned by the cruise data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cruise {
    pub price: f64,
    pub name: String,
    pub ship: Ship,
    #[serde(default)]
    pub itinerary: Vec<String>,
    pub region: String,
    pub departure_date: String, // ISO 8601
    pub return_date: String,    // ISO 8601
    pub duration: u32,
}

impl Cruise {
    /// Departure as epoch milliseconds, `None` when the date does not parse.
    pub fn departure_millis(&self) -> Option<i64> {
        parse_iso_date(&self.departure_date).map(|d| d.timestamp_millis())
    }
}

/// Wire shape of `GET /api/cruises`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CruiseResults {
    pub results: Vec<Cruise>,
}

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

const OFFSET_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parses an ISO 8601 date or date-time, keeping the offset it was written in.
/// Seconds are optional, `Z` means UTC, and zone-less values are read as UTC.
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(dt);
    }

    let naive = value.strip_suffix(&['Z', 'z'][..]).unwrap_or(value);
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
    {
        return Some(dt.and_utc().fixed_offset());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

/// The instant a date string denotes, for ordering.
pub fn parse_iso_date(value: &str) -> Option<DateTime<Utc>> {
    parse_iso_datetime(value).map(|dt| dt.with_timezone(&Utc))
}

/// The calendar day a date string names, read in its own offset.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    parse_iso_datetime(value).map(|dt| dt.date_naive())
}

/// Decodes a response body into the record list.
///
/// A body without a `results` list is reported as malformed rather than
/// treated as an empty collection.
pub fn decode_results(body: &[u8]) -> Result<Vec<Cruise>, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::Malformed(format!("invalid JSON: {}", e)))?;

    match value.get("results") {
        Some(serde_json::Value::Array(_)) => {}
        Some(_) => return Err(FetchError::Malformed("`results` is not a list".to_string())),
        None => return Err(FetchError::Malformed("missing `results` field".to_string())),
    }

    serde_json::from_value::<CruiseResults>(value)
        .map(|payload| payload.results)
        .map_err(|e| FetchError::Malformed(format!("invalid cruise record: {}", e)))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn cruise(name: &str, price: f64, duration: u32, departure: &str) -> Cruise {
        Cruise {
            price,
            name: name.to_string(),
            ship: Ship {
                name: "Wonder of the Seas".to_string(),
                rating: 4.5,
                reviews: 1200,
                image: None,
                line: ShipLine {
                    name: "Royal Caribbean".to_string(),
                    logo: None,
                },
            },
            itinerary: vec!["Miami, Florida".to_string(), "Nassau, Bahamas".to_string()],
            region: "Caribbean".to_string(),
            departure_date: departure.to_string(),
            return_date: departure.to_string(),
            duration,
        }
    }

    /// `count` records priced 100, 200, ... departing on consecutive days.
    pub fn numbered(count: usize) -> Vec<Cruise> {
        (1..=count)
            .map(|i| {
                let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(i as i64);
                cruise(
                    &format!("cruise {}", i),
                    (i * 100) as f64,
                    (i % 7 + 3) as u32,
                    &day.format("%Y-%m-%d").to_string(),
                )
            })
            .collect()
    }
}
