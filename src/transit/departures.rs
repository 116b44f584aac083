//! Departure normalization.
//!
//! The provider's `AllDepartures` field has no stable shape: it may be
//! missing, a map from opaque keys to single trips or lists of trips, or a
//! plain list. This module flattens whatever arrives into a time-ordered,
//! size-bounded list of [`Departure`] records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::TransitError;

/// Format of the provider's `Time` field.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of departures returned when the caller does not say.
pub const DEFAULT_LIMIT: usize = 10;

/// One departure, reduced to the fields clients use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Line or service identifier (e.g. "LW").
    pub line: Option<String>,
    /// Name of the last stop.
    pub destination: Option<String>,
    /// Scheduled time, verbatim from the provider.
    pub time: String,
    /// Platform, verbatim (often "-" until assigned).
    pub platform: Option<String>,
    /// Status or info text.
    pub status: Option<String>,
}

/// What to do with a departure whose time cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePolicy {
    /// Fail the whole call.
    #[default]
    Abort,
    /// Drop that departure and keep going.
    Skip,
}

impl TimePolicy {
    /// `Skip` when `skip` is set, `Abort` otherwise.
    #[must_use]
    pub const fn from_skip_flag(skip: bool) -> Self {
        if skip {
            Self::Skip
        } else {
            Self::Abort
        }
    }
}

/// A value found where the provider may put a trip.
#[derive(Debug)]
enum RawEntry<'a> {
    Record(&'a Map<String, Value>),
    List(&'a [Value]),
    Other,
}

impl<'a> From<&'a Value> for RawEntry<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Record(map),
            Value::Array(items) => Self::List(items),
            _ => Self::Other,
        }
    }
}

/// Returns the `AllDepartures` field of a provider response, or `null`.
#[must_use]
pub fn all_departures(payload: &Value) -> &Value {
    payload.get("AllDepartures").unwrap_or(&Value::Null)
}

/// Flattens, filters, sorts and truncates raw departures.
///
/// `raw` is the `AllDepartures` value. Records without a usable `Time` are
/// dropped. The sort is stable, so departures sharing a time keep provider
/// order.
///
/// # Errors
///
/// Returns [`TransitError::InvalidTime`] under [`TimePolicy::Abort`] when a
/// kept record's time does not parse.
///
/// # Examples
///
/// ```
/// use bubu::transit::{normalize_departures, TimePolicy};
/// use serde_json::json;
///
/// let raw = json!({"Trip": [
///     {"Service": "LW", "Time": "2024-05-01 08:10:00", "Stops": [{"Name": "Aldershot"}]},
///     {"Service": "LE", "Time": "2024-05-01 08:05:00", "Stops": []},
/// ]});
/// let out = normalize_departures(&raw, 10, TimePolicy::Abort).unwrap();
/// assert_eq!(out[0].line.as_deref(), Some("LE"));
/// assert_eq!(out[1].destination.as_deref(), Some("Aldershot"));
/// ```
pub fn normalize_departures(
    raw: &Value,
    limit: usize,
    policy: TimePolicy,
) -> Result<Vec<Departure>, TransitError> {
    let records = collect_records(raw);
    let mut keyed = Vec::with_capacity(records.len());

    for record in records {
        let Some(departure) = extract(record) else {
            continue;
        };

        match NaiveDateTime::parse_from_str(departure.time.trim(), TIME_FORMAT) {
            Ok(at) => keyed.push((at, departure)),
            Err(_) if policy == TimePolicy::Skip => {
                warn!(time = %departure.time, "Skipping departure with unparseable time");
            }
            Err(_) => {
                return Err(TransitError::InvalidTime {
                    time: departure.time,
                })
            }
        }
    }

    keyed.sort_by_key(|(at, _)| *at);
    debug!(kept = keyed.len(), limit, "Normalized departures");

    Ok(keyed
        .into_iter()
        .take(limit)
        .map(|(_, departure)| departure)
        .collect())
}

/// Steps 1 and 2: top-level values, then one level of list flattening.
fn collect_records(raw: &Value) -> Vec<&Map<String, Value>> {
    let values: Vec<&Value> = match raw {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };

    let mut records = Vec::new();
    for value in values {
        match RawEntry::from(value) {
            RawEntry::Record(record) => records.push(record),
            RawEntry::List(items) => {
                records.extend(items.iter().filter_map(Value::as_object));
            }
            RawEntry::Other => {}
        }
    }
    records
}

/// Steps 3 and 4: drop records without a time, pull out the fields.
fn extract(record: &Map<String, Value>) -> Option<Departure> {
    let time = match record.get("Time") {
        Some(Value::String(time)) if !time.trim().is_empty() => time.clone(),
        _ => return None,
    };

    let destination = record
        .get("Stops")
        .and_then(Value::as_array)
        .and_then(|stops| stops.last())
        .and_then(|stop| text_field(stop.get("Name")));

    Some(Departure {
        line: text_field(record.get("Service")),
        destination,
        time,
        platform: text_field(record.get("Platform")),
        status: text_field(record.get("Info")),
    })
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
