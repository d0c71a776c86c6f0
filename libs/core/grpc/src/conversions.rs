//! `chrono` ↔ `google.protobuf.Timestamp` conversions
//!
//! ```ignore
//! use grpc_client::conversions::*;
//!
//! let ts = datetime_to_timestamp(Utc::now());
//! let back = timestamp_to_datetime(&ts)?;
//! ```

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

/// Convert a `DateTime<Utc>` into a protobuf `Timestamp` (nanosecond precision).
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> Timestamp {
  Timestamp {
    seconds: dt.timestamp(),
    nanos: dt.timestamp_subsec_nanos() as i32,
  }
}

/// Convert a protobuf `Timestamp` into a `DateTime<Utc>`.
///
/// Returns an error when the value lies outside the range chrono can represent
/// or `nanos` is negative / not below one second.
pub fn timestamp_to_datetime(ts: &Timestamp) -> Result<DateTime<Utc>, String> {
  let nanos = u32::try_from(ts.nanos)
    .map_err(|_| format!("Invalid timestamp nanos: {}", ts.nanos))?;
  DateTime::from_timestamp(ts.seconds, nanos)
    .ok_or_else(|| format!("Timestamp out of range: {}s {}ns", ts.seconds, ts.nanos))
}
