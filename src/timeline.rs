/// Timestamp reconstruction for raw precipitation series.
///
/// Source files carry a timestamp column that is known to be unreliable
/// (duplicated, shifted, or absent), so it is discarded entirely and a
/// synthetic regular grid is substituted: reading k is stamped
/// `base epoch + k × sampling interval`. The base epoch is a fixed
/// constant, which keeps repeated runs over the same input byte-identical.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::model::RainRecord;

/// Fixed origin of the reconstructed grid: 2000-01-01T00:00:00Z.
pub fn base_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

/// Stamps raw precipitation values onto the synthetic time grid.
///
/// Pure transform; succeeds for any input length, including empty.
pub fn reconstruct(values: &[f64], interval_minutes: u32) -> Vec<RainRecord> {
    let base = base_epoch();

    values
        .iter()
        .enumerate()
        .map(|(k, &precip_mm)| RainRecord {
            timestamp: base + Duration::minutes(k as i64 * interval_minutes as i64),
            precip_mm,
        })
        .collect()
}
