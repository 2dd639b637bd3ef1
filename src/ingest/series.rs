/// Text series input adapter.
///
/// The statistical-file reader that produces the raw precipitation column
/// is an external collaborator; this adapter accepts its simplest export:
/// delimited text with one reading per line. Lines may carry leading
/// columns (e.g. the original timestamp, which the pipeline discards
/// anyway) — only the last comma-separated field is read. `#` comments and
/// blank lines are skipped, and one leading non-numeric line is tolerated
/// as a header.
///
/// Invalid readings (non-finite, or negative sentinels such as -999) are
/// substituted with 0.0 and counted, which preserves the non-negativity
/// the cumulative curves rely on.

use crate::logging::{self, Stage};

/// A parsed precipitation series plus ingest hygiene counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSeries {
    /// Precipitation readings in file order, all finite and non-negative.
    pub values: Vec<f64>,
    /// Readings replaced with 0.0 (negative or non-finite in the source).
    pub substituted: usize,
}

/// Parses a precipitation series from delimited text.
///
/// A non-numeric line after the first data line is an error: silently
/// skipping mid-file garbage would shift every later reading on the
/// reconstructed time grid.
pub fn parse_series(text: &str) -> Result<ParsedSeries, Box<dyn std::error::Error>> {
    let mut values = Vec::new();
    let mut substituted = 0;
    let mut header_allowed = true;

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // rsplit always yields at least one field
        let field = line.rsplit(',').next().unwrap_or(line).trim();

        match field.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                values.push(v);
                header_allowed = false;
            }
            Ok(_) => {
                values.push(0.0);
                substituted += 1;
                header_allowed = false;
            }
            Err(_) if header_allowed => {
                // Header line; tolerated once, before any data.
                header_allowed = false;
            }
            Err(_) => {
                return Err(format!(
                    "line {}: unparseable precipitation value '{}'",
                    line_no + 1,
                    field
                )
                .into());
            }
        }
    }

    if substituted > 0 {
        logging::warn(
            Stage::Ingest,
            None,
            &format!("{} invalid readings substituted with 0.0", substituted),
        );
    }

    Ok(ParsedSeries {
        values,
        substituted,
    })
}
