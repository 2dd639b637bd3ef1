/// Report construction for the export layer.
///
/// The pipeline hands two kinds of tables to whatever writes the final
/// artifact (spreadsheet, delimited text, JSON):
///
///   - one audit table per duration class, with every candidate event's
///     normalized curve row by row — the full trail the ranking worked
///     from;
///   - one summary table with the ranked event and fitted coefficients
///     per class.
///
/// Audit tables stream directly to an `io::Write` sink: a year-long class
/// can hold millions of candidate rows and is never materialized whole.
/// Table names are capped at 31 characters, the sheet-name limit of the
/// spreadsheet formats the exports target.

use std::io::Write;

use crate::analysis::normalize::normalize_event;
use crate::analysis::summary::ClassResult;
use crate::model::{RainRecord, SummaryRow};

/// Sheet-name length limit imposed by spreadsheet export targets.
pub const MAX_TABLE_NAME_LEN: usize = 31;

/// Table name for a duration class, truncated to the export limit.
pub fn table_name(class_name: &str) -> String {
    class_name.chars().take(MAX_TABLE_NAME_LEN).collect()
}

/// Identifier of one candidate event: class name plus start offset.
pub fn event_id(class_name: &str, start_offset: usize) -> String {
    format!("{}_{}", class_name, start_offset)
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Streams the audit table for one analyzed class.
///
/// Each candidate is normalized on demand and written as one row per
/// record: identifier, offsets, timestamp, raw reading, and the three
/// derived curve values.
pub fn write_event_table<W: Write>(
    out: &mut W,
    records: &[RainRecord],
    result: &ClassResult,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(
        out,
        "event_id,start_offset,timestamp,precip_mm,normalized_time,cumulative_mm,normalized_precip"
    )?;

    for candidate in &result.candidates {
        let id = event_id(&result.class.name, candidate.start_offset);
        let curve = normalize_event(records, candidate)?;
        let window = &records[candidate.start_offset..candidate.start_offset + candidate.window_steps];

        for (k, record) in window.iter().enumerate() {
            writeln!(
                out,
                "{},{},{},{},{},{},{}",
                id,
                candidate.start_offset,
                record.timestamp.format(TIMESTAMP_FORMAT),
                record.precip_mm,
                curve.normalized_time[k],
                curve.cumulative_mm[k],
                curve.normalized_precip[k]
            )?;
        }
    }

    Ok(())
}

/// Writes the summary table as delimited text.
pub fn write_summary_table<W: Write>(out: &mut W, rows: &[SummaryRow]) -> std::io::Result<()> {
    writeln!(
        out,
        "duration,start,end,total_precip_mm,peak_mm,coef_a,coef_b,coef_c"
    )?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            row.duration_name,
            row.start.format(TIMESTAMP_FORMAT),
            row.end.format(TIMESTAMP_FORMAT),
            row.total_precip_mm,
            row.peak_mm,
            row.coef_a,
            row.coef_b,
            row.coef_c
        )?;
    }
    Ok(())
}

/// Serializes the summary table as pretty JSON for downstream consumers.
pub fn summary_to_json(rows: &[SummaryRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summary::{analyze_class, summarize};
    use crate::model::DurationClass;
    use crate::timeline::reconstruct;

    fn hour_class() -> DurationClass {
        DurationClass {
            name: "1_Hora".to_string(),
            minutes: 60,
        }
    }

    #[test]
    fn test_table_name_passes_short_names() {
        assert_eq!(table_name("1_Hora"), "1_Hora");
    }

    #[test]
    fn test_table_name_truncates_long_names() {
        let long = "una_duracion_con_un_nombre_realmente_largo";
        let truncated = table_name(long);
        assert_eq!(truncated.chars().count(), MAX_TABLE_NAME_LEN);
        assert!(long.starts_with(&truncated));
    }

    #[test]
    fn test_table_name_truncates_on_char_boundary() {
        // 32 × 'ñ' is 64 bytes; truncation counts characters, not bytes.
        let long: String = "ñ".repeat(32);
        assert_eq!(table_name(&long).chars().count(), 31);
    }

    #[test]
    fn test_event_id_format() {
        assert_eq!(event_id("1_Hora", 0), "1_Hora_0");
        assert_eq!(event_id("1_Semana", 1437), "1_Semana_1437");
    }

    #[test]
    fn test_event_table_has_one_row_per_record_per_candidate() {
        let records = reconstruct(&[1.0; 20], 5);
        let result = analyze_class(&records, &hour_class(), 5).unwrap().unwrap();

        let mut out = Vec::new();
        write_event_table(&mut out, &records, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // Header plus 8 candidates × 12 rows.
        assert_eq!(lines.len(), 1 + 8 * 12);
        assert!(lines[0].starts_with("event_id,"));
        assert!(lines[1].starts_with("1_Hora_0,0,2000-01-01 00:00:00,1,"));
        // Last row belongs to the candidate at offset 7 and ends at 1.0
        // normalized precipitation.
        assert!(lines.last().unwrap().starts_with("1_Hora_7,7,"));
        assert!(lines.last().unwrap().ends_with(",1"));
    }

    #[test]
    fn test_summary_table_round_trip_is_deterministic() {
        let records = reconstruct(&[0.2; 30], 5);
        let results = vec![analyze_class(&records, &hour_class(), 5).unwrap().unwrap()];
        let rows = summarize(&results);

        let mut first = Vec::new();
        write_summary_table(&mut first, &rows).unwrap();
        let mut second = Vec::new();
        write_summary_table(&mut second, &rows).unwrap();
        assert_eq!(first, second, "summary serialization must be byte-stable");
    }

    #[test]
    fn test_summary_json_contains_all_fields() {
        let records = reconstruct(&[0.2; 30], 5);
        let results = vec![analyze_class(&records, &hour_class(), 5).unwrap().unwrap()];
        let rows = summarize(&results);

        let json = summary_to_json(&rows).unwrap();
        for field in [
            "duration_name",
            "start",
            "end",
            "total_precip_mm",
            "peak_mm",
            "coef_a",
            "coef_b",
            "coef_c",
        ] {
            assert!(json.contains(field), "JSON summary must carry '{}'", field);
        }
    }

    #[test]
    fn test_empty_summary_table_is_header_only() {
        let mut out = Vec::new();
        write_summary_table(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
