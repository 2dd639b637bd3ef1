/// Integration tests for the rainfall pattern analysis pipeline
///
/// These tests verify the full chain on in-memory series:
/// 1. parse → reconstruct → extract → normalize → rank → fit → summarize
/// 2. Graceful degradation: short or dry series simply drop classes
/// 3. Determinism: repeated runs serialize byte-identically
/// 4. Parallel and sequential drivers agree exactly
///
/// Run with: cargo test --test pipeline_integration

use std::sync::Arc;

use rainpat_service::analysis::summary::{
    analyze_all, analyze_all_parallel, analyze_class, summarize,
};
use rainpat_service::classes::{SAMPLING_INTERVAL_MINUTES, default_classes};
use rainpat_service::ingest::series::parse_series;
use rainpat_service::model::DurationClass;
use rainpat_service::report::{write_event_table, write_summary_table};
use rainpat_service::timeline::{base_epoch, reconstruct};

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

// Logger-style export: untrusted timestamp column, header, a -999 fault
// sentinel, and a short shower.
const TEST_EXPORT: &str = "\
fecha,valor
2019-03-01 00:00,0.0
2019-03-01 00:05,0.0
2019-03-01 00:10,1.4
2019-03-01 00:15,2.2
2019-03-01 00:20,-999.0
2019-03-01 00:25,0.8
2019-03-01 00:30,0.0
2019-03-01 00:35,0.0
2019-03-01 00:40,0.0
2019-03-01 00:45,0.0
2019-03-01 00:50,0.0
2019-03-01 00:55,0.0
2019-03-01 01:00,0.0
2019-03-01 01:05,0.0
";

fn hour_class() -> DurationClass {
    DurationClass {
        name: "1_Hora".to_string(),
        minutes: 60,
    }
}

#[test]
fn test_parse_reconstruct_analyze_chain() {
    let parsed = parse_series(TEST_EXPORT).expect("export should parse");
    assert_eq!(parsed.values.len(), 14);
    assert_eq!(parsed.substituted, 1, "the -999 sentinel must be substituted");

    let records = reconstruct(&parsed.values, SAMPLING_INTERVAL_MINUTES);
    // Original timestamps are discarded: the grid starts at the base epoch
    // regardless of the file's own dates.
    assert_eq!(records[0].timestamp, base_epoch());
    assert_eq!(
        records[13].timestamp - records[0].timestamp,
        Duration::minutes(13 * 5)
    );

    let result = analyze_class(&records, &hour_class(), SAMPLING_INTERVAL_MINUTES)
        .expect("analysis should succeed")
        .expect("the shower should qualify");

    // 14 records, 12-step window: offsets 0 and 1, both wet.
    assert_eq!(result.candidates.len(), 2);
    // Offset 0 accumulates 4.4 mm, offset 1 the same readings minus the
    // leading zero — equal totals, earliest offset wins.
    assert_eq!(result.ranked.start_offset, 0);
    assert!((result.ranked.total_precip_mm - 4.4).abs() < 1e-9);
    assert!((result.ranked.peak_mm - 2.2).abs() < 1e-9);
}

#[test]
fn test_worked_example_constant_rain() {
    // 20 records of 1.0 at the 12-step window give exactly 8 candidates
    // at offsets 0..7; constant rate fits a straight accumulation line.
    let records = reconstruct(&[1.0; 20], SAMPLING_INTERVAL_MINUTES);
    let result = analyze_class(&records, &hour_class(), SAMPLING_INTERVAL_MINUTES)
        .unwrap()
        .unwrap();

    assert_eq!(result.candidates.len(), 8);
    let offsets: Vec<usize> = result.candidates.iter().map(|c| c.start_offset).collect();
    assert_eq!(offsets, (0..8).collect::<Vec<_>>());
    assert_eq!(result.ranked.start_offset, 0);

    let rows = summarize(&[result]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_precip_mm, Decimal::from(12));
    assert_eq!(rows[0].peak_mm, Decimal::from(1));
    let a = rows[0].coef_a.to_f64().unwrap();
    assert!(a.abs() < 1e-3, "linear accumulation: a ≈ 0, got {}", a);
}

#[test]
fn test_dry_series_produces_empty_summary() {
    let records = reconstruct(&[0.0; 40], SAMPLING_INTERVAL_MINUTES);
    let results = analyze_all(&records, &default_classes(), SAMPLING_INTERVAL_MINUTES);
    assert!(results.is_empty());
    assert!(summarize(&results).is_empty());
}

#[test]
fn test_short_series_drops_long_classes_only() {
    // 100 wet records cover the 12-step hour window but none of the
    // longer default classes (2016+ steps).
    let records = reconstruct(&[0.3; 100], SAMPLING_INTERVAL_MINUTES);
    let results = analyze_all(&records, &default_classes(), SAMPLING_INTERVAL_MINUTES);

    let names: Vec<&str> = results.iter().map(|r| r.class.name.as_str()).collect();
    assert_eq!(names, vec!["1_Hora"]);

    let rows = summarize(&results);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].duration_name, "1_Hora");
}

#[test]
fn test_linear_ramp_fit_detects_curvature() {
    // Precipitation rising linearly over the series: the winning hour's
    // accumulation is convex, so the quadratic coefficient is clearly
    // positive.
    let values: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
    let records = reconstruct(&values, SAMPLING_INTERVAL_MINUTES);
    let rows = summarize(&analyze_all(
        &records,
        &[hour_class()],
        SAMPLING_INTERVAL_MINUTES,
    ));

    assert_eq!(rows.len(), 1);
    let a = rows[0].coef_a.to_f64().unwrap();
    assert!(a > 0.02, "expected a noticeably positive quadratic term, got {}", a);
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let parsed = parse_series(TEST_EXPORT).unwrap();
    let records = reconstruct(&parsed.values, SAMPLING_INTERVAL_MINUTES);
    let classes = vec![hour_class()];

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let results = analyze_all(&records, &classes, SAMPLING_INTERVAL_MINUTES);
        let rows = summarize(&results);

        let mut buf = Vec::new();
        write_summary_table(&mut buf, &rows).unwrap();
        for result in &results {
            write_event_table(&mut buf, &records, result).unwrap();
        }
        outputs.push(buf);
    }

    assert_eq!(
        outputs[0], outputs[1],
        "identical input must serialize byte-identically"
    );
}

#[test]
fn test_parallel_and_sequential_summaries_agree() {
    // A varied series long enough for several custom classes.
    let values: Vec<f64> = (0..600)
        .map(|i| match i % 17 {
            0 => 1.1,
            5 => 0.4,
            11 => 2.0,
            _ => 0.0,
        })
        .collect();
    let records = reconstruct(&values, SAMPLING_INTERVAL_MINUTES);
    let classes = vec![
        hour_class(),
        DurationClass {
            name: "6_Horas".to_string(),
            minutes: 360,
        },
        DurationClass {
            name: "1_Dia".to_string(),
            minutes: 1440,
        },
        DurationClass {
            name: "1_Semana".to_string(),
            minutes: 10080,
        },
    ];

    let sequential = summarize(&analyze_all(&records, &classes, SAMPLING_INTERVAL_MINUTES));
    let parallel = summarize(&analyze_all_parallel(
        Arc::new(records),
        &classes,
        SAMPLING_INTERVAL_MINUTES,
    ));

    assert_eq!(sequential, parallel);
    // 600 records: the week class (2016 steps) has no window and must be
    // missing; the others appear in configured order.
    let names: Vec<&str> = sequential.iter().map(|r| r.duration_name.as_str()).collect();
    assert_eq!(names, vec!["1_Hora", "6_Horas", "1_Dia"]);
}

#[test]
fn test_normalized_curve_invariants_hold_end_to_end() {
    let values: Vec<f64> = (0..50).map(|i| if i % 3 == 0 { 0.7 } else { 0.0 }).collect();
    let records = reconstruct(&values, SAMPLING_INTERVAL_MINUTES);
    let result = analyze_class(&records, &hour_class(), SAMPLING_INTERVAL_MINUTES)
        .unwrap()
        .unwrap();

    let curve = &result.ranked.curve;
    assert_eq!(curve.normalized_time[0], 0.0);
    assert_eq!(*curve.normalized_time.last().unwrap(), 1.0);
    assert_eq!(*curve.normalized_precip.last().unwrap(), 1.0);
    for pair in curve.normalized_precip.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    for pair in curve.cumulative_mm.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}
