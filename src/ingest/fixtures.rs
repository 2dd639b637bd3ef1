/// Test fixtures: representative precipitation series payloads.
///
/// These fixtures are small but structurally faithful to real logger
/// exports: a timestamp column the pipeline ignores, a header line,
/// occasional negative sentinels for failed readings, and long dry
/// stretches between showers.

/// Plain export with header and original (untrusted) timestamps. Six
/// readings; the timestamp column is discarded during reconstruction.
pub(crate) fn fixture_csv_with_header() -> &'static str {
    "fecha,valor\n\
     2019-03-01 00:00,0.0\n\
     2019-03-01 00:05,1.2\n\
     2019-03-01 00:10,0.8\n\
     2019-03-01 00:15,0.0\n\
     2019-03-01 00:20,2.4\n\
     2019-03-01 00:25,0.6\n"
}

/// Five readings with two -999 sentinels (logger fault codes). The
/// sentinels must be substituted with 0.0, not accumulated.
pub(crate) fn fixture_series_with_sentinels() -> &'static str {
    "0.3\n\
     -999.0\n\
     0.5\n\
     -999.0\n\
     0.1\n"
}

/// A shower embedded in a dry day: 36 readings, rain only in a burst in
/// the middle. Enough for three 1-hour windows before and after the
/// burst to stay dry.
pub(crate) fn fixture_isolated_shower() -> String {
    let mut lines = Vec::new();
    lines.push("# synthetic isolated shower".to_string());
    for i in 0..36 {
        let value = match i {
            15 => 0.4,
            16 => 1.8,
            17 => 2.6,
            18 => 0.9,
            _ => 0.0,
        };
        lines.push(format!("{:.1}", value));
    }
    lines.join("\n")
}
