/// Event ranking and curve resampling.
///
/// Ranking selects the candidate with the largest accumulated total within
/// a duration class. The scan runs in ascending start-offset order with a
/// strict comparison, so ties keep the earliest-starting event — the
/// selection is stable.
///
/// Resampling evaluates the winner's normalized curve on a fixed grid of
/// evenly spaced query points by linear interpolation between the event's
/// own (time, value) knot pairs, with the endpoints clamped to the first
/// and last knot. The knots are sorted ascending by construction.

use crate::model::{CandidateEvent, NormalizedEvent};

/// Number of resampled points fed into the curve fit.
pub const RESAMPLE_POINTS: usize = 100;

/// Picks the candidate with the maximum accumulated precipitation.
///
/// Returns `None` for an empty candidate list (the EmptyEventSet
/// degradation). Ties resolve to the lowest start offset.
pub fn rank_candidates(candidates: &[CandidateEvent]) -> Option<&CandidateEvent> {
    let mut best: Option<&CandidateEvent> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.total_precip_mm > current.total_precip_mm => {
                best = Some(candidate)
            }
            None => best = Some(candidate),
            _ => {}
        }
    }
    best
}

/// Evenly spaced query grid over [0, 1].
pub fn linspace(points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..points)
            .map(|i| i as f64 / (points - 1) as f64)
            .collect(),
    }
}

/// Resamples an event's normalized curve onto `points` evenly spaced
/// query positions in [0, 1].
///
/// Returns the query grid and the interpolated values. Queries outside
/// the knot span take the nearest endpoint value; a single-knot curve is
/// constant. Query positions and knots are both ascending, so the knot
/// cursor only ever moves forward.
pub fn resample_curve(event: &NormalizedEvent, points: usize) -> (Vec<f64>, Vec<f64>) {
    let xs = linspace(points);
    let knots_x = &event.normalized_time;
    let knots_y = &event.normalized_precip;

    if knots_x.is_empty() {
        return (xs.clone(), vec![0.0; xs.len()]);
    }

    let mut ys = Vec::with_capacity(xs.len());
    let mut idx = 0;
    for &x in &xs {
        while idx + 1 < knots_x.len() && knots_x[idx + 1] < x {
            idx += 1;
        }
        if idx + 1 >= knots_x.len() {
            ys.push(knots_y[idx]);
            continue;
        }
        let (x0, x1) = (knots_x[idx], knots_x[idx + 1]);
        let (y0, y1) = (knots_y[idx], knots_y[idx + 1]);
        let frac = if (x1 - x0).abs() > f64::EPSILON {
            ((x - x0) / (x1 - x0)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        ys.push(y0 + (y1 - y0) * frac);
    }

    (xs, ys)
}
