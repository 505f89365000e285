//! Program-level statistics over parsed events
//!
//! Motion starts at the origin. An axis a move leaves out keeps its last
//! value; it is never reset to zero.

use crate::gcode::command::{CommandKind, MotionEvent};
use crate::visualizer::bounds::Bounds;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary metrics for one motion program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStats {
    pub total_events: usize,
    pub motion_events: usize,
    pub rapid_moves: usize,
    pub linear_moves: usize,
    /// 3-D Euclidean path length over all motion events
    pub travel_distance: f64,
    pub rapid_distance: f64,
    pub linear_distance: f64,
    /// Lowest explicit Z; 0 when no motion event carried Z
    pub min_z: f64,
    /// Highest explicit Z; 0 when no motion event carried Z
    pub max_z: f64,
    /// Extent of motion endpoints that named at least one axis
    pub bounds: Option<Bounds>,
}

impl ProgramStats {
    /// True when the program contained no motion at all.
    pub fn is_empty(&self) -> bool {
        self.motion_events == 0
    }
}

/// Compute [`ProgramStats`] for an event sequence. Never fails.
pub fn analyze(events: &[MotionEvent]) -> ProgramStats {
    let mut stats = ProgramStats {
        total_events: events.len(),
        ..Default::default()
    };
    let mut position = DVec3::ZERO;
    let mut z_range: Option<(f64, f64)> = None;
    let mut bounds = Bounds::new();

    for event in events.iter().filter(|e| e.is_motion()) {
        let target = event.target_from(position);
        let distance = position.distance(target);

        stats.motion_events += 1;
        stats.travel_distance += distance;
        match event.command {
            CommandKind::RapidMove => {
                stats.rapid_moves += 1;
                stats.rapid_distance += distance;
            }
            _ => {
                stats.linear_moves += 1;
                stats.linear_distance += distance;
            }
        }

        if let Some(z) = event.z() {
            z_range = Some(match z_range {
                Some((lo, hi)) => (lo.min(z), hi.max(z)),
                None => (z, z),
            });
        }
        if event.has_axis_words() {
            bounds.update(target);
        }
        position = target;
    }

    if let Some((lo, hi)) = z_range {
        stats.min_z = lo;
        stats.max_z = hi;
    }
    stats.bounds = bounds.finalize();

    debug!(
        "Analyzed {} events: {} moves, travel {:.3}, z {:.3}..{:.3}",
        stats.total_events, stats.motion_events, stats.travel_distance, stats.min_z, stats.max_z
    );
    stats
}
