//! Engaged/travel path reconstruction
//!
//! Splits the motion of a parsed program into polylines, each flagged as
//! engaged (cutting or marking) or travel. Engagement is inferred from the
//! sign of the Z change:
//!
//! - a descent of more than [`ENGAGE_EPSILON`] while traveling starts an
//!   engaged run at the new position;
//! - a rise of more than [`ENGAGE_EPSILON`] while engaged ends the run with
//!   the new position as its last point;
//! - every other move extends the current run.
//!
//! This is a heuristic, not a model of tool contact. A move that retracts and
//! descends within the same row without a spindle command can be
//! misclassified. Spindle on/off events force the state either way.
//!
//! A run closed by a state change is emitted as a segment when it holds at
//! least two points. The next run starts at the point where the previous one
//! ended, so travel and engaged segments join up.

use crate::gcode::command::{CommandKind, MotionEvent};
use crate::visualizer::bounds::Bounds;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Minimum Z change that counts as a plunge or retract.
pub const ENGAGE_EPSILON: f64 = 1e-4;

/// One renderable polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub points: Vec<DVec3>,
    pub engaged: bool,
}

impl PathSegment {
    /// Polyline length
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    pub fn start(&self) -> Option<DVec3> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<DVec3> {
        self.points.last().copied()
    }
}

/// Stateful segmenter. Scoped to one event stream.
#[derive(Debug, Clone)]
pub struct PathSegmenter {
    epsilon: f64,
    last: DVec3,
    engaged: bool,
    run: Vec<DVec3>,
    segments: Vec<PathSegment>,
}

impl Default for PathSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PathSegmenter {
    pub fn new() -> Self {
        Self::with_epsilon(ENGAGE_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.abs(),
            last: DVec3::ZERO,
            engaged: false,
            run: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn position(&self) -> DVec3 {
        self.last
    }

    /// Feed one event.
    pub fn push(&mut self, event: &MotionEvent) {
        match event.command {
            CommandKind::SpindleOn => {
                if !self.engaged {
                    trace!("Line {}: spindle on, engaging", event.line_number);
                    self.close_run();
                    self.engaged = true;
                    self.run.push(self.last);
                }
            }
            CommandKind::SpindleOff => {
                if self.engaged {
                    trace!("Line {}: spindle off, disengaging", event.line_number);
                    self.close_run();
                    self.engaged = false;
                    self.run.push(self.last);
                }
            }
            CommandKind::RapidMove | CommandKind::LinearMove => {
                if event.has_axis_words() {
                    self.move_to(event.target_from(self.last), event.line_number);
                }
            }
            CommandKind::ProgramEnd | CommandKind::Other => {}
        }
    }

    fn move_to(&mut self, target: DVec3, line_number: usize) {
        let dz = target.z - self.last.z;

        if dz < -self.epsilon && !self.engaged {
            trace!("Line {}: plunge to z {:.4}, engaging", line_number, target.z);
            self.close_run();
            self.engaged = true;
            self.run.push(target);
        } else if dz > self.epsilon && self.engaged {
            trace!("Line {}: retract to z {:.4}, disengaging", line_number, target.z);
            self.run.push(target);
            self.close_run();
            self.engaged = false;
            self.run.push(target);
        } else {
            self.run.push(target);
        }

        self.last = target;
    }

    fn close_run(&mut self) {
        let points = std::mem::take(&mut self.run);
        if points.len() >= 2 {
            self.segments.push(PathSegment {
                points,
                engaged: self.engaged,
            });
        }
    }

    /// Close the open run and return every segment in order.
    pub fn finish(mut self) -> Vec<PathSegment> {
        self.close_run();
        debug!(
            "Segmented into {} paths ({} engaged)",
            self.segments.len(),
            self.segments.iter().filter(|s| s.engaged).count()
        );
        self.segments
    }
}

/// Segment a whole event sequence. Empty input gives no segments.
pub fn segment_events(events: &[MotionEvent]) -> Vec<PathSegment> {
    let mut segmenter = PathSegmenter::new();
    for event in events {
        segmenter.push(event);
    }
    segmenter.finish()
}

/// Extent of every point in `segments`.
pub fn segments_bounds(segments: &[PathSegment]) -> Option<Bounds> {
    segments
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .collect::<Bounds>()
        .finalize()
}
