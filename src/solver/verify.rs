//! Post-solve verification
//!
//! Diagnostic only: deviations never change the returned constant.

use serde::Serialize;
use tracing::{debug, warn};

use super::{Point, QuadraticModel};

/// Which model predictions are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationModel {
    /// `f(x) = x² + c` regardless of how `c` was obtained.
    ///
    /// When the three-point system solved a general `a` and `b`, large
    /// deviations are expected under this model.
    #[default]
    AssumedSimple,
    /// The `a, b, c` the solver actually produced.
    Solved,
}

/// Distance between one sample and the verification model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deviation {
    /// Sample being checked.
    pub point: Point,
    /// `|y − predicted|`.
    pub magnitude: f64,
    /// Whether `magnitude` exceeded the configured threshold.
    pub flagged: bool,
}

/// Check every point against `model`.
pub(crate) fn verify(points: &[Point], model: &QuadraticModel, threshold: f64) -> Vec<Deviation> {
    points
        .iter()
        .map(|point| {
            let (x, y) = point.as_f64();
            let magnitude = (y - model.eval(x)).abs();
            let flagged = magnitude > threshold;
            if flagged {
                warn!(x = point.x, y = point.y, magnitude, "point deviates from model");
            } else {
                debug!(x = point.x, y = point.y, magnitude, "point verified");
            }
            Deviation {
                point: *point,
                magnitude,
                flagged,
            }
        })
        .collect()
}
