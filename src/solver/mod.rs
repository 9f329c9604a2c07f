//! Constant-term solver for `f(x) = a·x² + b·x + c`
//!
//! With three or more points the first three define a 3×3 linear system that
//! is solved with Cramer's rule. With fewer points, or when the system is
//! singular, the solver falls back to `f(x) = x² + c` on the first point.
//!
//! The constant is `Dc / D` over exact `i128` determinants, rounded to
//! nearest with ties away from zero, so `2.5 → 3` and `-2.5 → -3`. Only when
//! those products overflow does it come from the `f64` model instead
//! (`f64::round`, same rounding rule).

mod cramer;
mod verify;

pub use cramer::{Determinants, ExactTerms};
pub use verify::{Deviation, VerificationModel};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// `|D|` below this is treated as singular.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
/// Deviations above this are flagged by verification.
pub const DEFAULT_DEVIATION_THRESHOLD: f64 = 1.0;

/// Decoded sample of the unknown polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    /// Caller-assigned index.
    pub x: i64,
    /// Decoded value.
    pub y: i64,
}

impl Point {
    /// Construct a point.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    fn as_f64(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ordered samples; order decides which three points feed the exact system.
pub type PointSet = Vec<Point>;

/// How the constant was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Cramer's rule on the first three points.
    ExactSystem,
    /// `c = y − x²` on the first point.
    SimpleFallback,
}

/// Why the exact system was not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// Fewer than three points.
    TooFewPoints,
    /// `|D|` below tolerance.
    SingularSystem,
}

/// Floating coefficients of a quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticModel {
    /// x² coefficient.
    pub a: f64,
    /// x coefficient.
    pub b: f64,
    /// Constant term before rounding, in `f64`.
    pub c: f64,
}

impl QuadraticModel {
    /// `x² + c`.
    pub fn simple(c: f64) -> Self {
        Self { a: 1.0, b: 0.0, c }
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    /// Recovered constant term.
    pub constant: i64,
    /// Method that produced `constant`.
    pub method: Method,
    /// Set when `method` is `SimpleFallback`.
    pub fallback: Option<FallbackReason>,
    /// `D` of the first three points, when there were three.
    pub determinant: Option<f64>,
    /// Solved coefficients, when the exact system was used.
    pub model: Option<QuadraticModel>,
    /// Per-point verification, in input order.
    pub deviations: Vec<Deviation>,
}

impl SolveResult {
    /// Number of points whose deviation was flagged.
    pub fn flagged_count(&self) -> usize {
        self.deviations.iter().filter(|d| d.flagged).count()
    }
}

/// Errors returned by [`solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No points to solve from.
    #[error("no points provided")]
    EmptyInput,

    /// The constant does not fit in a signed 64-bit integer.
    #[error("constant term overflows a 64-bit integer")]
    Overflow,
}

/// Solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Singularity threshold for `|D|`.
    pub tolerance: f64,
    /// Verification flags deviations strictly above this.
    pub deviation_threshold: f64,
    /// Model used by verification.
    pub verification: VerificationModel,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
            verification: VerificationModel::AssumedSimple,
        }
    }
}

impl SolverConfig {
    /// Override the singularity tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Override the deviation threshold.
    pub fn with_deviation_threshold(mut self, threshold: f64) -> Self {
        self.deviation_threshold = threshold;
        self
    }

    /// Override the verification model.
    pub fn with_verification(mut self, verification: VerificationModel) -> Self {
        self.verification = verification;
        self
    }
}

/// Solve with [`SolverConfig::default`].
pub fn solve(points: &[Point]) -> Result<SolveResult, SolveError> {
    solve_with(points, &SolverConfig::default())
}

/// Recover the constant term from `points`.
pub fn solve_with(points: &[Point], config: &SolverConfig) -> Result<SolveResult, SolveError> {
    let first = points.first().ok_or(SolveError::EmptyInput)?;
    debug!(points = points.len(), "solving for constant term");

    let [p1, p2, p3] = match points {
        [p1, p2, p3, ..] => [p1, p2, p3],
        _ => return simple_fallback(points, first, FallbackReason::TooFewPoints, None, config),
    };

    let dets = Determinants::of(p1, p2, p3);
    let exact = ExactTerms::of(p1, p2, p3);
    if exact.is_none() {
        warn!(%p1, %p2, %p3, "determinants overflow i128, constant computed in f64");
    }
    let determinant = exact.map_or(dets.d, |terms| terms.d as f64);
    debug!(%p1, %p2, %p3, determinant, "built 3x3 system");

    if determinant.abs() < config.tolerance {
        warn!(determinant, "system is singular, using simple fallback");
        return simple_fallback(
            points,
            first,
            FallbackReason::SingularSystem,
            Some(determinant),
            config,
        );
    }

    let solved = QuadraticModel {
        a: ratio(dets.da, dets.d),
        b: ratio(dets.db, dets.d),
        c: ratio(dets.dc, dets.d),
    };
    let constant = match exact.and_then(|terms| terms.constant()) {
        Some(c) => i64::try_from(c).map_err(|_| SolveError::Overflow)?,
        None => round_to_i64(solved.c)?,
    };
    debug!(a = solved.a, b = solved.b, c = solved.c, constant, "exact system solved");

    let check = match config.verification {
        VerificationModel::AssumedSimple => QuadraticModel::simple(solved.c),
        VerificationModel::Solved => solved,
    };

    Ok(SolveResult {
        constant,
        method: Method::ExactSystem,
        fallback: None,
        determinant: Some(determinant),
        model: Some(solved),
        deviations: verify::verify(points, &check, config.deviation_threshold),
    })
}

fn simple_fallback(
    points: &[Point],
    first: &Point,
    reason: FallbackReason,
    determinant: Option<f64>,
    config: &SolverConfig,
) -> Result<SolveResult, SolveError> {
    let constant = first
        .x
        .checked_mul(first.x)
        .and_then(|x2| first.y.checked_sub(x2))
        .ok_or(SolveError::Overflow)?;
    debug!(x = first.x, y = first.y, constant, ?reason, "simple fallback c = y - x^2");

    Ok(SolveResult {
        constant,
        method: Method::SimpleFallback,
        fallback: Some(reason),
        determinant,
        model: None,
        deviations: verify::verify(
            points,
            &QuadraticModel::simple(constant as f64),
            config.deviation_threshold,
        ),
    })
}

/// `num / den` with a negative zero folded to `0.0`.
fn ratio(num: f64, den: f64) -> f64 {
    let value = num / den;
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Round half away from zero, rejecting values outside `i64`.
fn round_to_i64(value: f64) -> Result<i64, SolveError> {
    let rounded = value.round();
    // i64::MAX as f64 is 2^63, itself out of range.
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(SolveError::Overflow);
    }
    Ok(rounded as i64)
}
