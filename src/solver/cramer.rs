//! Cramer's rule for the 3×3 quadratic system
//!
//! ```text
//! [x1² x1 1] [a]   [y1]
//! [x2² x2 1] [b] = [y2]
//! [x3² x3 1] [c]   [y3]
//! ```
//!
//! Each determinant is expanded along the column that gets replaced, summing
//! over the cyclic index triples (1,2,3), (2,3,1), (3,1,2).
//!
//! `D` and `Dc` are also formed exactly in `i128`, since integer samples give
//! integer determinants. The `f64` set only feeds diagnostics and the path
//! taken when the exact products overflow.

use super::Point;

/// Determinants of the coefficient matrix and its three column substitutions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Determinants {
    /// `D`, coefficient matrix.
    pub d: f64,
    /// `Da`, y-column in place of the x² column.
    pub da: f64,
    /// `Db`, y-column in place of the x column.
    pub db: f64,
    /// `Dc`, y-column in place of the constant column.
    pub dc: f64,
}

impl Determinants {
    /// Compute all four determinants for three points.
    pub fn of(p1: &Point, p2: &Point, p3: &Point) -> Self {
        let rows = [p1.as_f64(), p2.as_f64(), p3.as_f64()];

        let mut d = 0.0;
        let mut da = 0.0;
        let mut db = 0.0;
        let mut dc = 0.0;
        for i in 0..3 {
            let (xi, yi) = rows[i];
            let (xj, yj) = rows[(i + 1) % 3];
            let (xk, yk) = rows[(i + 2) % 3];
            d += xi * xi * (xj - xk);
            da += yi * (xj - xk);
            db += xi * xi * (yj - yk);
            dc += yi * (xj * xj * xk - xk * xk * xj);
        }

        Self { d, da, db, dc }
    }

    /// True when `|D|` is below `tolerance`, i.e. no unique solution.
    pub fn is_singular(&self, tolerance: f64) -> bool {
        self.d.abs() < tolerance
    }
}

/// `D` and `Dc` as exact integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactTerms {
    /// `D`, coefficient matrix.
    pub d: i128,
    /// `Dc`, y-column in place of the constant column.
    pub dc: i128,
}

impl ExactTerms {
    /// Exact `D` and `Dc`, or `None` if an intermediate overflows `i128`.
    pub fn of(p1: &Point, p2: &Point, p3: &Point) -> Option<Self> {
        let rows = [p1, p2, p3].map(|p| (i128::from(p.x), i128::from(p.y)));

        let mut d: i128 = 0;
        let mut dc: i128 = 0;
        for i in 0..3 {
            let (xi, yi) = rows[i];
            let (xj, _) = rows[(i + 1) % 3];
            let (xk, _) = rows[(i + 2) % 3];
            d = d.checked_add(xi.checked_mul(xi)?.checked_mul(xj.checked_sub(xk)?)?)?;
            let cofactor = xj
                .checked_mul(xj)?
                .checked_mul(xk)?
                .checked_sub(xk.checked_mul(xk)?.checked_mul(xj)?)?;
            dc = dc.checked_add(yi.checked_mul(cofactor)?)?;
        }

        Some(Self { d, dc })
    }

    /// `Dc / D` rounded half away from zero; `None` when `D` is zero.
    pub fn constant(&self) -> Option<i128> {
        if self.d == 0 {
            return None;
        }
        let quotient = self.dc / self.d;
        let remainder = self.dc % self.d;
        // |remainder| < |D|, so doubling stays in range unless |D| is near i128::MAX.
        let doubled = remainder.unsigned_abs().checked_mul(2)?;
        if doubled >= self.d.unsigned_abs() {
            Some(quotient + self.dc.signum() * self.d.signum())
        } else {
            Some(quotient)
        }
    }
}
