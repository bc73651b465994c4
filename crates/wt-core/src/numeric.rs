use crate::{WtError, WtResult};

/// Floating point type used throughout the workspace
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> WtResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WtError::NonFinite { what, value: v })
    }
}

/// Closed interval `[min, max]` used for control limits and gauge scales.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Real,
    pub max: Real,
}

impl Bounds {
    /// Build bounds without checking; callers with literal limits use this.
    pub const fn new_unchecked(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Build bounds, rejecting non-finite or inverted limits.
    pub fn new(min: Real, max: Real, what: &'static str) -> WtResult<Self> {
        ensure_finite(min, what)?;
        ensure_finite(max, what)?;
        if min > max {
            return Err(WtError::InvalidArg { what });
        }
        Ok(Self { min, max })
    }

    /// Clamp `v` into the interval. Infinities land on the nearest bound.
    #[inline]
    pub fn clamp(&self, v: Real) -> Real {
        v.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, v: Real) -> bool {
        v >= self.min && v <= self.max
    }

    #[inline]
    pub fn span(&self) -> Real {
        self.max - self.min
    }

    /// Position of `v` within the interval as a fraction in `[0, 1]`.
    ///
    /// Degenerate intervals report 0.
    pub fn fraction(&self, v: Real) -> Real {
        let span = self.span();
        if span == 0.0 {
            return 0.0;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn check(&self, v: Real, what: &'static str) -> WtResult<Real> {
        if self.contains(v) {
            Ok(v)
        } else {
            Err(WtError::OutOfRange {
                what,
                value: v,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn bounds_reject_inverted_limits() {
        assert!(Bounds::new(1.0, 0.0, "inverted").is_err());
        assert!(Bounds::new(0.0, Real::INFINITY, "open").is_err());
        assert!(Bounds::new(-1.0, 1.0, "ok").is_ok());
    }

    #[test]
    fn bounds_clamp_infinities() {
        let b = Bounds::new_unchecked(0.0, 100.0);
        assert_eq!(b.clamp(Real::INFINITY), 100.0);
        assert_eq!(b.clamp(Real::NEG_INFINITY), 0.0);
        assert_eq!(b.clamp(42.0), 42.0);
    }

    #[test]
    fn bounds_fraction() {
        let b = Bounds::new_unchecked(1000.0, 1030.0);
        assert_eq!(b.fraction(1000.0), 0.0);
        assert_eq!(b.fraction(1030.0), 1.0);
        assert!((b.fraction(1015.0) - 0.5).abs() < 1e-12);
        assert_eq!(b.fraction(2000.0), 1.0);

        let flat = Bounds::new_unchecked(5.0, 5.0);
        assert_eq!(flat.fraction(5.0), 0.0);
    }

    #[test]
    fn bounds_check_reports_range() {
        let b = Bounds::new_unchecked(-20.0, 20.0);
        let err = b.check(25.0, "angle").unwrap_err();
        assert_eq!(
            err,
            WtError::OutOfRange {
                what: "angle",
                value: 25.0,
                min: -20.0,
                max: 20.0
            }
        );
    }
}
