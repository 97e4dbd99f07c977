use crate::geom::Scalar;
use crate::path::DEFAULT_TOLERANCE;

/// Parameters for the queries that approximate curves or compare coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QueryOptions {
    /// Maximum allowed distance to a curve when approximating it with line segments.
    ///
    /// Default value: `QueryOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f64,

    /// Distance under which a point is considered to be on an outline, and under which
    /// coordinates are considered equal.
    ///
    /// Default value: `QueryOptions::DEFAULT_EPSILON`.
    pub epsilon: f64,
}

impl QueryOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f64 = DEFAULT_TOLERANCE;
    /// Default comparison epsilon.
    pub const DEFAULT_EPSILON: f64 = <f64 as Scalar>::EPSILON;

    pub const DEFAULT: Self = QueryOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        epsilon: Self::DEFAULT_EPSILON,
    };

    #[inline]
    pub fn tolerance(tolerance: f64) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn options_builders() {
    let options = QueryOptions::tolerance(0.5).with_epsilon(1e-3);
    assert_eq!(options.tolerance, 0.5);
    assert_eq!(options.epsilon, 1e-3);
    assert_eq!(QueryOptions::default(), QueryOptions::DEFAULT);
    assert_eq!(QueryOptions::DEFAULT.tolerance, DEFAULT_TOLERANCE);
}
