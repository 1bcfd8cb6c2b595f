//! Approximate equality of floating-point values.

/// Comparison with a tolerance.
///
/// Two values are approximately equal if they differ by at most a relative
/// epsilon times the larger of one and the magnitude of `self`. Near zero
/// the epsilon is thus absolute.
pub trait ApproxEq<Other: ?Sized = Self, Epsilon = Self> {
    /// Compares `self` and `other` with the default epsilon.
    fn approx_eq(&self, other: &Other) -> bool {
        self.approx_eq_eps(other, &Self::relative_epsilon())
    }

    fn approx_eq_eps(&self, other: &Other, rel_eps: &Epsilon) -> bool;

    fn relative_epsilon() -> Epsilon;
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &Self) -> bool {
        use super::float::f32;
        f32::abs(self - other) <= rel_eps * f32::abs(*self).max(1.0)
    }

    fn relative_epsilon() -> Self {
        1e-6
    }
}

impl<E, T: ApproxEq<T, E>, const N: usize> ApproxEq<Self, E> for [T; N] {
    fn approx_eq_eps(&self, other: &Self, rel_eps: &E) -> bool {
        self.iter().zip(other).all(|(s, o)| s.approx_eq_eps(o, rel_eps))
    }

    fn relative_epsilon() -> E {
        T::relative_epsilon()
    }
}

/// Asserts that two values are approximately equal, optionally with a
/// custom relative epsilon.
///
/// The left operand must implement [`ApproxEq`] and both must be `Debug`.
///
/// # Examples
/// ```
/// # use duoview_core::assert_approx_eq;
/// assert_ne!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(0.1f32 + 0.2, 0.3);
/// assert_approx_eq!(100.0f32, 101.0, eps = 0.01);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {{
        use $crate::math::approx::ApproxEq;
        let (a, b) = (&$a, &$b);
        assert!(a.approx_eq(b), "not approximately equal: {a:?} vs {b:?}");
    }};
    ($a:expr, $b:expr, eps = $eps:expr $(,)?) => {{
        use $crate::math::approx::ApproxEq;
        let (a, b, eps) = (&$a, &$b, $eps);
        assert!(
            a.approx_eq_eps(b, &eps),
            "not approximately equal: {a:?} vs {b:?} (eps {eps:?})"
        );
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn tolerance_is_absolute_near_zero() {
        assert_approx_eq!(0.0f32, -0.0);
        assert_approx_eq!(1e-7f32, 0.0);
    }

    #[test]
    fn tolerance_is_relative_at_large_magnitudes() {
        assert_approx_eq!(2.0e9f32, 2.0e9 + 1000.0);
        assert_approx_eq!(50.0f32, 50.4, eps = 0.01);
    }

    #[test]
    fn arrays_compare_per_element() {
        assert_approx_eq!([0.5f32, -3.0], [0.5000001, -2.9999998]);
    }

    #[test]
    #[should_panic]
    fn one_element_off() {
        assert_approx_eq!([1.0f32, 2.0, 3.0], [1.0, 2.0, 3.1]);
    }
}
