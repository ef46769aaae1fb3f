use num_traits::Float;

/// Floored modulo: the remainder of `value / modulus` with the result in
/// [0, modulus) for positive moduli.
///
/// The `%` operator truncates toward zero, so a negative phase would be
/// reflected across zero instead of wrapped; the clock must land in the
/// periodic domain no matter which side it approaches from.
pub fn floor_mod<T: Float>(value: T, modulus: T) -> T {
    let remainder = value % modulus;
    if remainder < T::zero() {
        remainder + modulus
    } else {
        remainder
    }
}

#[cfg(test)]
mod tests {
    use super::floor_mod;
    use std::f64::consts::PI;

    #[test]
    fn wraps_into_the_periodic_domain() {
        let tau = 2.0 * PI;
        assert!((floor_mod(tau + 0.25, tau) - 0.25).abs() < 1e-15);
        assert!((floor_mod(3.0 * tau, tau)).abs() < 1e-14);
        assert_eq!(floor_mod(1.5, 2.0), 1.5);
    }

    #[test]
    fn negative_values_wrap_forward() {
        let tau = 2.0 * PI;
        assert!((floor_mod(-0.5, tau) - (tau - 0.5)).abs() < 1e-15);
        assert!(floor_mod(-0.5, tau) >= 0.0);
    }

    #[test]
    fn generic_over_float_width() {
        assert_eq!(floor_mod(5.0_f32, 2.0_f32), 1.0_f32);
        assert_eq!(floor_mod(5.0_f64, 2.0_f64), 1.0_f64);
    }
}
