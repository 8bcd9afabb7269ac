//! Pure easing functions mapping progress [0, 1] to eased progress [0, 1]

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // jump straight to the target on the last frame
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::CubicInOut => cubic_in_out(t),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

/// 1 - (1-t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// Accelerates through the first half and mirrors it through the second
#[inline]
fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 6] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::CubicInOut,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let samples: Vec<f64> = (0..=40).map(|i| easing.apply(f64::from(i) / 40.0)).collect();
            assert!(
                samples.windows(2).all(|w| w[1] >= w[0]),
                "{:?} decreases somewhere",
                easing
            );
        }
    }

    #[test]
    fn test_cubic_in_out_shape() {
        let e = EasingType::CubicInOut;
        assert!((e.apply(0.25) - 0.0625).abs() < 1e-9);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((e.apply(0.75) - 0.9375).abs() < 1e-9);
        // symmetric around the midpoint
        assert!((e.apply(0.1) + e.apply(0.9) - 1.0).abs() < 1e-9);
    }
}
