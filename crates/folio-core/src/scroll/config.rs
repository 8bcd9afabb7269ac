//! Duration and tick derivation for `ScrollConfig`

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Distance-scaled animation duration, clamped to the configured bounds
    fn duration_for(&self, distance_px: f64) -> Duration;

    /// Get tick duration for animation FPS
    fn animation_tick_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    fn duration_for(&self, distance_px: f64) -> Duration {
        let min = self.min_duration_ms as f64;
        let max = (self.max_duration_ms as f64).max(min);
        let scaled = distance_px.abs() * self.ms_per_px;
        let ms = if scaled.is_finite() { scaled.clamp(min, max) } else { max };
        Duration::from_millis(ms.round() as u64)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.max_duration_ms > 0
    }
}
