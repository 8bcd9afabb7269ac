//! Viewport-band detection of the active section.

use crate::config::NavigationConfig;
use crate::host::Document;
use crate::section::{SectionId, SectionRegistry};

/// One frame's measurements of the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub nav_height: f64,
    pub header_height: Option<f64>,
}

impl ViewportMetrics {
    /// Measure the document. The nav bar is re-measured every time so a
    /// header that changes height mid-scroll is tracked; falls back to the
    /// configured height when the bar is absent.
    pub fn measure<D: Document + ?Sized>(document: &D, config: &NavigationConfig) -> Self {
        Self {
            scroll_offset: document.scroll_offset(),
            viewport_height: document.viewport_height(),
            nav_height: document
                .nav_bar_height()
                .filter(|h| h.is_finite() && *h >= 0.0)
                .unwrap_or(config.nav_height_fallback_px),
            header_height: document.header_height(),
        }
    }
}

/// Computes which section is active under the viewport-band rule
#[derive(Debug, Clone, Default)]
pub struct ActiveSectionResolver {
    config: NavigationConfig,
}

impl ActiveSectionResolver {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Measure and resolve in one go
    pub fn resolve<D: Document + ?Sized>(
        &self,
        registry: &SectionRegistry,
        document: &D,
    ) -> Option<SectionId> {
        let metrics = ViewportMetrics::measure(document, &self.config);
        self.resolve_with(&metrics, registry, document)
    }

    /// Resolve against already-taken measurements.
    ///
    /// `home` wins unconditionally while the offset is inside the top part of
    /// the header. Otherwise the first section in registry order whose top edge
    /// has crossed the activation line while its bottom edge is still below
    /// the deactivation line is active. `None` means no section qualifies and
    /// the current one should be kept.
    pub fn resolve_with<D: Document + ?Sized>(
        &self,
        metrics: &ViewportMetrics,
        registry: &SectionRegistry,
        document: &D,
    ) -> Option<SectionId> {
        if self.within_home_band(metrics) {
            return Some(SectionId::home());
        }

        let activation_line = metrics.nav_height + self.config.activation_band_px;
        let deactivation_line = metrics.nav_height + self.config.deactivation_offset_px;

        for id in registry.section_ids().filter(|id| !id.is_home()) {
            let Some(rect) = registry.resolve_element(id, document) else {
                continue;
            };
            // Sections are in document order: everything after this one is
            // further down and cannot be active either.
            if rect.top >= metrics.viewport_height {
                break;
            }
            if rect.top <= activation_line && rect.bottom >= deactivation_line {
                return Some(id.clone());
            }
        }

        None
    }

    fn within_home_band(&self, metrics: &ViewportMetrics) -> bool {
        if metrics.scroll_offset <= 0.0 {
            return true;
        }
        metrics
            .header_height
            .map(|h| metrics.scroll_offset < h * self.config.home_hysteresis)
            .unwrap_or(false)
    }
}
