//! Pure consumers of navigation state: the navigating/loading overlay, the
//! presentation effect that maps state to page classes, and section gates.

use std::collections::BTreeSet;

use crate::navigation::NavigationState;
use crate::section::{SectionId, SectionRegistry};

/// "Any data loading" signal from the data layer: a count of loads in flight
#[derive(Debug, Clone, Default)]
pub struct DataLoadTracker {
    in_flight: usize,
}

impl DataLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.in_flight += 1;
    }

    pub fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Why the overlay is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVisibility {
    Hidden,
    Navigating,
    Loading,
    NavigatingAndLoading,
}

impl OverlayVisibility {
    /// Visible when navigating OR loading
    pub fn compute(state: &NavigationState, data_loading: bool) -> Self {
        match (state.is_navigating(), data_loading) {
            (false, false) => Self::Hidden,
            (true, false) => Self::Navigating,
            (false, true) => Self::Loading,
            (true, true) => Self::NavigatingAndLoading,
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != Self::Hidden
    }

    /// Text for the indicator, naming the target section when navigating
    pub fn label(&self, state: &NavigationState, registry: &SectionRegistry) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Loading => Some("Loading…".to_string()),
            Self::Navigating | Self::NavigatingAndLoading => {
                let target = state
                    .target_section()
                    .unwrap_or_else(|| state.current_section());
                Some(format!("Navigating to {}…", registry.label(target)))
            }
        }
    }
}

/// Something that holds presentation classes (the page body in a browser)
pub trait ClassList {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// Translates state into presentation classes and applies only the changes
#[derive(Debug, Clone, Default)]
pub struct PresentationEffect {
    applied: BTreeSet<String>,
}

impl PresentationEffect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(state: &NavigationState, data_loading: bool) -> BTreeSet<String> {
        let mut classes = BTreeSet::new();
        if state.is_navigating() {
            classes.insert("is-navigating".to_string());
        }
        if data_loading {
            classes.insert("is-loading".to_string());
        }
        if !state.current_section().is_unset() {
            classes.insert(format!("section-{}", state.current_section()));
        }
        classes
    }

    /// Bring `target` in line with the state. Returns true if anything changed.
    pub fn apply<C: ClassList + ?Sized>(
        &mut self,
        state: &NavigationState,
        data_loading: bool,
        target: &mut C,
    ) -> bool {
        let next = Self::classes(state, data_loading);
        if next == self.applied {
            return false;
        }
        for stale in self.applied.difference(&next) {
            target.remove_class(stale);
        }
        for fresh in next.difference(&self.applied) {
            target.add_class(fresh);
        }
        self.applied = next;
        true
    }

    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }
}

/// Shows a control only while a given section is current
#[derive(Debug, Clone)]
pub struct SectionGate {
    section: SectionId,
}

impl SectionGate {
    pub fn new(section: impl Into<SectionId>) -> Self {
        Self {
            section: section.into(),
        }
    }

    pub fn is_open(&self, state: &NavigationState) -> bool {
        state.current_section() == &self.section
    }
}
