use serde::Serialize;

use crate::section::SectionId;

/// Whether a programmatic scroll is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Navigating,
}

/// Single source of truth for the current section.
///
/// Only the engine writes it; consumers get a shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub(crate) current_section: SectionId,
    pub(crate) current_sub_path: Option<String>,
    pub(crate) is_navigating: bool,
    pub(crate) target_section: Option<SectionId>,
}

impl NavigationState {
    /// Section settled on by detection, or the one requested while navigating.
    /// Empty until the first resolution.
    pub fn current_section(&self) -> &SectionId {
        &self.current_section
    }

    pub fn current_sub_path(&self) -> Option<&str> {
        self.current_sub_path.as_deref()
    }

    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }

    pub fn target_section(&self) -> Option<&SectionId> {
        self.target_section.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.is_navigating {
            Phase::Navigating
        } else {
            Phase::Idle
        }
    }

    pub fn is_at(&self, section: &str) -> bool {
        self.current_section == *section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_undetermined_and_idle() {
        let state = NavigationState::default();
        assert!(state.current_section().is_unset());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.target_section(), None);
        assert_eq!(state.current_sub_path(), None);
    }

    #[test]
    fn test_serializes_for_debug_dumps() {
        let state = NavigationState {
            current_section: SectionId::from("skills"),
            current_sub_path: None,
            is_navigating: true,
            target_section: Some(SectionId::from("skills")),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["current_section"], "skills");
        assert_eq!(json["is_navigating"], true);
        assert!(state.is_at("skills"));
        assert_eq!(state.phase(), Phase::Navigating);
    }
}
