pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod navigation;
pub mod overlay;
pub mod resolver;
pub mod sampler;
pub mod scroll;
pub mod section;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{AppConfig, EasingType, NavigationConfig, ScrollConfig};
pub use error::{Error, Result};
pub use host::{Document, ElementRect, History};
pub use navigation::{NavigateOutcome, NavigationEngine, NavigationEvent, NavigationState};
pub use section::{Section, SectionId, SectionRegistry, HOME};
