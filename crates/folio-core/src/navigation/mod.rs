//! Navigation state machine and the engine that drives it
//!
//! - `state` - the read-only `NavigationState` record and its phases
//! - `events` - transition journal and `navigate()` outcomes
//! - `engine` - the single writer wiring sampler, resolver, animator and history

pub mod engine;
pub mod events;
pub mod state;

pub use engine::NavigationEngine;
pub use events::{NavigateOutcome, NavigationEvent};
pub use state::{NavigationState, Phase};
