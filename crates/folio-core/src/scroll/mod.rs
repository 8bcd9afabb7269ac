//! Smooth scrolling for programmatic section navigation
//!
//! - `easing` - pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `config` - duration and frame-rate derivation from `ScrollConfig`
//! - `animation` - the token-keyed animator built on the above
//!
//! # Usage
//!
//! ```ignore
//! use folio_core::scroll::{ScrollAnimator, FrameStep};
//!
//! let mut animator = ScrollAnimator::with_defaults();
//! let (token, _superseded) = animator.start(0.0, 2400.0, Instant::now());
//!
//! // On every animation frame
//! match animator.step(Instant::now()) {
//!     FrameStep::Moved { offset } => document.set_scroll_offset(offset),
//!     FrameStep::Completed { offset, token } => { /* settle */ }
//!     FrameStep::Idle => {}
//! }
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::{AnimationToken, FrameStep, ScrollAnimator};
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
