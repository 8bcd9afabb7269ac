//! Scroll animation controller
//!
//! Holds at most one live animation. Every `start()` issues a fresh,
//! monotonically increasing token; a started animation replaces the previous
//! one, so a superseded token can never reach `FrameStep::Completed`.

use std::fmt;
use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

/// Identity of one `start()` invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationToken(u64);

impl AnimationToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    token: AnimationToken,
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Outcome of advancing the animator by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Nothing in flight
    Idle,
    /// Write `offset` and keep requesting frames
    Moved { offset: f64 },
    /// Final frame: write `offset`; `token`'s completion fires exactly once
    Completed { offset: f64, token: AnimationToken },
}

/// Eased, time-bounded, cancelable scroll animation
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    last_token: u64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            last_token: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Token of the live animation
    pub fn current_token(&self) -> Option<AnimationToken> {
        self.animation.as_ref().map(|a| a.token)
    }

    /// Final offset of the live animation
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Issue a token without animating, for navigations that settle at once
    pub fn issue_token(&mut self) -> AnimationToken {
        self.last_token += 1;
        AnimationToken(self.last_token)
    }

    /// Start animating from `from` to `to`, superseding any live animation.
    ///
    /// Duration is scaled by the travelled distance. Returns the new token
    /// and the token of the animation it replaced, if any.
    pub fn start(
        &mut self,
        from: f64,
        to: f64,
        now: Instant,
    ) -> (AnimationToken, Option<AnimationToken>) {
        let duration = self.config.duration_for(to - from);
        self.start_with_duration(from, to, duration, now)
    }

    pub fn start_with_duration(
        &mut self,
        from: f64,
        to: f64,
        duration: Duration,
        now: Instant,
    ) -> (AnimationToken, Option<AnimationToken>) {
        let superseded = self.cancel();
        let token = self.issue_token();

        tracing::debug!(
            %token,
            from,
            to,
            duration_ms = duration.as_millis() as u64,
            "Starting scroll animation"
        );

        self.animation = Some(ActiveAnimation {
            token,
            start: now,
            from,
            to,
            duration,
            easing: self.config.easing,
        });

        (token, superseded)
    }

    /// Advance to `now` and report the offset to write
    pub fn step(&mut self, now: Instant) -> FrameStep {
        let Some(anim) = self.animation.as_ref() else {
            return FrameStep::Idle;
        };

        if is_complete(anim.start, anim.duration, now) {
            let step = FrameStep::Completed {
                offset: anim.to,
                token: anim.token,
            };
            self.animation = None;
            return step;
        }

        let t = progress(anim.start, anim.duration, now);
        FrameStep::Moved {
            offset: lerp(anim.from, anim.to, anim.easing.apply(t)),
        }
    }

    /// Drop the live animation without completing it
    pub fn cancel(&mut self) -> Option<AnimationToken> {
        self.animation.take().map(|a| a.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_animation_runs_to_completion() {
        let mut animator = ScrollAnimator::with_defaults();
        let t0 = Instant::now();
        let (token, superseded) = animator.start(0.0, 1000.0, t0);
        assert!(superseded.is_none());
        assert!(animator.is_animating());
        assert_eq!(animator.target(), Some(1000.0));

        // distance 1000px -> 1000ms; cubic in-out hits the midpoint at half time
        match animator.step(t0 + ms(500)) {
            FrameStep::Moved { offset } => assert!((offset - 500.0).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(
            animator.step(t0 + ms(1000)),
            FrameStep::Completed { offset: 1000.0, token }
        );
        assert!(!animator.is_animating());
        assert_eq!(animator.step(t0 + ms(1100)), FrameStep::Idle);
    }

    #[test]
    fn test_superseded_animation_never_completes() {
        let mut animator = ScrollAnimator::with_defaults();
        let t0 = Instant::now();
        let (first, _) = animator.start(0.0, 800.0, t0);
        let (second, superseded) = animator.start(40.0, 2000.0, t0 + ms(50));

        assert_eq!(superseded, Some(first));
        assert!(second > first);

        let mut completions = Vec::new();
        for frame in 0..200 {
            if let FrameStep::Completed { token, .. } = animator.step(t0 + ms(frame * 16)) {
                completions.push(token);
            }
        }
        assert_eq!(completions, vec![second]);
    }

    #[test]
    fn test_cancel_returns_token_and_stops() {
        let mut animator = ScrollAnimator::with_defaults();
        let t0 = Instant::now();
        let (token, _) = animator.start(0.0, 700.0, t0);
        assert_eq!(animator.cancel(), Some(token));
        assert_eq!(animator.step(t0 + ms(5000)), FrameStep::Idle);
        assert_eq!(animator.cancel(), None);
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let mut animator = ScrollAnimator::with_defaults();
        let a = animator.issue_token();
        let (b, _) = animator.start(0.0, 100.0, Instant::now());
        let c = animator.issue_token();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_upward_animation_interpolates_down() {
        let mut animator = ScrollAnimator::with_defaults();
        let t0 = Instant::now();
        animator.start_with_duration(1200.0, 200.0, ms(800), t0);
        match animator.step(t0 + ms(200)) {
            FrameStep::Moved { offset } => assert!(offset < 1200.0 && offset > 200.0),
            other => panic!("unexpected {:?}", other),
        }
    }
}
