//! Passive scroll listener that coalesces events onto the frame clock.

/// Coalesces bursts of scroll/resize events into at most one pending frame.
///
/// The sampler never touches navigation state; the engine asks it on each
/// granted frame whether the resolver should run.
#[derive(Debug, Clone, Default)]
pub struct ScrollSampler {
    subscribed: bool,
    frame_pending: bool,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// Release the listener; a pending frame is dropped
    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
        self.frame_pending = false;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_pending
    }

    /// Record a scroll event. Returns true only when this event scheduled a
    /// new frame; events arriving while one is pending are absorbed.
    pub fn on_event(&mut self) -> bool {
        if !self.subscribed || self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Consume the pending frame. Returns true when the resolver should run.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_coalesces_to_one_frame() {
        let mut sampler = ScrollSampler::new();
        sampler.subscribe();

        let scheduled = (0..50).filter(|_| sampler.on_event()).count();
        assert_eq!(scheduled, 1);
        assert!(sampler.take_frame());
        assert!(!sampler.take_frame());

        assert!(sampler.on_event());
    }

    #[test]
    fn test_unsubscribed_ignores_events() {
        let mut sampler = ScrollSampler::new();
        assert!(!sampler.on_event());

        sampler.subscribe();
        sampler.on_event();
        sampler.unsubscribe();
        assert!(!sampler.has_pending_frame());
        assert!(!sampler.on_event());
    }
}
