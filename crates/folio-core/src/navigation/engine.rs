//! The navigation engine.
//!
//! Three asynchronous sources feed it, all delivered by the host on one
//! thread: scroll/resize events, animation frames, and popstate. The engine
//! is the only writer of `NavigationState`; detection results are discarded
//! while a programmatic navigation is in flight so the resolver can never
//! fight the animator.

use std::time::{Duration, Instant};

use crate::config::{AppConfig, NavigationConfig};
use crate::history::{HistorySync, WriteMode};
use crate::host::{Document, History};
use crate::resolver::{ActiveSectionResolver, ViewportMetrics};
use crate::sampler::ScrollSampler;
use crate::scroll::{AnimationToken, FrameStep, ScrollAnimator, ScrollConfigExt};
use crate::section::{SectionId, SectionRegistry};
use crate::Result;

use super::events::{NavigateOutcome, NavigationEvent};
use super::state::NavigationState;

/// Initial hash navigation waiting for lazily mounted sections
#[derive(Debug, Clone)]
struct PendingNavigation {
    due: Instant,
    section: SectionId,
    sub_path: Option<String>,
}

pub struct NavigationEngine<D, H> {
    registry: SectionRegistry,
    config: NavigationConfig,
    state: NavigationState,
    animator: ScrollAnimator,
    active_token: Option<AnimationToken>,
    resolver: ActiveSectionResolver,
    sampler: ScrollSampler,
    sync: HistorySync,
    resize_attached: bool,
    popstate_attached: bool,
    pending_initial: Option<PendingNavigation>,
    last_observed: Option<SectionId>,
    events: Vec<NavigationEvent>,
    document: D,
    history: H,
}

impl<D: Document, H: History> NavigationEngine<D, H> {
    pub fn new(
        config: &AppConfig,
        registry: SectionRegistry,
        document: D,
        history: H,
    ) -> Result<Self> {
        Ok(Self {
            registry,
            config: config.navigation.clone(),
            state: NavigationState::default(),
            animator: ScrollAnimator::new(config.scroll.clone()),
            active_token: None,
            resolver: ActiveSectionResolver::new(config.navigation.clone()),
            sampler: ScrollSampler::new(),
            sync: HistorySync::new(&config.general.base_url)?,
            resize_attached: false,
            popstate_attached: false,
            pending_initial: None,
            last_observed: None,
            events: Vec::new(),
            document,
            history,
        })
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Host access for layout changes; state is untouched
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Href encoding the current state
    pub fn current_url(&self) -> String {
        self.sync
            .url_for(&self.state.current_section, self.state.current_sub_path.as_deref())
    }

    /// Latest resolver output, including frames where it was not applied
    pub fn last_observed(&self) -> Option<&SectionId> {
        self.last_observed.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the host should keep delivering frames at animation rate
    pub fn wants_frame(&self) -> bool {
        self.animator.is_animating()
            || self.sampler.has_pending_frame()
            || self.pending_initial.is_some()
    }

    /// Attach listeners and apply the startup location.
    ///
    /// Without a hash the page starts at `home`, scrolled to the top.
    /// Otherwise the hash section becomes current at once and the scroll is
    /// scheduled after the settle delay so lazy sections can mount.
    pub fn initialize(&mut self, now: Instant) {
        self.sampler.subscribe();
        self.resize_attached = true;
        self.popstate_attached = true;

        self.sync.normalize_startup(&mut self.history);

        let href = self.history.href();
        let (section, sub_path) = self.sync.decode_href(&href).unwrap_or_else(|e| {
            tracing::warn!(href = %href, error = %e, "Unreadable startup location, using home");
            (SectionId::home(), None)
        });

        if section.is_home() {
            self.state.current_section = section;
            self.state.current_sub_path = None;
            self.document.set_scroll_offset(0.0);
            self.sync.commit(
                &mut self.history,
                &self.state.current_section,
                None,
                WriteMode::Replace,
            );
            tracing::debug!("Initialised at home");
            return;
        }

        tracing::debug!(
            section = %section,
            sub_path = ?sub_path,
            delay_ms = self.config.settle_delay_ms,
            "Scheduling initial hash navigation"
        );
        self.state.current_section = section.clone();
        self.state.current_sub_path = sub_path.clone();
        self.pending_initial = Some(PendingNavigation {
            due: now + Duration::from_millis(self.config.settle_delay_ms),
            section,
            sub_path,
        });
    }

    /// Navigate with animation, no sub-path
    pub fn navigate_to(&mut self, section: impl Into<SectionId>, now: Instant) -> NavigateOutcome {
        self.navigate(section, None, true, now)
    }

    /// User-initiated navigation; adds a history entry
    pub fn navigate(
        &mut self,
        section: impl Into<SectionId>,
        sub_path: Option<&str>,
        use_scrolling: bool,
        now: Instant,
    ) -> NavigateOutcome {
        self.navigate_with(section.into(), sub_path, use_scrolling, now, WriteMode::Push)
    }

    /// Leave a standalone view (e.g. an article page) for a section of the
    /// long-scroll page. That view is not part of the scrollable document, so
    /// this is a full page load of the base path with the section hash.
    pub fn navigate_from_external_view(&mut self, section: impl Into<SectionId>) {
        let section = section.into();
        let url = self.sync.url_for(&section, None);
        tracing::debug!(section = %section, url = %url, "Leaving external view");
        self.history.assign(&url);
        self.events.push(NavigationEvent::External { url });
    }

    fn navigate_with(
        &mut self,
        section: SectionId,
        sub_path: Option<&str>,
        use_scrolling: bool,
        now: Instant,
        mode: WriteMode,
    ) -> NavigateOutcome {
        let sub_path = sub_path.filter(|s| !s.is_empty()).map(str::to_string);
        self.pending_initial = None;

        if self.state.is_navigating
            && self.state.target_section.as_ref() == Some(&section)
            && self.state.current_sub_path == sub_path
        {
            if let Some(token) = self.active_token {
                tracing::debug!(section = %section, %token, "Already navigating there");
                return NavigateOutcome::AlreadyNavigating(token);
            }
        }

        if let Some(old) = self.animator.cancel() {
            tracing::debug!(token = %old, next = %section, "Superseding scroll animation");
            self.events.push(NavigationEvent::Superseded {
                section: self.state.target_section.clone(),
                token: old,
            });
        }
        self.active_token = None;

        self.state.current_section = section.clone();
        self.state.current_sub_path = sub_path;
        self.state.is_navigating = true;
        self.state.target_section = Some(section.clone());
        self.sync.commit(
            &mut self.history,
            &self.state.current_section,
            self.state.current_sub_path.as_deref(),
            mode,
        );

        if !use_scrolling {
            let token = self.begin_immediate(&section);
            self.settle(token);
            return NavigateOutcome::Settled(token);
        }

        let from = self.document.scroll_offset();
        let Some(target) = self.target_offset(&section) else {
            let token = self.begin_immediate(&section);
            tracing::warn!(section = %section, %token, "Navigation target not mounted, settling in place");
            self.events.push(NavigationEvent::TargetMissing {
                section: section.clone(),
                token,
            });
            self.settle(token);
            return NavigateOutcome::TargetMissing(token);
        };

        let within_epsilon = (target - from).abs() <= self.config.arrival_epsilon_px;
        if within_epsilon || !self.animator.config().is_smooth() {
            let token = self.begin_immediate(&section);
            if !within_epsilon {
                self.document.set_scroll_offset(target);
            }
            self.settle(token);
            return NavigateOutcome::Settled(token);
        }

        let (token, _) = self.animator.start(from, target, now);
        self.active_token = Some(token);
        self.events.push(NavigationEvent::Started {
            section: section.clone(),
            token,
            animated: true,
        });
        tracing::debug!(section = %section, %token, from, target, "Navigating");
        NavigateOutcome::Animating(token)
    }

    fn begin_immediate(&mut self, section: &SectionId) -> AnimationToken {
        let token = self.animator.issue_token();
        self.events.push(NavigationEvent::Started {
            section: section.clone(),
            token,
            animated: false,
        });
        token
    }

    fn settle(&mut self, token: AnimationToken) {
        self.state.is_navigating = false;
        self.state.target_section = None;
        self.active_token = None;
        tracing::debug!(section = %self.state.current_section, %token, "Navigation settled");
        self.events.push(NavigationEvent::Settled {
            section: self.state.current_section.clone(),
            token,
        });
    }

    /// Scroll offset that puts the section's top edge just under the nav bar
    fn target_offset(&self, section: &SectionId) -> Option<f64> {
        if section.is_home() {
            return Some(0.0);
        }
        let rect = self.registry.resolve_element(section, &self.document)?;
        let metrics = ViewportMetrics::measure(&self.document, &self.config);
        let target = metrics.scroll_offset + rect.top - metrics.nav_height;
        Some(target.clamp(0.0, self.document.max_scroll_offset()))
    }

    /// Native scroll event. Returns true if it scheduled a frame.
    pub fn on_scroll(&mut self) -> bool {
        self.sampler.on_event()
    }

    /// Viewport resize; remeasured on the next frame like a scroll
    pub fn on_resize(&mut self) -> bool {
        if !self.resize_attached {
            return false;
        }
        self.sampler.on_event()
    }

    /// Back/forward: replay the location as an animated navigation
    pub fn on_popstate(&mut self, now: Instant) {
        if !self.popstate_attached {
            return;
        }

        let href = self.history.href();
        if self.sync.is_echo(&href) && !self.state.is_navigating {
            tracing::trace!(href = %href, "Ignoring own history write");
            return;
        }

        match self.sync.decode_href(&href) {
            Ok((section, sub_path)) => {
                tracing::debug!(section = %section, "History traversal");
                self.navigate_with(section, sub_path.as_deref(), true, now, WriteMode::Replace);
            }
            Err(e) => {
                tracing::warn!(href = %href, error = %e, "Ignoring unparseable history location");
            }
        }
    }

    /// One animation frame
    pub fn on_frame(&mut self, now: Instant) {
        if self.pending_initial.as_ref().is_some_and(|p| now >= p.due) {
            if let Some(pending) = self.pending_initial.take() {
                self.navigate_with(
                    pending.section,
                    pending.sub_path.as_deref(),
                    true,
                    now,
                    WriteMode::Replace,
                );
            }
        }

        if self.sampler.take_frame() {
            self.run_resolver();
        }

        match self.animator.step(now) {
            FrameStep::Idle => {}
            FrameStep::Moved { offset } => self.document.set_scroll_offset(offset),
            FrameStep::Completed { offset, token } => {
                self.document.set_scroll_offset(offset);
                if self.active_token == Some(token) {
                    self.settle(token);
                } else {
                    tracing::trace!(%token, "Dropping stale animation completion");
                }
            }
        }
    }

    fn run_resolver(&mut self) {
        let metrics = ViewportMetrics::measure(&self.document, &self.config);
        let resolved = self
            .resolver
            .resolve_with(&metrics, &self.registry, &self.document);

        tracing::trace!(
            offset = metrics.scroll_offset,
            nav_height = metrics.nav_height,
            resolved = ?resolved,
            navigating = self.state.is_navigating,
            "Resolved active section"
        );
        self.last_observed = resolved.clone();

        // Programmatic navigation owns the state until it settles
        if self.state.is_navigating || self.pending_initial.is_some() {
            return;
        }

        let Some(section) = resolved else {
            return;
        };
        if section == self.state.current_section {
            return;
        }

        tracing::debug!(from = %self.state.current_section, to = %section, "Observed section change");
        self.state.current_section = section.clone();
        self.state.current_sub_path = None;
        self.sync
            .commit(&mut self.history, &section, None, WriteMode::Replace);
        self.events.push(NavigationEvent::Observed { section });
    }

    /// Detach every listener; a live animation is dropped without completing
    pub fn teardown(&mut self) {
        self.sampler.unsubscribe();
        self.resize_attached = false;
        self.popstate_attached = false;
        self.pending_initial = None;

        if let Some(token) = self.animator.cancel() {
            self.events.push(NavigationEvent::Superseded {
                section: self.state.target_section.take(),
                token,
            });
        }
        self.active_token = None;
        self.state.is_navigating = false;
        self.state.target_section = None;
        tracing::debug!("Navigation listeners detached");
    }
}
