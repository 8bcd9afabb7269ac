use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::{
    overlay::{ClassList, DataLoadTracker, OverlayVisibility, PresentationEffect, SectionGate},
    AppConfig, History, NavigationEngine, NavigationEvent, SectionId, SectionRegistry,
};

use crate::loader::{load_latency, LoadResult};
use crate::page::PortfolioPage;
use crate::session::SessionHistory;

pub type PageEngine = NavigationEngine<PortfolioPage, SessionHistory>;

/// Sections whose content arrives from the data layer after first paint
const LAZY_SECTIONS: [&str; 2] = ["testimonials", "articles"];

/// Section whose edit control is gated on being current
const EDITABLE_SECTION: &str = "experience";

/// What the terminal is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The long-scroll page
    Page,
    /// A standalone article, outside the scrollable document
    Article { slug: String },
}

/// Presentation classes applied to the page
#[derive(Debug, Clone, Default)]
pub struct PageClasses {
    classes: BTreeSet<String>,
}

impl PageClasses {
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

impl ClassList for PageClasses {
    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }
}

/// A section fetch the host should spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJob {
    pub section: SectionId,
    pub latency: Duration,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub engine: PageEngine,
    pub loads: DataLoadTracker,
    pub presentation: PresentationEffect,
    pub classes: PageClasses,
    pub edit_gate: SectionGate,
    pub view: View,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    viewport_rows: u16,
}

impl App {
    pub fn new(config: Arc<AppConfig>, href: &str) -> folio_core::Result<Self> {
        let engine = Self::build_engine(&config, SessionHistory::new(href), 24)?;
        Ok(Self {
            config,
            engine,
            loads: DataLoadTracker::new(),
            presentation: PresentationEffect::new(),
            classes: PageClasses::default(),
            edit_gate: SectionGate::new(EDITABLE_SECTION),
            view: View::Page,
            should_quit: false,
            status_message: None,
            pending_key: None,
            viewport_rows: 24,
        })
    }

    fn build_engine(
        config: &AppConfig,
        history: SessionHistory,
        viewport_rows: u16,
    ) -> folio_core::Result<PageEngine> {
        let registry = SectionRegistry::from_config(&config.sections)?;
        let mut page = PortfolioPage::from_registry(&registry, config.ui.px_per_row);
        page.set_viewport_rows(viewport_rows);
        NavigationEngine::new(config, registry, page, history)
    }

    /// Mount the page: lazy sections start empty, listeners attach and the
    /// startup location is applied. Returns the fetches to spawn.
    pub fn start(&mut self, now: Instant) -> Vec<LoadJob> {
        let jobs: Vec<LoadJob> = LAZY_SECTIONS
            .iter()
            .map(|id| SectionId::from(*id))
            .filter_map(|id| {
                let position = self.engine.registry().position(&id)?;
                Some(LoadJob {
                    section: id,
                    latency: load_latency(position),
                })
            })
            .collect();

        for job in &jobs {
            self.engine.document_mut().unmount(&job.section);
            self.loads.begin();
        }

        self.engine.initialize(now);
        self.sync_presentation();
        jobs
    }

    /// Full page load of `href`, replacing the engine. The session history
    /// survives the load.
    pub fn reload(&mut self, href: &str, now: Instant) -> folio_core::Result<Vec<LoadJob>> {
        tracing::debug!(href = %href, "Reloading page");
        self.engine.teardown();
        let mut history = self.engine.history().clone();
        if history.href() != href {
            history.push_state(href);
        }
        self.engine = Self::build_engine(&self.config, history, self.viewport_rows)?;
        self.loads = DataLoadTracker::new();
        self.presentation = PresentationEffect::new();
        self.classes = PageClasses::default();
        self.view = View::Page;
        Ok(self.start(now))
    }

    pub fn handle_load(&mut self, result: LoadResult) {
        match result {
            LoadResult::Loaded { section } => {
                self.engine.document_mut().mount(&section);
                self.loads.finish();
                // layout changed under the viewport
                self.engine.on_resize();
            }
        }
    }

    /// Unmount a section and report the fetch that refills it
    pub fn begin_reload_section(&mut self, section: SectionId) -> Option<LoadJob> {
        let position = self.engine.registry().position(&section)?;
        if section.is_home() {
            return None;
        }
        self.engine.document_mut().unmount(&section);
        self.loads.begin();
        self.engine.on_resize();
        let label = self.engine.registry().label(&section).to_string();
        self.set_status(format!("Reloading {}", label));
        Some(LoadJob {
            section,
            latency: load_latency(position),
        })
    }

    /// Advance one frame and fold the resulting events into the UI
    pub fn tick(&mut self, now: Instant) {
        self.engine.on_frame(now);

        for event in self.engine.drain_events() {
            match event {
                NavigationEvent::TargetMissing { section, .. } => {
                    let label = self.engine.registry().label(&section).to_string();
                    self.set_status(format!("{} is not loaded yet", label));
                }
                NavigationEvent::External { url } => {
                    self.set_status(format!("Opening {}", url));
                }
                _ => {}
            }
        }

        self.sync_presentation();
    }

    fn sync_presentation(&mut self) {
        self.presentation.apply(
            self.engine.state(),
            self.loads.is_loading(),
            &mut self.classes,
        );
    }

    pub fn overlay(&self) -> OverlayVisibility {
        OverlayVisibility::compute(self.engine.state(), self.loads.is_loading())
    }

    pub fn overlay_label(&self) -> Option<String> {
        self.overlay()
            .label(self.engine.state(), self.engine.registry())
    }

    pub fn wants_fast_tick(&self) -> bool {
        self.engine.wants_frame()
    }

    pub fn show_edit_control(&self) -> bool {
        self.view == View::Page && self.edit_gate.is_open(self.engine.state())
    }

    pub fn current_url(&self) -> String {
        self.engine.history().href()
    }

    pub fn resize(&mut self, body_rows: u16) {
        self.viewport_rows = body_rows.max(1);
        self.engine
            .document_mut()
            .set_viewport_rows(self.viewport_rows);
        self.engine.on_resize();
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// User scroll by whole rows
    pub fn scroll_rows(&mut self, rows: i32) {
        self.engine.document_mut().scroll_by_rows(rows);
        self.engine.on_scroll();
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_rows(i32::from((self.viewport_rows / 2).max(1)));
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_rows(-i32::from((self.viewport_rows / 2).max(1)));
    }

    pub fn navigate_to(&mut self, section: SectionId, now: Instant) {
        self.engine.navigate(section, None, true, now);
    }

    /// Where relative section stepping starts from: the target while in
    /// flight, otherwise the current section
    fn anchor_section(&self) -> SectionId {
        let state = self.engine.state();
        state
            .target_section()
            .or_else(|| (!state.current_section().is_unset()).then(|| state.current_section()))
            .cloned()
            .unwrap_or_else(SectionId::home)
    }

    pub fn next_section(&mut self, now: Instant) {
        let anchor = self.anchor_section();
        if let Some(next) = self.engine.registry().next_after(&anchor).cloned() {
            self.navigate_to(next, now);
        }
    }

    pub fn prev_section(&mut self, now: Instant) {
        let anchor = self.anchor_section();
        if let Some(prev) = self.engine.registry().previous_before(&anchor).cloned() {
            self.navigate_to(prev, now);
        }
    }

    /// Navigate to the n-th section (0-based)
    pub fn jump_to_index(&mut self, index: usize, now: Instant) {
        if let Some(section) = self.engine.registry().sections().get(index) {
            let id = section.id.clone();
            self.navigate_to(id, now);
        }
    }

    pub fn jump_to_top(&mut self, now: Instant) {
        self.navigate_to(SectionId::home(), now);
    }

    pub fn jump_to_bottom(&mut self, now: Instant) {
        let last = self.engine.registry().last().clone();
        self.navigate_to(last, now);
    }

    pub fn history_back(&mut self, now: Instant) -> folio_core::Result<Vec<LoadJob>> {
        if self.engine.history_mut().back() {
            self.traverse(now)
        } else {
            self.set_status("Already at the oldest entry");
            Ok(Vec::new())
        }
    }

    pub fn history_forward(&mut self, now: Instant) -> folio_core::Result<Vec<LoadJob>> {
        if self.engine.history_mut().forward() {
            self.traverse(now)
        } else {
            self.set_status("Already at the newest entry");
            Ok(Vec::new())
        }
    }

    /// The session moved to another entry. Page entries replay as popstate;
    /// crossing between the page and an article is a full load.
    fn traverse(&mut self, now: Instant) -> folio_core::Result<Vec<LoadJob>> {
        let href = self.engine.history().href();
        if let Some(slug) = article_slug(&href) {
            self.engine.teardown();
            self.view = View::Article { slug };
            return Ok(Vec::new());
        }
        match self.view {
            View::Article { .. } => self.reload(&href, now),
            View::Page => {
                self.engine.on_popstate(now);
                Ok(Vec::new())
            }
        }
    }

    /// Leave the page for a standalone article view
    pub fn open_article(&mut self, slug: impl Into<String>) {
        let slug = slug.into();
        let mut url = self.engine.history().href();
        if let Ok(mut parsed) = url::Url::parse(&url) {
            parsed.set_fragment(None);
            if let Ok(joined) = parsed.join(&format!("article/{}", slug)) {
                url = joined.to_string();
            }
        }
        self.engine.history_mut().push_state(&url);
        self.engine.teardown();
        self.view = View::Article { slug };
    }

    /// Return from the article view to the articles section with a full load
    pub fn close_article(&mut self, now: Instant) -> folio_core::Result<Vec<LoadJob>> {
        self.engine.navigate_from_external_view("articles");
        match self.engine.history_mut().take_pending_load() {
            Some(href) => self.reload(&href, now),
            None => Ok(Vec::new()),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

/// Slug of an `.../article/<slug>` location
fn article_slug(href: &str) -> Option<String> {
    let url = url::Url::parse(href).ok()?;
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [.., "article", slug] if !slug.is_empty() => Some(slug.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Document;

    const BASE: &str = "http://localhost:3000/";

    fn app() -> (App, Instant) {
        let mut app = App::new(Arc::new(AppConfig::default()), BASE).unwrap();
        app.resize(30);
        let t0 = Instant::now();
        let jobs = app.start(t0);
        for job in jobs {
            app.handle_load(LoadResult::Loaded { section: job.section });
        }
        (app, t0)
    }

    fn settle(app: &mut App, from: Instant) -> Instant {
        let mut now = from;
        for _ in 0..200 {
            app.tick(now);
            now += Duration::from_millis(16);
        }
        now
    }

    #[test]
    fn test_start_reports_lazy_loads() {
        let mut app = App::new(Arc::new(AppConfig::default()), BASE).unwrap();
        let jobs = app.start(Instant::now());
        let ids: Vec<&str> = jobs.iter().map(|j| j.section.as_str()).collect();
        assert_eq!(ids, ["testimonials", "articles"]);
        assert!(app.loads.is_loading());
        assert_eq!(app.overlay(), OverlayVisibility::Loading);
        assert!(app.classes.contains("is-loading"));
    }

    #[test]
    fn test_next_section_navigates_and_settles() {
        let (mut app, t0) = app();
        app.next_section(t0);
        assert!(app.engine.state().is_navigating());
        assert_eq!(
            app.overlay_label().as_deref(),
            Some("Navigating to About…")
        );

        settle(&mut app, t0);
        assert!(app.engine.state().is_at("about"));
        assert_eq!(app.current_url(), "http://localhost:3000/#about");
        assert!(!app.classes.contains("is-navigating"));
        assert!(app.classes.contains("section-about"));
    }

    #[test]
    fn test_back_and_forward_replay_navigation() {
        let (mut app, t0) = app();
        app.jump_to_index(3, t0);
        let now = settle(&mut app, t0);
        app.jump_to_index(5, now);
        let now = settle(&mut app, now);
        assert!(app.engine.state().is_at("testimonials"));

        app.history_back(now).unwrap();
        let now = settle(&mut app, now);
        assert!(app.engine.state().is_at("skills"));

        app.history_forward(now).unwrap();
        settle(&mut app, now);
        assert_eq!(app.current_url(), "http://localhost:3000/#testimonials");
    }

    #[test]
    fn test_edit_control_follows_section() {
        let (mut app, t0) = app();
        assert!(!app.show_edit_control());
        app.jump_to_index(2, t0);
        settle(&mut app, t0);
        assert!(app.show_edit_control());
    }

    #[test]
    fn test_article_round_trip_reloads_at_articles() {
        let (mut app, t0) = app();
        app.open_article("rust-ownership");
        assert_eq!(
            app.view,
            View::Article {
                slug: "rust-ownership".into()
            }
        );
        assert_eq!(app.current_url(), "http://localhost:3000/article/rust-ownership");

        let jobs = app.close_article(t0).unwrap();
        assert_eq!(app.view, View::Page);
        assert_eq!(app.current_url(), "http://localhost:3000/#articles");
        assert!(app.engine.state().is_at("articles"));
        for job in jobs {
            app.handle_load(LoadResult::Loaded { section: job.section });
        }
        settle(&mut app, t0);
        assert!(app.engine.state().is_at("articles"));
        assert!(app.engine.document().scroll_offset() > 0.0);
    }

    #[test]
    fn test_history_survives_leaving_an_article() {
        let (mut app, t0) = app();
        app.jump_to_index(3, t0);
        let now = settle(&mut app, t0);
        app.open_article("rust-ownership");
        for job in app.close_article(now).unwrap() {
            app.handle_load(LoadResult::Loaded { section: job.section });
        }
        let now = settle(&mut app, now);
        assert_eq!(app.engine.history().len(), 4);

        assert!(app.history_back(now).unwrap().is_empty());
        assert_eq!(
            app.view,
            View::Article {
                slug: "rust-ownership".into()
            }
        );

        let jobs = app.history_back(now).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(app.view, View::Page);
        assert_eq!(app.current_url(), "http://localhost:3000/#skills");
        assert!(app.engine.state().is_at("skills"));
        assert!(app.engine.history().can_go_forward());
    }

    #[test]
    fn test_article_slug() {
        assert_eq!(
            article_slug("http://localhost:3000/article/intro").as_deref(),
            Some("intro")
        );
        assert_eq!(article_slug("http://localhost:3000/#articles"), None);
        assert_eq!(article_slug("http://localhost:3000/article/"), None);
    }

    #[test]
    fn test_user_scroll_is_detected() {
        let (mut app, t0) = app();
        let skills_top = app.engine.document().sections()[3].top_px;
        let rows = (skills_top / f64::from(app.engine.document().px_per_row())) as i32;
        app.scroll_rows(rows);
        app.tick(t0);
        assert!(app.engine.state().is_at("skills"));
        assert_eq!(app.current_url(), "http://localhost:3000/#skills");
    }
}
