//! In-memory page and history used by the unit tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::host::{Document, ElementRect, History};

/// Page laid out as absolute `(top, height)` blocks keyed by element id
#[derive(Debug, Clone)]
pub struct FakeDocument {
    pub offset: f64,
    pub viewport: f64,
    pub nav_height: Option<f64>,
    blocks: BTreeMap<String, (f64, f64)>,
    unmounted: BTreeSet<String>,
    pub writes: usize,
}

impl FakeDocument {
    /// Default portfolio: header 0..600, then 800px sections except
    /// experience (1000px); content ends at 6400, viewport 900
    pub fn portfolio() -> Self {
        let layout = [
            ("home", 0.0, 600.0),
            ("about", 600.0, 800.0),
            ("experience", 1400.0, 1000.0),
            ("skills", 2400.0, 800.0),
            ("certifications", 3200.0, 800.0),
            ("testimonials", 4000.0, 800.0),
            ("articles", 4800.0, 800.0),
            ("contact", 5600.0, 800.0),
        ];
        Self {
            offset: 0.0,
            viewport: 900.0,
            nav_height: Some(80.0),
            blocks: layout
                .into_iter()
                .map(|(id, top, height)| (id.to_string(), (top, height)))
                .collect(),
            unmounted: BTreeSet::new(),
            writes: 0,
        }
    }

    pub fn unmount(&mut self, id: &str) {
        self.unmounted.insert(id.to_string());
    }

    pub fn mount(&mut self, id: &str) {
        self.unmounted.remove(id);
    }
}

impl Document for FakeDocument {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.writes += 1;
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn scroll_height(&self) -> f64 {
        self.blocks
            .values()
            .map(|(top, height)| top + height)
            .fold(0.0, f64::max)
    }

    fn nav_bar_height(&self) -> Option<f64> {
        self.nav_height
    }

    fn header_height(&self) -> Option<f64> {
        self.blocks.get("home").map(|(_, h)| *h)
    }

    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        if self.unmounted.contains(id) {
            return None;
        }
        let (top, height) = self.blocks.get(id)?;
        Some(ElementRect::new(top - self.offset, top + height - self.offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCall {
    Push(String),
    Replace(String),
    Assign(String),
}

/// Session history recording every write
#[derive(Debug, Clone)]
pub struct FakeHistory {
    pub href: String,
    pub calls: Vec<HistoryCall>,
}

impl FakeHistory {
    pub fn at(href: &str) -> Self {
        Self {
            href: href.to_string(),
            calls: Vec::new(),
        }
    }

    pub fn pushes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HistoryCall::Push(_)))
            .count()
    }

    pub fn replaces(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HistoryCall::Replace(_)))
            .count()
    }

    pub fn last_call(&self) -> Option<&HistoryCall> {
        self.calls.last()
    }
}

impl History for FakeHistory {
    fn href(&self) -> String {
        self.href.clone()
    }

    fn push_state(&mut self, url: &str) {
        self.href = url.to_string();
        self.calls.push(HistoryCall::Push(url.to_string()));
    }

    fn replace_state(&mut self, url: &str) {
        self.href = url.to_string();
        self.calls.push(HistoryCall::Replace(url.to_string()));
    }

    fn assign(&mut self, url: &str) {
        self.calls.push(HistoryCall::Assign(url.to_string()));
    }
}
