//! Simulated long-scroll portfolio page.
//!
//! Sections are stacked blocks measured in page pixels; the terminal shows
//! `px_per_row` pixels per row. Lazily rendered sections start unmounted and
//! mount after their data arrives.

use std::collections::HashSet;

use folio_core::{Document, ElementRect, SectionId, SectionRegistry};

/// Height of the sticky nav bar in rows
pub const NAV_BAR_ROWS: u16 = 3;

const MIN_SECTION_ROWS: u16 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct PageSection {
    pub id: SectionId,
    pub label: String,
    pub top_px: f64,
    pub height_px: f64,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PortfolioPage {
    sections: Vec<PageSection>,
    unmounted: HashSet<SectionId>,
    scroll_px: f64,
    viewport_rows: u16,
    px_per_row: u16,
}

impl PortfolioPage {
    /// Lay the registry out top to bottom with placeholder content
    pub fn from_registry(registry: &SectionRegistry, px_per_row: u16) -> Self {
        let px_per_row = px_per_row.max(1);
        let mut top = 0.0;
        let mut sections = Vec::new();
        let count = registry.sections().len();

        for (idx, section) in registry.sections().iter().enumerate() {
            let lines = placeholder_lines(&section.display_label, idx);
            // at least as tall as the detection band; the last section is
            // stretched so it can reach the top of the viewport
            let mut rows = (lines.len() as u16 + 2).max(MIN_SECTION_ROWS);
            if idx + 1 == count {
                rows = rows.max(40);
            }
            let height_px = f64::from(rows) * f64::from(px_per_row);
            sections.push(PageSection {
                id: section.id.clone(),
                label: section.display_label.clone(),
                top_px: top,
                height_px,
                lines,
            });
            top += height_px;
        }

        Self {
            sections,
            unmounted: HashSet::new(),
            scroll_px: 0.0,
            viewport_rows: 24,
            px_per_row,
        }
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    pub fn px_per_row(&self) -> u16 {
        self.px_per_row
    }

    /// Rows available to the page body (terminal minus nav and status bars)
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows.max(1);
        let max = self.max_scroll_offset();
        self.scroll_px = self.scroll_px.min(max);
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// First page row visible under the nav bar
    pub fn scroll_row(&self) -> usize {
        (self.scroll_px / f64::from(self.px_per_row)).round() as usize
    }

    pub fn scroll_by_rows(&mut self, rows: i32) {
        let offset = self.scroll_px + f64::from(rows) * f64::from(self.px_per_row);
        self.set_scroll_offset(offset);
    }

    pub fn unmount(&mut self, id: &SectionId) {
        self.unmounted.insert(id.clone());
    }

    pub fn mount(&mut self, id: &SectionId) {
        self.unmounted.remove(id);
    }

    pub fn is_mounted(&self, id: &SectionId) -> bool {
        !self.unmounted.contains(id)
    }

    /// Page rendered as one line per row, for the page widget
    pub fn rows(&self) -> Vec<PageRow<'_>> {
        let mut rows = Vec::new();
        for section in &self.sections {
            let total = (section.height_px / f64::from(self.px_per_row)).round() as usize;
            let mounted = self.is_mounted(&section.id);
            rows.push(PageRow::Heading(section));
            for i in 0..total.saturating_sub(1) {
                if !mounted {
                    rows.push(if i == 0 {
                        PageRow::Placeholder
                    } else {
                        PageRow::Blank
                    });
                    continue;
                }
                match section.lines.get(i) {
                    Some(line) => rows.push(PageRow::Text(line)),
                    None => rows.push(PageRow::Blank),
                }
            }
        }
        rows
    }
}

/// One terminal row of the page
#[derive(Debug, Clone, PartialEq)]
pub enum PageRow<'a> {
    Heading(&'a PageSection),
    Text(&'a str),
    Placeholder,
    Blank,
}

fn placeholder_lines(label: &str, idx: usize) -> Vec<String> {
    let paragraphs = 3 + (idx * 5) % 7;
    (0..paragraphs)
        .map(|n| match n % 3 {
            0 => format!("{} · entry {}", label, n + 1),
            1 => "  Lorem ipsum dolor sit amet, consectetur adipiscing elit.".to_string(),
            _ => String::new(),
        })
        .collect()
}

impl Document for PortfolioPage {
    fn scroll_offset(&self) -> f64 {
        self.scroll_px
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_px = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn viewport_height(&self) -> f64 {
        f64::from(self.viewport_rows + NAV_BAR_ROWS) * f64::from(self.px_per_row)
    }

    fn scroll_height(&self) -> f64 {
        self.sections
            .last()
            .map(|s| s.top_px + s.height_px)
            .unwrap_or(0.0)
            + f64::from(NAV_BAR_ROWS) * f64::from(self.px_per_row)
    }

    fn nav_bar_height(&self) -> Option<f64> {
        Some(f64::from(NAV_BAR_ROWS) * f64::from(self.px_per_row))
    }

    fn header_height(&self) -> Option<f64> {
        self.sections
            .first()
            .filter(|s| s.id.is_home())
            .map(|s| s.height_px)
    }

    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        let section = self.sections.iter().find(|s| s.id == id)?;
        if !self.is_mounted(&section.id) {
            return None;
        }
        // the page body starts below the sticky bar
        let top = section.top_px + self.nav_bar_height().unwrap_or(0.0) - self.scroll_px;
        Some(ElementRect::new(top, top + section.height_px))
    }
}
