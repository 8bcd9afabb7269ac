mod article;
mod nav_bar;
mod overlay;
mod page;
mod status_bar;

pub use article::ArticleWidget;
pub use nav_bar::NavBarWidget;
pub use overlay::OverlayWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};
use crate::page::NAV_BAR_ROWS;
use crate::theme::Theme;

/// Draw the whole screen: nav bar, body, status bar and the overlay on top
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAV_BAR_ROWS),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    match &app.view {
        View::Page => {
            NavBarWidget::render(frame, chunks[0], app, theme);
            PageWidget::render(frame, chunks[1], app, theme);
            if let Some(label) = app.overlay_label() {
                OverlayWidget::render(frame, chunks[1], &label, app.overlay(), theme);
            }
        }
        View::Article { slug } => {
            NavBarWidget::render(frame, chunks[0], app, theme);
            ArticleWidget::render(frame, chunks[1], slug, theme);
        }
    }

    StatusBarWidget::render(frame, chunks[2], app, theme);
}

/// Rows left for the page body in a terminal of `height` rows
pub fn body_rows(height: u16) -> u16 {
    height.saturating_sub(NAV_BAR_ROWS + 1).max(1)
}
