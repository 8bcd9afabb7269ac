use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use folio_core::overlay::OverlayVisibility;

use crate::theme::Theme;

pub struct OverlayWidget;

impl OverlayWidget {
    /// Render the navigating/loading indicator centered over `area`
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        label: &str,
        visibility: OverlayVisibility,
        theme: &Theme,
    ) {
        let color = match visibility {
            OverlayVisibility::Loading => theme.loading,
            _ => theme.navigating,
        };

        let width = (label.chars().count() as u16 + 6).min(area.width.saturating_sub(4));
        let height = 3u16.min(area.height);
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.bg1));

        let paragraph = Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);

        frame.render_widget(paragraph, popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
