use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Standalone article view, outside the long-scroll page
pub struct ArticleWidget;

impl ArticleWidget {
    pub fn render(frame: &mut Frame, area: Rect, slug: &str, theme: &Theme) {
        let title = slug.replace('-', " ");
        let lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
                Style::default().fg(theme.fg0),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press Esc to return to the articles section.",
                Style::default().fg(theme.grey1),
            )),
        ];

        let block = Block::default()
            .title(" Article ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
