use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let state = app.engine.state();
        let registry = app.engine.registry();
        let inner_width = area.width.saturating_sub(2) as usize;

        // Share the width evenly; labels that don't fit are truncated
        let count = registry.sections().len().max(1);
        let slot = (inner_width / count).max(4);

        let mut spans = Vec::with_capacity(count);
        for (idx, section) in registry.sections().iter().enumerate() {
            let text = format!("{} {}", idx + 1, section.display_label);
            let text = truncate_to_width(&text, slot.saturating_sub(1));
            let pad = slot.saturating_sub(text.width());

            let is_current = state.current_section() == &section.id;
            let is_target = state.target_section() == Some(&section.id);

            let style = if is_target {
                Style::default()
                    .fg(theme.navigating)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if is_current {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.active)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg0)
            };

            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" ".repeat(pad)));
        }

        let border_style = if app.classes.contains("is-navigating") {
            Style::default().fg(theme.navigating)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(" folio ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg1));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

/// Truncate to at most `max_width` display columns, with an ellipsis
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("About", 10), "About");
        assert_eq!(truncate_to_width("Certifications", 6), "Certi…");
        assert_eq!(truncate_to_width("経歴経歴", 5), "経歴…");
    }
}
