use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::page::PageRow;
use crate::theme::Theme;

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let page = app.engine.document();
        let state = app.engine.state();
        let dimmed = app.classes.contains("is-navigating");

        let text_style = if dimmed {
            Style::default().fg(theme.grey0)
        } else {
            Style::default().fg(theme.fg0)
        };

        let lines: Vec<Line> = page
            .rows()
            .into_iter()
            .skip(page.scroll_row())
            .take(area.height as usize)
            .map(|row| match row {
                PageRow::Heading(section) => {
                    let is_current = state.current_section() == &section.id;
                    let style = if is_current {
                        Style::default()
                            .fg(theme.active)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                            .fg(theme.heading)
                            .add_modifier(Modifier::BOLD)
                    };
                    let mut spans = vec![Span::styled(format!("## {}", section.label), style)];
                    if is_current && app.edit_gate.is_open(state) {
                        spans.push(Span::styled("  [edit]", Style::default().fg(theme.accent)));
                    }
                    Line::from(spans)
                }
                PageRow::Text(text) => Line::from(Span::styled(text.to_string(), text_style)),
                PageRow::Placeholder => Line::from(Span::styled(
                    "  loading…",
                    Style::default()
                        .fg(theme.loading)
                        .add_modifier(Modifier::ITALIC),
                )),
                PageRow::Blank => Line::default(),
            })
            .collect();

        let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.bg0));
        frame.render_widget(paragraph, area);
    }
}
