use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use folio_core::navigation::Phase;

use crate::app::{App, View};
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let state = app.engine.state();

        let mode_str = match (&app.view, state.phase()) {
            (View::Article { .. }, _) => "ARTICLE",
            (View::Page, Phase::Navigating) => "NAVIGATING",
            (View::Page, Phase::Idle) => "NORMAL",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let mut text = format!(" {} | {}", mode_str, app.current_url());
            if app.show_edit_control() {
                text.push_str(" | e:edit");
            }
            text
        };

        let help_hint = match app.view {
            View::Page => " q:quit j/k:scroll Tab:next 1-9:jump u:back ",
            View::Article { .. } => " Esc:back to articles ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
