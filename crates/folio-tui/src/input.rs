use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, View};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    NextSection,
    PrevSection,
    JumpToSection(usize), // 1-9: n-th section, 0-based
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    HistoryBack,
    HistoryForward,
    OpenArticle,
    CloseArticle,
    ReloadSection,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let View::Article { .. } = app.view {
        return handle_article_view(key);
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Free scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        // Section navigation
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::BackTab, _) => Action::PrevSection,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpToSection(c as usize - '1' as usize)
        }

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Char('G'), KeyModifiers::NONE) => Action::JumpToBottom,

        // History navigation
        (KeyCode::Char('u'), KeyModifiers::NONE) => Action::HistoryBack,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::HistoryForward,

        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::OpenArticle,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ReloadSection,

        _ => Action::None,
    }
}

/// Keys while a standalone article is open
fn handle_article_view(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Action::CloseArticle,
        (KeyCode::Char('u'), KeyModifiers::NONE) => Action::CloseArticle,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_core::AppConfig;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), "http://localhost:3000/").unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_jump_to_sections() {
        let app = app();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1')), &app),
            Action::JumpToSection(0)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('9')), &app),
            Action::JumpToSection(8)
        );
    }

    #[test]
    fn test_gg_needs_two_presses() {
        let mut app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(key(KeyCode::Char('g')), &app), Action::JumpToTop);
    }

    #[test]
    fn test_history_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('u')), &app), Action::HistoryBack);
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                &app
            ),
            Action::HistoryForward
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char('e')), &app), Action::OpenArticle);
    }

    #[test]
    fn test_article_view_keys() {
        let mut app = app();
        app.view = View::Article {
            slug: "intro".into(),
        };
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::CloseArticle);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::None);
    }
}
