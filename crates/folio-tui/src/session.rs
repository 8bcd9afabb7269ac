//! In-memory session history with back/forward traversal.

use folio_core::History;

#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<String>,
    /// Index of the current entry
    position: usize,
    /// Full page load requested via `assign`, taken by the host
    pending_load: Option<String>,
}

impl SessionHistory {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            entries: vec![href.into()],
            position: 0,
            pending_load: None,
        }
    }

    /// Step back one entry. The caller then delivers popstate.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Step forward one entry. The caller then delivers popstate.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn take_pending_load(&mut self) -> Option<String> {
        self.pending_load.take()
    }
}

impl History for SessionHistory {
    fn href(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push_state(&mut self, url: &str) {
        // a new entry drops everything forward of the current one
        self.entries.truncate(self.position + 1);
        self.entries.push(url.to_string());
        self.position = self.entries.len() - 1;
    }

    fn replace_state(&mut self, url: &str) {
        self.entries[self.position] = url.to_string();
    }

    fn assign(&mut self, url: &str) {
        self.push_state(url);
        self.pending_load = Some(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_forward() {
        let mut history = SessionHistory::new("http://x/");
        history.push_state("http://x/#about");
        history.push_state("http://x/#skills");

        assert!(history.back());
        assert_eq!(history.href(), "http://x/#about");
        assert!(history.forward());
        assert_eq!(history.href(), "http://x/#skills");
        assert!(!history.forward());
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = SessionHistory::new("http://x/");
        history.push_state("http://x/#about");
        history.push_state("http://x/#skills");
        history.back();
        history.push_state("http://x/#contact");

        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
        assert!(history.can_go_back());
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = SessionHistory::new("http://x/");
        history.replace_state("http://x/#about");
        assert_eq!(history.len(), 1);
        assert_eq!(history.href(), "http://x/#about");
        assert!(!history.back());
    }

    #[test]
    fn test_assign_requests_load() {
        let mut history = SessionHistory::new("http://x/article/1");
        history.assign("http://x/#articles");
        assert_eq!(history.take_pending_load().as_deref(), Some("http://x/#articles"));
        assert_eq!(history.take_pending_load(), None);
    }
}
