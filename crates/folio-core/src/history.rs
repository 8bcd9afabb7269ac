//! URL hash codec and history synchronisation.
//!
//! Hash grammar: `#<section>` or `#<section>/<subPath>`; no hash means `home`.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::host::History;
use crate::section::SectionId;
use crate::Result;

/// How a committed state reaches the session history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// User-initiated navigation, adds a back/forward entry
    Push,
    /// Passive detection or startup, rewrites the current entry
    Replace,
}

/// Fragment for a section, `None` for `home`
pub fn encode_fragment(section: &SectionId, sub_path: Option<&str>) -> Option<String> {
    if section.is_home() || section.is_unset() {
        return None;
    }
    match sub_path.filter(|s| !s.is_empty()) {
        Some(sub) => Some(format!("{}/{}", section, sub)),
        None => Some(section.to_string()),
    }
}

/// Parse a fragment (with or without the leading `#`). Both parts are
/// percent-decoded since `Url` escapes what it writes.
pub fn decode_fragment(fragment: &str) -> (SectionId, Option<String>) {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if fragment.is_empty() {
        return (SectionId::home(), None);
    }
    let (section, sub) = match fragment.split_once('/') {
        Some((section, sub)) => (section, Some(sub)),
        None => (fragment, None),
    };
    let section = if section.is_empty() {
        SectionId::home()
    } else {
        SectionId::from(unescape(section))
    };
    let sub = sub.filter(|s| !s.is_empty()).map(unescape);
    (section, sub)
}

fn unescape(part: &str) -> String {
    percent_decode_str(part).decode_utf8_lossy().into_owned()
}

/// Collapse doubled slashes and drop trailing ones (the root stays `/`)
fn canonical_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Maps navigation state onto the session history
#[derive(Debug, Clone)]
pub struct HistorySync {
    base: Url,
    last_written: Option<String>,
    normalized: bool,
}

impl HistorySync {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        base.set_fragment(None);
        Ok(Self {
            base,
            last_written: None,
            normalized: false,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Href that encodes `{section, sub_path}`
    pub fn url_for(&self, section: &SectionId, sub_path: Option<&str>) -> String {
        let mut url = self.base.clone();
        url.set_fragment(encode_fragment(section, sub_path).as_deref());
        url.to_string()
    }

    /// Section and sub-path a full href resolves to
    pub fn decode_href(&self, href: &str) -> Result<(SectionId, Option<String>)> {
        let url = Url::parse(href)?;
        Ok(decode_fragment(url.fragment().unwrap_or("")))
    }

    /// Whether `href` is the location this synchronizer wrote last
    pub fn is_echo(&self, href: &str) -> bool {
        self.last_written.as_deref() == Some(href)
    }

    /// Write the state to history. Skipped when the location already
    /// matches, which keeps popstate-driven navigation from pushing
    /// duplicates or truncating forward history. Returns true if written.
    pub fn commit<H: History + ?Sized>(
        &mut self,
        history: &mut H,
        section: &SectionId,
        sub_path: Option<&str>,
        mode: WriteMode,
    ) -> bool {
        let url = self.url_for(section, sub_path);
        let current = history.href();
        if current == url {
            self.last_written = Some(url);
            return false;
        }

        match mode {
            WriteMode::Push => history.push_state(&url),
            WriteMode::Replace => history.replace_state(&url),
        }
        tracing::debug!(url = %url, ?mode, "History updated");
        self.last_written = Some(url);
        true
    }

    /// One-time rewrite of slash variants of the base path to the
    /// canonical base, keeping the fragment. Never retried.
    pub fn normalize_startup<H: History + ?Sized>(&mut self, history: &mut H) -> bool {
        if std::mem::replace(&mut self.normalized, true) {
            return false;
        }

        let href = history.href();
        let Ok(mut current) = Url::parse(&href) else {
            tracing::warn!(href = %href, "Unparseable location, skipping normalisation");
            return false;
        };

        let base_path = self.base.path();
        if current.path() == base_path
            || canonical_path(current.path()) != canonical_path(base_path)
        {
            return false;
        }

        current.set_path(base_path);
        let url = current.to_string();
        tracing::warn!(from = %href, to = %url, "Normalising base path variant");
        history.replace_state(&url);
        self.last_written = Some(url);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionRegistry;
    use crate::testing::{FakeHistory, HistoryCall};

    const BASE: &str = "http://localhost:3000/";

    #[test]
    fn test_fragment_codec() {
        assert_eq!(encode_fragment(&SectionId::home(), Some("x")), None);
        assert_eq!(
            encode_fragment(&SectionId::from("articles"), Some("42")),
            Some("articles/42".to_string())
        );
        assert_eq!(decode_fragment(""), (SectionId::home(), None));
        assert_eq!(decode_fragment("#"), (SectionId::home(), None));
        assert_eq!(
            decode_fragment("#articles/42"),
            (SectionId::from("articles"), Some("42".to_string()))
        );
        assert_eq!(
            decode_fragment("skills/"),
            (SectionId::from("skills"), None)
        );
    }

    #[test]
    fn test_every_section_roundtrips_through_href() {
        let sync = HistorySync::new(BASE).unwrap();
        for id in SectionRegistry::default().section_ids() {
            let href = sync.url_for(id, None);
            assert_eq!(sync.decode_href(&href).unwrap(), (id.clone(), None));
        }
        assert_eq!(sync.url_for(&SectionId::home(), None), BASE);
        assert_eq!(
            sync.url_for(&SectionId::from("contact"), None),
            "http://localhost:3000/#contact"
        );
    }

    #[test]
    fn test_escaped_fragments_decode_to_original() {
        let sync = HistorySync::new(BASE).unwrap();

        let id = SectionId::from("über");
        let href = sync.url_for(&id, None);
        assert_eq!(href, "http://localhost:3000/#%C3%BCber");
        assert_eq!(sync.decode_href(&href).unwrap(), (id, None));

        let articles = SectionId::from("articles");
        let href = sync.url_for(&articles, Some("my post"));
        assert_eq!(href, "http://localhost:3000/#articles/my%20post");
        assert_eq!(
            sync.decode_href(&href).unwrap(),
            (articles, Some("my post".to_string()))
        );
    }

    #[test]
    fn test_commit_push_and_replace() {
        let mut sync = HistorySync::new(BASE).unwrap();
        let mut history = FakeHistory::at(BASE);

        assert!(sync.commit(&mut history, &SectionId::from("skills"), None, WriteMode::Push));
        assert!(sync.commit(&mut history, &SectionId::from("about"), None, WriteMode::Replace));
        assert_eq!(
            history.calls,
            vec![
                HistoryCall::Push("http://localhost:3000/#skills".into()),
                HistoryCall::Replace("http://localhost:3000/#about".into()),
            ]
        );
        assert!(sync.is_echo("http://localhost:3000/#about"));
    }

    #[test]
    fn test_commit_skips_unchanged_location() {
        let mut sync = HistorySync::new(BASE).unwrap();
        let mut history = FakeHistory::at("http://localhost:3000/#skills");
        assert!(!sync.commit(&mut history, &SectionId::from("skills"), None, WriteMode::Push));
        assert!(history.calls.is_empty());
    }

    #[test]
    fn test_normalize_trailing_slash_once() {
        let mut sync = HistorySync::new("https://example.dev/portfolio").unwrap();
        let mut history = FakeHistory::at("https://example.dev/portfolio//#skills");

        assert!(sync.normalize_startup(&mut history));
        assert_eq!(history.href, "https://example.dev/portfolio#skills");
        assert!(!sync.normalize_startup(&mut history));
        assert_eq!(history.replaces(), 1);
    }

    #[test]
    fn test_normalize_ignores_other_paths() {
        let mut sync = HistorySync::new("https://example.dev/portfolio").unwrap();
        let mut history = FakeHistory::at("https://example.dev/admin/");
        assert!(!sync.normalize_startup(&mut history));
        assert!(history.calls.is_empty());
    }
}
