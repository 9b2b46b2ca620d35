//! # Application State
//!
//! Core business state for Kodex. This module contains domain data only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── fetcher: Arc<dyn ContentFetcher>  // backend contract
//! ├── laws: Vec<Law>                    // sorted once, read-only afterwards
//! ├── view: View                        // LawList | NormList | NormContent
//! ├── is_loading: bool                  // a fetch is pending
//! ├── status_message: String            // status bar text
//! ├── error: Option<String>             // last fetch failure, if any
//! └── *_token: u64                      // request tokens, one per fetch family
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::{ContentFetcher, Law, NormContent, NormSummary};

/// The three-level navigation hierarchy as a tagged union of exactly three
/// shapes. A norm can never be selected without a law: the invalid
/// combination is unrepresentable, not merely checked.
///
/// `NormContent` retains the norm list of its law so that going back one
/// level re-displays it without a re-fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Top level: the law list (which lives in `App::laws`).
    LawList,
    /// A law is selected and its norms are loaded.
    NormList { law: Law, norms: Vec<NormSummary> },
    /// A law and a norm are selected; the norm's content is loaded.
    NormContent {
        law: Law,
        norms: Vec<NormSummary>,
        norm: NormContent,
    },
}

impl View {
    /// The currently selected law, if any.
    pub fn law(&self) -> Option<&Law> {
        match self {
            View::LawList => None,
            View::NormList { law, .. } | View::NormContent { law, .. } => Some(law),
        }
    }

    /// The norm list of the currently selected law, if any.
    pub fn norms(&self) -> Option<&[NormSummary]> {
        match self {
            View::LawList => None,
            View::NormList { norms, .. } | View::NormContent { norms, .. } => Some(norms),
        }
    }
}

pub struct App {
    pub fetcher: Arc<dyn ContentFetcher>,
    /// The full law list, sorted by name once loaded. Read-only for the session.
    pub laws: Vec<Law>,
    pub view: View,
    pub is_loading: bool,
    pub status_message: String,
    /// Last fetch failure. Cleared when the next transition starts.
    pub error: Option<String>,
    // Request tokens, one per fetch family. A resolution only commits when
    // its token still equals the family's current value (last request wins).
    pub(crate) laws_token: u64,
    pub(crate) norms_token: u64,
    pub(crate) content_token: u64,
}

impl App {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self {
            fetcher,
            laws: Vec::new(),
            view: View::LawList,
            is_loading: false,
            status_message: String::new(),
            error: None,
            laws_token: 0,
            norms_token: 0,
            content_token: 0,
        }
    }

    /// Issues a new token for the law list fetch, invalidating any in-flight one.
    pub(crate) fn next_laws_token(&mut self) -> u64 {
        self.laws_token += 1;
        self.laws_token
    }

    /// Issues a new token for the norm list fetch, invalidating any in-flight one.
    pub(crate) fn next_norms_token(&mut self) -> u64 {
        self.norms_token += 1;
        self.norms_token
    }

    /// Issues a new token for the norm content fetch, invalidating any in-flight one.
    pub(crate) fn next_content_token(&mut self) -> u64 {
        self.content_token += 1;
        self.content_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.view, View::LawList);
        assert!(app.laws.is_empty());
        assert!(!app.is_loading);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_view_accessors() {
        let law = Law {
            id: 1,
            name: "BGB".to_string(),
            description: None,
        };
        let norms = vec![NormSummary {
            id: 10,
            number: "§1".to_string(),
            title: "Geschäftsfähigkeit".to_string(),
        }];

        assert_eq!(View::LawList.law(), None);
        assert_eq!(View::LawList.norms(), None);

        let view = View::NormList {
            law: law.clone(),
            norms: norms.clone(),
        };
        assert_eq!(view.law(), Some(&law));
        assert_eq!(view.norms(), Some(norms.as_slice()));

        let view = View::NormContent {
            law: law.clone(),
            norms: norms.clone(),
            norm: NormContent {
                number: "§1".to_string(),
                title: "Geschäftsfähigkeit".to_string(),
                content: "<p>...</p>".to_string(),
            },
        };
        assert_eq!(view.law(), Some(&law));
        assert_eq!(view.norms(), Some(norms.as_slice()));
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let mut app = test_app();
        let a = app.next_norms_token();
        let b = app.next_norms_token();
        assert!(b > a);
        // Families are independent.
        assert_eq!(app.content_token, 0);
    }
}
