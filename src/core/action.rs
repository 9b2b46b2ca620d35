//! # Actions
//!
//! Everything that can happen in Kodex becomes an `Action`.
//! User picks a law? That's `Action::SelectLaw(law)`.
//! The backend answers? That's `Action::NormsLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! then returns an `Effect` for the event loop to execute. No side
//! effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Fetch resolutions carry the request token they were issued with. A
//! resolution whose token no longer matches the family's current value is
//! stale (the user navigated again in the meantime) and is discarded before
//! any state is touched — last request wins, without network cancellation.

use std::cmp::Ordering;

use log::{debug, info, warn};

use crate::api::{FetchError, Law, NormContent, NormSummary};
use crate::core::state::{App, View};

#[derive(Debug)]
pub enum Action {
    /// Startup: request the full law list.
    LoadLaws,
    /// The user picked a law (from any level).
    SelectLaw(Law),
    /// The user picked a norm from the current law's list.
    SelectNorm(u32),
    /// Leave the content view, back to the retained norm list. No fetch.
    BackToNorms,
    /// Back to the top level, discarding norm list and content.
    BackToLaws,
    /// Resolution of a law list fetch.
    LawsLoaded {
        token: u64,
        result: Result<Vec<Law>, FetchError>,
    },
    /// Resolution of a norm list fetch for `law`.
    NormsLoaded {
        token: u64,
        law: Law,
        result: Result<Vec<NormSummary>, FetchError>,
    },
    /// Resolution of a norm content fetch.
    ContentLoaded {
        token: u64,
        result: Result<NormContent, FetchError>,
    },
    Quit,
}

/// What the event loop must do after an update. Fetch effects are executed
/// by spawning a task that calls the fetcher and sends the resolution back
/// as an action carrying the same token.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchLaws { token: u64 },
    FetchNorms { law: Law, token: u64 },
    FetchContent { norm_id: u32, token: u64 },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::LoadLaws => {
            app.error = None;
            app.is_loading = true;
            app.status_message = "Lade Gesetze…".to_string();
            let token = app.next_laws_token();
            Effect::FetchLaws { token }
        }

        Action::LawsLoaded { token, result } => {
            if token != app.laws_token {
                debug!("Discarding stale law list response (token {token})");
                return Effect::None;
            }
            app.is_loading = false;
            match result {
                Ok(mut laws) => {
                    laws.sort_by(|a, b| compare_law_names(&a.name, &b.name));
                    info!("Loaded {} laws", laws.len());
                    app.laws = laws;
                    app.status_message = format!("{} Gesetze", app.laws.len());
                }
                Err(e) => report_fetch_error(app, "Fehler beim Laden der Gesetze", e),
            }
            Effect::None
        }

        Action::SelectLaw(law) => {
            app.error = None;
            app.is_loading = true;
            app.status_message = format!("Lade Normen: {}", law.name);
            // A content fetch still in flight for the previous norm must not
            // land after the law switch either.
            app.next_content_token();
            let token = app.next_norms_token();
            Effect::FetchNorms { law, token }
        }

        Action::NormsLoaded { token, law, result } => {
            if token != app.norms_token {
                debug!(
                    "Discarding stale norm list response for law {} (token {token})",
                    law.id
                );
                return Effect::None;
            }
            app.is_loading = false;
            match result {
                Ok(norms) => {
                    info!("Loaded {} norms for '{}' (law {})", norms.len(), law.name, law.id);
                    app.status_message = law.name.clone();
                    // Committing here clears any previously selected norm:
                    // the new view has no norm by construction.
                    app.view = View::NormList { law, norms };
                }
                Err(e) => report_fetch_error(app, "Fehler beim Laden der Normen", e),
            }
            Effect::None
        }

        Action::SelectNorm(norm_id) => {
            // The TUI only emits this from S1/S2; tolerate a stray call.
            if app.view.law().is_none() {
                warn!("SelectNorm({norm_id}) ignored: no law selected");
                return Effect::None;
            }
            app.error = None;
            app.is_loading = true;
            app.status_message = "Lade Inhalt…".to_string();
            let token = app.next_content_token();
            Effect::FetchContent { norm_id, token }
        }

        Action::ContentLoaded { token, result } => {
            if token != app.content_token {
                debug!("Discarding stale norm content response (token {token})");
                return Effect::None;
            }
            app.is_loading = false;
            match result {
                Ok(norm) => {
                    match std::mem::replace(&mut app.view, View::LawList) {
                        View::NormList { law, norms } | View::NormContent { law, norms, .. } => {
                            app.status_message = format!("{} – {}", norm.number, norm.title);
                            app.view = View::NormContent { law, norms, norm };
                        }
                        View::LawList => {
                            // Unreachable through the TUI: leaving the norm
                            // level bumps the content token first.
                            warn!("Norm content resolved without a selected law, discarding");
                        }
                    }
                }
                Err(e) => report_fetch_error(app, "Fehler beim Laden des Inhalts", e),
            }
            Effect::None
        }

        Action::BackToNorms => {
            match std::mem::replace(&mut app.view, View::LawList) {
                View::NormContent { law, norms, .. } => {
                    // The retained list is shown as-is; only a content fetch
                    // could still be in flight, and it must not resurrect S2.
                    app.next_content_token();
                    app.is_loading = false;
                    app.error = None;
                    app.status_message = law.name.clone();
                    app.view = View::NormList { law, norms };
                }
                other => app.view = other, // no-op outside the content view
            }
            Effect::None
        }

        Action::BackToLaws => {
            app.next_norms_token();
            app.next_content_token();
            app.is_loading = false;
            app.error = None;
            app.status_message = format!("{} Gesetze", app.laws.len());
            app.view = View::LawList;
            Effect::None
        }
    }
}

/// Reports a failed fetch exactly once: one log entry, one user-visible
/// message. The view is left untouched — the transition simply never commits.
fn report_fetch_error(app: &mut App, context: &str, err: FetchError) {
    warn!("{context}: {err}");
    app.status_message.clear();
    app.error = Some(format!("{context} ({err})"));
}

/// Case- and German-locale-aware comparison for law names.
///
/// Compares casefolded keys with umlauts and ß folded to their base letters
/// ("Ärztegesetz" sorts among the A's, as locale collation would place it),
/// with the raw name as tiebreak for a deterministic total order.
pub(crate) fn compare_law_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn sort_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'ä' | 'Ä' => key.push('a'),
            'ö' | 'Ö' => key.push('o'),
            'ü' | 'Ü' => key.push('u'),
            'ß' => key.push_str("ss"),
            _ => key.extend(c.to_lowercase()),
        }
    }
    key
}
