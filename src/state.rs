use std::path::Path;

use crate::config::{DEFAULT_FEATURE_COUNT, FEATURE_COUNT_RANGE};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Individual,
    Importance,
    Dependence,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Individual, Tab::Importance, Tab::Dependence];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Individual => "Individual prediction",
            Tab::Importance => "Feature importance",
            Tab::Dependence => "Dependence analysis",
        }
    }
}

/// User-driven view selection. Never touches the session's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub employee: usize,
    pub n_features: usize,
    /// Column index into the output feature names.
    pub dependence_feature: usize,
    pub tab: Tab,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            employee: 0,
            n_features: DEFAULT_FEATURE_COUNT,
            dependence_feature: 0,
            tab: Tab::Overview,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded and explained artifacts (None until a folder loads cleanly).
    pub session: Option<Session>,

    pub selection: Selection,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Open `dir` as a new session. Failures are kept as the status message.
    pub fn load_session(&mut self, dir: &Path) {
        match Session::open(dir) {
            Ok(session) => self.set_session(session),
            Err(e) => {
                log::error!("Failed to open artifacts in {}: {e}", dir.display());
                self.session = None;
                self.selection = Selection::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a freshly opened session and reset the selection.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
        self.selection = Selection::default();
        self.status_message = None;
    }

    pub fn select_employee(&mut self, index: usize) {
        let len = self.session.as_ref().map_or(0, Session::n_employees);
        self.selection.employee = index.min(len.saturating_sub(1));
    }

    pub fn set_feature_count(&mut self, n: usize) {
        self.selection.n_features = n.clamp(*FEATURE_COUNT_RANGE.start(), *FEATURE_COUNT_RANGE.end());
    }

    pub fn select_dependence_feature(&mut self, index: usize) {
        let len = self.session.as_ref().map_or(0, |s| s.feature_names.len());
        self.selection.dependence_feature = index.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn new_session_resets_selection() {
        let mut state = AppState::default();
        state.selection.employee = 4;
        state.selection.tab = Tab::Dependence;
        state.status_message = Some("old".into());

        state.set_session(fixtures::session(6, 2, 1));
        assert_eq!(state.selection, Selection::default());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selectors_stay_within_data() {
        let mut state = AppState::default();
        state.set_session(fixtures::session(6, 2, 1));

        state.select_employee(99);
        assert_eq!(state.selection.employee, 5);
        state.select_dependence_feature(99);
        assert_eq!(state.selection.dependence_feature, 6);

        state.set_feature_count(1);
        assert_eq!(state.selection.n_features, 5);
        state.set_feature_count(50);
        assert_eq!(state.selection.n_features, 20);
    }

    #[test]
    fn failed_load_is_reported_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.load_session(dir.path());
        assert!(state.session.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("artifact not found"));
    }
}
