use crate::error::FetchError;
use crate::record::Incident;

/// What the feed list should show.
///
/// `Loading` moves to `Empty` or `Populated` once and never back: there is
/// no refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    Loading,
    /// Settled with no records. Also the outcome of every failed fetch.
    Empty,
    Populated,
}

/// View state for the incident feed: the loading flag and the records.
///
/// Owned by the application model; only [`settle`](FeedState::settle)
/// mutates it. A fresh state is loading with no records. Settling clears
/// `loading` and sets `records` in the same call, whichever way the fetch
/// went, so no render can see one change without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    loading: bool,
    records: Vec<Incident>,
    diagnostic: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            loading: true,
            records: Vec::new(),
            diagnostic: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[Incident] {
        &self.records
    }

    /// The last fetch failure, for operators. Never rendered.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub fn mode(&self) -> FeedMode {
        if self.loading {
            FeedMode::Loading
        } else if self.records.is_empty() {
            FeedMode::Empty
        } else {
            FeedMode::Populated
        }
    }

    /// Apply the fetch outcome. Returns `false` (and changes nothing) if the
    /// state has already settled.
    ///
    /// Failures are logged at `error` and leave `records` empty; the viewer
    /// sees the same thing as for an empty result.
    pub fn settle(&mut self, outcome: Result<Vec<Incident>, FetchError>) -> bool {
        if !self.loading {
            tracing::warn!("incident feed already settled; ignoring late result");
            return false;
        }

        match outcome {
            Ok(records) => {
                tracing::info!(count = records.len(), "incident feed loaded");
                self.records = records;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch incidents");
                self.records.clear();
                self.diagnostic = Some(err.to_string());
            }
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theft(id: u64) -> Incident {
        Incident::new(
            id,
            "Theft",
            "2024-01-01T10:00:00Z".into(),
            "Block of Shattuck Ave",
            "24-0001",
        )
    }

    #[test]
    fn starts_loading_and_empty() {
        let state = FeedState::new();
        assert!(state.is_loading());
        assert!(state.records().is_empty());
        assert_eq!(state.mode(), FeedMode::Loading);
        assert_eq!(state.diagnostic(), None);
    }

    #[test]
    fn success_populates_in_order() {
        let mut state = FeedState::new();
        assert!(state.settle(Ok(vec![theft(3), theft(1), theft(2)])));
        assert!(!state.is_loading());
        assert_eq!(state.mode(), FeedMode::Populated);
        let ids: Vec<u64> = state.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn empty_success_is_empty_mode() {
        let mut state = FeedState::new();
        state.settle(Ok(vec![]));
        assert_eq!(state.mode(), FeedMode::Empty);
        assert_eq!(state.diagnostic(), None);
    }

    #[test]
    fn every_error_settles_to_empty() {
        let errors = [
            FetchError::Status { status: 502 },
            FetchError::Application {
                message: "db down".into(),
            },
            FetchError::Decode("expected value".into()),
            FetchError::Transport("connection refused".into()),
        ];
        for err in errors {
            let mut state = FeedState::new();
            assert!(state.settle(Err(err)));
            assert!(!state.is_loading());
            assert_eq!(state.mode(), FeedMode::Empty);
            assert!(state.diagnostic().is_some());
        }
    }

    #[test]
    fn error_state_matches_empty_success_except_diagnostic() {
        let mut failed = FeedState::new();
        failed.settle(Err(FetchError::Application {
            message: "db down".into(),
        }));
        let mut empty = FeedState::new();
        empty.settle(Ok(vec![]));

        assert_eq!(failed.mode(), empty.mode());
        assert_eq!(failed.records(), empty.records());
        assert_eq!(failed.is_loading(), empty.is_loading());
        assert!(failed.diagnostic().unwrap().contains("db down"));
    }

    #[test]
    fn second_settle_is_ignored() {
        let mut state = FeedState::new();
        state.settle(Ok(vec![theft(1)]));
        assert!(!state.settle(Err(FetchError::Status { status: 500 })));
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.diagnostic(), None);
    }
}
