use std::sync::Arc;

use serde::Serialize;

use crate::models::Cruise;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Network Error: {0}")]
    Transport(String),
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Malformed(_) => "malformed",
        }
    }
}

/// Failure as exposed to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
}

impl From<&FetchError> for ErrorInfo {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Identifies one fetch invocation. Only the most recently issued ticket may
/// land its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed,
    /// Result belonged to a superseded or cancelled invocation.
    Discarded,
}

/// `{data, loading, error}` for a single data source.
#[derive(Debug, Default)]
pub struct FetchState {
    data: Option<Arc<[Cruise]>>,
    loading: bool,
    error: Option<FetchError>,
    in_flight: Option<FetchTicket>,
    issued: u64,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&Arc<[Cruise]>> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Starts an invocation: sets `loading`, clears the previous error and
    /// supersedes any invocation still in flight.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.in_flight = Some(ticket);
        self.loading = true;
        self.error = None;
        ticket
    }

    /// Lands the result of `ticket`. `loading` is cleared on every path that
    /// belongs to the live invocation; on failure `data` keeps its previous value.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Cruise>, FetchError>) -> FetchOutcome {
        if self.in_flight != Some(ticket) {
            return FetchOutcome::Discarded;
        }

        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(results) => {
                self.data = Some(results.into());
                FetchOutcome::Loaded
            }
            Err(err) => {
                self.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Abandons the live invocation; its result will be discarded.
    pub fn cancel(&mut self) {
        self.in_flight = None;
        self.loading = false;
    }
}
