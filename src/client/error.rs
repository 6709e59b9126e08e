// File: ./src/client/error.rs
//! Error and outcome types for Canvas requests.
use http::StatusCode;
use std::fmt;

/// A Canvas endpoint answered with something other than `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub path: String,
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} returned {}", self.path, self.status)?;
        if !self.body.trim().is_empty() {
            write!(f, "\n{}", self.body.trim())?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Why a refresh-time fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Set when the server answered; `None` for transport or decoding errors.
    pub status: Option<StatusCode>,
    pub message: String,
}

impl FetchFailure {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let status = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .map(|e| e.status);
        Self {
            status,
            message: format!("{:#}", err),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result of a fetch whose failure must not interrupt a refresh.
///
/// Callers decide what to substitute (and whether to log) through
/// [`FetchOutcome::recover`]; an empty list and a failed request stay
/// distinguishable until that point.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn into_result(self) -> Result<T, FetchFailure> {
        match self {
            FetchOutcome::Loaded(v) => Ok(v),
            FetchOutcome::Failed(f) => Err(f),
        }
    }

    /// Returns the loaded value, or the fallback computed from the failure.
    pub fn recover<F>(self, fallback: F) -> T
    where
        F: FnOnce(&FetchFailure) -> T,
    {
        match self {
            FetchOutcome::Loaded(v) => v,
            FetchOutcome::Failed(f) => fallback(&f),
        }
    }
}

impl<T> From<anyhow::Result<T>> for FetchOutcome<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(v) => FetchOutcome::Loaded(v),
            Err(e) => FetchOutcome::Failed(FetchFailure::from_error(&e)),
        }
    }
}
