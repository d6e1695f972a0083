//! Tagged results that keep real data apart from stand-in data.

use serde::Serialize;
use std::fmt;

/// Why a stand-in payload was returned instead of live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FallbackReason {
    /// The caller explicitly asked for mock data.
    Requested,
    /// No persisted entry existed yet.
    Missing,
    /// A persisted entry existed but could not be decoded.
    Corrupt(String),
    /// The data-fetching script could not be located.
    ScriptMissing,
    /// Every interpreter attempt exited unsuccessfully.
    ScriptFailed(String),
    /// The script did not finish within the allowed time.
    Timeout,
    /// The script ran but left no output file behind.
    DataUnavailable,
    /// The output file could not be read or parsed.
    Unparsable(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Requested => write!(f, "mock data requested"),
            FallbackReason::Missing => write!(f, "no stored entry"),
            FallbackReason::Corrupt(e) => write!(f, "stored entry is corrupt: {e}"),
            FallbackReason::ScriptMissing => write!(f, "data script not found"),
            FallbackReason::ScriptFailed(e) => write!(f, "data script failed: {e}"),
            FallbackReason::Timeout => write!(f, "data script timed out"),
            FallbackReason::DataUnavailable => write!(f, "no data file produced"),
            FallbackReason::Unparsable(e) => write!(f, "data file unreadable: {e}"),
        }
    }
}

/// Result of an operation that may substitute fallback data.
///
/// `Ok` carries real data, `Fallback` carries a stand-in together with the
/// reason it was used, and `Error` means nothing usable could be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Fallback { data: T, reason: FallbackReason },
    Error(String),
}

impl<T> Outcome<T> {
    pub fn fallback(data: T, reason: FallbackReason) -> Self {
        Outcome::Fallback { data, reason }
    }

    pub fn error(reason: impl fmt::Display) -> Self {
        Outcome::Error(reason.to_string())
    }

    /// Returns the payload for both live and fallback results.
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Ok(data) | Outcome::Fallback { data, .. } => Some(data),
            Outcome::Error(_) => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok(data) => Outcome::Ok(f(data)),
            Outcome::Fallback { data, reason } => Outcome::Fallback {
                data: f(data),
                reason,
            },
            Outcome::Error(e) => Outcome::Error(e),
        }
    }

    /// Short label used in logs and exported rows.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Ok(_) => "ok",
            Outcome::Fallback { .. } => "fallback",
            Outcome::Error(_) => "error",
        }
    }
}

impl<T> From<anyhow::Result<T>> for Outcome<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(data) => Outcome::Ok(data),
            Err(e) => Outcome::Error(format!("{e:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_no_data() {
        let outcome: Outcome<Vec<u8>> = Outcome::error("boom");
        assert!(outcome.is_error());
        assert!(outcome.data().is_none());
        assert_eq!(outcome.status(), "error");
    }

    #[test]
    fn test_fallback_keeps_reason_through_map() {
        let outcome = Outcome::fallback(2, FallbackReason::Timeout).map(|n| n * 10);
        assert_eq!(outcome.data(), Some(&20));
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Timeout));
        assert_eq!(outcome.status(), "fallback");
    }

    #[test]
    fn test_from_anyhow_result() {
        let ok: Outcome<u8> = Ok::<u8, anyhow::Error>(1).into();
        assert!(ok.is_ok());

        let err: Outcome<u8> = Err::<u8, _>(anyhow::anyhow!("nope")).into();
        assert_eq!(err, Outcome::Error("nope".to_string()));
    }
}
