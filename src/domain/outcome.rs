//! Per-item outcomes for batch operations
//!
//! Parsing and resolving run once per requested package. Each item yields an
//! [`Outcome`]; the batch either succeeds as a whole or reports every failure.

use std::fmt;

/// A recoverable, user-facing failure of a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
}

impl Failure {
    /// Creates a failure with the message shown to the user
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message shown to the user
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}

/// Result of processing one item of a batch
pub type Outcome<T> = Result<T, Failure>;

/// Aggregate a batch of outcomes.
///
/// Returns every value in input order when all items succeeded, otherwise
/// every failure in input order.
pub fn collect_outcomes<T>(
    outcomes: impl IntoIterator<Item = Outcome<T>>,
) -> Result<Vec<T>, Vec<Failure>> {
    let mut values = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(value) => values.push(value),
            Err(failure) => failures.push(failure),
        }
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_all_success() {
        let outcomes: Vec<Outcome<u32>> = vec![Ok(1), Ok(2), Ok(3)];
        assert_eq!(collect_outcomes(outcomes), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_collect_reports_every_failure() {
        let outcomes: Vec<Outcome<u32>> = vec![
            Err(Failure::new("first")),
            Ok(2),
            Err(Failure::new("second")),
        ];
        let failures = collect_outcomes(outcomes).unwrap_err();
        let messages: Vec<_> = failures.iter().map(Failure::message).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_collect_empty_batch() {
        let outcomes: Vec<Outcome<u32>> = Vec::new();
        assert_eq!(collect_outcomes(outcomes), Ok(vec![]));
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(Failure::new("Invalid version: x").to_string(), "Invalid version: x");
    }
}
