//! Transition history tracking.
//!
//! Records which state each accepted input moved the machine from and to.
//! Recording appends in place; a bounded history drops its oldest records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single accepted input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State that was current when the input arrived
    pub from: String,
    /// State produced by the transition
    pub to: String,
    /// Kind of the input that caused the transition
    pub input: String,
    /// Chain depth of the new state
    pub depth: usize,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded log of transitions.
///
/// # Example
///
/// ```rust
/// use stackstate::core::{DispatchHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = DispatchHistory::new();
/// let history = history.record(TransitionRecord {
///     from: "Initial".into(),
///     to: "SignUp".into(),
///     input: "InitialInput".into(),
///     depth: 1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Initial", "SignUp"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchHistory {
    transitions: VecDeque<TransitionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl DispatchHistory {
    /// Create a new unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` records, dropping the
    /// oldest first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stackstate::core::DispatchHistory;
    ///
    /// let history = DispatchHistory::with_limit(8);
    /// assert_eq!(history.limit(), Some(8));
    /// assert!(history.is_empty());
    /// ```
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning the extended history.
    pub fn record(mut self, transition: TransitionRecord) -> Self {
        self.push(transition);
        self
    }

    /// Append a transition in place, evicting the oldest records beyond the
    /// limit.
    pub fn push(&mut self, transition: TransitionRecord) {
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Remove every record, keeping the limit.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Names of the states traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_str()));
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Recorded transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<TransitionRecord> {
        &self.transitions
    }

    /// Maximum number of records kept, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no transition has been recorded (or all were cleared).
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
