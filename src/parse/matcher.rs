//! Ordered pattern chains with a time budget

use regex::{Captures, Regex};
use std::time::{Duration, Instant};

/// Default time budget for one name parse
pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of running a rule chain over a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<T> {
    /// A rule matched and produced a value
    Matched(T),

    /// The chain ran to the end without a match
    NoMatch,

    /// The budget ran out before the chain finished
    TimedOut,
}

impl<T> MatchOutcome<T> {
    pub fn matched(self) -> Option<T> {
        match self {
            MatchOutcome::Matched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, MatchOutcome::TimedOut)
    }
}

/// Wall-clock allowance for a single parse
#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchBudget {
    started: Instant,
    limit: Duration,
}

impl MatchBudget {
    pub fn start(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// One entry of a chain: a pattern and how to turn its captures into a value
pub(crate) struct NameRule<T> {
    pub label: &'static str,
    pub pattern: Regex,
    pub extract: fn(&Captures<'_>) -> T,
}

impl<T> NameRule<T> {
    /// Panics on an invalid pattern; rules are built from literals only.
    pub fn new(label: &'static str, pattern: &str, extract: fn(&Captures<'_>) -> T) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for rule {label}: {e}"));
        Self {
            label,
            pattern,
            extract,
        }
    }
}

/// Whether `pattern` occurs in `input`, within the budget
pub(crate) fn probe(pattern: &Regex, input: &str, budget: &MatchBudget) -> MatchOutcome<()> {
    if budget.expired() {
        return MatchOutcome::TimedOut;
    }
    let found = pattern.is_match(input);
    if budget.expired() {
        return MatchOutcome::TimedOut;
    }
    if found {
        MatchOutcome::Matched(())
    } else {
        MatchOutcome::NoMatch
    }
}

/// Try `rules` in order and return the first match
pub(crate) fn first_match<T>(
    rules: &[NameRule<T>],
    input: &str,
    budget: &MatchBudget,
) -> MatchOutcome<T> {
    for rule in rules {
        if budget.expired() {
            return MatchOutcome::TimedOut;
        }
        let captures = rule.pattern.captures(input);
        if budget.expired() {
            return MatchOutcome::TimedOut;
        }
        if let Some(captures) = captures {
            log::trace!("{:?} matched rule {}", input, rule.label);
            return MatchOutcome::Matched((rule.extract)(&captures));
        }
    }
    MatchOutcome::NoMatch
}
