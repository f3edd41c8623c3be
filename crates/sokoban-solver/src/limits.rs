use std::time::Duration;

/// Resource limits for a single solve call.
///
/// The greedy search has no natural stopping point on large or unsolvable
/// levels whose state space is huge, so every solve runs under an expansion
/// ceiling and an optional wall-clock limit. Hitting either one yields
/// [`SolveError::BudgetExhausted`](crate::SolveError::BudgetExhausted).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use sokoban_solver::SearchLimits;
///
/// let limits = SearchLimits::default()
///     .with_max_expansions(10_000)
///     .with_time_limit(Duration::from_secs(1));
/// assert_eq!(limits.max_expansions(), Some(10_000));
/// assert_eq!(limits.time_limit(), Some(Duration::from_secs(1)));
///
/// assert_eq!(SearchLimits::unbounded().max_expansions(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    max_expansions: Option<usize>,
    time_limit: Option<Duration>,
}

impl SearchLimits {
    /// Default expansion ceiling.
    pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;

    /// Default wall-clock limit.
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(60);

    /// Limits that never stop the search.
    ///
    /// Only use this for levels known to have a small state space.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_expansions: None,
            time_limit: None,
        }
    }

    /// Sets the maximum number of node expansions.
    #[must_use]
    pub const fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Sets the wall-clock limit.
    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Returns the expansion ceiling, if any.
    #[must_use]
    pub const fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Returns the wall-clock limit, if any.
    #[must_use]
    pub const fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns `true` once `expansions` nodes or `elapsed` time exceed the limits.
    #[must_use]
    pub fn is_exceeded(&self, expansions: usize, elapsed: Duration) -> bool {
        self.max_expansions.is_some_and(|max| expansions >= max)
            || self.time_limit.is_some_and(|limit| elapsed >= limit)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: Some(Self::DEFAULT_MAX_EXPANSIONS),
            time_limit: Some(Self::DEFAULT_TIME_LIMIT),
        }
    }
}
