//! In-flight tracking for the external service calls.
//!
//! Each call holds its own token, so one call finishing never clears the
//! loading indicator of another that is still outstanding.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    SuggestTrends,
    TrendAnalysis,
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::SuggestTrends => "Suggesting trends",
            OperationKind::TrendAnalysis => "Running trend analysis",
        }
    }
}

/// Handle for one outstanding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationToken {
    id: u64,
    kind: OperationKind,
}

impl OperationToken {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct OperationTracker {
    next_id: u64,
    in_flight: Vec<OperationToken>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an operation. Returns `None` if one of the same kind is still running.
    pub fn begin(&mut self, kind: OperationKind) -> Option<OperationToken> {
        if self.is_running(kind) {
            return None;
        }
        self.next_id += 1;
        let token = OperationToken {
            id: self.next_id,
            kind,
        };
        self.in_flight.push(token);
        Some(token)
    }

    /// Release a token. Returns `false` for a token that was not outstanding.
    pub fn finish(&mut self, token: OperationToken) -> bool {
        let before = self.in_flight.len();
        self.in_flight.retain(|t| *t != token);
        self.in_flight.len() != before
    }

    pub fn is_running(&self, kind: OperationKind) -> bool {
        self.in_flight.iter().any(|t| t.kind == kind)
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Label of the most recently started outstanding operation.
    pub fn current_label(&self) -> Option<&'static str> {
        self.in_flight.last().map(|t| t.kind.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_until_every_token_finishes() {
        let mut tracker = OperationTracker::new();
        let suggest = tracker.begin(OperationKind::SuggestTrends).unwrap();
        let analysis = tracker.begin(OperationKind::TrendAnalysis).unwrap();

        assert!(tracker.finish(analysis));
        assert!(tracker.is_loading(), "suggest call is still outstanding");
        assert!(tracker.finish(suggest));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_same_kind_refused_while_running() {
        let mut tracker = OperationTracker::new();
        let first = tracker.begin(OperationKind::TrendAnalysis).unwrap();
        assert!(tracker.begin(OperationKind::TrendAnalysis).is_none());

        tracker.finish(first);
        assert!(tracker.begin(OperationKind::TrendAnalysis).is_some());
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut tracker = OperationTracker::new();
        let first = tracker.begin(OperationKind::SuggestTrends).unwrap();
        assert!(tracker.finish(first));
        let second = tracker.begin(OperationKind::SuggestTrends).unwrap();

        assert!(!tracker.finish(first));
        assert!(tracker.is_loading());
        assert_eq!(second.kind(), OperationKind::SuggestTrends);
        assert_eq!(tracker.current_label(), Some("Suggesting trends"));
    }
}
