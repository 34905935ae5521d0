use tracing::debug;

/// Identifies one analysis request. Later tokens supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Keeps track of the latest in-flight analysis request so a slow response
/// can never overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    current: Option<RequestToken>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier token.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        debug!(token = token.0, "analysis request started");
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// Hands back `result` if `token` is still the latest request. The token
    /// is consumed, so a response is accepted at most once.
    pub fn accept<T>(&mut self, token: RequestToken, result: T) -> Option<T> {
        if self.is_current(token) {
            self.current = None;
            Some(result)
        } else {
            debug!(token = token.0, latest = self.issued, "dropping stale analysis response");
            None
        }
    }

    /// Abandons the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            debug!(token = token.0, "analysis request cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut tracker = RequestTracker::new();
        let stale = tracker.begin();
        let fresh = tracker.begin();

        assert_eq!(tracker.accept(stale, "old"), None);
        assert_eq!(tracker.accept(fresh, "new"), Some("new"));
    }

    #[test]
    fn test_response_accepted_once() {
        let mut tracker = RequestTracker::new();
        let token = tracker.begin();
        assert_eq!(tracker.accept(token, 1), Some(1));
        assert_eq!(tracker.accept(token, 2), None);
    }

    #[test]
    fn test_cancel() {
        let mut tracker = RequestTracker::new();
        let token = tracker.begin();
        tracker.cancel();
        assert_eq!(tracker.accept(token, ()), None);
    }
}
