//! Generation tokens: the stale-result defense
//!
//! There is no true cancellation of in-flight remote calls; a new search
//! simply mints a new token and every asynchronous continuation compares
//! the token it captured at submission time against the current one
//! before publishing. Mismatch means the result is stale and is silently
//! discarded.

/// Identifier of one user-initiated load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(u64);

impl GenerationToken {
    /// The pre-first-load token
    pub const INITIAL: Self = Self(0);

    /// Raw value, for logging
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Mints monotonically increasing tokens.
///
/// Plain integer state: the controller is the counter's only owner, so
/// no atomics are needed.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next token
    pub fn next(&mut self) -> GenerationToken {
        self.current += 1;
        GenerationToken(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic() {
        let mut counter = GenerationCounter::new();
        let a = counter.next();
        let b = counter.next();
        let c = counter.next();
        assert!(a < b && b < c);
        assert!(GenerationToken::INITIAL < a);
    }
}
