//! Nonce search
//!
//! The search is a lazy, infinite sequence of `(nonce, digest)` pairs,
//! consumed until the first digest meets the difficulty predicate. Without
//! a bound it has no failure mode: it either succeeds or runs forever.
//! [`SearchLimits`] lets callers bound it (tests) or cancel it (workers)
//! without changing the sequence itself.

use sha2::{Digest, Sha256};

use super::entities::Attempt;
use crate::utils::hashing::meets_difficulty;

/// How often (in attempts) the stop condition is polled
pub const CANCEL_CHECK_INTERVAL: u64 = 4_096;

/// Lazy `(nonce, digest)` producer for one mining prefix.
///
/// Yields nonces `0, 1, 2, ...`; the SHA-256 state for the prefix is
/// computed once and cloned per attempt.
#[derive(Clone)]
pub struct NonceSearch {
    base: Sha256,
    next: Option<u64>,
}

impl NonceSearch {
    /// Start a sweep over `prefix`
    pub fn new(prefix: &str) -> Self {
        Self {
            base: Sha256::new_with_prefix(prefix.as_bytes()),
            next: Some(0),
        }
    }
}

impl Iterator for NonceSearch {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        let nonce = self.next?;
        self.next = nonce.checked_add(1);

        let mut hasher = self.base.clone();
        hasher.update(nonce.to_string().as_bytes());
        Some(Attempt {
            nonce,
            hash: hex::encode(hasher.finalize()),
        })
    }
}

/// Optional bounds on a search
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    /// Give up after this many attempts (`None` = unbounded)
    pub max_attempts: Option<u64>,
}

/// Result of running a search to completion
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First attempt meeting the predicate
    Found(Attempt),
    /// `max_attempts` reached without a match
    Exhausted {
        /// Attempts made
        attempts: u64,
    },
    /// Stop condition fired
    Cancelled {
        /// Attempts made
        attempts: u64,
    },
}

/// Consume a [`NonceSearch`] until the difficulty predicate holds.
///
/// `should_stop` is polled every [`CANCEL_CHECK_INTERVAL`] attempts.
pub fn search(
    prefix: &str,
    difficulty: u32,
    limits: SearchLimits,
    should_stop: &dyn Fn() -> bool,
) -> SearchOutcome {
    let mut attempts: u64 = 0;

    for attempt in NonceSearch::new(prefix) {
        if limits.max_attempts.is_some_and(|max| attempts >= max) {
            return SearchOutcome::Exhausted { attempts };
        }
        if attempts % CANCEL_CHECK_INTERVAL == 0 && attempts > 0 && should_stop() {
            return SearchOutcome::Cancelled { attempts };
        }
        attempts += 1;

        if meets_difficulty(&attempt.hash, difficulty) {
            return SearchOutcome::Found(attempt);
        }
    }

    // Only reachable after u64::MAX attempts.
    SearchOutcome::Exhausted { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hashing::attempt_hash;

    #[test]
    fn test_sequence_matches_attempt_hash() {
        let prefix = "11700000000";
        for attempt in NonceSearch::new(prefix).take(5) {
            assert_eq!(attempt.hash, attempt_hash(prefix, attempt.nonce));
        }
    }

    #[test]
    fn test_nonces_are_sequential() {
        let nonces: Vec<u64> = NonceSearch::new("x").take(4).map(|a| a.nonce).collect();
        assert_eq!(nonces, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_difficulty_finds_first_nonce() {
        match search("anything", 0, SearchLimits::default(), &|| false) {
            SearchOutcome::Found(attempt) => assert_eq!(attempt.nonce, 0),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_found_is_first_match() {
        let prefix = "31700000000";
        let SearchOutcome::Found(found) = search(prefix, 2, SearchLimits::default(), &|| false)
        else {
            panic!("difficulty 2 must be found");
        };
        assert!(meets_difficulty(&found.hash, 2));
        let earlier = NonceSearch::new(prefix)
            .take(found.nonce as usize)
            .any(|a| meets_difficulty(&a.hash, 2));
        assert!(!earlier);
    }

    #[test]
    fn test_bound_exhausts() {
        let limits = SearchLimits {
            max_attempts: Some(10),
        };
        // 64 leading zeros is unreachable
        assert_eq!(
            search("p", 64, limits, &|| false),
            SearchOutcome::Exhausted { attempts: 10 }
        );
    }

    #[test]
    fn test_stop_condition_cancels() {
        match search("p", 64, SearchLimits::default(), &|| true) {
            SearchOutcome::Cancelled { attempts } => assert_eq!(attempts, CANCEL_CHECK_INTERVAL),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
