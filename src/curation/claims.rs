//! In-flight curation requests, at most one per user and topic

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::storage::topic_key;

/// Topics currently being curated
#[derive(Debug, Default)]
pub struct TopicClaims {
    pending: Arc<Mutex<HashSet<String>>>,
}

/// Held while one request curates a topic; released on drop
#[derive(Debug)]
pub struct TopicClaim {
    pending: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl TopicClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `topic` for `user_id`. `None` while another request holds it.
    pub fn claim(&self, user_id: &str, topic: &str) -> Option<TopicClaim> {
        let key = format!("{}\n{}", user_id, topic_key(topic));
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if !pending.insert(key.clone()) {
            return None;
        }

        Some(TopicClaim {
            pending: Arc::clone(&self.pending),
            key,
        })
    }

    pub fn in_flight(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for TopicClaim {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_waits_for_release() {
        let claims = TopicClaims::new();

        let first = claims.claim("alice", "Linear Algebra");
        assert!(first.is_some());
        assert!(claims.claim("alice", "  linear algebra ").is_none());

        // Other users and other topics are independent
        assert!(claims.claim("bob", "Linear Algebra").is_some());
        assert!(claims.claim("alice", "Chemistry").is_some());

        drop(first);
        assert_eq!(claims.in_flight(), 0);
        assert!(claims.claim("alice", "Linear Algebra").is_some());
    }
}
