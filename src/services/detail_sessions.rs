//! Per-chat bookkeeping for the detail screen.
//!
//! Every detail load takes a ticket; only the newest ticket of a chat may
//! publish its result. The last published coin is kept as the snapshot the
//! favorite button acts on.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::entity::CoinSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    scope: i64,
    generation: u64,
}

#[derive(Debug, Default)]
struct Session {
    latest: u64,
    snapshot: Option<CoinSummary>,
}

#[derive(Debug, Default)]
pub struct DetailSessions {
    next_generation: AtomicU64,
    sessions: Mutex<HashMap<i64, Session>>,
}

impl DetailSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<i64, Session>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new request for `scope`, superseding any in-flight one.
    pub fn begin(&self, scope: i64) -> RequestTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sessions().entry(scope).or_default().latest = generation;

        RequestTicket { scope, generation }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sessions()
            .get(&ticket.scope)
            .is_some_and(|session| session.latest == ticket.generation)
    }

    /// Publish a loaded coin. Returns false, storing nothing, if the ticket is stale.
    pub fn complete(&self, ticket: RequestTicket, summary: &CoinSummary) -> bool {
        let mut sessions = self.sessions();
        match sessions.get_mut(&ticket.scope) {
            Some(session) if session.latest == ticket.generation => {
                session.snapshot = Some(summary.clone());
                true
            }
            _ => false,
        }
    }

    /// Last published coin of `scope`, if it is `coin_id`.
    pub fn snapshot(&self, scope: i64, coin_id: &str) -> Option<CoinSummary> {
        self.sessions()
            .get(&scope)
            .and_then(|session| session.snapshot.as_ref())
            .filter(|summary| summary.id == coin_id)
            .cloned()
    }
}
