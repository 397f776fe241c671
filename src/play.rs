// In-memory registry of quiz runs currently being played.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::time::{Duration, Instant};
use ulid::Ulid;

use crate::game::QuizSession;
use crate::names;

/// One quiz run in progress, owned by a single user. The deadline is the
/// current question's 10 s countdown; answering or advancing replaces it,
/// abandoning the run drops it.
pub struct ActiveSession {
    pub user_id: i64,
    pub engine: QuizSession,
    pub deadline: Instant,
}

impl ActiveSession {
    pub fn new(user_id: i64, engine: QuizSession) -> Self {
        Self {
            user_id,
            engine,
            deadline: next_deadline(),
        }
    }

    /// Whole seconds left on the current question's clock.
    pub fn time_remaining_secs(&self, now: Instant) -> u32 {
        self.deadline
            .saturating_duration_since(now)
            .as_secs()
            .min(u64::from(names::QUESTION_TIME_LIMIT_SECS)) as u32
    }

    pub fn restart_clock(&mut self) {
        self.deadline = next_deadline();
    }
}

fn next_deadline() -> Instant {
    Instant::now() + Duration::from_secs(u64::from(names::QUESTION_TIME_LIMIT_SECS))
}

/// Sessions whose question clock ran out this long ago are swept at the
/// next insert.
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

pub fn prune_stale(sessions: &mut HashMap<String, ActiveSession>) {
    sessions.retain(|_, s| s.deadline.elapsed() < STALE_AFTER);
}

/// Shared map of token -> active session. The lock is only ever held for
/// synchronous state changes, never across an await.
pub type SessionMap = Arc<Mutex<HashMap<String, ActiveSession>>>;

pub fn new_session_map() -> SessionMap {
    Arc::new(Mutex::new(HashMap::new()))
}

pub fn new_token() -> String {
    Ulid::new().to_string()
}
