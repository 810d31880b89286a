use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

use engine_logging::{engine_debug, engine_info};

pub type HarvestingSessionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Ongoing,
    Finished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown harvesting session {0}")]
    Unknown(HarvestingSessionId),
    #[error("harvesting session {0} is already finished")]
    AlreadyFinished(HarvestingSessionId),
}

/// Counters a worker sets on a session. Fields left `None` are not touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionUpdate {
    pub total_records_found: Option<usize>,
}

impl SessionUpdate {
    pub fn total_records_found(total: usize) -> Self {
        Self {
            total_records_found: Some(total),
        }
    }
}

/// Bookkeeping for one harvesting run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestingSession {
    status: SessionStatus,
    total_records_found: usize,
}

impl HarvestingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn total_records_found(&self) -> usize {
        self.total_records_found
    }

    /// Counters are set, never accumulated.
    pub fn apply(&mut self, update: SessionUpdate) -> Result<(), SessionStatus> {
        if self.status == SessionStatus::Finished {
            return Err(self.status);
        }
        if let Some(total) = update.total_records_found {
            self.total_records_found = total;
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), SessionStatus> {
        match self.status {
            SessionStatus::Ongoing => {
                self.status = SessionStatus::Finished;
                Ok(())
            }
            SessionStatus::Finished => Err(self.status),
        }
    }
}

/// Persistence seam for harvesting sessions. Workers call it; they never own
/// the session storage.
pub trait SessionRecorder: Send + Sync {
    fn update_harvesting_session(
        &self,
        session_id: HarvestingSessionId,
        update: SessionUpdate,
    ) -> Result<(), SessionError>;

    fn finish_harvesting_session(&self, session_id: HarvestingSessionId)
        -> Result<(), SessionError>;
}

/// Process-local session store, also used as the recorder in tests.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: HarvestingSessionId,
    sessions: BTreeMap<HarvestingSessionId, SessionEntry>,
}

#[derive(Debug, Clone, Default)]
struct SessionEntry {
    session: HarvestingSession,
    update_calls: usize,
    finish_calls: usize,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_session(&self) -> HarvestingSessionId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.sessions.insert(id, SessionEntry::default());
        engine_info!("Started harvesting session {id}");
        id
    }

    pub fn session(&self, session_id: HarvestingSessionId) -> Option<HarvestingSession> {
        self.lock()
            .sessions
            .get(&session_id)
            .map(|entry| entry.session.clone())
    }

    /// Number of update calls received for a session, including rejected ones.
    pub fn update_calls(&self, session_id: HarvestingSessionId) -> usize {
        self.lock()
            .sessions
            .get(&session_id)
            .map_or(0, |entry| entry.update_calls)
    }

    /// Number of finish calls received for a session, including rejected ones.
    pub fn finish_calls(&self, session_id: HarvestingSessionId) -> usize {
        self.lock()
            .sessions
            .get(&session_id)
            .map_or(0, |entry| entry.finish_calls)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // A poisoned store still holds consistent counters.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionRecorder for InMemorySessionStore {
    fn update_harvesting_session(
        &self,
        session_id: HarvestingSessionId,
        update: SessionUpdate,
    ) -> Result<(), SessionError> {
        let mut inner = self.lock();
        let entry = inner
            .sessions
            .get_mut(&session_id)
            .ok_or(SessionError::Unknown(session_id))?;
        entry.update_calls += 1;
        entry
            .session
            .apply(update)
            .map_err(|_| SessionError::AlreadyFinished(session_id))?;
        engine_debug!("Updated harvesting session {session_id}: {update:?}");
        Ok(())
    }

    fn finish_harvesting_session(
        &self,
        session_id: HarvestingSessionId,
    ) -> Result<(), SessionError> {
        let mut inner = self.lock();
        let entry = inner
            .sessions
            .get_mut(&session_id)
            .ok_or(SessionError::Unknown(session_id))?;
        entry.finish_calls += 1;
        entry
            .session
            .finish()
            .map_err(|_| SessionError::AlreadyFinished(session_id))?;
        engine_info!("Finished harvesting session {session_id}");
        Ok(())
    }
}
