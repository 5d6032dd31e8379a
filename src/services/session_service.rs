use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use chrono::{DateTime, Duration, Utc};
use log::{info, debug, error};
use uuid::Uuid;

use crate::models::{ApiError, Outcome, Scenario, ScenarioField, Session, SessionView};
use crate::utils::TokenomicsCalculator;

/// Idle time after which a session the client never ended is dropped.
pub const DEFAULT_SESSION_TTL_SECS: u32 = 1800;

/// In-memory store of committed scenarios, one per UI session.
pub struct SessionService {
    calculator: TokenomicsCalculator,
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_SESSION_TTL_SECS as i64))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            calculator: TokenomicsCalculator::new(),
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn calculator(&self) -> &TokenomicsCalculator {
        &self.calculator
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>, ApiError> {
        self.sessions.lock().map_err(|e| {
            error!("Session store lock poisoned: {}", e);
            ApiError::InternalError("session store unavailable".to_string())
        })
    }

    /// Starts a session on the default scenario, dropping idle ones first.
    pub fn create_session(&self) -> Result<SessionView, ApiError> {
        let now = Utc::now();
        self.evict_idle(now)?;

        let session = Session {
            id: Uuid::new_v4().to_string(),
            scenario: Scenario::default(),
            created_at: now,
            updated_at: now,
            last_active: now,
        };

        let view = self.view(&session)?;
        self.lock()?.insert(session.id.clone(), session);

        info!("Created session {}", view.session_id);
        Ok(view)
    }

    pub fn get_session(&self, session_id: &str) -> Result<SessionView, ApiError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| ApiError::NotFound(format!("session {}", session_id)))?;
        session.last_active = Utc::now();
        self.view(session)
    }

    /// Validates one slider move and commits it only when accepted.
    ///
    /// On rejection the stored scenario is left exactly as it was and the
    /// error carries it back so the client can snap its slider.
    pub fn propose_change(
        &self,
        session_id: &str,
        field: ScenarioField,
        value: f64,
    ) -> Result<SessionView, ApiError> {
        let mut sessions = self.lock()?;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| ApiError::NotFound(format!("session {}", session_id)))?;
        session.last_active = Utc::now();

        match self.calculator.validate_change(&session.scenario, field, value) {
            Outcome::Accepted(scenario) => {
                debug!("Session {}: {} -> {} accepted", session_id, field, value);
                session.scenario = scenario;
                session.updated_at = session.last_active;
                self.view(session)
            }
            Outcome::Rejected(error) => Err(ApiError::Rejected {
                error,
                committed: session.scenario,
            }),
        }
    }

    pub fn end_session(&self, session_id: &str) -> Result<(), ApiError> {
        match self.lock()?.remove(session_id) {
            Some(_) => {
                info!("Ended session {}", session_id);
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("session {}", session_id))),
        }
    }

    /// Removes sessions idle for at least the TTL as of `now`; returns how many went.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> Result<usize, ApiError> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_active < self.ttl);

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle session(s)", evicted);
        }
        Ok(evicted)
    }

    pub fn session_count(&self) -> Result<usize, ApiError> {
        Ok(self.lock()?.len())
    }

    fn view(&self, session: &Session) -> Result<SessionView, ApiError> {
        // Committed scenarios always passed validation
        let derived = self.calculator.validate(&session.scenario)?;

        Ok(SessionView {
            session_id: session.id.clone(),
            scenario: session.scenario,
            derived,
            warning: self.calculator.limit_warning(&session.scenario),
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }
}
