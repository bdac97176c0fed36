//! Per-session engine registry.
//!
//! Hosts serving several clients keep one [`Engine`] per session id. The
//! registry is an explicit value owned by the host and passed where needed;
//! there is no global state. Each engine sits behind its own lock, so work
//! on one session never blocks another.

use std::collections::HashMap;

use armsim_common::robot::config::SimulationConfig;
use parking_lot::Mutex;
use tracing::debug;

use crate::engine::Engine;
use crate::error::EngineError;

/// Map from session id to an isolated engine.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Mutex<Engine>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session with its own engine.
    ///
    /// # Errors
    ///
    /// `EngineError::SessionExists` for a duplicate id, or the validation
    /// error of `config`.
    pub fn open(&mut self, id: &str, config: SimulationConfig) -> Result<(), EngineError> {
        if self.sessions.contains_key(id) {
            return Err(EngineError::SessionExists(id.to_string()));
        }
        let engine = Engine::new(config)?;
        self.sessions.insert(id.to_string(), Mutex::new(engine));
        debug!(session = id, "session opened");
        Ok(())
    }

    /// Run `f` with exclusive access to the engine of session `id`.
    ///
    /// # Errors
    ///
    /// `EngineError::SessionNotFound` if no such session is open.
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&mut Engine) -> R) -> Result<R, EngineError> {
        let slot = self
            .sessions
            .get(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;
        let mut engine = slot.lock();
        Ok(f(&mut engine))
    }

    /// Close session `id` and hand back its engine.
    pub fn close(&mut self, id: &str) -> Result<Engine, EngineError> {
        let slot = self
            .sessions
            .remove(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.to_string()))?;
        debug!(session = id, "session closed");
        Ok(slot.into_inner())
    }

    /// Ids of all open sessions, in no particular order.
    pub fn ids(&self) -> Vec<&str> {
        self.sessions.keys().map(String::as_str).collect()
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
