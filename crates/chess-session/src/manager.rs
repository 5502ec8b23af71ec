//! Registry of concurrent sessions.

use crate::{GameSession, MoveOutcome, SessionConfig, SessionError, SessionSnapshot};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

type SessionHandle = Arc<Mutex<GameSession>>;

/// Owns every live session, keyed by an external identifier.
///
/// The registry lock only guards insertion, lookup and removal. Each session
/// has its own mutex, so moves in different games never wait on each other
/// and the registry is never locked while a session is being changed.
#[derive(Debug, Default)]
pub struct SessionManager {
    config: SessionConfig,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        SessionManager {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Opens a game with `participant` as White.
    ///
    /// Fails with [`SessionError::GameAlreadyExists`] while `id` is
    /// registered, including after the game ended and before it is removed.
    pub fn start_game(&self, id: &str, participant: &str) -> Result<SessionSnapshot, SessionError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.entry(id.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!("Refused to start game {}: already exists", id);
                Err(SessionError::GameAlreadyExists(id.to_string()))
            }
            Entry::Vacant(slot) => {
                let session = GameSession::new(id, participant);
                let snapshot = session.snapshot();
                slot.insert(Arc::new(Mutex::new(session)));
                tracing::info!("Game {} started by {}", id, participant);
                Ok(snapshot)
            }
        }
    }

    /// Seats `participant` as Black in game `id`.
    pub fn join_game(&self, id: &str, participant: &str) -> Result<SessionSnapshot, SessionError> {
        let result = self.with_session(id, |session| {
            session.join(participant, &self.config)?;
            Ok(session.snapshot())
        });
        match &result {
            Ok(snapshot) => tracing::info!(
                "{} joined game {} ({:?})",
                participant,
                id,
                snapshot.mode
            ),
            Err(e) => tracing::warn!("{} could not join game {}: {}", participant, id, e),
        }
        result
    }

    /// Plays a SAN move for `participant` in game `id`.
    pub fn submit_move(
        &self,
        id: &str,
        participant: &str,
        text: &str,
    ) -> Result<MoveOutcome, SessionError> {
        let result = self.with_session(id, |session| {
            session.submit_move(participant, text, &self.config)
        });
        match &result {
            Ok(outcome) => {
                tracing::debug!("Game {}: {} played {}", id, participant, outcome.san);
                if outcome.status.is_terminal() {
                    tracing::info!("Game {} finished: {}", id, outcome.status);
                }
            }
            Err(e) => tracing::warn!(
                "Game {}: rejected '{}' from {}: {}",
                id,
                text,
                participant,
                e
            ),
        }
        result
    }

    /// Ends game `id` at `participant`'s request. The session stays
    /// registered until [`remove_game`](Self::remove_game).
    pub fn abandon_game(&self, id: &str, participant: &str) -> Result<SessionSnapshot, SessionError> {
        let result = self.with_session(id, |session| {
            session.abandon(participant)?;
            Ok(session.snapshot())
        });
        match &result {
            Ok(_) => tracing::info!("Game {} abandoned by {}", id, participant),
            Err(e) => tracing::warn!("{} could not abandon game {}: {}", participant, id, e),
        }
        result
    }

    /// Drops game `id` from the registry, whatever its state, returning its
    /// final snapshot. The identifier is free for [`start_game`](Self::start_game) afterwards.
    pub fn remove_game(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .ok_or_else(|| SessionError::NoSuchGame(id.to_string()))?;
        let snapshot = removed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        tracing::info!("Game {} removed ({})", id, snapshot.status);
        Ok(snapshot)
    }

    /// Current state of game `id`, if registered.
    pub fn session(&self, id: &str) -> Option<SessionSnapshot> {
        let handle = self.handle(id).ok()?;
        let session = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Some(session.snapshot())
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handle(&self, id: &str) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NoSuchGame(id.to_string()))
    }

    /// Runs `f` under the session's own lock; the registry lock is released
    /// before `f` starts.
    fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
