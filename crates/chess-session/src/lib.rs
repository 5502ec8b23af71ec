//! Multi-game chess session manager.
//!
//! [`SessionManager`] keeps any number of independent games keyed by an
//! opaque identifier (a chat id, a room name) and decides who may join and
//! who may move. All chess rules live in `chess-engine`; this crate only
//! seats participants and forwards their moves.
//!
//! # Example
//!
//! ```
//! use chess_session::{SessionConfig, SessionManager, SessionStatus};
//!
//! let manager = SessionManager::new(SessionConfig::default());
//! manager.start_game("chat-1", "alice").unwrap();
//! manager.join_game("chat-1", "bob").unwrap();
//!
//! let outcome = manager.submit_move("chat-1", "alice", "e4").unwrap();
//! assert_eq!(outcome.san, "e4");
//! assert_eq!(outcome.status, SessionStatus::InProgress);
//! assert!(manager.submit_move("chat-1", "alice", "d4").is_err());
//! ```

mod config;
mod error;
mod manager;
mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{GameSession, MoveOutcome, Players, SessionMode, SessionSnapshot, SessionStatus};
