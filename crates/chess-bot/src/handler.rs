//! Dispatching chat commands to the session manager.

use crate::command::{Command, Message};
use crate::render::Reply;
use chess_engine::MoveError;
use chess_session::{
    MoveOutcome, SessionError, SessionManager, SessionMode, SessionSnapshot, SessionStatus,
};

const WELCOME: &str = "Welcome to ChessBot! Send /play to start a game.";
const HELP: &str = "Commands: /play starts a game, /join takes the black pieces, \
/board shows the position, /resign gives up, /end clears a finished game. \
Send moves in standard algebraic notation, e.g. e4, Nf3, O-O, exd8=Q.";
const NOT_A_PARTICIPANT: &str = "You're not part of an ongoing game in this chat.";
const NO_GAME: &str = "There is no game in this chat. Send /play to start one.";
const GAME_OVER: &str = "This game is over. Send /end to clear it.";

/// Answers chat messages for every chat the bot is in.
pub struct Handler {
    manager: SessionManager,
}

impl Handler {
    pub fn new(manager: SessionManager) -> Self {
        Handler { manager }
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Handles one message, returning the reply to post, if any.
    pub fn handle(&self, msg: &Message<'_>) -> Option<Reply> {
        let Message { chat, user, command } = *msg;
        match command {
            Command::Start => Some(Reply::info(chat, WELCOME)),
            Command::Help => Some(Reply::info(chat, HELP)),
            Command::Play => Some(self.play(chat, user)),
            Command::Join => Some(self.join(chat, user)),
            Command::Board => Some(self.board(chat)),
            Command::Resign => Some(self.resign(chat, user)),
            Command::End => Some(self.end(chat, user)),
            Command::Move(text) => self.submit(chat, user, text),
            Command::Unknown(name) => Some(Reply::error(
                chat,
                format!("Unknown command /{}. Send /help for the list of commands.", name),
            )),
            Command::Chatter => None,
        }
    }

    fn play(&self, chat: &str, user: &str) -> Reply {
        match self.manager.start_game(chat, user) {
            Ok(snapshot) => Reply::board(
                chat,
                "New game started! Send your moves in standard algebraic notation.",
                &snapshot.board,
            ),
            Err(_) => Reply::error(chat, "A game is already in progress in this chat."),
        }
    }

    fn join(&self, chat: &str, user: &str) -> Reply {
        match self.manager.join_game(chat, user) {
            Ok(snapshot) if snapshot.mode == SessionMode::SelfPlay => Reply::board(
                chat,
                "You are now playing as both White and Black! It's your turn.",
                &snapshot.board,
            ),
            Ok(snapshot) => Reply::board(
                chat,
                "You have joined the game as Black! Wait for White to make their move.",
                &snapshot.board,
            ),
            Err(SessionError::NoSuchGame(_)) => {
                Reply::error(chat, "Unable to join: no game to join.")
            }
            Err(SessionError::GameFull(_)) => {
                let seated = self
                    .manager
                    .session(chat)
                    .is_some_and(|s| s.players.black() == Some(user));
                if seated {
                    Reply::error(chat, "You are already playing as Black.")
                } else {
                    Reply::error(chat, "The game is already full.")
                }
            }
            Err(SessionError::SelfPlayDisabled) => Reply::error(
                chat,
                "Playing against yourself is disabled here. Wait for an opponent to /join.",
            ),
            Err(SessionError::GameFinished(_)) => Reply::error(chat, GAME_OVER),
            Err(e) => Reply::error(chat, e.to_string()),
        }
    }

    fn board(&self, chat: &str) -> Reply {
        match self.manager.session(chat) {
            Some(snapshot) => Reply::board(chat, describe(&snapshot), &snapshot.board),
            None => Reply::error(chat, NO_GAME),
        }
    }

    fn resign(&self, chat: &str, user: &str) -> Reply {
        match self.manager.abandon_game(chat, user) {
            Ok(_) => Reply::info(
                chat,
                format!("{} resigned. Send /end to clear the game.", user),
            ),
            Err(SessionError::NoSuchGame(_) | SessionError::NotAParticipant(_)) => {
                Reply::error(chat, NOT_A_PARTICIPANT)
            }
            Err(SessionError::GameFinished(_)) => Reply::error(chat, GAME_OVER),
            Err(e) => Reply::error(chat, e.to_string()),
        }
    }

    /// Clears a finished or abandoned game so the chat can start another.
    fn end(&self, chat: &str, user: &str) -> Reply {
        let Some(snapshot) = self.manager.session(chat) else {
            return Reply::error(chat, NO_GAME);
        };
        if !snapshot.players.holds(user) {
            return Reply::error(chat, NOT_A_PARTICIPANT);
        }
        if !snapshot.status.is_terminal() {
            return Reply::error(
                chat,
                "The game is still running. Send /resign to give up first.",
            );
        }
        match self.manager.remove_game(chat) {
            Ok(_) => Reply::info(chat, "Game cleared. Send /play to start a new one."),
            Err(_) => Reply::error(chat, NO_GAME),
        }
    }

    fn submit(&self, chat: &str, user: &str, text: &str) -> Option<Reply> {
        let reply = match self.manager.submit_move(chat, user, text) {
            Ok(outcome) => Reply::board(chat, after_move(&outcome), &outcome.board),
            // Move-like chatter in a chat without a game.
            Err(SessionError::NoSuchGame(_)) => return None,
            Err(SessionError::NotAParticipant(_)) => Reply::error(chat, NOT_A_PARTICIPANT),
            Err(SessionError::NotYourTurn { .. }) => Reply::error(chat, "It's not your turn."),
            Err(SessionError::GameFinished(_)) => Reply::error(chat, GAME_OVER),
            Err(SessionError::WaitingForOpponent(_)) => {
                Reply::error(chat, "Waiting for an opponent to /join.")
            }
            Err(SessionError::Move(MoveError::Illegal(_))) => {
                Reply::error(chat, "Illegal move. Try again.")
            }
            Err(SessionError::Move(MoveError::Parse { .. })) => Reply::error(
                chat,
                "Could not understand the move. Please use Standard Algebraic Notation (SAN).",
            ),
            Err(SessionError::Move(MoveError::Ambiguous { candidates, .. })) => Reply::error(
                chat,
                format!("Ambiguous move. Did you mean {}?", candidates.join(" or ")),
            ),
            Err(e) => Reply::error(chat, e.to_string()),
        };
        Some(reply)
    }
}

fn after_move(outcome: &MoveOutcome) -> String {
    match outcome.status {
        SessionStatus::InProgress => {
            let mover = outcome.board.side_to_move().opposite();
            let check = if outcome.board.is_check() { " Check!" } else { "" };
            format!("{} played {}.{}", mover, outcome.san, check)
        }
        status => format!("{} Game over: {}. Send /end to clear it.", outcome.san, status),
    }
}

fn describe(snapshot: &SessionSnapshot) -> String {
    let black = snapshot.players.black().unwrap_or("(open seat)");
    let players = format!("{} (White) vs {} (Black)", snapshot.players.white(), black);
    match snapshot.status {
        SessionStatus::InProgress => format!(
            "{}. {} to move, move {}.",
            players,
            snapshot.board.side_to_move(),
            snapshot.board.fullmove_number()
        ),
        status => format!("{}. Game {}.", players, status),
    }
}
