//! Turning replies into output lines.

use crate::config::OutputFormat;
use chess_engine::{Board, Square};
use serde::Serialize;

/// Kind of reply, written as the JSON `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Info,
    Board,
    Error,
}

/// A message addressed to one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub chat: String,
    pub text: String,
    pub board: Option<Board>,
}

impl Reply {
    pub fn info(chat: &str, text: impl Into<String>) -> Self {
        Reply {
            kind: ReplyKind::Info,
            chat: chat.to_string(),
            text: text.into(),
            board: None,
        }
    }

    pub fn error(chat: &str, text: impl Into<String>) -> Self {
        Reply {
            kind: ReplyKind::Error,
            ..Reply::info(chat, text)
        }
    }

    pub fn board(chat: &str, text: impl Into<String>, board: &Board) -> Self {
        Reply {
            kind: ReplyKind::Board,
            board: Some(board.clone()),
            ..Reply::info(chat, text)
        }
    }
}

#[derive(Serialize)]
struct JsonReply<'a> {
    #[serde(rename = "type")]
    kind: ReplyKind,
    chat: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagram: Option<String>,
}

/// Unicode diagram of `board`, rank 8 first, one line per rank.
pub fn diagram(board: &Board) -> String {
    let mut out = String::with_capacity(8 * 8 * 4);
    for rank in (0..8).rev() {
        for file in 0..8 {
            if file > 0 {
                out.push(' ');
            }
            let glyph = Square::new(file, rank)
                .and_then(|sq| board.piece_at(sq))
                .map_or('□', |p| p.glyph());
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Formats `reply` for stdout.
pub fn render(reply: &Reply, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => {
            let mut out = format!("[{}] {}", reply.chat, reply.text);
            if let Some(board) = &reply.board {
                out.push('\n');
                out.push_str(diagram(board).trim_end());
            }
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string(&JsonReply {
            kind: reply.kind,
            chat: &reply.chat,
            text: &reply.text,
            fen: reply.board.as_ref().map(Board::to_fen),
            diagram: reply.board.as_ref().map(diagram),
        }),
    }
}
