//! Parsing of incoming chat lines.

/// One incoming chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<'a> {
    pub chat: &'a str,
    pub user: &'a str,
    pub command: Command<'a>,
}

/// What a message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    Help,
    Play,
    Join,
    Board,
    Resign,
    End,
    Move(&'a str),
    /// A slash command the bot does not know.
    Unknown(&'a str),
    /// Ordinary conversation, ignored.
    Chatter,
}

/// Parses `<chat> <user> <text...>`.
///
/// Returns `None` for blank lines, `#` comments and lines without text.
pub fn parse_line(line: &str) -> Option<Message<'_>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (chat, rest) = line.split_once(char::is_whitespace)?;
    let (user, text) = rest.trim_start().split_once(char::is_whitespace)?;
    Some(Message {
        chat,
        user,
        command: parse_command(text.trim()),
    })
}

pub fn parse_command(text: &str) -> Command<'_> {
    if let Some(name) = text.strip_prefix('/') {
        let name = name.split_whitespace().next().unwrap_or("");
        // Group chats address commands as /play@SomeBot.
        let name = name.split('@').next().unwrap_or(name);
        return match name {
            "start" => Command::Start,
            "help" => Command::Help,
            "play" => Command::Play,
            "join" => Command::Join,
            "board" => Command::Board,
            "resign" => Command::Resign,
            "end" => Command::End,
            _ => Command::Unknown(name),
        };
    }
    if looks_like_move(text) {
        Command::Move(text)
    } else {
        Command::Chatter
    }
}

/// A single token starting with a file letter, a piece letter or a castling `O`/`0`.
pub fn looks_like_move(text: &str) -> bool {
    if text.contains(char::is_whitespace) {
        return false;
    }
    matches!(
        text.chars().next(),
        Some('a'..='h' | 'N' | 'B' | 'R' | 'Q' | 'K' | 'O' | '0')
    )
}
