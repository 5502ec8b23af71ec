//! Drives the compiled binary over stdin.

use std::io::Write;
use std::process::{Command, Stdio};

fn run(args: &[&str], input: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chess-bot"))
        .args(["--config", "no-such-config.toml"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

const FOOLS_MATE: &str = "\
# two players in one chat, chatter in another
room-1 alice /play
room-1 bob /join
room-2 carol good luck everyone

room-1 alice f3
room-1 bob e5
room-1 alice g4
room-1 bob Qh4#
room-1 alice a3
";

#[test]
fn json_lines_for_a_whole_game() {
    let out = run(&["--output", "json"], FOOLS_MATE);
    let replies: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 7);
    assert!(replies.iter().all(|r| r["chat"] == "room-1"));

    assert_eq!(replies[0]["type"], "board");
    assert_eq!(
        replies[0]["fen"],
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
    assert_eq!(replies[2]["text"], "White played f3.");
    assert_eq!(
        replies[5]["text"],
        "Qh4# Game over: checkmate, Black wins. Send /end to clear it."
    );
    assert_eq!(replies[6]["type"], "error");
}

#[test]
fn text_output_draws_the_board() {
    let out = run(&[], "room-1 alice /start\nroom-1 alice /play\n");
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("[room-1] Welcome to ChessBot! Send /play to start a game.")
    );
    assert_eq!(
        lines.next(),
        Some("[room-1] New game started! Send your moves in standard algebraic notation.")
    );
    assert_eq!(lines.next(), Some("♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
    assert_eq!(lines.last(), Some("♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖"));
}
