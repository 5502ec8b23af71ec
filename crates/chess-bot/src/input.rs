//! Line input on a dedicated thread.
//!
//! Blocking reads live on a plain `std::thread` so a pending read never
//! keeps the tokio runtime from shutting down.

use std::io::BufRead;
use tokio::sync::mpsc;

/// Reads `reader` line by line into a channel. The channel closes at end of
/// input, after a read error, or once the receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<std::io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(100);
    std::thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn forwards_lines_then_closes() {
        let mut rx = spawn_line_reader(Cursor::new("c1 alice /play\n\nc1 bob /join"));
        assert_eq!(rx.recv().await.unwrap().unwrap(), "c1 alice /play");
        assert_eq!(rx.recv().await.unwrap().unwrap(), "");
        assert_eq!(rx.recv().await.unwrap().unwrap(), "c1 bob /join");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn read_errors_end_the_stream() {
        let mut rx = spawn_line_reader(Cursor::new(vec![0xff, 0xfe, b'\n']));
        assert!(rx.recv().await.unwrap().is_err());
        assert!(rx.recv().await.is_none());
    }
}
