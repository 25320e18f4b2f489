//! Stream drainer: reads one process stream to end-of-stream.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use crate::sink::StreamKind;

/// One captured line, tagged with its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    pub stream: StreamKind,
    pub line: String,
}

/// Read `reader` line by line until end-of-stream, sending each line to `tx`.
///
/// The newline (and a preceding `\r`) is stripped and invalid UTF-8 is
/// replaced. A read error is logged and ends the loop like end-of-stream. The
/// loop also stops early if the receiver is gone. Returns the number of lines
/// sent.
///
/// `tx` is dropped on return, so the receiver observes channel closure only
/// after every drainer holding a sender has finished.
pub async fn drain<R>(reader: R, stream: StreamKind, tx: mpsc::Sender<LineEvent>) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut sent = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let event = LineEvent {
                    stream,
                    line: String::from_utf8_lossy(&buf).into_owned(),
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!("{} reader: receiver closed", stream.tag());
                    break;
                }
                sent += 1;
            }
            Err(e) => {
                tracing::warn!("error reading {} stream: {e}", stream.tag());
                break;
            }
        }
    }

    sent
}
