//! Sensor reading sources for the dashboard.
//!
//! Readers run on background Tokio tasks, decode an inbound byte stream and
//! post readings into the dashboard event loop.  Where the bytes come from
//! (stdin, a file, a serial device opened elsewhere) is up to the caller.

pub mod frame;
pub mod line;

pub use frame::{Frame, FrameDecoder, FRAME_LEN};
pub use line::{parse_bytes, parse_line};

use board_core::{BoardError, Message, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Spawn a task that reads text readings line by line.
///
/// Malformed lines, including ones that are not UTF-8, are logged and
/// skipped.  The task ends at end of input, once the dashboard stops
/// listening, or with [`BoardError::Ingest`] if the stream itself fails.
pub fn spawn_line_reader<R>(reader: R, events: mpsc::Sender<Message>) -> JoinHandle<Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(read_lines(reader, events))
}

async fn read_lines<R>(reader: R, events: mpsc::Sender<Message>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).split(b'\n');
    let mut line_no = 0usize;

    while let Some(raw) = lines
        .next_segment()
        .await
        .map_err(|e| BoardError::Ingest(format!("read failed after line {line_no}: {e}")))?
    {
        line_no += 1;
        match parse_bytes(&raw) {
            Ok(Some(reading)) => {
                if events.send(Message::Reading(reading)).await.is_err() {
                    return Ok(()); // dashboard gone
                }
            }
            Ok(None) => {}
            Err(e) => warn!(line = line_no, "dropping reading: {e}"),
        }
    }

    info!("line source exhausted after {line_no} lines");
    Ok(())
}

/// Spawn a task that decodes 5-byte binary sensor frames.
///
/// Frames carry no time of their own; each is stamped with the current epoch
/// second on receipt.  The dashboard maps sensor ids to channels, so ids added
/// by a config reload take effect immediately.
pub fn spawn_frame_reader<R>(reader: R, events: mpsc::Sender<Message>) -> JoinHandle<Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(read_frames(reader, events))
}

async fn read_frames<R>(mut reader: R, events: mpsc::Sender<Message>) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 256];

    loop {
        let n = reader
            .read(&mut buf)
            .await
            .map_err(|e| BoardError::Ingest(format!("frame read failed: {e}")))?;
        if n == 0 {
            if decoder.pending() > 0 {
                warn!("discarding {} bytes of a truncated frame", decoder.pending());
            }
            info!("frame source closed");
            return Ok(());
        }

        for frame in decoder.push(&buf[..n]) {
            let message = Message::SensorFrame {
                sensor_id: frame.sensor_id,
                timestamp: chrono::Utc::now().timestamp(),
                value:     f64::from(frame.value),
            };
            if events.send(message).await.is_err() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::Reading;

    async fn drain(mut rx: mpsc::Receiver<Message>) -> Vec<Message> {
        let mut out = Vec::new();
        while let Some(msg) = rx.recv().await {
            out.push(msg);
        }
        out
    }

    fn readings(messages: Vec<Message>) -> Vec<Reading> {
        messages
            .into_iter()
            .filter_map(|m| match m {
                Message::Reading(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn line_reader_skips_bad_lines() {
        let input: &[u8] = b"# sensors\ntemperature 1 20.0\nlight x 1\nlight 2 150\n";
        let (tx, rx) = mpsc::channel(8);

        spawn_line_reader(input, tx).await.unwrap().unwrap();

        assert_eq!(
            readings(drain(rx).await),
            vec![
                Reading::new("temperature", 1, 20.0),
                Reading::new("light", 2, 150.0),
            ]
        );
    }

    #[tokio::test]
    async fn line_reader_survives_non_utf8_line() {
        let input: &[u8] = b"temperature 1 20.0\n\xff\xfe garbage\nlight 2 150\n";
        let (tx, rx) = mpsc::channel(8);

        spawn_line_reader(input, tx).await.unwrap().unwrap();

        assert_eq!(
            readings(drain(rx).await),
            vec![
                Reading::new("temperature", 1, 20.0),
                Reading::new("light", 2, 150.0),
            ]
        );
    }

    /// Reader whose underlying device has gone away.
    struct Unplugged;

    impl AsyncRead for Unplugged {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            )))
        }
    }

    #[tokio::test]
    async fn stream_failure_ends_reader_with_ingest_error() {
        let input = AsyncReadExt::chain(&b"temperature 1 20.0\n"[..], Unplugged);
        let (tx, rx) = mpsc::channel(8);

        let err = spawn_line_reader(input, tx).await.unwrap().unwrap_err();
        assert!(matches!(&err, BoardError::Ingest(msg) if msg.contains("after line 1")));
        assert!(!err.is_rejection());
        assert_eq!(readings(drain(rx).await), vec![Reading::new("temperature", 1, 20.0)]);

        let (tx, _rx) = mpsc::channel(8);
        let err = spawn_frame_reader(Unplugged, tx).await.unwrap().unwrap_err();
        assert!(matches!(err, BoardError::Ingest(_)));
    }

    #[tokio::test]
    async fn frame_reader_posts_sensor_frames() {
        let input: &[u8] = &[3, 0, 0, 0, 22, 9, 0, 0, 0, 1, 5, 0, 0, 0x01, 0x90, 7];
        let (tx, rx) = mpsc::channel(8);

        spawn_frame_reader(input, tx).await.unwrap().unwrap();

        let frames: Vec<(u8, f64)> = drain(rx)
            .await
            .into_iter()
            .filter_map(|m| match m {
                Message::SensorFrame {
                    sensor_id,
                    timestamp,
                    value,
                } => {
                    assert!(timestamp > 0);
                    Some((sensor_id, value))
                }
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec![(3, 22.0), (9, 1.0), (5, 400.0)]);
    }
}
