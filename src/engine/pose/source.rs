// Frame sources
//
// The pose detector itself lives outside this crate. A source hands its
// results to the session one frame at a time and must never block past the
// timeout it is given, so a stalled detector cannot hold a turn open.

use super::landmark::PoseFrame;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Frame source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Frame source closed")]
    Closed,

    #[error("Failed to read frames: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed frame on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that produces pose frames
pub trait LandmarkSource {
    /// Wait up to `timeout` for the next frame
    ///
    /// `Ok(None)` means nothing arrived in time. `Err(SourceError::Closed)`
    /// means no more frames will ever arrive.
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<PoseFrame>, SourceError>;
}

/// Frames pushed by a detector running on another thread
#[derive(Debug)]
pub struct ChannelSource {
    receiver: Receiver<PoseFrame>,
}

impl ChannelSource {
    pub fn new(receiver: Receiver<PoseFrame>) -> Self {
        Self { receiver }
    }

    /// Create a source together with the sender the detector feeds
    pub fn pair() -> (Sender<PoseFrame>, Self) {
        let (sender, receiver) = mpsc::channel();
        (sender, Self::new(receiver))
    }

    /// Forward JSON-line frames from a live detector's output as they arrive
    ///
    /// Frames are not paced; the detector already produces them in real time.
    /// A malformed line is skipped so one bad frame cannot end a match. The
    /// source closes when the reader hits end of input or fails.
    pub fn spawn_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (sender, source) = Self::pair();
        thread::spawn(move || {
            for (index, line) in reader.lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("Detector stream failed: {}", err);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<PoseFrame>(&line) {
                    Ok(frame) => {
                        if sender.send(frame).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!("Skipping malformed frame on line {}: {}", index + 1, err),
                }
            }
            debug!("Detector stream ended");
        });
        source
    }
}

impl LandmarkSource for ChannelSource {
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<PoseFrame>, SourceError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(frame) => Ok(Some(frame)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(SourceError::Closed),
        }
    }
}

/// Recorded frames, one JSON object per line
///
/// Frames are released at their recorded timestamps, measured from the first
/// frame, so a replay fills turn windows the way the live session did.
pub struct ReplaySource<R> {
    lines: io::Lines<R>,
    line_number: usize,
    /// Frame read ahead of its release time
    pending: Option<PoseFrame>,
    /// Wall-clock time and timestamp of the first frame
    origin: Option<(Instant, u64)>,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            pending: None,
            origin: None,
        }
    }

    /// Read the next non-blank line as a frame
    fn read_frame(&mut self) -> Result<PoseFrame, SourceError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return serde_json::from_str(&line).map_err(|source| SourceError::Malformed {
                line: self.line_number,
                source,
            });
        }

        Err(SourceError::Closed)
    }
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<PoseFrame>, SourceError> {
        let frame = match self.pending.take() {
            Some(frame) => frame,
            None => self.read_frame()?,
        };

        let now = Instant::now();
        let (origin_time, origin_timestamp) =
            *self.origin.get_or_insert((now, frame.timestamp_ms));
        let offset = Duration::from_millis(frame.timestamp_ms.saturating_sub(origin_timestamp));
        let due = origin_time + offset;

        if due <= now {
            return Ok(Some(frame));
        }

        let wait = due - now;
        if wait > timeout {
            thread::sleep(timeout);
            self.pending = Some(frame);
            return Ok(None);
        }

        thread::sleep(wait);
        Ok(Some(frame))
    }
}
