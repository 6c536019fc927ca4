// LogDock - app/tail.rs
//
// Live tail: each panel watches one file and streams newly appended lines
// to the UI in real time.
//
// Architecture:
//   - `TailManager` lives on the UI thread, one per panel; `run_tail_watcher`
//     runs on a background thread polling the file on a fixed interval.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the tail.
//   - New lines are sent as `TailEvent::NewLines` over an mpsc channel.
//   - The UI thread polls the channel each frame.
//
// Encoding: tail reads new bytes and decodes them as lossy UTF-8.
//
// Robustness:
//   - File read/stat errors are non-fatal: logged as warnings, a FileError
//     message is sent, and the watcher keeps polling.
//   - Truncated/rotated files (size < last offset) are handled by resetting
//     the offset to 0 so the rewritten content is picked up cleanly.
//   - The poll loop sleeps in small sub-intervals so cancel is checked
//     promptly (within TAIL_CANCEL_CHECK_INTERVAL_MS of the flag being set).
//   - MAX_TAIL_READ_BYTES_PER_TICK caps the bytes consumed per tick;
//     MAX_TAIL_PARTIAL_BYTES bounds the in-progress line buffer.

use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crate::util::constants::{
    MAX_TAIL_PARTIAL_BYTES, MAX_TAIL_READ_BYTES_PER_TICK, TAIL_CANCEL_CHECK_INTERVAL_MS,
    TAIL_POLL_INTERVAL_MS,
};

// =============================================================================
// Public types
// =============================================================================

/// Severity classification of a single log line, derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Error,
    Warning,
    Info,
    Debug,
    Other,
}

impl LineLevel {
    /// Classify a line by case-insensitive substring scan. Error markers win
    /// over warning markers when both appear.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("error") || lower.contains("fatal") || lower.contains("fail") {
            LineLevel::Error
        } else if lower.contains("warn") {
            LineLevel::Warning
        } else if lower.contains("debug") || lower.contains("trace") {
            LineLevel::Debug
        } else if lower.contains("info") {
            LineLevel::Info
        } else {
            LineLevel::Other
        }
    }
}

/// One complete line received from a tailed file.
#[derive(Debug, Clone)]
pub struct LogLine {
    /// Local wall-clock time the line was received by the watcher.
    pub received: chrono::DateTime<chrono::Local>,
    pub text: String,
    pub level: LineLevel,
}

impl LogLine {
    fn new(text: String) -> Self {
        Self {
            received: chrono::Local::now(),
            level: LineLevel::classify(&text),
            text,
        }
    }
}

/// Progress messages sent from the tail thread to the UI.
#[derive(Debug)]
pub enum TailEvent {
    /// The watcher thread is up and seeded its initial offset.
    Started,
    /// One or more complete lines were appended to the file.
    NewLines { lines: Vec<LogLine> },
    /// A non-fatal stat/read error; the watcher keeps polling.
    FileError { message: String },
    /// The watcher exited after cancellation.
    Stopped,
}

// =============================================================================
// TailManager
// =============================================================================

/// Manages the live tail of a single file on a background thread.
///
/// One manager exists per open panel and exposes a start/stop/poll interface.
pub struct TailManager {
    /// Channel receiver for the UI to poll tail events.
    progress_rx: Option<mpsc::Receiver<TailEvent>>,
    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl TailManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start tailing `path`. The initial read surfaces the most recent
    /// content (up to one tick's read budget), then only new appends.
    ///
    /// Spawns a background poll thread immediately. If a tail is already
    /// running it is stopped first.
    pub fn start(&mut self, path: PathBuf) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        tracing::info!(file = %path.display(), "Live tail started");
        std::thread::spawn(move || {
            run_tail_watcher(path, tx, cancel);
        });
    }

    /// Request the background tail thread to stop.
    ///
    /// The thread will exit within `TAIL_CANCEL_CHECK_INTERVAL_MS` and send
    /// `TailEvent::Stopped` before terminating.
    pub fn stop(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
        self.progress_rx = None;
    }

    /// Returns `true` if a tail background thread is currently active.
    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Poll for pending tail events without blocking.
    ///
    /// Drains all currently queued events and returns them.
    pub fn poll_events(&self) -> Vec<TailEvent> {
        let mut events = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        events
    }
}

impl Default for TailManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TailManager {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Background tail watcher
// =============================================================================

/// Background poll loop. Checks the file every `TAIL_POLL_INTERVAL_MS` for
/// new content and sends complete lines back to the UI via `tx`.
fn run_tail_watcher(path: PathBuf, tx: mpsc::Sender<TailEvent>, cancel: Arc<AtomicBool>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                // UI channel closed, exit silently.
                return;
            }
        };
    }

    // Seed the offset so the first tick surfaces the most recent content
    // without replaying an arbitrarily large file from the start.
    let len = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let mut offset = len.saturating_sub(MAX_TAIL_READ_BYTES_PER_TICK as u64);
    tracing::debug!(file = %path.display(), offset, "Tail: seeding initial offset");

    // A mid-file seed almost certainly lands inside a line. Drop bytes up to
    // the first newline so the head of some line is never emitted as if it
    // were a whole one.
    let mut discard_head = offset > 0;

    // Bytes after the final newline of the last read: an in-progress line,
    // prepended to the next tick's decoded bytes.
    let mut partial = String::new();

    send!(TailEvent::Started);

    // Sub-divide each poll interval into cancel-check slices.
    let slices = (TAIL_POLL_INTERVAL_MS / TAIL_CANCEL_CHECK_INTERVAL_MS).max(1);
    let mut first_tick = true;

    loop {
        // The first tick reads immediately so the panel fills on open.
        if !first_tick {
            // Interruptible sleep: check cancel flag between slices.
            for _ in 0..slices {
                std::thread::sleep(Duration::from_millis(TAIL_CANCEL_CHECK_INTERVAL_MS));
                if cancel.load(Ordering::SeqCst) {
                    send!(TailEvent::Stopped);
                    return;
                }
            }
        }
        first_tick = false;

        // 1. Check current file size.
        let current_size = match std::fs::metadata(&path) {
            Ok(m) => m.len(),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Tail: stat error");
                send!(TailEvent::FileError {
                    message: format!("Cannot stat: {e}"),
                });
                continue;
            }
        };

        // 2. Handle rotation / truncation.
        if current_size < offset {
            tracing::info!(
                file = %path.display(),
                old_offset = offset,
                new_size = current_size,
                "Tail: file truncated or rotated, resetting offset to 0"
            );
            offset = 0;
            partial.clear();
            discard_head = false;
        }

        // 3. Nothing new.
        if current_size == offset {
            continue;
        }

        // 4. Read new bytes (capped per tick).
        let bytes_available = (current_size - offset) as usize;
        let read_limit = bytes_available.min(MAX_TAIL_READ_BYTES_PER_TICK);

        let new_bytes = match read_bytes_at(&path, offset, read_limit) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Tail: read error");
                send!(TailEvent::FileError {
                    message: format!("Read error: {e}"),
                });
                continue;
            }
        };

        let n = new_bytes.len();
        if n == 0 {
            continue;
        }

        // Advance offset unconditionally: these bytes are consumed whether
        // they produce complete lines or not.
        offset += n as u64;

        // 5. Decode (lossy UTF-8) and append to the partial-line buffer.
        let decoded = String::from_utf8_lossy(&new_bytes);
        partial.push_str(&decoded);

        if discard_head {
            match partial.find('\n') {
                Some(nl) => {
                    partial.drain(..=nl);
                    discard_head = false;
                }
                None => {
                    // Still inside the seeded line; keep discarding.
                    partial.clear();
                    continue;
                }
            }
        }

        // 6. Split at the last newline. Everything up to and including the
        //    final '\n' becomes complete lines; the rest carries forward.
        let complete_text = match partial.rfind('\n') {
            Some(nl_pos) => {
                let complete = partial[..=nl_pos].to_string();
                partial = partial[nl_pos + 1..].to_string();
                complete
            }
            None => {
                // No newline yet. Guard the carry-forward buffer: a file
                // with no newlines at all (binary, one huge line) must not
                // grow it without bound.
                if partial.len() > MAX_TAIL_PARTIAL_BYTES {
                    tracing::warn!(
                        file = %path.display(),
                        bytes = partial.len(),
                        "Tail: discarding oversized partial line"
                    );
                    partial.clear();
                    send!(TailEvent::FileError {
                        message: "Discarded an oversized line with no line ending".to_string(),
                    });
                }
                continue;
            }
        };

        // 7. Emit the complete lines.
        let lines: Vec<LogLine> = complete_text
            .lines()
            .map(|l| LogLine::new(l.trim_end_matches('\r').to_string()))
            .collect();

        if lines.is_empty() {
            continue;
        }

        tracing::trace!(file = %path.display(), count = lines.len(), "Tail: new lines");
        send!(TailEvent::NewLines { lines });
    }
}

/// Read up to `limit` bytes from `path` starting at byte position `offset`.
fn read_bytes_at(path: &std::path::Path, offset: u64, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut file = std::fs::File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; limit];
    let n = file.read(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}
