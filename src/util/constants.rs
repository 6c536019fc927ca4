// LogDock - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogDock";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogDock";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Panel layout
// =============================================================================

/// Uniform margin in logical pixels applied around each panel.
pub const DEFAULT_PANEL_MARGIN: f64 = 5.0;

/// Default thickness in logical pixels of the minimized band when a panel
/// is maximized (width for Left/Right, height for Top/Bottom).
pub const DEFAULT_BAND_THICKNESS: f64 = 250.0;

/// Minimum user-configurable band thickness (logical pixels).
pub const MIN_BAND_THICKNESS: f64 = 50.0;

/// Maximum user-configurable band thickness (logical pixels).
pub const MAX_BAND_THICKNESS: f64 = 1_000.0;

/// Minimum content size a panel can be squeezed to by margins (pixels).
pub const MIN_PANEL_WIDTH: f64 = 0.0;
pub const MIN_PANEL_HEIGHT: f64 = 0.0;

/// Upper bound accepted for the max-rows / max-columns caps. Zero means
/// unbounded; anything above this is a configuration mistake.
pub const MAX_GRID_CAP: usize = 16;

/// Maximum number of panels the host will open at once. The grid math is
/// fine well beyond this; the limit keeps the tail threads and per-panel
/// buffers within reason.
pub const MAX_PANELS: usize = 16;

// =============================================================================
// Layout animation
// =============================================================================

/// Duration of the eased panel move/resize animation (ms).
pub const LAYOUT_ANIM_MS: u64 = 500;

/// First control point of the layout easing curve.
pub const LAYOUT_EASE_P1: (f64, f64) = (0.528, 0.0);

/// Second control point of the layout easing curve.
pub const LAYOUT_EASE_P2: (f64, f64) = (0.142, 0.847);

// =============================================================================
// Live tail limits
// =============================================================================

/// How often each tail thread polls its file for new content (ms).
pub const TAIL_POLL_INTERVAL_MS: u64 = 500;

/// How often the cancel flag is checked within each poll sleep interval (ms).
/// The background thread wakes every this many ms to check for cancellation.
pub const TAIL_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

/// Maximum bytes read from a tailed file in one poll tick.
/// Prevents a large burst of new content from stalling the poll loop.
pub const MAX_TAIL_READ_BYTES_PER_TICK: usize = 512 * 1_024; // 512 KiB

/// Maximum accumulated size of the partial (in-progress) log-line buffer for
/// a single tailed file.
///
/// Guards against OOM when a tailed file produces no newlines (binary
/// content, an extremely long single line, or a file opened by mistake).
/// Set to 4x `MAX_TAIL_READ_BYTES_PER_TICK` so legitimate lines up to
/// ~2 MiB are tolerated before the fragment is discarded with a warning.
pub const MAX_TAIL_PARTIAL_BYTES: usize = MAX_TAIL_READ_BYTES_PER_TICK * 4; // 2 MiB

/// Maximum number of log lines retained per panel. Older lines are dropped
/// from the front as new ones arrive.
pub const MAX_PANEL_LINES: usize = 200;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of live-tail messages processed per UI frame.
/// Tail messages arrive at the tail-poll cadence; bursty writes can queue
/// many messages before the next repaint.  This cap keeps frame times stable.
pub const MAX_TAIL_MESSAGES_PER_FRAME: usize = 200;

/// Maximum number of non-fatal warnings accumulated during a session.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
