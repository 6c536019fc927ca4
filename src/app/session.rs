// LogDock - app/session.rs
//
// Session persistence: save and restore the set of open files and the dock
// settings between application restarts.
//
// Design principles:
// - Session is saved atomically (write→temp, rename→final) so a crash
//   during save never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions
//   just start the app fresh rather than surfacing errors to the user).
// - The data directory is created on first save; no user action required.
// - Log lines are NOT persisted; files are re-tailed on restore so each
//   panel always reflects current file content.

use crate::core::layout::DockEdge;
use crate::util::constants::{DEFAULT_BAND_THICKNESS, SESSION_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment this constant whenever `SessionData` gains or removes fields
/// in a breaking way. Version mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// On-disk data structures
// =============================================================================

/// Complete persistent session snapshot.
///
/// Minor format additions are tolerated via serde defaults without bumping
/// the version.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version, must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Files that had an open panel, in slot order, so panels reopen in the
    /// same arrangement.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Docking edge for minimized panels.
    #[serde(default = "default_dock_edge")]
    pub dock_edge: DockEdge,

    /// Minimized band thickness in logical pixels.
    #[serde(default = "default_band_thickness")]
    pub band_thickness: f64,

    /// Grid row cap (0 = unbounded).
    #[serde(default)]
    pub max_rows: usize,

    /// Grid column cap (0 = unbounded).
    #[serde(default)]
    pub max_columns: usize,
}

fn default_dock_edge() -> DockEdge {
    DockEdge::Right
}

fn default_band_thickness() -> f64 {
    DEFAULT_BAND_THICKNESS
}

// =============================================================================
// I/O helpers
// =============================================================================

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed.  Returns a descriptive error
/// string suitable for a tracing warn! call; the caller decides whether to
/// surface it to the user (typically it is logged and ignored).
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    // Ensure the parent directory exists before writing.
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create session directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    // Atomic write: write to a sibling temp file then rename.
    // A crash between write and rename loses the new session but never
    // corrupts the previous one (rename is atomic on all supported platforms).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write session temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise session file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch).  The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // Distinguish "file not found" (normal first run) from other errors.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), files = data.files.len(), "Session file loaded");
    Some(data)
}

// =============================================================================
// Unit tests
// =============================================================================
