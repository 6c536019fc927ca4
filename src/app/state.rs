// LogDock - app/state.rs
//
// Application state management. Holds the panel host, the per-panel file
// content and tail managers, and UI flags.
// Owned by the eframe::App implementation.

use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::app::tail::{LogLine, TailManager};
use crate::core::host::{LayoutCommand, PanelHost};
use crate::core::panel::PanelId;
use crate::platform::config::AppConfig;
use crate::util::constants::{MAX_PANELS, MAX_PANEL_LINES, MAX_WARNINGS};
use crate::util::error::HostError;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Everything the UI needs to render one panel's content.
pub struct PanelContent {
    /// Full path to the tailed file.
    pub path: PathBuf,
    /// File name shown in the panel grip bar.
    pub title: String,
    /// Received lines, bounded to `MAX_PANEL_LINES` (oldest dropped first).
    pub lines: VecDeque<LogLine>,
    /// Background tail for this panel's file.
    pub tail: TailManager,
    /// When true, the view sticks to the newest line as lines arrive.
    pub auto_scroll: bool,
    /// Most recent tail error, shown in the grip bar tooltip.
    pub last_error: Option<String>,
}

impl PanelContent {
    fn new(path: PathBuf) -> Self {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            title,
            lines: VecDeque::with_capacity(MAX_PANEL_LINES),
            tail: TailManager::new(),
            auto_scroll: true,
            last_error: None,
        }
    }

    /// Append lines, dropping the oldest beyond the retention cap.
    pub fn push_lines(&mut self, lines: Vec<LogLine>) {
        for line in lines {
            if self.lines.len() == MAX_PANEL_LINES {
                self.lines.pop_front();
            }
            self.lines.push_back(line);
        }
    }
}

/// Top-level application state.
pub struct AppState {
    /// The panel layout engine.
    pub host: PanelHost,

    /// Per-panel file content, keyed by the host's panel IDs.
    pub contents: HashMap<PanelId, PanelContent>,

    /// Validated configuration from config.toml.
    pub config: AppConfig,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings accumulated during the session (bounded).
    pub warnings: Vec<String>,

    /// Set when the user asked to open a file; the GUI shows the picker on
    /// the next frame.
    pub pending_open: bool,

    /// Panels whose close button was clicked this frame.
    pub pending_close: Vec<PanelId>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state with the dock settings taken from config.
    pub fn new(config: AppConfig, debug_mode: bool) -> Self {
        let mut host = PanelHost::new();
        host.set_dock_edge(config.dock_edge);
        host.set_band_thickness(config.band_thickness);
        host.set_max_rows(config.max_rows);
        host.set_max_columns(config.max_columns);

        Self {
            host,
            contents: HashMap::new(),
            config,
            status_message: "Ready. Open a log file to begin.".to_string(),
            warnings: Vec::new(),
            pending_open: false,
            pending_close: Vec::new(),
            debug_mode,
        }
    }

    /// Open a panel tailing `path`. Returns the layout commands for the
    /// animation surface.
    pub fn open_file(&mut self, path: PathBuf) -> Result<Vec<LayoutCommand>, HostError> {
        if self.contents.len() >= MAX_PANELS {
            self.push_warning(format!(
                "Cannot open '{}': panel limit ({MAX_PANELS}) reached.",
                path.display()
            ));
            return Ok(Vec::new());
        }

        let (id, commands) = self.host.add_panel()?;
        let mut content = PanelContent::new(path.clone());
        content.tail.start(path.clone());
        self.contents.insert(id, content);

        self.status_message = format!("Tailing {}", path.display());
        tracing::info!(panel = %id, file = %path.display(), "Panel opened");
        Ok(commands)
    }

    /// Close a panel: stop its tail, drop its content, compact the grid.
    pub fn close_panel(&mut self, id: PanelId) -> Result<Vec<LayoutCommand>, HostError> {
        let commands = self.host.remove_panel(id)?;
        if let Some(mut content) = self.contents.remove(&id) {
            content.tail.stop();
            tracing::info!(panel = %id, file = %content.path.display(), "Panel closed");
        }
        Ok(commands)
    }

    /// Append a warning, keeping the collection bounded.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < MAX_WARNINGS {
            tracing::warn!("{}", message);
            self.warnings.push(message);
        }
    }

    /// Snapshot the open files and dock settings for persistence, in slot
    /// order so panels reopen in the same arrangement.
    pub fn session_snapshot(&self) -> SessionData {
        let columns = self.host.grid().columns;
        let mut panels: Vec<_> = self.host.panels().iter().collect();
        panels.sort_by_key(|p| p.slot_index(columns));

        let files = panels
            .iter()
            .filter_map(|p| self.contents.get(&p.id).map(|c| c.path.clone()))
            .collect();

        SessionData {
            version: SESSION_VERSION,
            files,
            dock_edge: self.host.dock_edge(),
            band_thickness: self.host.band_thickness(),
            max_rows: self.host.max_rows(),
            max_columns: self.host.max_columns(),
        }
    }

    /// Save the session to the platform data directory. Failures are logged
    /// and ignored; persistence must never block shutdown.
    pub fn save_session(&self, data_dir: &Path) {
        let path = session::session_path(data_dir);
        if let Err(e) = session::save(&self.session_snapshot(), &path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// Apply a restored session: dock settings first, then reopen each file.
    pub fn restore_session(&mut self, data: SessionData) -> Vec<LayoutCommand> {
        self.host.set_dock_edge(data.dock_edge);
        self.host.set_band_thickness(data.band_thickness);
        self.host.set_max_rows(data.max_rows);
        self.host.set_max_columns(data.max_columns);

        let mut commands = Vec::new();
        for file in data.files {
            match self.open_file(file) {
                Ok(cmds) => commands = cmds,
                Err(e) => self.push_warning(format!("Could not reopen panel: {e}")),
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Size;

    fn state() -> AppState {
        let mut s = AppState::new(AppConfig::default(), false);
        s.host.on_host_resized(Size::new(900.0, 600.0));
        s
    }

    #[test]
    fn test_open_and_close_keep_host_and_contents_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.log");
        std::fs::write(&file, "hello\n").unwrap();

        let mut state = state();
        state.open_file(file).unwrap();
        assert_eq!(state.host.panels().len(), 1);
        assert_eq!(state.contents.len(), 1);

        let id = state.host.panels()[0].id;
        state.close_panel(id).unwrap();
        assert!(state.host.panels().is_empty());
        assert!(state.contents.is_empty());
    }

    #[test]
    fn test_panel_lines_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.log");
        std::fs::write(&file, "").unwrap();

        let mut content = PanelContent::new(file);
        for i in 0..(MAX_PANEL_LINES + 50) {
            content.push_lines(vec![LogLine {
                received: chrono::Local::now(),
                text: format!("line {i}"),
                level: crate::app::tail::LineLevel::Other,
            }]);
        }
        assert_eq!(content.lines.len(), MAX_PANEL_LINES);
        assert_eq!(content.lines.front().map(|l| l.text.as_str()), Some("line 50"));
    }

    #[test]
    fn test_session_snapshot_preserves_slot_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");
        std::fs::write(&a, "").unwrap();
        std::fs::write(&b, "").unwrap();

        let mut state = state();
        state.open_file(a.clone()).unwrap();
        state.open_file(b.clone()).unwrap();

        let snapshot = state.session_snapshot();
        assert_eq!(snapshot.files, vec![a, b]);
        assert_eq!(snapshot.version, SESSION_VERSION);
    }
}
