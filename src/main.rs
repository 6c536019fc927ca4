// LogDock - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and session restore
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use logdock::app;

pub use logdock::core;
pub use logdock::platform;
pub use logdock::ui;
pub use logdock::util;

use clap::Parser;
use logdock::core::layout::DockEdge;
use std::path::PathBuf;

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI, Segoe UI Emoji, and Segoe UI Symbol from the
/// system font directory and sets them as the primary proportional fonts.
/// These fonts have much broader Unicode coverage than the egui built-ins,
/// preventing square-glyph rendering for the chrome symbols on the grip bar.
/// The built-in egui fonts are kept as final fallbacks so no glyph is ever lost.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                for name in &loaded_names {
                    monospace.push((*name).to_owned());
                }
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    // On non-Windows platforms the egui built-in fonts are used unchanged.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// LogDock - Multi-panel live log monitor.
///
/// Each log file opens in its own dockable panel: panels tile an automatic
/// grid, swap slots by dragging, and maximize with the rest collecting in a
/// band along a configurable edge.
#[derive(Parser, Debug)]
#[command(name = "LogDock", version, about)]
struct Cli {
    /// Log files to open in panels (restores the previous session if omitted).
    files: Vec<PathBuf>,

    /// Docking edge for minimized panels: top, bottom, left, right, none.
    #[arg(short = 'e', long = "edge")]
    edge: Option<DockEdge>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging so the config
    // level can participate in filter selection.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogDock starting"
    );

    // Create application state with the dock settings from config.
    let mut state = app::state::AppState::new(config, cli.debug);
    for warning in config_warnings {
        state.push_warning(warning);
    }

    // CLI files take priority over the persisted session; edge overrides both.
    if cli.files.is_empty() {
        let session_file = app::session::session_path(&platform_paths.data_dir);
        if let Some(session) = app::session::load(&session_file) {
            state.restore_session(session);
        }
    } else {
        for file in &cli.files {
            if let Err(e) = state.open_file(file.clone()) {
                tracing::warn!(file = %file.display(), error = %e, "Could not open panel");
            }
        }
    }
    if let Some(edge) = cli.edge {
        state.host.set_dock_edge(edge);
    }

    // Launch the GUI. Layout commands emitted before the first measurement
    // are empty; the first frame's canvas size triggers the initial layout.
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let data_dir = platform_paths.data_dir.clone();
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::LogDockApp::new(state, data_dir)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogDock GUI: {e}");
        std::process::exit(1);
    }
}
