// LogDock - gui.rs
//
// Top-level eframe::App implementation.
// Wires the panel host, the animator, and the per-panel views together and
// pumps tail events into panel content each frame.
//
// Coordinate spaces: the panel host computes rects in canvas-local space
// (origin at the top-left of the central canvas). Drawing converts to
// screen space by adding the canvas origin plus the panel's top/left margin.

use crate::app::state::AppState;
use crate::app::tail::TailEvent;
use crate::core::geometry::{Point, Rect, Size};
use crate::core::host::LayoutCommand;
use crate::core::layout::DockEdge;
use crate::core::panel::{PanelId, PanelState};
use crate::ui::animator::Animator;
use crate::ui::{self, panel_view};
use crate::util::constants::{
    MAX_BAND_THICKNESS, MAX_GRID_CAP, MAX_TAIL_MESSAGES_PER_FRAME, MIN_BAND_THICKNESS,
    TAIL_POLL_INTERVAL_MS,
};
use crate::util::error::HostError;
use std::path::PathBuf;
use std::time::Instant;

/// The LogDock application.
pub struct LogDockApp {
    pub state: AppState,
    animator: Animator,
    /// Platform data directory for session persistence on exit.
    data_dir: PathBuf,
    /// Screen position of the canvas origin, captured each frame.
    canvas_origin: egui::Pos2,
}

impl LogDockApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState, data_dir: PathBuf) -> Self {
        Self {
            state,
            animator: Animator::new(),
            data_dir,
            canvas_origin: egui::Pos2::ZERO,
        }
    }

    /// Feed layout commands into the animator, tweening each panel from its
    /// current on-screen rect.
    fn apply_commands(&mut self, commands: Vec<LayoutCommand>, now: Instant) {
        for command in commands {
            let current = self
                .state
                .host
                .panel(command.panel)
                .map(|p| p.rect)
                .unwrap_or(command.target);
            self.animator.apply(&command, current, now);
        }
    }

    /// Drain tail channels into panel line buffers (bounded per frame).
    fn pump_tail_events(&mut self) -> bool {
        let mut budget = MAX_TAIL_MESSAGES_PER_FRAME;
        let mut had_events = false;

        for content in self.state.contents.values_mut() {
            if budget == 0 {
                break;
            }
            for event in content.tail.poll_events() {
                had_events = true;
                match event {
                    TailEvent::Started => {
                        content.last_error = None;
                    }
                    TailEvent::NewLines { lines } => {
                        content.push_lines(lines);
                        content.last_error = None;
                    }
                    TailEvent::FileError { message } => {
                        tracing::warn!(file = %content.path.display(), "{}", message);
                        content.last_error = Some(message);
                    }
                    TailEvent::Stopped => {}
                }
                budget = budget.saturating_sub(1);
                if budget == 0 {
                    break;
                }
            }
        }
        had_events
    }

    /// Convert a host-space rect to a screen rect, offset by the panel's
    /// top/left margin (the rect's size is already margin-shrunk).
    fn screen_rect(&self, id: PanelId, rect: Rect) -> egui::Rect {
        let margin = self
            .state
            .host
            .panel(id)
            .map(|p| p.margin)
            .unwrap_or_default();
        egui::Rect::from_min_size(
            self.canvas_origin
                + egui::vec2((rect.x + margin.left) as f32, (rect.y + margin.top) as f32),
            egui::vec2(rect.width as f32, rect.height as f32),
        )
    }

    /// Toolbar: open button plus the dock settings that drive the layout.
    fn toolbar(&mut self, ui: &mut egui::Ui, now: Instant) {
        let mut commands: Vec<LayoutCommand> = Vec::new();

        ui.horizontal(|ui| {
            if ui.button("\u{1f4c2} Open File\u{2026}").clicked() {
                self.state.pending_open = true;
            }
            ui.separator();

            ui.label("Dock edge:");
            let mut edge = self.state.host.dock_edge();
            egui::ComboBox::from_id_salt("dock_edge")
                .selected_text(edge.label())
                .show_ui(ui, |ui| {
                    for candidate in DockEdge::ALL {
                        ui.selectable_value(&mut edge, candidate, candidate.label());
                    }
                });
            if edge != self.state.host.dock_edge() {
                commands = self.state.host.set_dock_edge(edge);
            }

            ui.label("Band:");
            let mut band = self.state.host.band_thickness();
            let band_resp = ui.add(
                egui::DragValue::new(&mut band)
                    .range(MIN_BAND_THICKNESS..=MAX_BAND_THICKNESS)
                    .speed(5.0)
                    .suffix(" px"),
            );
            if band_resp.changed() {
                commands = self.state.host.set_band_thickness(band);
            }

            ui.separator();

            ui.label("Max rows:");
            let mut max_rows = self.state.host.max_rows();
            if ui
                .add(egui::DragValue::new(&mut max_rows).range(0..=MAX_GRID_CAP))
                .changed()
            {
                commands = self.state.host.set_max_rows(max_rows);
            }

            ui.label("Max cols:");
            let mut max_columns = self.state.host.max_columns();
            if ui
                .add(egui::DragValue::new(&mut max_columns).range(0..=MAX_GRID_CAP))
                .changed()
            {
                commands = self.state.host.set_max_columns(max_columns);
            }
        });

        self.apply_commands(commands, now);
    }

    /// Handle one panel's chrome interactions, returning any layout commands.
    fn handle_response(
        &mut self,
        id: PanelId,
        response: panel_view::PanelResponse,
    ) -> Vec<LayoutCommand> {
        if response.close {
            self.state.pending_close.push(id);
            return Vec::new();
        }

        if response.clicked {
            self.state.host.bring_to_front(id);
        }

        if response.toggle_maximize {
            let maximized = self.state.host.maximized() == Some(id);
            let result = if maximized {
                self.state.host.restore(id)
            } else {
                self.state.host.maximize(id)
            };
            match result {
                Ok(commands) => return commands,
                Err(e) => self.state.push_warning(format!("Cannot toggle panel: {e}")),
            }
        }

        if response.drag_started {
            match self.state.host.start_drag(id) {
                Ok(()) => {}
                Err(HostError::DragDisabled { .. }) => {
                    // Maximized layout: the grip moves nothing.
                }
                Err(e) => self.state.push_warning(format!("Cannot drag panel: {e}")),
            }
        }

        if response.dragged && self.state.host.dragging() == Some(id) {
            // The dragged panel follows the pointer directly; siblings
            // animate around it when the pointer crosses into their cell.
            if let Some(panel) = self.state.host.panel(id) {
                let moved = Rect::new(
                    panel.rect.x + response.drag_delta.x as f64,
                    panel.rect.y + response.drag_delta.y as f64,
                    panel.rect.width,
                    panel.rect.height,
                );
                self.state.host.set_panel_rect(id, moved);
            }
            if let Some(pointer) = response.pointer {
                let local = pointer - self.canvas_origin;
                return self
                    .state
                    .host
                    .drag_moved(Point::new(local.x as f64, local.y as f64));
            }
        }

        if response.drag_released && self.state.host.is_dragging() {
            return self.state.host.finish_drag();
        }

        Vec::new()
    }
}

impl eframe::App for LogDockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Pump tail channels into panel buffers.
        let had_tail = self.pump_tail_events();
        let tail_active = self.state.contents.values().any(|c| c.tail.is_active());
        if had_tail || tail_active {
            ctx.request_repaint_after(std::time::Duration::from_millis(TAIL_POLL_INTERVAL_MS));
        }

        // ---- Handle flags set by the toolbar / panel chrome ----
        // pending_open: show the file picker and open a panel per choice.
        if self.state.pending_open {
            self.state.pending_open = false;
            if let Some(files) = rfd::FileDialog::new()
                .add_filter("Log files", &["log", "txt"])
                .pick_files()
            {
                for file in files {
                    match self.state.open_file(file) {
                        Ok(commands) => self.apply_commands(commands, now),
                        Err(e) => self.state.push_warning(format!("Cannot open panel: {e}")),
                    }
                }
            }
        }
        // pending_close: panels whose close button was clicked last frame.
        let closing: Vec<PanelId> = self.state.pending_close.drain(..).collect();
        for id in closing {
            self.animator.remove(id);
            match self.state.close_panel(id) {
                Ok(commands) => self.apply_commands(commands, now),
                Err(e) => self.state.push_warning(format!("Cannot close panel: {e}")),
            }
        }

        // Toolbar.
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui, now);
        });

        // Status bar.
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if tail_active {
                        ui.label(
                            egui::RichText::new(" \u{25cf} LIVE ")
                                .strong()
                                .color(egui::Color32::from_rgb(34, 197, 94)) // Green 500
                                .background_color(egui::Color32::from_rgba_premultiplied(
                                    34, 197, 94, 30,
                                )),
                        );
                        ui.separator();
                    }
                    ui.label(&self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let count = self.state.host.panels().len();
                        if count > 0 {
                            ui.label(format!("{count} panel(s)"));
                        }
                        if let Some(warning) = self.state.warnings.last() {
                            ui.label(
                                egui::RichText::new("\u{26a0}")
                                    .color(egui::Color32::from_rgb(217, 119, 6)),
                            )
                            .on_hover_text(warning.clone());
                        }
                    });
                });
            });

        // Central canvas: the panel host's coordinate space.
        egui::CentralPanel::default().show(ctx, |ui| {
            let canvas = ui.available_rect_before_wrap();
            self.canvas_origin = canvas.min;

            // Re-measure: a changed canvas snaps every panel into place.
            let measured = Size::new(canvas.width() as f64, canvas.height() as f64);
            if measured != self.state.host.bounds() {
                let commands = self.state.host.on_host_resized(measured);
                self.apply_commands(commands, now);
            }

            // Advance tweens and write the frame's rects back to the host.
            // The dragged panel is pinned to the pointer, not the animator.
            let dragging = self.state.host.dragging();
            for (id, rect) in self.animator.tick(now) {
                if Some(id) != dragging {
                    self.state.host.set_panel_rect(id, rect);
                }
            }

            if self.state.host.panels().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label("No panels open.\nUse Open File\u{2026} to tail a log file.");
                });
                return;
            }

            // Draw panels back-to-front.
            let mut draw_order: Vec<(PanelId, Rect, PanelState, bool, u32)> = self
                .state
                .host
                .panels()
                .iter()
                .map(|p| (p.id, p.rect, p.state, p.dragging_enabled, p.z))
                .collect();
            draw_order.sort_by_key(|&(_, _, _, _, z)| z);

            let mut responses: Vec<(PanelId, panel_view::PanelResponse)> = Vec::new();
            for (id, rect, state, dragging_enabled, _) in draw_order {
                let screen = self.screen_rect(id, rect);
                if screen.width() <= 0.0 || screen.height() <= 0.0 {
                    continue;
                }
                let Some(content) = self.state.contents.get_mut(&id) else {
                    continue;
                };
                let mut panel_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(screen)
                        .id_salt(id)
                        .layout(egui::Layout::top_down(egui::Align::Min)),
                );
                let response = panel_view::render(&mut panel_ui, content, state, dragging_enabled);
                responses.push((id, response));
            }

            for (id, response) in responses {
                let commands = self.handle_response(id, response);
                self.apply_commands(commands, now);
            }
        });

        // Keep repainting while panels are moving.
        if self.animator.is_animating() || self.state.host.is_dragging() {
            ctx.request_repaint();
        }
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session(&self.data_dir);
    }
}
