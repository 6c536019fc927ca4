// LogDock - ui/panel_view.rs
//
// Renders one dock panel: grip bar (title, maximize toggle, close button)
// above a virtual-scrolling log line view.
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows currently
// visible in the viewport, giving O(1) rendering cost regardless of line
// count.  Each row is a LayoutJob that colours the timestamp dimly and the
// line body with its level hue so errors and warnings stand out.
//
// The caller positions the panel by scoping `ui` to the panel's rect; this
// module only fills it and reports what the user did with the chrome.

use crate::app::state::PanelContent;
use crate::app::tail::LineLevel;
use crate::core::panel::PanelState;
use crate::ui::theme;
use egui::text::{LayoutJob, TextFormat};

/// What the user did to a panel's chrome this frame.
#[derive(Debug, Default)]
pub struct PanelResponse {
    /// Any click inside the panel (raises it in the z-order).
    pub clicked: bool,
    /// Grip bar drag lifecycle.
    pub drag_started: bool,
    pub dragged: bool,
    pub drag_released: bool,
    /// Pointer position while the grip is held, in screen coordinates.
    pub pointer: Option<egui::Pos2>,
    /// Pointer movement since last frame while dragging.
    pub drag_delta: egui::Vec2,
    /// Maximize/restore toggle was clicked.
    pub toggle_maximize: bool,
    /// Close button was clicked.
    pub close: bool,
}

/// Render one panel into `ui` (already scoped to the panel's rect).
pub fn render(
    ui: &mut egui::Ui,
    content: &mut PanelContent,
    state: PanelState,
    dragging_enabled: bool,
) -> PanelResponse {
    let mut response = PanelResponse::default();
    let rect = ui.max_rect();

    // Panel frame.
    ui.painter()
        .rect_filled(rect, theme::PANEL_ROUNDING, theme::PANEL_BG);
    ui.painter().rect_stroke(
        rect,
        theme::PANEL_ROUNDING,
        egui::Stroke::new(1.0, theme::PANEL_BORDER),
        egui::StrokeKind::Inside,
    );

    // -------------------------------------------------------------------------
    // Grip bar
    // -------------------------------------------------------------------------
    let grip_rect = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width(), theme::GRIP_HEIGHT.min(rect.height())),
    );

    let grip_id = ui.id().with("grip");
    let sense = if dragging_enabled {
        egui::Sense::click_and_drag()
    } else {
        egui::Sense::click()
    };
    let grip = ui.interact(grip_rect, grip_id, sense);

    let grip_bg = if grip.dragged() || grip.hovered() {
        theme::GRIP_BG_ACTIVE
    } else {
        theme::GRIP_BG
    };
    ui.painter()
        .rect_filled(grip_rect, theme::PANEL_ROUNDING, grip_bg);

    if grip.clicked() {
        response.clicked = true;
    }
    if dragging_enabled {
        response.drag_started = grip.drag_started();
        response.dragged = grip.dragged();
        response.drag_released = grip.drag_stopped();
        if grip.dragged() || grip.drag_stopped() {
            response.pointer = grip.interact_pointer_pos();
            response.drag_delta = grip.drag_delta();
        }
    }

    // Title, left-aligned with a little padding.
    let title_pos = grip_rect.left_center() + egui::vec2(8.0, 0.0);
    let mut title = ui.painter().layout_no_wrap(
        content.title.clone(),
        egui::FontId::proportional(13.0),
        theme::GRIP_TEXT,
    );
    // Leave room for the two buttons on the right.
    let max_title_width = (grip_rect.width() - 64.0).max(0.0);
    if title.size().x > max_title_width {
        title = ui.painter().layout(
            content.title.clone(),
            egui::FontId::proportional(13.0),
            theme::GRIP_TEXT,
            max_title_width,
        );
    }
    ui.painter().galley(
        egui::pos2(title_pos.x, title_pos.y - title.size().y / 2.0),
        title,
        theme::GRIP_TEXT,
    );

    // Close and maximize/restore buttons, right-aligned on the grip.
    let button_size = egui::vec2(20.0, theme::GRIP_HEIGHT - 6.0);
    let close_rect = egui::Rect::from_center_size(
        grip_rect.right_center() - egui::vec2(14.0, 0.0),
        button_size,
    );
    let max_rect = egui::Rect::from_center_size(
        grip_rect.right_center() - egui::vec2(38.0, 0.0),
        button_size,
    );

    let close_btn = ui
        .put(
            close_rect,
            egui::Button::new(egui::RichText::new("\u{2715}").size(11.0)).frame(false),
        )
        .on_hover_text("Close panel");
    if close_btn.clicked() {
        response.close = true;
    }

    let (max_icon, max_hint) = match state {
        PanelState::Maximized => ("\u{2750}", "Restore"),
        _ => ("\u{25a1}", "Maximize"),
    };
    let max_btn = ui
        .put(
            max_rect,
            egui::Button::new(egui::RichText::new(max_icon).size(11.0)).frame(false),
        )
        .on_hover_text(max_hint);
    if max_btn.clicked() {
        response.toggle_maximize = true;
    }

    // Tail error indicator: small amber dot with the message on hover.
    if let Some(ref message) = content.last_error {
        let dot_center = grip_rect.right_center() - egui::vec2(58.0, 0.0);
        let dot_rect = egui::Rect::from_center_size(dot_center, egui::vec2(10.0, 10.0));
        ui.painter()
            .circle_filled(dot_center, 3.5, egui::Color32::from_rgb(217, 119, 6));
        ui.interact(dot_rect, ui.id().with("tail_err"), egui::Sense::hover())
            .on_hover_text(message.clone());
    }

    // -------------------------------------------------------------------------
    // Log line view
    // -------------------------------------------------------------------------
    let body_rect = egui::Rect::from_min_max(
        egui::pos2(rect.min.x + 2.0, grip_rect.max.y + 2.0),
        rect.max - egui::vec2(2.0, 2.0),
    );
    if body_rect.height() <= 0.0 {
        return response;
    }

    let mut body_ui = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(body_rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    let body = &mut body_ui;

    if content.lines.is_empty() {
        body.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Waiting for log lines\u{2026}")
                    .weak()
                    .small(),
            );
        });
        if body.ui_contains_pointer() && ui.input(|i| i.pointer.any_click()) {
            response.clicked = true;
        }
        return response;
    }

    let row_height = theme::ROW_HEIGHT;
    egui::ScrollArea::vertical()
        .id_salt(content.path.as_path())
        .auto_shrink([false; 2])
        .stick_to_bottom(content.auto_scroll)
        .show_rows(body, row_height, content.lines.len(), |ui, row_range| {
            for idx in row_range {
                let Some(line) = content.lines.get(idx) else {
                    continue;
                };

                // Subtle background tint for error/warning rows.
                if let Some(tint) = theme::level_bg_colour(line.level) {
                    let tint_rect = egui::Rect::from_min_size(
                        ui.cursor().min,
                        egui::vec2(ui.available_width(), row_height),
                    );
                    ui.painter().rect_filled(tint_rect, 0.0, tint);
                }

                let font = egui::FontId::monospace(11.0);
                let mut job = LayoutJob::default();
                job.append(
                    &format!("{} ", line.received.format("%H:%M:%S")),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: theme::level_colour(LineLevel::Debug),
                        ..Default::default()
                    },
                );
                job.append(
                    &line.text,
                    0.0,
                    TextFormat {
                        font_id: font,
                        color: theme::level_colour(line.level),
                        ..Default::default()
                    },
                );
                ui.add(egui::Label::new(job).truncate());
            }
        });

    // Disengage auto-scroll when the user scrolls up; re-engage at bottom is
    // handled by the checkbox in the grip tooltip via the app toolbar.
    if body.ui_contains_pointer() {
        let scrolled = ui.input(|i| i.raw_scroll_delta.y > 0.0);
        if scrolled {
            content.auto_scroll = false;
        }
        if ui.input(|i| i.pointer.any_click()) {
            response.clicked = true;
        }
    }

    response
}
