//! Status overlay using egui.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, Stroke, Vec2};

use crate::shortcuts::ShortcutRegistry;

/// Actions triggered from the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Flip the wiring assistant.
    ToggleAssistant,
}

/// Scene facts mirrored into the overlay each frame.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub assistant_enabled: bool,
    pub selection_count: usize,
    pub element_count: usize,
    /// Show the shortcut hint line.
    pub show_hint: bool,
}

impl UiState {
    pub fn new(assistant_enabled: bool) -> Self {
        Self {
            assistant_enabled,
            show_hint: true,
            ..Default::default()
        }
    }

    /// Text of the status line.
    pub fn status_text(&self) -> String {
        format!(
            "Assistant: {}   Selected: {} / {}",
            if self.assistant_enabled { "on" } else { "off" },
            self.selection_count,
            self.element_count,
        )
    }
}

fn panel_frame() -> Frame {
    Frame::new()
        .fill(Color32::from_rgba_unmultiplied(250, 250, 252, 240))
        .corner_radius(CornerRadius::same(6))
        .stroke(Stroke::new(1.0, Color32::from_gray(220)))
        .inner_margin(Margin::same(6))
}

/// Render the overlay and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("status"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(8.0, -8.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut enabled = ui_state.assistant_enabled;
                    if ui.checkbox(&mut enabled, "Assistant").changed() {
                        action = Some(UiAction::ToggleAssistant);
                    }
                    ui.label(ui_state.status_text());
                });
                if ui_state.show_hint {
                    ui.small(ShortcutRegistry::hint());
                }
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let mut state = UiState::new(true);
        state.selection_count = 1;
        state.element_count = 9;
        assert_eq!(state.status_text(), "Assistant: on   Selected: 1 / 9");

        state.assistant_enabled = false;
        assert!(state.status_text().starts_with("Assistant: off"));
    }

    #[test]
    fn test_render_ui_without_input_is_idle() {
        let ctx = Context::default();
        let mut state = UiState::new(true);
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = render_ui(ctx, &mut state);
        });
        assert_eq!(action, None);
    }
}
