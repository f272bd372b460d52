//! Modal notice window

use lk_core::NoticeLevel;

use crate::state::{AppAction, SharedAppState};

/// Show the pending notice, if any. Returns the dismiss action once the user
/// closes it.
pub fn show_notice_window(ctx: &egui::Context, app_state: &SharedAppState) -> Option<AppAction> {
    let notice = app_state.lock().notice.clone()?;

    // Dim the rest of the window
    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("notice_overlay"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(96));
        });

    let title = match notice.level {
        NoticeLevel::Info => "Info",
        NoticeLevel::Warning => "Warning",
        NoticeLevel::Error => "Error",
    };

    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(&notice.message);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("  OK  ").clicked() {
                    dismissed = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }

    dismissed.then_some(AppAction::DismissNotice)
}
