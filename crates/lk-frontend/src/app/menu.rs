//! Menu bar rendering

use lk_core::BoneKind;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(
    ctx: &egui::Context,
    app_state: &SharedAppState,
    viewport_state: &Option<SharedViewportState>,
) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                for kind in BoneKind::ALL {
                    bone_menu_item(ui, app_state, *kind);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    if ui.button("Reload Bones").clicked() {
                        app_state.lock().queue_action(AppAction::LoadBones);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            });

            ui.menu_button("Landmarks", |ui| {
                if ui.button("Update Lines").clicked() {
                    app_state.lock().queue_action(AppAction::UpdateLines);
                    ui.close_menu();
                }
                let dragging = app_state.lock().session.dragging().is_some();
                if ui
                    .add_enabled(dragging, egui::Button::new("Deselect"))
                    .clicked()
                {
                    app_state.lock().queue_action(AppAction::Deselect);
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if let Some(viewport_state) = viewport_state {
                    let mut vp = viewport_state.lock();

                    let mut show_bones = vp.renderer.show_bones();
                    if ui.checkbox(&mut show_bones, "Bones").changed() {
                        vp.renderer.set_show_bones(show_bones);
                    }
                    let mut show_markers = vp.renderer.show_markers();
                    if ui.checkbox(&mut show_markers, "Landmarks").changed() {
                        vp.renderer.set_show_markers(show_markers);
                    }
                    let mut show_lines = vp.renderer.show_lines();
                    if ui.checkbox(&mut show_lines, "Axis Lines").changed() {
                        vp.renderer.set_show_lines(show_lines);
                    }

                    ui.separator();
                    let mut state = app_state.lock();
                    for kind in BoneKind::ALL {
                        ui.horizontal(|ui| {
                            let mut color = state.config.bone_color(*kind);
                            if ui.color_edit_button_rgba_unmultiplied(&mut color).changed() {
                                state.config.set_bone_color(*kind, color);
                                let queue = vp.queue.clone();
                                vp.renderer.set_bone_color(&queue, *kind, color);
                            }
                            ui.label(kind.name());
                        });
                    }
                }
                ui.checkbox(&mut app_state.lock().show_labels, "Landmark Labels");

                ui.separator();
                if ui.button("Reset Layout").clicked() {
                    menu_action = Some(MenuAction::ResetLayout);
                    ui.close_menu();
                }

                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Save Settings").clicked() {
                    app_state.lock().queue_action(AppAction::SaveConfig);
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}

/// File menu entry that replaces one bone mesh
#[cfg(not(target_arch = "wasm32"))]
fn bone_menu_item(ui: &mut egui::Ui, app_state: &SharedAppState, kind: BoneKind) {
    if ui.button(format!("Open {} STL...", kind.name())).clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("STL files", &["stl", "STL"])
            .pick_file()
        {
            app_state
                .lock()
                .queue_action(AppAction::ReplaceBone { kind, path });
        }
        ui.close_menu();
    }
}

/// File menu entry that replaces one bone mesh
#[cfg(target_arch = "wasm32")]
fn bone_menu_item(ui: &mut egui::Ui, app_state: &SharedAppState, kind: BoneKind) {
    if ui.button(format!("Open {} STL...", kind.name())).clicked() {
        let app_state = app_state.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(file) = rfd::AsyncFileDialog::new()
                .add_filter("STL files", &["stl", "STL"])
                .pick_file()
                .await
            {
                let name = file.file_name();
                let data = file.read().await;
                app_state
                    .lock()
                    .queue_action(AppAction::LoadBoneBytes { kind, name, data });
            }
        });
        ui.close_menu();
    }
}

/// Actions triggered by the menu
pub enum MenuAction {
    ResetLayout,
}
