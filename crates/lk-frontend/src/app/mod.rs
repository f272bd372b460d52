//! Main application module

mod dock;
mod menu;
mod notice;
mod overlays;

use std::sync::Arc;

use egui_dock::{DockArea, DockState, Style};
use parking_lot::Mutex;

use crate::actions::{ActionContext, dispatch_action};
use crate::config::AppConfig;
use crate::state::{SharedAppState, SharedViewportState, ViewportState, create_shared_state};

pub use dock::{LandmarkTabViewer, PanelType, create_dock_layout};
pub use menu::{MenuAction, render_menu_bar};
pub use notice::show_notice_window;
pub use overlays::update_overlays;

/// Main application
pub struct LandmarkApp {
    dock_state: DockState<PanelType>,
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
    first_frame: bool,
}

impl LandmarkApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = render_state.device.clone();
            let queue = render_state.queue.clone();
            let format = render_state.target_format;

            Arc::new(Mutex::new(ViewportState::new(
                device,
                queue,
                format,
                &config.renderer,
            )))
        });

        let app_state = create_shared_state(config);

        // Bones are read from disk on the first frame; the browser build waits
        // for the user to pick files
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = app_state.lock();
            state.loading = true;
            state.queue_action(crate::state::AppAction::LoadBones);
        }

        Self {
            dock_state: create_dock_layout(),
            app_state,
            viewport_state,
            first_frame: true,
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state, &self.viewport_state);

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }
}

impl eframe::App for LandmarkApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // Paint one "Loading..." frame before the blocking mesh read
        if std::mem::take(&mut self.first_frame) && self.app_state.lock().loading {
            ctx.request_repaint();
        } else {
            self.process_actions();
        }

        update_overlays(&self.app_state, &self.viewport_state);

        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state, &self.viewport_state) {
            match menu_action {
                MenuAction::ResetLayout => {
                    self.dock_state = create_dock_layout();
                }
            }
        }

        let render_state = frame.wgpu_render_state();

        DockArea::new(&mut self.dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(
                ctx,
                &mut LandmarkTabViewer {
                    app_state: &self.app_state,
                    render_state,
                    viewport_state: &self.viewport_state,
                },
            );

        if let Some(action) = show_notice_window(ctx, &self.app_state) {
            self.app_state.lock().queue_action(action);
        }
    }
}
