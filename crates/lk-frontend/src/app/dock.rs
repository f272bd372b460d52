//! Dock layout and tab viewer

use egui_dock::{DockState, NodeIndex, TabViewer};

use crate::panels::{LandmarkListPanel, LandmarkPalettePanel, Panel, ViewportPanel};
use crate::state::{SharedAppState, SharedViewportState};

/// Panel types for the dock system
pub enum PanelType {
    Viewport(ViewportPanel),
    Palette(LandmarkPalettePanel),
    LandmarkList(LandmarkListPanel),
}

impl PanelType {
    pub fn name(&self) -> &str {
        match self {
            PanelType::Viewport(p) => p.name(),
            PanelType::Palette(p) => p.name(),
            PanelType::LandmarkList(p) => p.name(),
        }
    }
}

/// Tab viewer for dock area
pub struct LandmarkTabViewer<'a> {
    pub app_state: &'a SharedAppState,
    pub render_state: Option<&'a egui_wgpu::RenderState>,
    pub viewport_state: &'a Option<SharedViewportState>,
}

impl TabViewer for LandmarkTabViewer<'_> {
    type Tab = PanelType;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.name().into()
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            PanelType::Viewport(panel) => {
                if let (Some(render_state), Some(viewport_state)) =
                    (self.render_state, self.viewport_state)
                {
                    panel.ui_with_render_context(ui, self.app_state, render_state, viewport_state);
                } else {
                    panel.ui(ui, self.app_state);
                }
            }
            PanelType::Palette(panel) => panel.ui(ui, self.app_state),
            PanelType::LandmarkList(panel) => panel.ui(ui, self.app_state),
        }
    }
}

/// Create the default dock layout
pub fn create_dock_layout() -> DockState<PanelType> {
    let mut dock_state = DockState::new(vec![PanelType::Viewport(ViewportPanel::new())]);

    let surface = dock_state.main_surface_mut();

    // Landmark list on the right
    let [_viewport, _right] = surface.split_right(
        NodeIndex::root(),
        0.78,
        vec![PanelType::LandmarkList(LandmarkListPanel::new())],
    );

    // Label buttons on the left
    let [_left, _viewport] = surface.split_left(
        NodeIndex::root(),
        0.18,
        vec![PanelType::Palette(LandmarkPalettePanel::new())],
    );

    dock_state
}
