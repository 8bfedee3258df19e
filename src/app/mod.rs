//! App module - window state wrapped around the catalog controller

mod actions;
mod form;
mod modals;
mod views;

use crate::catalog::Catalog;
use crate::gateway::BookGateway;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) catalog: Catalog,
    pub(crate) runtime: tokio::runtime::Runtime,
    /// False when credentials were missing at startup; no remote call is attempted
    pub(crate) connected: bool,
    pub(crate) initial_load_started: bool,
    pub(crate) focus_name: bool,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        gateway: Arc<dyn BookGateway>,
        connected: bool,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let catalog = Catalog::new(gateway).with_repaint(move || ctx.request_repaint());

        Self {
            catalog,
            runtime,
            connected,
            initial_load_started: false,
            focus_name: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            settings,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }
}
