#![windows_subsystem = "windows"]
//! Scholaria Books - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod catalog;
mod constants;
mod error;
mod gateway;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use gateway::{BookGateway, RestGateway, Unconfigured};
use settings::{RemoteConfig, Settings};
use std::sync::Arc;
use tracing::{error, info};
use types::Notice;
use utils::{get_data_dir, log_file_prefix};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, log_file_prefix());
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scholaria_books=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// REST client when credentials resolve, otherwise a stand-in plus the reason.
fn connect(settings: &Settings, data_dir: &std::path::Path) -> (Arc<dyn BookGateway>, Option<String>) {
    let gateway = RemoteConfig::resolve(settings, data_dir).and_then(|config| RestGateway::new(&config));
    match gateway {
        Ok(gateway) => (Arc::new(gateway), None),
        Err(e) => {
            error!(error = %e, "Remote store not configured");
            let reason = e.to_string();
            (Arc::new(Unconfigured::new(reason.clone())), Some(reason))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Scholaria Books starting");

    // Credentials are read once, here
    let settings = Settings::load(&data_dir);
    let (gateway, startup_error) = connect(&settings, &data_dir);

    let runtime = tokio::runtime::Runtime::new()?;

    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1100.0, 680.0)))
        .with_min_inner_size([860.0, 520.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let connected = startup_error.is_none();
            let mut app = App::new(cc, gateway, connected, runtime, settings, data_dir);
            app.needs_center = needs_center;
            if let Some(reason) = startup_error {
                app.catalog.raise(Notice::error(reason));
            }
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Initial fetch on first frame
        if !self.initial_load_started {
            self.initial_load_started = true;
            self.load_books();
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Left panel - form (must be added BEFORE CentralPanel)
        self.render_form_panel(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
            )
            .show(ctx, |ui| {
                self.render_book_list(ui);
            });

        self.render_modals(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
