#![windows_subsystem = "windows"]
//! Character Browser - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod list;
mod pagination;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use types::ViewState;
use ui::components::{character_card, page_button};
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "character-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,character_browser=debug"));

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

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Character Browser starting");

    // Restore window geometry and last viewed page
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1024.0, 768.0)))
        .with_min_inner_size([640.0, 480.0])
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
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
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

        // Fetch the restored page on first frame
        if !self.started {
            self.started = true;
            let page = self.list.pagination.current();
            if let Some(token) = self.list.request_page(page) {
                self.spawn_fetch(ctx, page, token);
            }
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply any fetch that completed since last frame
        self.poll_fetch(ctx);

        egui::TopBottomPanel::bottom("pagination_bar")
            .exact_height(theme::PAGE_BAR_HEIGHT)
            .show_separator_line(false)
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| {
                self.render_pagination_bar(ui);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.render_header(ui);
                ui.add_space(theme::SPACING_LG);

                match self.list.state {
                    ViewState::Empty => {
                        ui.add_space(ui.available_height() * 0.35);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("No characters found")
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                    }
                    ViewState::Loading if self.list.characters.is_empty() => {
                        ui.add_space(ui.available_height() * 0.35);
                        ui.vertical_centered(|ui| {
                            ui.add(egui::Spinner::new().size(32.0).color(theme::ACCENT));
                        });
                    }
                    // Loading keeps the previous page on screen until the
                    // new one is applied
                    _ => self.render_grid(ui, ctx),
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("App closing, saving settings");
        self.save_settings();
    }
}

impl App {
    fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("RICK AND MORTY CHARACTERS")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                )
                .selectable(false),
            );

            if self.list.state == ViewState::Loading {
                ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!(
                            "Page {} of {}",
                            self.list.pagination.current(),
                            self.list.pagination.total()
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                    )
                    .selectable(false),
                );
            });
        });
    }

    fn render_grid(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let spacing = theme::SPACING_MD;
        let available = ui.available_width();
        let num_cols = ((available + spacing) / (theme::CARD_WIDTH + spacing))
            .floor()
            .max(3.0);
        let card_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                    for character in &self.list.characters {
                        let portrait = self.portraits.load(ctx, character.id);
                        character_card(ui, portrait.as_ref(), &character.name, card_w);
                    }
                });
            });
    }

    fn render_pagination_bar(&mut self, ui: &mut egui::Ui) {
        let pagination = self.list.pagination;
        let window: Vec<u32> = pagination.window().collect();
        let mut requested: Option<u32> = None;

        // Rough centering: boundary buttons are ~2.2x a page-number button
        let button_w = theme::PAGE_BUTTON_SIZE + ui.spacing().item_spacing.x;
        let est_width = button_w * (window.len() as f32 + 2.0 * 2.2);

        ui.add_space((theme::PAGE_BAR_HEIGHT - theme::PAGE_BUTTON_SIZE) / 2.0);
        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - est_width) / 2.0).max(0.0));

            let first_label = format!("{} First", egui_phosphor::regular::CARET_DOUBLE_LEFT);
            if page_button(ui, &first_label, false, !pagination.on_first()).clicked() {
                requested = Some(1);
            }

            for page in &window {
                if page_button(ui, &page.to_string(), *page == pagination.current(), true)
                    .clicked()
                {
                    requested = Some(*page);
                }
            }

            let last_label = format!("Last {}", egui_phosphor::regular::CARET_DOUBLE_RIGHT);
            if page_button(ui, &last_label, false, !pagination.on_last()).clicked() {
                requested = Some(pagination.total());
            }
        });

        if let Some(page) = requested {
            let ctx = ui.ctx().clone();
            self.request_page(&ctx, page);
        }
    }
}
