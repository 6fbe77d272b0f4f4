//! App module - contains the main application state and logic

mod fetch;
pub(crate) mod portraits;

use crate::list::ListView;
use crate::settings::Settings;
use crate::theme;
use crate::types::FetchResult;
use crate::utils::get_cache_dir;
use eframe::egui;
use portraits::PortraitCache;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub(crate) list: ListView,
    // Fetch plumbing
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: reqwest::Client,
    pub(crate) fetch_slot: Arc<Mutex<Option<FetchResult>>>,
    pub(crate) cancel_token: Option<CancellationToken>,
    // Portrait cache
    pub(crate) portraits: PortraitCache,
    // Window/session state
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) started: bool,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font (pagination controls)
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir();
        std::fs::create_dir_all(&cache_dir).ok();

        Self {
            list: ListView::new(settings.last_page.unwrap_or(1)),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            client: reqwest::Client::new(),
            fetch_slot: Arc::new(Mutex::new(None)),
            cancel_token: None,
            portraits: PortraitCache::new(cache_dir.join("portraits")),
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
            started: false,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            last_page: Some(self.list.pagination.current()),
        };
        settings.save(&self.data_dir);
    }
}
