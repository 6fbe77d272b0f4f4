//! Character portrait loading
//!
//! Portraits are cached on disk under `cache/portraits/<id>.jpeg` and as
//! egui textures in memory. Cards render a placeholder until both are warm.

use super::App;
use crate::constants::PORTRAIT_FETCH_LIMIT;
use eframe::egui;
use futures::StreamExt;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Texture + disk cache for portraits. Lives beside the list state on the
/// app so the grid can iterate the characters and load textures at once.
pub struct PortraitCache {
    textures: HashMap<u32, Option<egui::TextureHandle>>,
    pub(crate) portrait_dir: PathBuf,
}

impl PortraitCache {
    pub fn new(portrait_dir: PathBuf) -> Self {
        Self {
            textures: HashMap::new(),
            portrait_dir,
        }
    }

    /// Texture for one character's portrait, decoding from the disk cache on
    /// first use. None while the prefetch has not landed yet.
    pub fn load(&mut self, ctx: &egui::Context, id: u32) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(&id) {
            return cached.clone();
        }

        let path = self.portrait_dir.join(format!("{}.jpeg", id));

        if path.exists() {
            let texture = image::open(&path).ok().map(|img| {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.into_raw();
                ctx.load_texture(
                    format!("portrait_{}", id),
                    egui::ColorImage::from_rgba_unmultiplied(size, &pixels),
                    egui::TextureOptions::LINEAR,
                )
            });
            self.textures.insert(id, texture.clone());
            return texture;
        }

        None
    }
}

impl App {
    /// Download the portraits for the currently loaded page that are not on
    /// disk yet. Called after every applied page load.
    pub fn prefetch_portraits(&mut self, ctx: &egui::Context) {
        let jobs: Vec<(u32, String)> = self
            .list
            .characters
            .iter()
            .map(|c| (c.id, c.image.clone()))
            .collect();
        let portrait_dir = self.portraits.portrait_dir.clone();
        let client = self.client.clone();
        let ctx = ctx.clone();

        debug!(count = jobs.len(), "Starting portrait prefetch");

        self.runtime.spawn(async move {
            std::fs::create_dir_all(&portrait_dir).ok();

            futures::stream::iter(jobs.into_iter().filter_map(|(id, url)| {
                let path = portrait_dir.join(format!("{}.jpeg", id));
                if path.exists() {
                    return None;
                }
                let client = client.clone();
                let ctx = ctx.clone();
                Some(async move {
                    match client.get(&url).send().await {
                        Ok(response) if response.status().is_success() => {
                            if let Ok(bytes) = response.bytes().await {
                                std::fs::write(&path, &bytes).ok();
                                ctx.request_repaint();
                            }
                        }
                        Ok(response) => {
                            debug!(id, status = %response.status(), "Portrait fetch rejected")
                        }
                        Err(e) => debug!(id, error = %e, "Portrait fetch failed"),
                    }
                })
            }))
            .buffer_unordered(PORTRAIT_FETCH_LIMIT)
            .for_each(|_| async {})
            .await;
        });
    }
}
