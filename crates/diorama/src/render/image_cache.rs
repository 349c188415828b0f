use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eframe::egui::{self, mutex::Mutex};

/// Lazily decoded slide images, keyed by their `src`.
///
/// Shared between the deck window and the presenter window; both run on the
/// same egui context so textures are valid in either.
pub struct ImageCache {
    base_path: PathBuf,
    textures: Mutex<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Texture for `src`, loading it on first use. Failures are remembered so a
    /// missing file is only reported once.
    pub fn get(&self, ctx: &egui::Context, src: &str) -> Option<egui::TextureHandle> {
        let mut textures = self.textures.lock();
        if let Some(entry) = textures.get(src) {
            return entry.clone();
        }

        let path = self.resolve(src);
        let texture = match image::open(&path) {
            Ok(img) => {
                let rgba = img.into_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                Some(ctx.load_texture(src, color_image, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load image: {e}");
                None
            }
        };
        textures.insert(src.to_string(), texture.clone());
        texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_deck() {
        let cache = ImageCache::new(PathBuf::from("talks"));
        assert_eq!(cache.resolve("img/a.png"), PathBuf::from("talks/img/a.png"));
    }

    #[test]
    fn test_missing_image_is_remembered() {
        let ctx = egui::Context::default();
        let cache = ImageCache::new(PathBuf::from("/nonexistent"));
        assert!(cache.get(&ctx, "missing.png").is_none());
        assert!(cache.textures.lock().contains_key("missing.png"));
        assert!(cache.get(&ctx, "missing.png").is_none());
    }
}
