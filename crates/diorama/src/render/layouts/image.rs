use eframe::egui::{self, Color32, FontId, Pos2, Rect, Vec2};

use crate::render::image_cache::ImageCache;
use crate::render::text;
use crate::slide::ImageSlide;
use crate::theme::Theme;

pub fn render(
    ui: &egui::Ui,
    slide: &ImageSlide,
    theme: &Theme,
    rect: Rect,
    images: &ImageCache,
    scale: f32,
) {
    let target = if slide.full {
        rect
    } else {
        rect.shrink(80.0 * scale)
    };

    match images.get(ui.ctx(), &slide.src) {
        Some(texture) => {
            let size = texture.size_vec2();
            let (draw_rect, uv) = if slide.contain {
                (contain_rect(target, size), full_uv())
            } else {
                (target, cover_uv(target, size))
            };
            ui.painter()
                .image(texture.id(), draw_rect, uv, Color32::WHITE);
        }
        None => {
            ui.painter()
                .rect_filled(target, 8.0 * scale, theme.panel_background);
            text::draw_centered(
                ui,
                &slide.alt,
                target.center().y - theme.body_size * scale / 2.0,
                target.left(),
                target.width(),
                FontId::proportional(theme.body_size * 0.8 * scale),
                theme.muted,
            );
        }
    }

    if let Some(color) = slide.color.as_deref().and_then(text::parse_color) {
        ui.painter().rect_filled(target, 0.0, color);
    }
}

fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

/// Largest rect with the image's aspect ratio that fits in `target`, centered.
pub(crate) fn contain_rect(target: Rect, image: Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return target;
    }
    let factor = (target.width() / image.x).min(target.height() / image.y);
    Rect::from_center_size(target.center(), image * factor)
}

/// UV sub-rect that crops the image so it fills `target` without distortion.
pub(crate) fn cover_uv(target: Rect, image: Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 || target.height() <= 0.0 {
        return full_uv();
    }
    let target_aspect = target.width() / target.height();
    let image_aspect = image.x / image.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(margin, 0.0), Pos2::new(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, margin), Pos2::new(1.0, 1.0 - margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn target() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(1600.0, 900.0))
    }

    #[test]
    fn test_contain_keeps_aspect() {
        let r = contain_rect(target(), vec2(400.0, 400.0));
        assert_eq!(r.size(), vec2(900.0, 900.0));
        assert_eq!(r.center(), target().center());
    }

    #[test]
    fn test_cover_crops_wide_image() {
        let uv = cover_uv(target(), vec2(3200.0, 900.0));
        assert!((uv.min.x - 0.25).abs() < 1e-4);
        assert!((uv.max.x - 0.75).abs() < 1e-4);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn test_cover_crops_tall_image() {
        let uv = cover_uv(target(), vec2(1600.0, 1800.0));
        assert_eq!(uv.min.x, 0.0);
        assert!((uv.min.y - 0.25).abs() < 1e-4);
        assert!((uv.max.y - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(contain_rect(target(), Vec2::ZERO), target());
        assert_eq!(cover_uv(target(), Vec2::ZERO), full_uv());
    }
}
