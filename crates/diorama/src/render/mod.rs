pub mod image_cache;
pub mod layouts;
pub mod presenter;
pub mod text;

use eframe::egui;

use crate::deck::{DeckOptions, RenderedSlide};
use crate::slide::{SlideContent, SlideUnit};
use crate::theme::Theme;

use image_cache::ImageCache;

/// Slides are laid out for 1920x1080 and scaled to fit.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Render a single slide's content.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &SlideUnit,
    theme: &Theme,
    rect: egui::Rect,
    images: &ImageCache,
    scale: f32,
) {
    match &slide.content {
        SlideContent::Text(text) => layouts::text::render(ui, text, theme, rect, scale),
        SlideContent::Image(image) => {
            layouts::image::render(ui, image, theme, rect, images, scale)
        }
        SlideContent::Quote(quote) => layouts::quote::render(ui, quote, theme, rect, scale),
        SlideContent::Video(video) => layouts::video::render(ui, video, theme, rect, scale),
    }
}

/// Interactive parts of the deck window: slide links, footer, counter and,
/// when enabled, previous/next buttons. Clicks are queued on the slide's
/// navigator.
pub fn draw_chrome(
    ui: &mut egui::Ui,
    rendered: &RenderedSlide<'_>,
    total: usize,
    options: &DeckOptions,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    if let SlideContent::Text(text) = &rendered.slide.content {
        let button_h = 48.0 * scale;
        let mut x = rect.left() + 80.0 * scale;
        let y = rect.bottom() - 140.0 * scale;
        for link in &text.links {
            let width = (link.label.chars().count() as f32 * 14.0 + 48.0) * scale;
            let link_rect =
                egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(width, button_h));
            let button = egui::Button::new(
                egui::RichText::new(&link.label)
                    .size(22.0 * scale)
                    .color(theme.accent),
            );
            if ui.put(link_rect, button).clicked() {
                rendered.navigate.go_to(link.slide);
            }
            x += width + 16.0 * scale;
        }
    }

    if let Some(footer) = &options.footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.clone(),
            egui::FontId::proportional(14.0 * scale),
            footer_color,
        );
        let pos = egui::pos2(
            rect.center().x - galley.rect.width() / 2.0,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(pos, galley, footer_color);
    }

    let counter_text = format!("{} / {}", rendered.index + 1, total);
    let counter_color = Theme::with_opacity(theme.foreground, 0.3);
    let counter_galley = ui.painter().layout_no_wrap(
        counter_text,
        egui::FontId::monospace(14.0 * scale),
        counter_color,
    );
    let counter_pos = egui::pos2(
        rect.right() - counter_galley.rect.width() - 16.0 * scale,
        rect.bottom() - 30.0 * scale,
    );
    ui.painter()
        .galley(counter_pos, counter_galley, counter_color);

    if options.navigation {
        let size = egui::vec2(56.0 * scale, 56.0 * scale).max(egui::vec2(24.0, 24.0));
        let margin = 24.0 * scale;
        let prev_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left() + margin, rect.center().y - size.y / 2.0),
            size,
        );
        let next_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.right() - margin - size.x,
                rect.center().y - size.y / 2.0,
            ),
            size,
        );
        let arrow = |glyph: &str| {
            egui::Button::new(egui::RichText::new(glyph).size(28.0 * scale).color(theme.accent))
                .frame(false)
        };
        if ui.put(prev_rect, arrow("\u{2039}")).clicked() {
            rendered.navigate.previous();
        }
        if ui.put(next_rect, arrow("\u{203A}")).clicked() {
            rendered.navigate.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_fits_reference_frame() {
        let hd = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(hd), 1.0);

        let narrow = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(narrow), 0.5);
    }
}
