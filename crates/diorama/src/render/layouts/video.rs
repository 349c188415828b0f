use eframe::egui::{self, FontId, Pos2, Rect};

use crate::render::text;
use crate::slide::VideoSlide;
use crate::theme::Theme;

/// Draws a video frame placeholder: play glyph, source and playback flags.
/// Native playback is not supported, the slide still occupies its place in
/// the deck and shows its notes in the presenter window.
pub fn render(ui: &egui::Ui, slide: &VideoSlide, theme: &Theme, rect: Rect, scale: f32) {
    let frame = if slide.full {
        rect
    } else {
        rect.shrink(80.0 * scale)
    };
    ui.painter()
        .rect_filled(frame, 8.0 * scale, theme.panel_background);

    // Play triangle
    let center = frame.center();
    let r = 60.0 * scale;
    let triangle = vec![
        Pos2::new(center.x - r * 0.6, center.y - r),
        Pos2::new(center.x + r, center.y),
        Pos2::new(center.x - r * 0.6, center.y + r),
    ];
    ui.painter().add(egui::Shape::convex_polygon(
        triangle,
        theme.accent,
        egui::Stroke::NONE,
    ));

    let mut flags = Vec::new();
    if slide.autoplay {
        flags.push("autoplay");
    }
    if slide.looped {
        flags.push("loop");
    }
    let caption = if flags.is_empty() {
        slide.src.clone()
    } else {
        format!("{}  ({})", slide.src, flags.join(", "))
    };
    text::draw_centered(
        ui,
        &caption,
        center.y + r + 30.0 * scale,
        frame.left(),
        frame.width(),
        FontId::monospace(theme.body_size * 0.5 * scale),
        theme.muted,
    );

    if let Some(color) = slide.color.as_deref().and_then(text::parse_color) {
        ui.painter().rect_filled(frame, 0.0, color);
    }
}
