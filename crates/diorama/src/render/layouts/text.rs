use eframe::egui::{self, FontId, Pos2};

use crate::render::text;
use crate::slide::TextSlide;
use crate::theme::Theme;

pub fn render(ui: &egui::Ui, slide: &TextSlide, theme: &Theme, rect: egui::Rect, scale: f32) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let heading_font = FontId::proportional(theme.h1_size * 0.75 * scale);
    let body_font = FontId::proportional(theme.body_size * scale);

    let heading_size = text::measure(ui, &slide.heading, heading_font.clone(), content_rect.width());
    let body_size = if slide.body.is_empty() {
        egui::Vec2::ZERO
    } else {
        text::measure(ui, &slide.body, body_font.clone(), content_rect.width())
    };
    let gap = if slide.body.is_empty() { 0.0 } else { 40.0 * scale };
    let total_height = heading_size.y + gap + body_size.y;

    // Title-only slides sit in the middle; slides with a body start higher
    let top = if slide.body.is_empty() {
        content_rect.center().y - total_height / 2.0
    } else {
        content_rect.top() + 20.0 * scale
    };

    let h = text::draw_centered(
        ui,
        &slide.heading,
        top,
        content_rect.left(),
        content_rect.width(),
        heading_font,
        theme.heading_color,
    );

    if !slide.body.is_empty() {
        text::draw_wrapped(
            ui,
            &slide.body,
            Pos2::new(content_rect.left(), top + h + gap),
            body_font,
            theme.foreground,
            content_rect.width(),
        );
    }
}
