use eframe::egui::{self, FontId, Pos2};

use crate::render::text;
use crate::slide::QuoteSlide;
use crate::theme::Theme;

pub fn render(ui: &egui::Ui, slide: &QuoteSlide, theme: &Theme, rect: egui::Rect, scale: f32) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let quote_size = theme.body_size * 1.3 * scale;
    let quote_width = content_rect.width() * 0.8;
    let quote_x = content_rect.left() + (content_rect.width() - quote_width) / 2.0;

    let quoted = wrap_with_quotes(&slide.text);
    let quote_font = FontId::proportional(quote_size);
    let quote_height = text::measure(ui, &quoted, quote_font.clone(), quote_width).y;
    let cite_height = if slide.quotee.is_some() {
        theme.body_size * scale + 30.0 * scale
    } else {
        0.0
    };

    let mut y = (content_rect.center().y - (quote_height + cite_height) / 2.0)
        .max(content_rect.top() + 20.0 * scale);

    // Left accent bar spanning the quote text
    let bar_width = 4.0 * scale;
    let bar_rect = egui::Rect::from_min_size(
        Pos2::new(quote_x - 16.0 * scale, y),
        egui::vec2(bar_width, quote_height),
    );
    ui.painter().rect_filled(bar_rect, 2.0, theme.accent);

    text::draw_centered(
        ui,
        &quoted,
        y,
        quote_x,
        quote_width,
        quote_font,
        theme.foreground,
    );
    y += quote_height + 30.0 * scale;

    if let Some(quotee) = &slide.quotee {
        let color = Theme::with_opacity(theme.foreground, 0.7);
        let font = FontId::proportional(theme.body_size * 0.9 * scale);
        let cite = format!("\u{2014} {}", clean_attribution(quotee));
        let width = text::measure(ui, &cite, font.clone(), content_rect.width()).x;
        let x = content_rect.right() - width - 40.0 * scale;
        text::draw_wrapped(ui, &cite, Pos2::new(x, y), font, color, content_rect.width());
    }
}

/// Wraps the quote in curly quotation marks unless it already has them.
fn wrap_with_quotes(quote: &str) -> String {
    let trimmed = quote.trim();
    let starts = trimmed.starts_with('\u{201C}') || trimmed.starts_with('"');
    let ends = trimmed.ends_with('\u{201D}') || trimmed.ends_with('"');
    if starts && ends && trimmed.chars().count() > 1 {
        return trimmed.to_string();
    }
    format!("\u{201C}{trimmed}\u{201D}")
}

/// Strips a leading `--` / `---` / em dash the author may have typed.
fn clean_attribution(quotee: &str) -> &str {
    quotee
        .trim_start()
        .trim_start_matches('\u{2014}')
        .trim_start_matches('-')
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_with_quotes() {
        assert_eq!(wrap_with_quotes("Ship it"), "\u{201C}Ship it\u{201D}");
        assert_eq!(wrap_with_quotes("\"Ship it\""), "\"Ship it\"");
        assert_eq!(wrap_with_quotes("\""), "\u{201C}\"\u{201D}");
    }

    #[test]
    fn test_clean_attribution() {
        assert_eq!(clean_attribution("-- Grace Hopper"), "Grace Hopper");
        assert_eq!(clean_attribution("--- Grace Hopper"), "Grace Hopper");
        assert_eq!(clean_attribution("\u{2014} Grace Hopper"), "Grace Hopper");
        assert_eq!(clean_attribution("Grace Hopper"), "Grace Hopper");
    }
}
