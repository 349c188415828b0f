use eframe::egui::{self, Color32, FontId, Pos2};

/// Layout and paint wrapped text at `pos`, returning the height used.
pub fn draw_wrapped(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font: FontId,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, max_width);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint wrapped text horizontally centered in `[left, left + width]`,
/// returning the height used.
pub fn draw_centered(
    ui: &egui::Ui,
    text: &str,
    top: f32,
    left: f32,
    width: f32,
    font: FontId,
    color: Color32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, width);
    let height = galley.rect.height();
    let x = left + (width - galley.rect.width()) / 2.0;
    ui.painter().galley(egui::pos2(x, top), galley, color);
    height
}

/// Measure wrapped text without painting it.
pub fn measure(ui: &egui::Ui, text: &str, font: FontId, max_width: f32) -> egui::Vec2 {
    ui.painter()
        .layout(text.to_string(), font, Color32::WHITE, max_width)
        .rect
        .size()
}

/// Parse a `#rrggbb` / `#rrggbbaa` overlay color.
pub fn parse_color(value: &str) -> Option<Color32> {
    match Color32::from_hex(value) {
        Ok(color) => Some(color),
        Err(_) => {
            tracing::warn!(value, "ignoring invalid color");
            None
        }
    }
}
