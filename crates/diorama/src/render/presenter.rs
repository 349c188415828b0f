use eframe::egui::{self, FontId};

use crate::presenter::{PresenterPayload, PresenterProps};
use crate::render::image_cache::ImageCache;
use crate::render::{compute_scale, render_slide, text};
use crate::slide::SlideUnit;
use crate::theme::Theme;

/// The mounted presenter view. Updates replace the payload in place; the
/// styles and origin stay as they were at mount time.
#[derive(Debug, Clone)]
pub struct PresenterView {
    props: PresenterProps,
}

impl PresenterView {
    pub fn mount(props: PresenterProps) -> Self {
        Self { props }
    }

    pub fn update(&mut self, payload: PresenterPayload) {
        self.props.payload = payload;
    }

    pub fn payload(&self) -> &PresenterPayload {
        &self.props.payload
    }

    pub fn theme(&self) -> &Theme {
        &self.props.parent_styles
    }

    pub fn origin(&self) -> &str {
        &self.props.origin
    }

    pub fn counter(&self) -> String {
        format!(
            "Slide {} / {}",
            self.props.payload.current, self.props.payload.total
        )
    }

    pub fn notes(&self) -> &str {
        self.props
            .payload
            .notes
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("No notes for this slide.")
    }

    pub fn draw(&self, ui: &egui::Ui, images: &ImageCache, rect: egui::Rect) {
        let theme = self.theme();
        let payload = self.payload();
        ui.painter().rect_filled(rect, 0.0, theme.background);

        let padding = 20.0;
        let inner = rect.shrink(padding);
        let header_h = 32.0;

        // Header: counter on the left, origin on the right
        let counter_galley = ui.painter().layout_no_wrap(
            self.counter(),
            FontId::proportional(20.0),
            theme.heading_color,
        );
        ui.painter()
            .galley(inner.left_top(), counter_galley, theme.heading_color);
        if !self.origin().is_empty() {
            let origin_galley = ui.painter().layout_no_wrap(
                self.origin().to_string(),
                FontId::monospace(13.0),
                theme.muted,
            );
            let pos = egui::pos2(
                inner.right() - origin_galley.rect.width(),
                inner.top() + 4.0,
            );
            ui.painter().galley(pos, origin_galley, theme.muted);
        }

        // Current slide takes 60% of the width, the next slide the rest
        let body_top = inner.top() + header_h;
        let current_w = inner.width() * 0.6;
        let next_w = inner.width() - current_w - padding;
        let current_rect = preview_rect(egui::pos2(inner.left(), body_top), current_w);
        let next_rect = preview_rect(
            egui::pos2(inner.left() + current_w + padding, body_top),
            next_w,
        );

        draw_preview(ui, &payload.current_slide, theme, current_rect, images);
        match &payload.next_slide {
            Some(next) => draw_preview(ui, next, theme, next_rect, images),
            None => {
                ui.painter()
                    .rect_filled(next_rect, 6.0, theme.panel_background);
                text::draw_centered(
                    ui,
                    "End of deck",
                    next_rect.center().y - 12.0,
                    next_rect.left(),
                    next_rect.width(),
                    FontId::proportional(20.0),
                    theme.muted,
                );
            }
        }
        let label = ui.painter().layout_no_wrap(
            "Next".to_string(),
            FontId::proportional(13.0),
            theme.muted,
        );
        ui.painter().galley(
            egui::pos2(next_rect.left(), next_rect.bottom() + 4.0),
            label,
            theme.muted,
        );

        // Notes fill the remaining space below the current slide
        let notes_top = current_rect.bottom() + padding;
        ui.painter().rect_filled(
            egui::Rect::from_min_max(egui::pos2(inner.left(), notes_top), inner.right_bottom()),
            6.0,
            theme.panel_background,
        );
        text::draw_wrapped(
            ui,
            self.notes(),
            egui::pos2(inner.left() + 12.0, notes_top + 12.0),
            FontId::proportional(theme.notes_size),
            theme.foreground,
            inner.width() - 24.0,
        );
    }
}

fn preview_rect(min: egui::Pos2, width: f32) -> egui::Rect {
    egui::Rect::from_min_size(min, egui::vec2(width, width * 9.0 / 16.0))
}

fn draw_preview(
    ui: &egui::Ui,
    slide: &SlideUnit,
    theme: &Theme,
    rect: egui::Rect,
    images: &ImageCache,
) {
    ui.painter().rect_filled(rect, 6.0, theme.background);
    ui.painter().rect_stroke(
        rect,
        6.0,
        egui::Stroke::new(1.0, theme.muted),
        egui::StrokeKind::Outside,
    );
    render_slide(ui, slide, theme, rect, images, compute_scale(rect));
}
