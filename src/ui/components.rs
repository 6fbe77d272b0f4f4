//! Reusable UI components

use crate::theme;
use eframe::egui;

/// Painter-drawn character card: square portrait with a name strip below.
pub fn character_card(
    ui: &mut egui::Ui,
    portrait: Option<&egui::TextureHandle>,
    name: &str,
    card_w: f32,
) -> egui::Response {
    let card_h = card_w + theme::CARD_NAME_STRIP;
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(card_w, card_h), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let radius = theme::RADIUS_LARGE as u8;

        painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

        let img_rect = egui::Rect::from_min_size(rect.min, egui::vec2(card_w, card_w));
        let img_corners = egui::CornerRadius {
            nw: radius,
            ne: radius,
            sw: 0,
            se: 0,
        };

        if let Some(tex) = portrait {
            // Textured RectShape clips the portrait to the rounded top corners
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            let brush = egui::epaint::Brush {
                fill_texture_id: tex.id(),
                uv,
            };
            let mut shape =
                egui::epaint::RectShape::filled(img_rect, img_corners, egui::Color32::WHITE);
            shape.brush = Some(std::sync::Arc::new(brush));
            painter.add(shape);
        } else {
            // Placeholder while the portrait downloads
            painter.rect_filled(img_rect, img_corners, theme::BG_BASE);
            painter.text(
                img_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::USER,
                egui::FontId::proportional(card_w * 0.25),
                theme::TEXT_DIM,
            );
        }

        painter.text(
            egui::pos2(
                rect.center().x,
                img_rect.max.y + theme::CARD_NAME_STRIP / 2.0,
            ),
            egui::Align2::CENTER_CENTER,
            truncate_name(name, card_w),
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_SECONDARY,
        );

        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
            egui::StrokeKind::Inside,
        );
    }

    response
}

/// Keep painter-drawn names inside the card width
fn truncate_name(name: &str, card_w: f32) -> String {
    let max_chars = (card_w / (theme::FONT_LABEL * 0.55)).max(8.0) as usize;
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let cut: String = name.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}

/// Pagination bar button. `active` highlights the current page number.
pub fn page_button(
    ui: &mut egui::Ui,
    label: &str,
    active: bool,
    enabled: bool,
) -> egui::Response {
    let color = if !enabled {
        theme::BTN_DISABLED_TEXT
    } else if active {
        theme::ACCENT_TEXT
    } else {
        theme::TEXT_SECONDARY
    };

    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(theme::FONT_BODY)
            .color(color),
    )
    .min_size(egui::vec2(theme::PAGE_BUTTON_SIZE, theme::PAGE_BUTTON_SIZE))
    .corner_radius(theme::RADIUS_DEFAULT)
    .fill(if active {
        theme::ACCENT
    } else {
        theme::BTN_DEFAULT
    });

    ui.add_enabled(enabled, button)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_name("Rick Sanchez", 180.0), "Rick Sanchez");
    }

    #[test]
    fn long_names_get_ellipsis() {
        let name = "Interdimensional Cable Personality 5";
        let shown = truncate_name(name, 120.0);
        assert!(shown.ends_with('…'));
        assert!(shown.chars().count() < name.chars().count());
    }
}
