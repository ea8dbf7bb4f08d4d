use crate::aspects::AspectKind;
use crate::rendering::primitives::Color;
use crate::rendering::raster::CHART_FONT_FAMILY;

/// Line styling for one aspect type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectStyle {
    pub color: Color,
    pub width: f32,
}

/// Visual styling configuration for chart elements.
///
/// Sizes are in output pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualConfig {
    pub size: f32,
    pub margin: f32,
    pub background_color: Color,
    pub stroke_color: Color,
    pub text_color: Color,
    pub degree_text_color: Color,
    /// Alternating wedge fills, even signs first
    pub sign_tints: [Color; 2],
    pub sign_glyph_size: f32,
    pub body_glyph_size: f32,
    pub degree_text_size: f32,
    pub house_number_size: f32,
    pub label_size: f32,
    pub cusp_width: f32,
    pub circle_width: f32,
    pub ascendant_width: f32,
    pub opposition: AspectStyle,
    pub trine: AspectStyle,
    pub square: AspectStyle,
    pub sextile: AspectStyle,
    /// Family named in the drawing; text is laid out with the bundled face
    pub font_family: String,
}

impl VisualConfig {
    pub fn aspect_style(&self, kind: AspectKind) -> AspectStyle {
        match kind {
            AspectKind::Opposition => self.opposition,
            AspectKind::Trine => self.trine,
            AspectKind::Square => self.square,
            AspectKind::Sextile => self.sextile,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        // Aspect lines are drawn at 60% opacity
        let red = Color::rgb(255, 0, 0).with_alpha(153);
        let blue = Color::rgb(0, 0, 255).with_alpha(153);

        Self {
            size: 1200.0,
            margin: 24.0,
            background_color: Color::WHITE,
            stroke_color: Color::BLACK,
            text_color: Color::BLACK,
            degree_text_color: Color::rgb(0x00, 0x00, 0x8B), // dark blue
            sign_tints: [
                Color::rgb(0xAD, 0xD8, 0xE6).with_alpha(77), // light blue
                Color::rgb(0xFF, 0xFF, 0xE0).with_alpha(77), // light yellow
            ],
            sign_glyph_size: 33.0,
            body_glyph_size: 29.0,
            degree_text_size: 17.0,
            house_number_size: 21.0,
            label_size: 25.0,
            cusp_width: 4.0,
            circle_width: 3.0,
            ascendant_width: 6.0,
            opposition: AspectStyle { color: red, width: 4.0 },
            trine: AspectStyle { color: blue, width: 3.0 },
            square: AspectStyle { color: red, width: 3.0 },
            sextile: AspectStyle { color: blue, width: 2.0 },
            font_family: CHART_FONT_FAMILY.to_string(),
        }
    }
}
