use serde::{Deserialize, Serialize};

/// Point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Screen position of a chart angle at `radius` pixels from `center`.
    /// Angle 0 points west and angles grow counter-clockwise.
    pub fn polar(center: Point, radius: f32, angle_deg: f32) -> Point {
        let theta = angle_deg.to_radians();
        Point {
            x: center.x - radius * theta.cos(),
            y: center.y + radius * theta.sin(),
        }
    }
}

/// Color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?).with_alpha(alpha))
    }
}

/// Stroke style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Text anchor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Shape primitives for chart rendering.
///
/// Angles are chart angles in degrees: 0 points west (the ascendant) and
/// values grow counter-clockwise on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        position: Point,
        content: String,
        size: f32,
        color: Color,
        anchor: TextAnchor,
        bold: bool,
    },
    SignSegment {
        center: Point,
        sign_index: u8, // 0-11
        start_angle: f32,
        end_angle: f32,
        radius_inner: f32,
        radius_outer: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    CuspLine {
        house_num: u8,
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    AspectLine {
        from: Point,
        to: Point,
        aspect_type: String,
        stroke: Stroke,
    },
    BodyGlyph {
        center: Point,
        body_id: String,
        glyph: String,
        size: f32,
        color: Color,
    },
}
