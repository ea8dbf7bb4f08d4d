//! SVG serialization of a [`ChartSpec`].

use crate::rendering::primitives::{Color, Point, Shape, TextAnchor};
use crate::rendering::spec::ChartSpec;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart size {size} leaves no room for the wheel")]
    InvalidSize { size: f32 },
    #[error("Failed to write chart image: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("Chart drawing is not valid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("Cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Binary-to-text encoded image, embeddable without a second fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    pub base64: String,
}

impl EncodedImage {
    pub fn png(bytes: &[u8]) -> Self {
        Self {
            mime_type: "image/png".to_string(),
            base64: STANDARD.encode(bytes),
        }
    }

    /// `data:` URI for direct use in markup
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Decoded image bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.base64)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn rgb(color: Color) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

fn opacity(color: Color) -> f32 {
    color.a as f32 / 255.0
}

fn fill_attrs(fill: Option<Color>) -> String {
    match fill {
        Some(c) if c.a == 255 => format!(r#"fill="{}""#, rgb(c)),
        Some(c) => format!(r#"fill="{}" fill-opacity="{:.3}""#, rgb(c), opacity(c)),
        None => r#"fill="none""#.to_string(),
    }
}

fn stroke_attrs(color: Color, width: f32) -> String {
    if color.a == 255 {
        format!(r#"stroke="{}" stroke-width="{:.2}""#, rgb(color), width)
    } else {
        format!(
            r#"stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}""#,
            rgb(color),
            opacity(color),
            width
        )
    }
}

fn write_line(out: &mut String, from: Point, to: Point, stroke: String, extra: &str) -> std::fmt::Result {
    writeln!(
        out,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}{}/>"#,
        from.x, from.y, to.x, to.y, stroke, extra
    )
}

/// Serialize a chart spec as a standalone SVG document.
pub(crate) fn to_svg(spec: &ChartSpec, font_family: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(16 * 1024);

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = spec.width,
        h = spec.height,
        font = escape(font_family)
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
        spec.width,
        spec.height,
        fill_attrs(Some(spec.background_color))
    )?;

    for shape in &spec.shapes {
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let stroke = stroke
                    .map(|s| stroke_attrs(s.color, s.width))
                    .unwrap_or_default();
                writeln!(
                    out,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {} {}/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill_attrs(*fill),
                    stroke
                )?;
            }
            Shape::Line { from, to, stroke } => {
                write_line(&mut out, *from, *to, stroke_attrs(stroke.color, stroke.width), "")?;
            }
            Shape::CuspLine {
                house_num,
                from,
                to,
                stroke,
            } => {
                let extra = format!(r#" data-house="{}""#, house_num);
                write_line(&mut out, *from, *to, stroke_attrs(stroke.color, stroke.width), &extra)?;
            }
            Shape::AspectLine {
                from,
                to,
                aspect_type,
                stroke,
            } => {
                let extra = format!(
                    r#" stroke-linecap="round" data-aspect="{}""#,
                    escape(aspect_type)
                );
                write_line(&mut out, *from, *to, stroke_attrs(stroke.color, stroke.width), &extra)?;
            }
            Shape::SignSegment {
                center,
                sign_index,
                start_angle,
                end_angle,
                radius_inner,
                radius_outer,
                fill,
                stroke,
            } => {
                let outer_start = Point::polar(*center, *radius_outer, *start_angle);
                let outer_end = Point::polar(*center, *radius_outer, *end_angle);
                let inner_end = Point::polar(*center, *radius_inner, *end_angle);
                let inner_start = Point::polar(*center, *radius_inner, *start_angle);
                let large_arc = u8::from((end_angle - start_angle).abs() > 180.0);
                let stroke = stroke
                    .map(|s| stroke_attrs(s.color, s.width))
                    .unwrap_or_default();
                // Chart angles grow counter-clockwise on screen, which is SVG's
                // negative sweep direction.
                writeln!(
                    out,
                    r#"<path data-sign="{}" d="M {:.2} {:.2} A {ro:.2} {ro:.2} 0 {la} 0 {:.2} {:.2} L {:.2} {:.2} A {ri:.2} {ri:.2} 0 {la} 1 {:.2} {:.2} Z" {} {}/>"#,
                    sign_index,
                    outer_start.x,
                    outer_start.y,
                    outer_end.x,
                    outer_end.y,
                    inner_end.x,
                    inner_end.y,
                    inner_start.x,
                    inner_start.y,
                    fill_attrs(Some(*fill)),
                    stroke,
                    ro = radius_outer,
                    ri = radius_inner,
                    la = large_arc,
                )?;
            }
            Shape::Text {
                position,
                content,
                size,
                color,
                anchor,
                bold,
            } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                writeln!(
                    out,
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="{}" dominant-baseline="central" {}{}>{}</text>"#,
                    position.x,
                    position.y,
                    size,
                    anchor,
                    fill_attrs(Some(*color)),
                    weight,
                    escape(content)
                )?;
            }
            Shape::BodyGlyph {
                center,
                body_id,
                glyph,
                size,
                color,
            } => {
                writeln!(
                    out,
                    r#"<text data-body="{}" x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="middle" dominant-baseline="central" font-weight="bold" {}>{}</text>"#,
                    escape(body_id),
                    center.x,
                    center.y,
                    size,
                    fill_attrs(Some(*color)),
                    escape(glyph)
                )?;
            }
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}
