use crate::aspects::{angular_separation, Aspect};
use crate::ephemeris::Body;
use crate::houses::HouseCusps;
use crate::rendering::primitives::{Color, Point, Shape, Stroke, TextAnchor};
use crate::rendering::raster::rasterize;
use crate::rendering::spec::ChartSpec;
use crate::rendering::svg::{to_svg, EncodedImage, RenderError};
use crate::rendering::visual_config::VisualConfig;
use crate::zodiac::{labels, normalize_degrees, sign_of, SIGN_SPAN};
use serde::{Deserialize, Serialize};

// Radii as fractions of the wheel radius
const INNER_RADIUS: f64 = 0.3;
const OUTER_RADIUS: f64 = 1.0;
const SIGN_LABEL_RADIUS: f64 = OUTER_RADIUS + 0.1;
const ASC_LABEL_RADIUS: f64 = OUTER_RADIUS + 0.05;
const HOUSE_NUMBER_RADIUS: f64 = INNER_RADIUS + 0.1;
const ASPECT_RADIUS: f64 = INNER_RADIUS - 0.05;
const BODY_RADIUS: f64 = OUTER_RADIUS - 0.15;
const DEGREE_LABEL_OFFSET: f64 = 0.06;
const VIEW_EXTENT: f64 = OUTER_RADIUS + 0.2;

/// Bodies closer than this (degrees) are moved to another radius band
const DECLUTTER_SEPARATION: f64 = 10.0;
const DECLUTTER_STEP: f64 = 0.08;

/// Where a body glyph lands on the wheel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: Body,
    pub longitude: f64,
    /// Chart angle after rotating the ascendant to 0
    pub angle: f64,
    /// Fraction of the wheel radius
    pub radius: f64,
}

/// Chart angle of `longitude` once the ascendant is rotated to 0.
pub fn rotate(longitude: f64, ascendant: f64) -> f64 {
    normalize_degrees(longitude - ascendant)
}

/// Assign glyph radii in the order the bodies are given.
///
/// A body within 10 degrees of an already placed one moves 0.08 inward
/// from it, or outward when that one has already been pushed in. Every
/// earlier body is checked and the last clash decides.
pub fn place_bodies(bodies: &[(Body, f64)], ascendant: f64) -> Vec<BodyPlacement> {
    let mut placed: Vec<BodyPlacement> = Vec::with_capacity(bodies.len());

    for &(body, longitude) in bodies {
        let angle = rotate(longitude, ascendant);
        let mut radius = BODY_RADIUS;

        for other in &placed {
            if angular_separation(angle, other.angle) < DECLUTTER_SEPARATION {
                radius = if other.radius > OUTER_RADIUS - 0.2 {
                    other.radius - DECLUTTER_STEP
                } else {
                    other.radius + DECLUTTER_STEP
                };
            }
        }

        placed.push(BodyPlacement {
            body,
            longitude,
            angle,
            radius,
        });
    }

    placed
}

/// ChartSpec generator - lays out a natal wheel as shape primitives
pub struct ChartSpecGenerator {
    visual_config: VisualConfig,
}

impl ChartSpecGenerator {
    /// Create a new generator with default configs
    pub fn new() -> Self {
        Self {
            visual_config: VisualConfig::default(),
        }
    }

    pub fn with_config(visual_config: VisualConfig) -> Self {
        Self { visual_config }
    }

    pub fn visual_config(&self) -> &VisualConfig {
        &self.visual_config
    }

    /// Generate the wheel for one chart.
    pub fn generate(
        &self,
        bodies: &[(Body, f64)],
        cusps: &HouseCusps,
        ascendant: f64,
        aspects: &[Aspect],
    ) -> ChartSpec {
        let vc = &self.visual_config;
        let mut spec = ChartSpec::new(vc.size, vc.size, ascendant);
        spec.background_color = vc.background_color;

        let scale = (vc.size / 2.0 - vc.margin) / VIEW_EXTENT as f32;
        let frame = Stroke {
            color: vc.stroke_color,
            width: vc.circle_width * 0.66,
        };

        // Zodiac wedges
        for i in 0..12u8 {
            let start_lon = i as f64 * SIGN_SPAN;
            let start = spec.chart_angle(start_lon) as f32;
            spec.shapes.push(Shape::SignSegment {
                center: spec.center,
                sign_index: i,
                start_angle: start,
                end_angle: start + SIGN_SPAN as f32,
                radius_inner: scale * INNER_RADIUS as f32,
                radius_outer: scale * OUTER_RADIUS as f32,
                fill: vc.sign_tints[(i % 2) as usize],
                stroke: Some(frame),
            });

            let mid = spec.chart_angle(start_lon + SIGN_SPAN / 2.0);
            spec.shapes.push(self.text(
                self.point(spec.center, scale, SIGN_LABEL_RADIUS, mid),
                labels::sign_glyph(i),
                vc.sign_glyph_size,
                vc.text_color,
                true,
            ));
        }

        spec.shapes.push(Shape::Circle {
            center: spec.center,
            radius: scale * INNER_RADIUS as f32,
            fill: None,
            stroke: Some(Stroke {
                color: vc.stroke_color,
                width: vc.circle_width,
            }),
        });

        // House cusps and numbers
        for (i, cusp) in cusps.iter().enumerate() {
            let angle = spec.chart_angle(cusp);
            spec.shapes.push(Shape::CuspLine {
                house_num: (i + 1) as u8,
                from: self.point(spec.center, scale, INNER_RADIUS, angle),
                to: self.point(spec.center, scale, OUTER_RADIUS, angle),
                stroke: Stroke {
                    color: vc.stroke_color,
                    width: vc.cusp_width,
                },
            });

            let mid = spec.chart_angle(cusps.midpoint(i));
            spec.shapes.push(self.text(
                self.point(spec.center, scale, HOUSE_NUMBER_RADIUS, mid),
                &(i + 1).to_string(),
                vc.house_number_size,
                vc.text_color,
                true,
            ));
        }

        // Aspect chords inside the house ring
        for aspect in aspects {
            let style = vc.aspect_style(aspect.kind);
            let a1 = spec.chart_angle(aspect.first_longitude);
            let a2 = spec.chart_angle(aspect.second_longitude);
            spec.shapes.push(Shape::AspectLine {
                from: self.point(spec.center, scale, ASPECT_RADIUS, a1),
                to: self.point(spec.center, scale, ASPECT_RADIUS, a2),
                aspect_type: aspect.kind.name().to_string(),
                stroke: Stroke {
                    color: style.color,
                    width: style.width,
                },
            });
        }

        // Body glyphs with their degree inside the sign
        for placement in place_bodies(bodies, spec.rotation_offset) {
            spec.shapes.push(Shape::BodyGlyph {
                center: self.point(spec.center, scale, placement.radius, placement.angle),
                body_id: placement.body.id().to_string(),
                glyph: labels::body_glyph(placement.body).to_string(),
                size: vc.body_glyph_size,
                color: vc.text_color,
            });

            let degrees = sign_of(placement.longitude).whole_degrees();
            spec.shapes.push(self.text(
                self.point(
                    spec.center,
                    scale,
                    placement.radius - DEGREE_LABEL_OFFSET,
                    placement.angle,
                ),
                &format!("{}°", degrees),
                vc.degree_text_size,
                vc.degree_text_color,
                false,
            ));
        }

        // Ascendant marker
        spec.shapes.push(Shape::Line {
            from: spec.center,
            to: self.point(spec.center, scale, OUTER_RADIUS, 0.0),
            stroke: Stroke {
                color: vc.stroke_color,
                width: vc.ascendant_width,
            },
        });
        spec.shapes.push(self.text(
            self.point(spec.center, scale, ASC_LABEL_RADIUS, 0.0),
            "ASC",
            vc.label_size,
            vc.text_color,
            true,
        ));

        spec
    }

    fn point(&self, center: Point, scale: f32, radius: f64, angle: f64) -> Point {
        Point::polar(center, scale * radius as f32, angle as f32)
    }

    fn text(&self, position: Point, content: &str, size: f32, color: Color, bold: bool) -> Shape {
        Shape::Text {
            position,
            content: content.to_string(),
            size,
            color,
            anchor: TextAnchor::Middle,
            bold,
        }
    }
}

impl Default for ChartSpecGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays out a chart and encodes it as a base64 PNG.
pub struct ChartRenderer {
    generator: ChartSpecGenerator,
}

impl ChartRenderer {
    pub fn new(visual_config: VisualConfig) -> Self {
        Self {
            generator: ChartSpecGenerator::with_config(visual_config),
        }
    }

    pub fn render(
        &self,
        bodies: &[(Body, f64)],
        cusps: &HouseCusps,
        ascendant: f64,
        aspects: &[Aspect],
    ) -> Result<EncodedImage, RenderError> {
        let vc = self.generator.visual_config();
        if !(vc.size.is_finite() && vc.size > 2.0 * vc.margin) {
            return Err(RenderError::InvalidSize { size: vc.size });
        }

        let spec = self.generator.generate(bodies, cusps, ascendant, aspects);
        let svg = to_svg(&spec, &vc.font_family)?;
        let side = vc.size.round() as u32;
        let png = rasterize(&svg, side, side)?;
        log::debug!("Rendered chart: {} shapes, {} bytes of PNG", spec.shapes.len(), png.len());
        Ok(EncodedImage::png(&png))
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(VisualConfig::default())
    }
}
