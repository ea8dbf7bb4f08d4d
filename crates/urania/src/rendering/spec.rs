use crate::rendering::generator::rotate;
use crate::rendering::primitives::{Color, Point, Shape};
use serde::{Deserialize, Serialize};

/// Chart specification - declarative description of chart to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub center: Point,
    /// Longitude drawn at chart angle 0 (the ascendant)
    pub rotation_offset: f64,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
}

impl ChartSpec {
    /// Empty chart whose angle 0 is at longitude `rotation_offset`
    pub fn new(width: f32, height: f32, rotation_offset: f64) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            rotation_offset,
            background_color: Color::WHITE,
            shapes: Vec::new(),
        }
    }

    /// Chart angle at which `longitude` is drawn
    pub fn chart_angle(&self, longitude: f64) -> f64 {
        rotate(longitude, self.rotation_offset)
    }

    pub fn count_shapes(&self, pred: impl Fn(&Shape) -> bool) -> usize {
        self.shapes.iter().filter(|s| pred(s)).count()
    }
}
