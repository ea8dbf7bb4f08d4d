pub mod generator;
pub mod primitives;
pub mod raster;
pub mod spec;
pub mod svg;
pub mod visual_config;

pub use generator::{place_bodies, BodyPlacement, ChartRenderer, ChartSpecGenerator};
pub use raster::CHART_FONT_FAMILY;
pub use primitives::{Color, Point, Shape, Stroke, TextAnchor};
pub use spec::ChartSpec;
pub use svg::{EncodedImage, RenderError};
pub use visual_config::{AspectStyle, VisualConfig};
