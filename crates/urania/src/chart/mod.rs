pub mod collaborators;
pub mod input;
pub mod result;
pub mod service;

pub use collaborators::{Geocoder, TimezoneLookup};
pub use input::{parse_house_system, BirthInput, Place};
pub use result::{AngleInfo, BodyPosition, ChartOutput, ChartResult, HouseInfo};
pub use service::ChartService;
