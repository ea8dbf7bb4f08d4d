//! Natal chart computation.
//!
//! A chart request flows forward through the modules: [`time`] pins the
//! civil birth time to a UTC instant and Julian day, [`ephemeris`] supplies
//! longitudes and raw house output, [`houses`] derives cusps and angles,
//! [`zodiac`] and [`aspects`] classify positions, [`rendering`] draws the
//! wheel, and [`chart`] ties the steps together into a [`ChartResult`].

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod rendering;
pub mod time;
pub mod zodiac;

pub use chart::{BirthInput, ChartOutput, ChartResult, ChartService, Place};
pub use ephemeris::{Body, Ephemeris, GeoLocation, SwissEphemerisAdapter};
pub use error::ChartError;
pub use houses::HouseSystem;
pub use zodiac::Language;
