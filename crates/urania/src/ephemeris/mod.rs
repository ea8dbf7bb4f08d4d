pub mod adapter;
pub mod types;

pub use adapter::{longitude_of, Ephemeris, EphemerisError, SwissEphemerisAdapter};
pub use types::{Body, GeoLocation, RawHouses, ZodiacType};
