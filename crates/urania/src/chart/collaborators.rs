//! Interfaces to the lookups that run before a chart can be computed.
//!
//! Both may block on network I/O; the chart core never implements them.

use crate::ephemeris::GeoLocation;

/// Resolves a place name to coordinates
pub trait Geocoder {
    fn locate(&self, city: &str, country: &str) -> Option<GeoLocation>;
}

/// Finds the IANA timezone identifier in force at a location
pub trait TimezoneLookup {
    fn timezone_at(&self, location: GeoLocation) -> Option<String>;
}
