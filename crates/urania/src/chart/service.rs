use crate::aspects::AspectCalculator;
use crate::chart::collaborators::{Geocoder, TimezoneLookup};
use crate::chart::input::{BirthInput, Place};
use crate::chart::result::{AngleInfo, BodyPosition, ChartOutput, ChartResult, HouseInfo};
use crate::ephemeris::{longitude_of, Body, Ephemeris, GeoLocation};
use crate::error::ChartError;
use crate::houses::compute_houses;
use crate::rendering::{ChartRenderer, VisualConfig};
use crate::time::{apply_country_override, format_utc_offset, julian_day, resolve_local_time};
use crate::zodiac::{normalize_degrees, Language};
use chrono::{DateTime, Utc};

/// Computes natal charts against one ephemeris.
///
/// Holds no per-request state; a single service can serve any number of
/// requests as long as the ephemeris itself may be shared.
pub struct ChartService<E: Ephemeris> {
    ephemeris: E,
    renderer: ChartRenderer,
    aspects: AspectCalculator,
    language: Language,
}

impl<E: Ephemeris> ChartService<E> {
    pub fn new(ephemeris: E) -> Self {
        Self {
            ephemeris,
            renderer: ChartRenderer::default(),
            aspects: AspectCalculator::new(),
            language: Language::default(),
        }
    }

    pub fn with_visual_config(mut self, visual_config: VisualConfig) -> Self {
        self.renderer = ChartRenderer::new(visual_config);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Compute a chart for birth data whose coordinates and timezone are known.
    ///
    /// Input and time-resolution errors return before the ephemeris is
    /// touched. A body the ephemeris cannot place is left out; a house
    /// failure aborts the whole chart.
    pub fn compute(&self, input: &BirthInput) -> Result<ChartOutput, ChartError> {
        let naive = input.validate()?;

        let timezone = match &input.place {
            Some(place) => apply_country_override(&input.timezone, &place.country),
            None => input.timezone.clone(),
        };

        let (instant, notice) = resolve_local_time(naive, &timezone, input.prefer_dst)?;
        let jd = instant.julian_day;
        let utc_offset = format_utc_offset(instant.utc_offset_seconds());

        log::info!(
            "Birth data: {} in {}",
            naive.format("%Y-%m-%d %H:%M"),
            input.place.as_ref().map(Place::label).unwrap_or_else(|| "unnamed place".to_string())
        );
        log::info!(
            "Timezone: {}, UTC Offset: {}, DST Active: {}, DST Hours: {}",
            timezone,
            utc_offset,
            instant.is_dst(),
            instant.dst_hours()
        );
        log::info!("Local time: {}, UTC time: {}", instant.local, instant.utc);
        log::info!("Julian Day: {}, Lat: {}, Lon: {}", jd, input.latitude, input.longitude);

        let location = GeoLocation {
            lat: input.latitude,
            lon: input.longitude,
        };
        let houses = compute_houses(&self.ephemeris, jd, location, input.house_system)?;

        let placed = self.body_longitudes(jd);
        let bodies: Vec<BodyPosition> = placed
            .iter()
            .map(|&(body, lon)| {
                let house = houses.cusps.house_of(lon);
                let position = BodyPosition::new(body, lon, house, self.language);
                log::info!(
                    "{} at {:.2}° in {}, House {}",
                    body,
                    lon,
                    position.sign_name,
                    house
                );
                position
            })
            .collect();

        let aspects = self.aspects.compute_aspects(&placed);
        let image = self
            .renderer
            .render(&placed, &houses.cusps, houses.angles.ascendant, &aspects)?;

        let angle_table = houses
            .angles
            .labelled()
            .iter()
            .map(|(code, lon)| AngleInfo::new(code, *lon, self.language))
            .collect();

        let result = ChartResult {
            angles: houses.angles,
            angle_table,
            bodies,
            houses: HouseInfo::table(&houses.cusps, self.language),
            cusps: houses.cusps,
            aspects,
            house_system: input.house_system,
            location: input.place.as_ref().map(Place::label),
            latitude: input.latitude,
            longitude: input.longitude,
            timezone,
            local_time: instant.local.format("%Y-%m-%d %H:%M").to_string(),
            utc_time: instant.utc.format("%Y-%m-%d %H:%M UTC").to_string(),
            utc_offset,
            julian_day: jd,
            dst_notice: notice.render(self.language),
            language: self.language,
        };

        log::info!("Chart calculation completed successfully");
        Ok(ChartOutput { result, image })
    }

    /// Geocode a place, look up its timezone and compute the chart.
    pub fn compute_for_place<G, T>(
        &self,
        input: &BirthInput,
        place: &Place,
        geocoder: &G,
        timezones: &T,
    ) -> Result<ChartOutput, ChartError>
    where
        G: Geocoder + ?Sized,
        T: TimezoneLookup + ?Sized,
    {
        let location = geocoder
            .locate(place.city.trim(), place.country.trim())
            .ok_or_else(|| ChartError::LocationNotFound { query: place.label() })?;
        let timezone = timezones
            .timezone_at(location)
            .ok_or_else(|| ChartError::TimezoneNotFound { location: place.label() })?;

        let resolved = BirthInput {
            latitude: location.lat,
            longitude: location.lon,
            timezone,
            place: Some(place.clone()),
            ..input.clone()
        };
        self.compute(&resolved)
    }

    /// Planet longitudes at an arbitrary instant, without houses.
    pub fn current_positions(&self, instant: DateTime<Utc>) -> Vec<(Body, f64)> {
        let jd = julian_day(instant);
        Body::PLANETS
            .iter()
            .filter_map(|&body| longitude_of(&self.ephemeris, jd, body).map(|lon| (body, lon)))
            .collect()
    }

    /// Longitudes of every placeable body in chart order. Ketu is derived
    /// from Rahu and only present when Rahu is.
    fn body_longitudes(&self, jd: f64) -> Vec<(Body, f64)> {
        let mut placed: Vec<(Body, f64)> = Body::PLANETS
            .iter()
            .filter_map(|&body| longitude_of(&self.ephemeris, jd, body).map(|lon| (body, lon)))
            .collect();

        if let Some(rahu) = longitude_of(&self.ephemeris, jd, Body::Rahu) {
            placed.push((Body::Rahu, rahu));
            placed.push((Body::Ketu, normalize_degrees(rahu + 180.0)));
        }

        placed
    }
}
