mod common;

use chrono::{TimeZone, Utc};
use common::FixedEphemeris;
use urania::chart::{Geocoder, TimezoneLookup};
use urania::{
    BirthInput, Body, ChartError, ChartService, GeoLocation, HouseSystem, Language, Place,
};

fn berlin_input() -> BirthInput {
    BirthInput {
        year: 1990,
        month: 6,
        day: 15,
        hour: 14,
        minute: 30,
        latitude: 52.52,
        longitude: 13.405,
        timezone: "Europe/Berlin".to_string(),
        house_system: HouseSystem::Placidus,
        prefer_dst: true,
        place: None,
    }
}

struct StaticGeocoder(Option<GeoLocation>);

impl Geocoder for StaticGeocoder {
    fn locate(&self, _city: &str, _country: &str) -> Option<GeoLocation> {
        self.0
    }
}

struct StaticTimezone(Option<&'static str>);

impl TimezoneLookup for StaticTimezone {
    fn timezone_at(&self, _location: GeoLocation) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[test]
fn test_full_chart() {
    let ephemeris = FixedEphemeris::new();
    let service = ChartService::new(&ephemeris);
    let output = service.compute(&berlin_input()).unwrap();
    let result = &output.result;

    assert_eq!(result.bodies.len(), 12);
    assert_eq!(result.cusps.0.len(), 12);
    assert_eq!(result.houses.len(), 12);
    assert_eq!(result.angle_table.len(), 4);
    assert_eq!(result.angles.ascendant, 195.0);
    assert_eq!(result.angles.imum_coeli, 290.0);
    assert_eq!(result.utc_offset, "UTC+02:00");
    assert_eq!(result.local_time, "1990-06-15 14:30");
    assert_eq!(result.utc_time, "1990-06-15 12:30 UTC");
    assert!(result.dst_notice.starts_with("✓ Daylight saving time is active"));

    let sun = result.body(Body::Sun).unwrap();
    assert_eq!(sun.position.sign_index, 2);
    assert_eq!(sun.house, 9);
    assert_eq!(result.body(Body::Mars).unwrap().house, 6);
    assert_eq!(result.body(Body::Moon).unwrap().house, 4);

    for body in &result.bodies {
        assert!((0.0..360.0).contains(&body.longitude));
        assert!((1..=12).contains(&body.house));
    }

    assert_eq!(output.image.mime_type, "image/png");
    assert!(!output.image.base64.is_empty());

    // houses once, ten planets, Rahu; Ketu is derived
    assert_eq!(ephemeris.calls.get(), 12);
}

#[test]
fn test_body_order_and_nodes() {
    let ephemeris = FixedEphemeris::new();
    let result = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap()
        .result;

    let order: Vec<Body> = result.bodies.iter().map(|b| b.body).collect();
    assert_eq!(order, Body::ALL.to_vec());

    let rahu = result.body(Body::Rahu).unwrap().longitude;
    let ketu = result.body(Body::Ketu).unwrap();
    assert!((ketu.longitude - (rahu + 180.0) % 360.0).abs() < 1e-9);
    assert_eq!(ketu.house, 11);
}

#[test]
fn test_aspects_are_reported_and_consistent() {
    let ephemeris = FixedEphemeris::new();
    let result = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap()
        .result;

    assert!(!result.aspects.is_empty());
    for aspect in &result.aspects {
        assert_eq!(
            result.body(aspect.first).unwrap().longitude,
            aspect.first_longitude
        );
        assert!(aspect.orb <= aspect.kind.orb());
    }
    // Rahu and Ketu always sit in exact opposition
    assert!(result
        .aspects
        .iter()
        .any(|a| a.first == Body::Rahu && a.second == Body::Ketu));
}

#[test]
fn test_failed_body_is_left_out() {
    let ephemeris = FixedEphemeris::new().failing(Body::Mars);
    let result = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap()
        .result;

    assert_eq!(result.bodies.len(), 11);
    assert!(result.body(Body::Mars).is_none());
    assert!(result
        .aspects
        .iter()
        .all(|a| a.first != Body::Mars && a.second != Body::Mars));
}

#[test]
fn test_failed_node_drops_both_nodes() {
    let ephemeris = FixedEphemeris::new().failing(Body::Rahu);
    let result = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap()
        .result;

    assert_eq!(result.bodies.len(), 10);
    assert!(result.body(Body::Rahu).is_none());
    assert!(result.body(Body::Ketu).is_none());
}

#[test]
fn test_house_failure_aborts_chart() {
    let ephemeris = FixedEphemeris::new().without_houses();
    let err = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap_err();
    assert!(matches!(err, ChartError::ComputationFailure { .. }));
}

#[test]
fn test_invalid_input_never_reaches_ephemeris() {
    let ephemeris = FixedEphemeris::new();
    let service = ChartService::new(&ephemeris);

    let err = service
        .compute(&BirthInput {
            month: 2,
            day: 30,
            ..berlin_input()
        })
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { field: "day", .. }));

    let err = service
        .compute(&BirthInput {
            timezone: "Nowhere/City".to_string(),
            ..berlin_input()
        })
        .unwrap_err();
    assert!(matches!(err, ChartError::TimezoneNotFound { .. }));

    assert_eq!(ephemeris.calls.get(), 0);
}

#[test]
fn test_skipped_local_time() {
    let ephemeris = FixedEphemeris::new();
    let err = ChartService::new(&ephemeris)
        .compute(&BirthInput {
            year: 2023,
            month: 3,
            day: 26,
            hour: 2,
            minute: 30,
            ..berlin_input()
        })
        .unwrap_err();

    assert_eq!(
        err,
        ChartError::NonexistentLocalTime {
            local: "02:30".to_string(),
            date: "2023-03-26".to_string(),
            timezone: "Europe/Berlin".to_string(),
        }
    );
    assert!(err.user_message(Language::English).contains("(02:30)"));
    assert_eq!(ephemeris.calls.get(), 0);
}

#[test]
fn test_repeated_local_time_uses_preference() {
    let ephemeris = FixedEphemeris::new();
    let service = ChartService::new(&ephemeris);
    let input = BirthInput {
        year: 2023,
        month: 10,
        day: 29,
        hour: 2,
        minute: 30,
        ..berlin_input()
    };

    let daylight = service.compute(&input).unwrap().result;
    let standard = service
        .compute(&BirthInput {
            prefer_dst: false,
            ..input
        })
        .unwrap()
        .result;

    assert_eq!(daylight.utc_time, "2023-10-29 00:30 UTC");
    assert_eq!(standard.utc_time, "2023-10-29 01:30 UTC");
    assert!((standard.julian_day - daylight.julian_day - 1.0 / 24.0).abs() < 1e-9);
    assert!(daylight.dst_notice.contains("occurs twice"));
}

#[test]
fn test_whole_sign_chart() {
    let ephemeris = FixedEphemeris::new();
    let result = ChartService::new(&ephemeris)
        .compute(&BirthInput {
            house_system: HouseSystem::WholeSign,
            ..berlin_input()
        })
        .unwrap()
        .result;

    assert_eq!(result.cusps.0[0], 180.0);
    assert_eq!(ephemeris.last_system_code.get(), Some(b'W'));
    assert_eq!(result.house_system, HouseSystem::WholeSign);
}

#[test]
fn test_arabic_labels() {
    let ephemeris = FixedEphemeris::new();
    let result = ChartService::new(&ephemeris)
        .with_language(Language::Arabic)
        .compute(&berlin_input())
        .unwrap()
        .result;

    assert_eq!(result.body(Body::Sun).unwrap().name, "الشمس");
    assert_eq!(result.language, Language::Arabic);
}

#[test]
fn test_unknown_place() {
    let ephemeris = FixedEphemeris::new();
    let place = Place {
        city: "Atlantis".to_string(),
        country: "Nowhere".to_string(),
    };
    let err = ChartService::new(&ephemeris)
        .compute_for_place(
            &berlin_input(),
            &place,
            &StaticGeocoder(None),
            &StaticTimezone(Some("Europe/Berlin")),
        )
        .unwrap_err();

    assert_eq!(
        err,
        ChartError::LocationNotFound {
            query: "Atlantis, Nowhere".to_string()
        }
    );
    assert_eq!(ephemeris.calls.get(), 0);
}

#[test]
fn test_place_without_timezone() {
    let ephemeris = FixedEphemeris::new();
    let place = Place {
        city: "Point Nemo".to_string(),
        country: "Pacific".to_string(),
    };
    let err = ChartService::new(&ephemeris)
        .compute_for_place(
            &berlin_input(),
            &place,
            &StaticGeocoder(Some(GeoLocation {
                lat: -48.87,
                lon: -123.39,
            })),
            &StaticTimezone(None),
        )
        .unwrap_err();

    assert!(matches!(err, ChartError::TimezoneNotFound { .. }));
}

#[test]
fn test_country_override_replaces_looked_up_zone() {
    let ephemeris = FixedEphemeris::new();
    let place = Place {
        city: "Damascus".to_string(),
        country: "Syria".to_string(),
    };
    let result = ChartService::new(&ephemeris)
        .compute_for_place(
            &berlin_input(),
            &place,
            &StaticGeocoder(Some(GeoLocation {
                lat: 33.51,
                lon: 36.29,
            })),
            &StaticTimezone(Some("Europe/Moscow")),
        )
        .unwrap()
        .result;

    assert_eq!(result.timezone, "Asia/Damascus");
    assert_eq!(result.location.as_deref(), Some("Damascus, Syria"));
    assert_eq!(result.latitude, 33.51);
}

#[test]
fn test_result_serializes() {
    let ephemeris = FixedEphemeris::new();
    let output = ChartService::new(&ephemeris)
        .compute(&berlin_input())
        .unwrap();
    let json = serde_json::to_value(&output.result).unwrap();

    assert_eq!(json["bodies"][0]["body"], "sun");
    assert_eq!(json["house_system"], "placidus");
    assert_eq!(json["cusps"].as_array().unwrap().len(), 12);
}

#[test]
fn test_current_positions() {
    let ephemeris = FixedEphemeris::new().failing(Body::Pluto);
    let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let positions = ChartService::new(&ephemeris).current_positions(instant);

    assert_eq!(positions.len(), 9);
    assert_eq!(positions[0], (Body::Sun, 84.2));
}

#[test]
fn test_user_messages() {
    let err = ChartError::LocationNotFound {
        query: "x".to_string(),
    };
    assert!(err.user_message(Language::English).contains("could not find"));
    assert!(!err.user_message(Language::Arabic).is_empty());
}
