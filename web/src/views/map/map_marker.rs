use shared_types::{LatLng, LocationCategory, LocationRecord};

use crate::provider::{CircleOptions, MarkerIcon, MarkerOptions};

pub const DEFAULT_DESTINATION_RADIUS: f64 = 1000.0;

const PIN_SIZE: (f64, f64) = (32.0, 48.0);
const PIN_ANCHOR: (f64, f64) = (16.0, 48.0);

fn pin_color(category: LocationCategory) -> &'static str {
    match category {
        LocationCategory::ParkingLocation => "%2316a34a",
        LocationCategory::Admin => "%232563eb",
        LocationCategory::Destination => "%23dc2626",
    }
}

pub fn category_icon(category: LocationCategory) -> MarkerIcon {
    let url = format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='32' height='48' viewBox='0 0 32 48'%3E%3Cdefs%3E%3Cfilter id='shadow' x='-50%25' y='-50%25' width='200%25' height='200%25'%3E%3CfeDropShadow dx='0' dy='2' stdDeviation='2' flood-color='%23000' flood-opacity='0.3'/%3E%3C/filter%3E%3C/defs%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='2' filter='url(%23shadow)' d='M16 2C9.5 2 4 7.5 4 14c0 10.5 12 30 12 30s12-19.5 12-30c0-6.5-5.5-12-12-12zm0 16c-2.2 0-4-1.8-4-4s1.8-4 4-4 4 1.8 4 4-1.8 4-4 4z'/%3E%3C/svg%3E",
        pin_color(category)
    );

    MarkerIcon {
        url,
        size: PIN_SIZE,
        anchor: PIN_ANCHOR,
    }
}

pub fn marker_options(record: &LocationRecord) -> MarkerOptions {
    MarkerOptions {
        position: record.coordinates,
        title: record.address.clone(),
        icon: category_icon(record.category),
    }
}

/// Radius ring drawn for a destination. The ring is centered on `center`,
/// which callers pass as the first record of the list, not the destination.
pub fn destination_circle(record: &LocationRecord, center: LatLng) -> CircleOptions {
    CircleOptions {
        center,
        radius: record.radius.unwrap_or(DEFAULT_DESTINATION_RADIUS),
        stroke_color: "#dc2626",
        stroke_opacity: 0.8,
        stroke_weight: 2.0,
        fill_color: "#dc2626",
        fill_opacity: 0.15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: LocationCategory) -> LocationRecord {
        LocationRecord {
            category,
            address: "5 Residency Road, Bengaluru".to_string(),
            coordinates: LatLng::new(12.96, 77.6),
            number_of_spots: None,
            hourly_price: None,
            radius: None,
        }
    }

    #[test]
    fn each_category_gets_its_own_pin() {
        let parking = category_icon(LocationCategory::ParkingLocation);
        let admin = category_icon(LocationCategory::Admin);
        let destination = category_icon(LocationCategory::Destination);

        assert!(parking.url.starts_with("data:image/svg+xml,"));
        assert_ne!(parking.url, admin.url);
        assert_ne!(admin.url, destination.url);
        assert_eq!(parking.anchor, (16.0, 48.0));
    }

    #[test]
    fn marker_sits_on_record_coordinates() {
        let options = marker_options(&record(LocationCategory::Admin));
        assert_eq!(options.position, LatLng::new(12.96, 77.6));
        assert_eq!(options.title, "5 Residency Road, Bengaluru");
    }

    #[test]
    fn circle_radius_defaults_to_a_kilometer() {
        let center = LatLng::new(1.0, 2.0);
        let mut destination = record(LocationCategory::Destination);
        assert_eq!(destination_circle(&destination, center).radius, 1000.0);

        destination.radius = Some(250.0);
        let circle = destination_circle(&destination, center);
        assert_eq!(circle.radius, 250.0);
        assert_eq!(circle.center, center);
    }
}
