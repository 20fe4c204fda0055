use shared_types::{LocationCategory, LocationRecord};

use crate::provider::PopupContent;

/// First comma-separated part of an address, usually the street line.
pub fn extract_street(address: &str) -> String {
    let trimmed = address.trim();
    match trimmed.split(',').next().map(str::trim) {
        Some(street) if !street.is_empty() => street.to_string(),
        _ => trimmed.to_string(),
    }
}

fn spots_label(spots: Option<i64>) -> String {
    spots.map_or_else(|| "N/A".to_string(), |spots| spots.to_string())
}

fn price_label(price: Option<f64>) -> String {
    price.map_or_else(|| "N/A".to_string(), |price| format!("₹{price:.2}/hr"))
}

pub fn popup_content(record: &LocationRecord) -> PopupContent {
    let mut lines = vec![format!("Address: {}", record.address)];

    match record.category {
        LocationCategory::ParkingLocation | LocationCategory::Admin => {
            lines.push(format!("Spots: {}", spots_label(record.number_of_spots)));
            lines.push(format!("Price: {}", price_label(record.hourly_price)));
        }
        LocationCategory::Destination => {}
    }

    PopupContent {
        title: extract_street(&record.address),
        lines,
    }
}
