use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationCategory {
    ParkingLocation,
    Admin,
    Destination,
}

/// A single point handed to the map by the hosting page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub category: LocationCategory,
    pub address: String,
    pub coordinates: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_spots: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_price: Option<f64>,
    /// Circle radius in meters, only meaningful for destinations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl LocationRecord {
    pub fn destination(address: String, coordinates: LatLng, radius: Option<f64>) -> Self {
        Self {
            category: LocationCategory::Destination,
            address,
            coordinates,
            number_of_spots: None,
            hourly_price: None,
            radius,
        }
    }

    /// Decodes a JSON array of records. A `null` payload decodes to an empty list.
    pub fn parse_list(payload: &str) -> serde_json::Result<Vec<LocationRecord>> {
        let records: Option<Vec<LocationRecord>> = serde_json::from_str(payload)?;
        Ok(records.unwrap_or_default())
    }
}

/// What a suggestion pick resolves to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAddress {
    pub formatted_address: String,
    pub coordinates: LatLng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records() {
        let payload = r#"[
            {"category":"PARKING_LOCATION","address":"12 MG Road, Bengaluru","coordinates":{"lat":12.97,"lng":77.59},"numberOfSpots":40,"hourlyPrice":30.5},
            {"category":"DESTINATION","address":"Cubbon Park","coordinates":{"lat":12.976,"lng":77.592},"radius":500}
        ]"#;

        let records = LocationRecord::parse_list(payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, LocationCategory::ParkingLocation);
        assert_eq!(records[0].number_of_spots, Some(40));
        assert_eq!(records[0].hourly_price, Some(30.5));
        assert_eq!(records[0].radius, None);
        assert_eq!(records[1].category, LocationCategory::Destination);
        assert_eq!(records[1].radius, Some(500.0));
        assert_eq!(records[1].coordinates, LatLng::new(12.976, 77.592));
    }

    #[test]
    fn null_payload_is_empty() {
        assert!(LocationRecord::parse_list("null").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let payload = r#"[{"category":"WAREHOUSE","address":"x","coordinates":{"lat":1.0,"lng":2.0}}]"#;
        assert!(LocationRecord::parse_list(payload).is_err());
    }

    #[test]
    fn one_bad_record_fails_the_whole_list() {
        let payload = r#"[
            {"category":"ADMIN","address":"Office","coordinates":{"lat":12.9,"lng":77.5}},
            {"category":"ADMIN","address":"Broken"}
        ]"#;
        assert!(LocationRecord::parse_list(payload).is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let record = LocationRecord::destination(
            "Lalbagh, Bengaluru".to_string(),
            LatLng::new(12.95, 77.58),
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "DESTINATION");
        assert_eq!(json["coordinates"]["lng"], 77.58);
        assert!(json.get("radius").is_none());

        let selected = SelectedAddress {
            formatted_address: "Lalbagh".to_string(),
            coordinates: LatLng::new(1.0, 2.0),
        };
        let json = serde_json::to_value(&selected).unwrap();
        assert_eq!(json["formattedAddress"], "Lalbagh");
    }
}
