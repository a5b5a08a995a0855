use serde::{Deserialize, Deserializer, Serialize};

/// A stored named point on campus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    /// Assigned by the store on creation
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
}

impl Location {
    pub fn from_new(id: i64, candidate: NewLocation) -> Self {
        Self {
            id,
            name: candidate.name,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
            description: candidate.description,
        }
    }
}

/// Request body for creating a location
///
/// Any `id` field in the body is ignored; the store always assigns one.
/// Missing or null coordinates are stored as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewLocation {
    pub name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub longitude: f64,
    #[serde(default)]
    pub description: Option<String>,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Query parameters for the route endpoint
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteQuery {
    /// Name of the starting location
    pub start: String,
    /// Name of the destination location
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location_ignores_client_id() {
        let candidate: NewLocation = serde_json::from_value(serde_json::json!({
            "id": 99,
            "name": "Library",
            "latitude": 12.9356,
            "longitude": 77.6192
        }))
        .unwrap();

        assert_eq!(candidate.name, "Library");
        assert_eq!(candidate.description, None);

        let stored = Location::from_new(1, candidate);
        assert_eq!(stored.id, 1);
    }

    #[test]
    fn test_new_location_defaults_coordinates_to_zero() {
        let missing: NewLocation =
            serde_json::from_value(serde_json::json!({"name": "Library"})).unwrap();
        assert_eq!((missing.latitude, missing.longitude), (0.0, 0.0));

        let null: NewLocation = serde_json::from_value(serde_json::json!({
            "name": "Library",
            "latitude": null,
            "longitude": 77.6192
        }))
        .unwrap();
        assert_eq!((null.latitude, null.longitude), (0.0, 77.6192));
    }

    #[test]
    fn test_new_location_rejects_non_numeric_coordinate() {
        let result: Result<NewLocation, _> = serde_json::from_value(serde_json::json!({
            "name": "Library",
            "latitude": "north"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_location_serializes_missing_description_as_null() {
        let location = Location {
            id: 7,
            name: "Canteen".to_string(),
            latitude: 12.9,
            longitude: 77.6,
            description: None,
        };

        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "Canteen",
                "latitude": 12.9,
                "longitude": 77.6,
                "description": null
            })
        );
    }
}
