use foundation::math::GeoCoordinate;
use serde::{Deserialize, Serialize};

/// A user-submitted building marker as stored by the application.
///
/// `uid` may be empty for records that have not been placed yet; the scene
/// assigns one on placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub user_id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub uid: String,
}

impl Building {
    pub fn new(user_id: impl Into<String>, at: GeoCoordinate) -> Self {
        Self {
            user_id: user_id.into(),
            lat: at.latitude,
            lng: at.longitude,
            uid: String::new(),
        }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::Building;
    use foundation::math::GeoCoordinate;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_camel_case_records_without_uid() {
        let json = r#"[{"userId":"u1","lat":52.06,"lng":5.19}]"#;
        let buildings: Vec<Building> = serde_json::from_str(json).unwrap();
        assert_eq!(
            buildings,
            vec![Building::new("u1", GeoCoordinate::new(52.06, 5.19))]
        );
    }

    #[test]
    fn writes_camel_case() {
        let mut b = Building::new("u1", GeoCoordinate::new(1.0, 2.0));
        b.uid = "x".to_string();
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"{"userId":"u1","lat":1.0,"lng":2.0,"uid":"x"}"#);
    }
}
