use serde::{Deserialize, Serialize};

use crate::prelude::{GeoPoint, RadarError, RadarResult};

/// Target position snapshot in the open-notify `iss-now` shape, where the
/// coordinates arrive as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionReport {
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub iss_position: ReportedPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedPosition {
    pub latitude: String,
    pub longitude: String,
}

impl PositionReport {
    pub fn from_json(text: &str) -> RadarResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn geo_point(&self) -> RadarResult<GeoPoint> {
        let parse = |label: &str, raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| RadarError::Coordinate(format!("{label} {raw:?}")))
        };
        let point = GeoPoint::new(
            parse("latitude", &self.iss_position.latitude)?,
            parse("longitude", &self.iss_position.longitude)?,
        );
        if !point.is_valid() {
            return Err(RadarError::Coordinate(format!(
                "{}, {}",
                point.latitude, point.longitude
            )));
        }
        Ok(point)
    }
}

/// Observer geolocation in the ip-api `?fields=lat,lon` shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeolocationReport {
    pub lat: f64,
    pub lon: f64,
}

impl GeolocationReport {
    pub fn from_json(text: &str) -> RadarResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn geo_point(&self) -> RadarResult<GeoPoint> {
        let point = GeoPoint::new(self.lat, self.lon);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(RadarError::Coordinate(format!("{}, {}", self.lat, self.lon)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_report_parses_string_coordinates() {
        let report = PositionReport::from_json(
            r#"{"message": "success", "timestamp": 1718000000,
                "iss_position": {"latitude": "-12.3456", "longitude": "100.5"}}"#,
        )
        .unwrap();
        let point = report.geo_point().unwrap();
        assert_eq!(point, GeoPoint::new(-12.3456, 100.5));
        assert_eq!(report.timestamp, Some(1_718_000_000));
    }

    #[test]
    fn position_report_rejects_garbage() {
        assert!(matches!(
            PositionReport::from_json("{\"iss_position\": 3}"),
            Err(RadarError::Payload(_))
        ));
        let report = PositionReport::from_json(
            r#"{"iss_position": {"latitude": "north", "longitude": "0"}}"#,
        )
        .unwrap();
        assert!(matches!(report.geo_point(), Err(RadarError::Coordinate(_))));
    }

    #[test]
    fn geolocation_report_validates_bounds() {
        let report = GeolocationReport::from_json(r#"{"lat": 40.7128, "lon": -74.006}"#).unwrap();
        assert_eq!(report.geo_point().unwrap(), GeoPoint::new(40.7128, -74.006));
        let wild = GeolocationReport { lat: 91.0, lon: 0.0 };
        assert!(wild.geo_point().is_err());
    }
}
