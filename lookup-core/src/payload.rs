//! Mapping from the wttr.in `format=j1` report to [`WeatherSnapshot`].
//!
//! Only the first `current_condition` and the first `nearest_area` entries are
//! read. wttr.in encodes numbers as strings, but plain JSON numbers are accepted
//! too.

use chrono::NaiveDateTime;
use serde::{Deserialize, de::IgnoredAny};
use serde_json::Value;

use crate::{error::FetchError, model::WeatherSnapshot};

/// Whatever JSON document the data source handed back.
pub type RawPayload = serde_json::Value;

const OBSERVATION_FORMAT: &str = "%Y-%m-%d %I:%M %p";

#[derive(Debug, Deserialize)]
struct J1Report {
    #[serde(default)]
    current_condition: Vec<J1Current>,
    #[serde(default)]
    nearest_area: Vec<J1Area>,
}

#[derive(Debug, Deserialize)]
struct J1Current {
    #[serde(rename = "temp_C")]
    temp_c: Option<Numeric>,
    #[serde(rename = "temp_F")]
    temp_f: Option<Numeric>,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: Option<Numeric>,
    humidity: Option<Numeric>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: Option<Numeric>,
    visibility: Option<Numeric>,
    pressure: Option<Numeric>,
    cloudcover: Option<Numeric>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<J1Text>,
    #[serde(rename = "localObsDateTime")]
    local_obs_date_time: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct J1Area {
    #[serde(rename = "areaName", default)]
    area_name: Vec<J1Text>,
    #[serde(default)]
    region: Vec<J1Text>,
    #[serde(default)]
    country: Vec<J1Text>,
}

#[derive(Debug, Deserialize)]
struct J1Text {
    value: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
            Numeric::Other(_) => None,
        }
    }
}

fn required(field: &Option<Numeric>, name: &str) -> Result<f64, FetchError> {
    field
        .as_ref()
        .and_then(Numeric::value)
        .ok_or_else(|| FetchError::Malformed(format!("current_condition[0].{name} is missing or not a number")))
}

fn optional(field: &Option<Numeric>) -> Option<f64> {
    field.as_ref().and_then(Numeric::value)
}

fn first_text(values: &[J1Text]) -> Option<String> {
    values
        .first()
        .and_then(|t| t.value.as_ref())
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl WeatherSnapshot {
    /// Build a snapshot from a raw `format=j1` report.
    pub fn from_payload(payload: &RawPayload) -> Result<Self, FetchError> {
        let report = J1Report::deserialize(payload)
            .map_err(|e| FetchError::Malformed(format!("unexpected report shape: {e}")))?;

        let current = report
            .current_condition
            .first()
            .ok_or_else(|| FetchError::Malformed("current_condition is empty".to_string()))?;
        let area = report
            .nearest_area
            .first()
            .ok_or_else(|| FetchError::Malformed("nearest_area is empty".to_string()))?;

        let city_label = first_text(&area.area_name)
            .ok_or_else(|| FetchError::Malformed("nearest_area[0].areaName is empty".to_string()))?;

        let temperature_c = required(&current.temp_c, "temp_C")?;
        let temperature_f = optional(&current.temp_f).unwrap_or(temperature_c * 9.0 / 5.0 + 32.0);
        let feels_like_c = optional(&current.feels_like_c).unwrap_or(temperature_c);

        let condition_text = first_text(&current.weather_desc).unwrap_or_else(|| "Unknown".to_string());

        let observed_at = current
            .local_obs_date_time
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| NaiveDateTime::parse_from_str(s.trim(), OBSERVATION_FORMAT).ok());

        Ok(WeatherSnapshot {
            city_label,
            region: first_text(&area.region),
            country: first_text(&area.country),
            temperature_c,
            temperature_f,
            feels_like_c,
            condition_text,
            humidity_pct: required(&current.humidity, "humidity")?,
            wind_kmh: required(&current.windspeed_kmph, "windspeedKmph")?,
            visibility_km: optional(&current.visibility),
            pressure_hpa: optional(&current.pressure),
            cloud_cover_pct: optional(&current.cloudcover),
            observed_at,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    /// Trimmed-down copy of a real `format=j1` report.
    pub(crate) fn paris_payload() -> RawPayload {
        json!({
            "current_condition": [{
                "FeelsLikeC": "17",
                "cloudcover": "25",
                "humidity": "60",
                "localObsDateTime": "2024-05-01 10:30 AM",
                "pressure": "1015",
                "temp_C": "18",
                "temp_F": "64",
                "visibility": "10",
                "weatherDesc": [{ "value": "Partly cloudy" }],
                "windspeedKmph": "10"
            }],
            "nearest_area": [{
                "areaName": [{ "value": "Paris" }],
                "country": [{ "value": "France" }],
                "region": [{ "value": "Ile-de-France" }]
            }],
            "weather": []
        })
    }

    #[test]
    fn maps_paris_report() {
        let snap = WeatherSnapshot::from_payload(&paris_payload()).expect("well-formed payload");

        assert_eq!(snap.city_label, "Paris");
        assert_eq!(snap.temperature_c, 18.0);
        assert_eq!(snap.temperature_f, 64.0);
        assert_eq!(snap.feels_like_c, 17.0);
        assert_eq!(snap.humidity_pct, 60.0);
        assert_eq!(snap.wind_kmh, 10.0);
        assert_eq!(snap.condition_text, "Partly cloudy");
        assert_eq!(snap.visibility_km, Some(10.0));
        assert_eq!(snap.pressure_hpa, Some(1015.0));
        assert_eq!(snap.country.as_deref(), Some("France"));
        assert_eq!(snap.region.as_deref(), Some("Ile-de-France"));

        let observed = snap.observed_at.expect("observation time parsed");
        assert_eq!((observed.year(), observed.month(), observed.day()), (2024, 5, 1));
        assert_eq!((observed.hour(), observed.minute()), (10, 30));
    }

    #[test]
    fn accepts_plain_numbers() {
        let payload = json!({
            "current_condition": [{ "temp_C": -5, "humidity": 80, "windspeedKmph": 0 }],
            "nearest_area": [{ "areaName": [{ "value": "Oslo" }] }]
        });

        let snap = WeatherSnapshot::from_payload(&payload).unwrap();
        assert_eq!(snap.temperature_c, -5.0);
        assert_eq!(snap.temperature_f, 23.0);
        assert_eq!(snap.feels_like_c, -5.0);
        assert_eq!(snap.condition_text, "Unknown");
        assert_eq!(snap.visibility_km, None);
        assert_eq!(snap.pressure_hpa, None);
        assert_eq!(snap.observed_at, None);
    }

    #[test]
    fn unparseable_optional_fields_are_dropped() {
        let mut payload = paris_payload();
        payload["current_condition"][0]["pressure"] = json!("n/a");
        payload["current_condition"][0]["localObsDateTime"] = json!("yesterday");

        let snap = WeatherSnapshot::from_payload(&payload).unwrap();
        assert_eq!(snap.pressure_hpa, None);
        assert_eq!(snap.observed_at, None);
    }

    #[test]
    fn wrong_typed_optional_number_is_dropped() {
        let mut payload = paris_payload();
        payload["current_condition"][0]["pressure"] = json!(true);
        payload["current_condition"][0]["visibility"] = json!({ "km": 10 });

        let snap = WeatherSnapshot::from_payload(&payload).expect("required fields are valid");
        assert_eq!(snap.pressure_hpa, None);
        assert_eq!(snap.visibility_km, None);
        assert_eq!(snap.temperature_c, 18.0);
    }

    #[test]
    fn condition_without_value_is_unknown() {
        let mut payload = paris_payload();
        payload["current_condition"][0]["weatherDesc"] = json!([{}]);

        let snap = WeatherSnapshot::from_payload(&payload).unwrap();
        assert_eq!(snap.condition_text, "Unknown");
    }

    #[test]
    fn null_region_is_dropped() {
        let mut payload = paris_payload();
        payload["nearest_area"][0]["region"] = json!([{ "value": null }]);
        payload["current_condition"][0]["localObsDateTime"] = json!(1714559400);

        let snap = WeatherSnapshot::from_payload(&payload).unwrap();
        assert_eq!(snap.region, None);
        assert_eq!(snap.country.as_deref(), Some("France"));
        assert_eq!(snap.observed_at, None);
    }

    #[test]
    fn wrong_typed_required_number_is_malformed() {
        let mut payload = paris_payload();
        payload["current_condition"][0]["humidity"] = json!(false);

        let err = WeatherSnapshot::from_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("humidity"));
    }

    #[test]
    fn area_name_without_value_is_malformed() {
        let mut payload = paris_payload();
        payload["nearest_area"][0]["areaName"] = json!([{ "value": null }]);

        let err = WeatherSnapshot::from_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("areaName"));
    }

    #[test]
    fn missing_current_condition_is_malformed() {
        let mut payload = paris_payload();
        payload.as_object_mut().unwrap().remove("current_condition");

        let err = WeatherSnapshot::from_payload(&payload).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn empty_nearest_area_is_malformed() {
        let mut payload = paris_payload();
        payload["nearest_area"] = json!([]);

        let err = WeatherSnapshot::from_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("nearest_area"));
    }

    #[test]
    fn non_numeric_temperature_is_malformed() {
        let mut payload = paris_payload();
        payload["current_condition"][0]["temp_C"] = json!("warm");

        let err = WeatherSnapshot::from_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("temp_C"));
    }

    #[test]
    fn non_object_payload_is_malformed() {
        let err = WeatherSnapshot::from_payload(&json!(["not", "a", "report"])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
