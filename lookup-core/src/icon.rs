use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Fog,
    /// Fallback when no keyword matches.
    Thermometer,
}

/// Checked top to bottom; first substring hit wins. "partly" has to come
/// before "cloud", and "thunder" before "rain" ("light rain with thunder").
const KEYWORDS: &[(&str, WeatherIcon)] = &[
    ("thunder", WeatherIcon::Thunder),
    ("storm", WeatherIcon::Thunder),
    ("snow", WeatherIcon::Snow),
    ("sleet", WeatherIcon::Snow),
    ("blizzard", WeatherIcon::Snow),
    ("ice", WeatherIcon::Snow),
    ("rain", WeatherIcon::Rain),
    ("drizzle", WeatherIcon::Rain),
    ("shower", WeatherIcon::Rain),
    ("fog", WeatherIcon::Fog),
    ("mist", WeatherIcon::Fog),
    ("haze", WeatherIcon::Fog),
    ("partly", WeatherIcon::PartlyCloudy),
    ("cloud", WeatherIcon::Cloudy),
    ("overcast", WeatherIcon::Cloudy),
    ("sunny", WeatherIcon::Sunny),
    ("clear", WeatherIcon::Sunny),
];

/// Pick an icon for a provider condition text such as "Partly cloudy".
pub fn icon_for_condition(condition: &str) -> WeatherIcon {
    let condition = condition.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(WeatherIcon::Thermometer)
}

impl WeatherIcon {
    pub fn emoji(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "☀️",
            WeatherIcon::PartlyCloudy => "⛅",
            WeatherIcon::Cloudy => "☁️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Thunder => "⛈️",
            WeatherIcon::Snow => "❄️",
            WeatherIcon::Fog => "🌫️",
            WeatherIcon::Thermometer => "🌡️",
        }
    }

    /// wttr.in's PNG icon set. It has no thermometer, so the fallback shows sunny.
    pub fn png_url(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny | WeatherIcon::Thermometer => "https://wttr.in/png/sunny.png",
            WeatherIcon::PartlyCloudy => "https://wttr.in/png/partly_cloudy.png",
            WeatherIcon::Cloudy => "https://wttr.in/png/cloudy.png",
            WeatherIcon::Rain => "https://wttr.in/png/rain.png",
            WeatherIcon::Thunder => "https://wttr.in/png/thunder.png",
            WeatherIcon::Snow => "https://wttr.in/png/snow.png",
            WeatherIcon::Fog => "https://wttr.in/png/fog.png",
        }
    }
}
