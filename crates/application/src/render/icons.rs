//! Condition icon assets
//!
//! The published document must be self-contained (the display device never
//! fetches anything), so icons are shipped inside the crate and inlined
//! into the HTML as `data:image/jpeg;base64,` URIs. Encoding happens once
//! per process.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use domain::WeatherCondition;

const ICON_COUNT: usize = 17;

/// Raw JPEG bytes, indexed by [`icon_index`]
const ICON_BYTES: [&[u8]; ICON_COUNT] = [
    include_bytes!("../../assets/icons/clear.jpg"),
    include_bytes!("../../assets/icons/partly_cloudy.jpg"),
    include_bytes!("../../assets/icons/overcast.jpg"),
    include_bytes!("../../assets/icons/fog.jpg"),
    include_bytes!("../../assets/icons/light_drizzle.jpg"),
    include_bytes!("../../assets/icons/drizzle.jpg"),
    include_bytes!("../../assets/icons/light_rain.jpg"),
    include_bytes!("../../assets/icons/rain.jpg"),
    include_bytes!("../../assets/icons/freezing_rain.jpg"),
    include_bytes!("../../assets/icons/light_snow.jpg"),
    include_bytes!("../../assets/icons/snow.jpg"),
    include_bytes!("../../assets/icons/snow_grains.jpg"),
    include_bytes!("../../assets/icons/rain_showers.jpg"),
    include_bytes!("../../assets/icons/snow_showers.jpg"),
    include_bytes!("../../assets/icons/thunderstorm.jpg"),
    include_bytes!("../../assets/icons/thunderstorm_hail.jpg"),
    include_bytes!("../../assets/icons/unknown.jpg"),
];

static DATA_URIS: OnceLock<[String; ICON_COUNT]> = OnceLock::new();

const fn icon_index(condition: WeatherCondition) -> usize {
    match condition {
        WeatherCondition::Clear => 0,
        WeatherCondition::PartlyCloudy => 1,
        WeatherCondition::Overcast => 2,
        WeatherCondition::Fog => 3,
        WeatherCondition::LightDrizzle => 4,
        WeatherCondition::Drizzle => 5,
        WeatherCondition::LightRain => 6,
        WeatherCondition::Rain => 7,
        WeatherCondition::FreezingRain => 8,
        WeatherCondition::LightSnow => 9,
        WeatherCondition::Snow => 10,
        WeatherCondition::SnowGrains => 11,
        WeatherCondition::RainShowers => 12,
        WeatherCondition::SnowShowers => 13,
        WeatherCondition::Thunderstorm => 14,
        WeatherCondition::ThunderstormHail => 15,
        WeatherCondition::Unknown => 16,
    }
}

/// Get the embeddable icon URI for a condition
#[must_use]
pub fn icon_data_uri(condition: WeatherCondition) -> &'static str {
    let uris = DATA_URIS.get_or_init(|| {
        ICON_BYTES.map(|bytes| format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
    });
    &uris[icon_index(condition)]
}
