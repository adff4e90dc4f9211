//! WMO weather code lookups, as used by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Icon host used when no template is configured. `{icon}` is replaced by the icon key.
pub const DEFAULT_ICON_URL_TEMPLATE: &str = "http://openweathermap.org/img/wn/{icon}@2x.png";

/// Icon key for clear sky, also used for any code without an icon of its own.
pub const DEFAULT_ICON_KEY: &str = "01d";

/// Human-readable condition for a weather code.
///
/// Codes outside the known table render as `"Code {code}"`, so a provider
/// extending its code set never breaks the panel.
pub fn describe(code: i64) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return format!("Code {code}"),
    };
    text.to_string()
}

/// OpenWeatherMap icon key for a weather code.
pub fn icon_key(code: i64) -> &'static str {
    match code {
        0 => "01d",
        1 => "02d",
        2 => "03d",
        3 => "04d",
        45 | 48 => "50d",
        51 | 53 | 55 => "09d",
        61 | 63 | 65 | 66 | 67 => "10d",
        71 | 73 | 75 | 77 => "13d",
        80..=82 => "09d",
        95 | 96 | 99 => "11d",
        // 56, 57, 85 and 86 have no icon upstream either.
        _ => DEFAULT_ICON_KEY,
    }
}

/// Icon URL on the default icon host.
pub fn icon_url(code: i64) -> String {
    icon_url_with(DEFAULT_ICON_URL_TEMPLATE, code)
}

/// Icon URL built from `template`, with `{icon}` replaced by [`icon_key`].
pub fn icon_url_with(template: &str, code: i64) -> String {
    template.replace("{icon}", icon_key(code))
}
