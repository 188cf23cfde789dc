use chrono_tz::Tz;
use config::{Config, Environment, File};
use std::time::Duration;

use crate::app::provider::open_meteo::OpenMeteoProvider;

#[derive(Debug, Fail)]
pub enum SettingsError {
    #[fail(display = "Invalid configuration: {}", reason)]
    Invalid {
        reason: String,
    },

    #[fail(display = "Unknown time zone {}", timezone)]
    UnknownTimeZone {
        timezone: String,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub weather: WeatherSettings,
    pub teams: TeamSettings,
}

impl Settings {
    pub const DEFAULT_PATH: &'static str = "cfg/config.json";

    /// Reads `path`, which must exist, plus `LEAGUE_<SECTION>__<KEY>` environment overrides.
    pub fn load(path: &str) -> Result<Settings, SettingsError> {
        Self::load_from(path, true)
    }

    /// Like `load`, but a missing file leaves the built-in defaults in place.
    pub fn load_or_default(path: &str) -> Result<Settings, SettingsError> {
        Self::load_from(path, false)
    }

    fn load_from(path: &str, required: bool) -> Result<Settings, SettingsError> {
        let mut settings = Config::default();
        settings
            .merge(File::with_name(path).required(required))
            .and_then(|settings| settings.merge(Environment::with_prefix("LEAGUE").separator("__")))
            .map_err(|e| SettingsError::Invalid { reason: e.to_string() })?;

        settings
            .try_into::<Settings>()
            .map_err(|e| SettingsError::Invalid { reason: e.to_string() })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_uri: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub timeout_secs: u64,
    pub element_id: String,
}

impl WeatherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn league_timezone(&self) -> Result<Tz, SettingsError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SettingsError::UnknownTimeZone { timezone: self.timezone.clone() })
    }
}

impl Default for WeatherSettings {
    fn default() -> Self {
        WeatherSettings {
            base_uri: String::from(OpenMeteoProvider::BASE_URI),
            latitude: 42.12,
            longitude: -86.45,
            timezone: String::from("America/Detroit"),
            timeout_secs: 10,
            element_id: String::from("weather-content"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TeamSettings {
    /// Admin form page the team lookup path is resolved against.
    pub page_url: String,
    pub timeout_secs: u64,
}

impl TeamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TeamSettings {
    fn default() -> Self {
        TeamSettings {
            page_url: String::from("http://127.0.0.1:8000/admin/main/randomdrawnteam/add/"),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod settings_test {
    use super::*;

    #[test]
    fn test_load_test_config() {
        let settings = Settings::load("cfg/config_test.json").unwrap();

        assert_eq!(settings.weather.base_uri, "http://127.0.0.1:9/v1/forecast");
        assert_eq!(settings.weather.timeout(), Duration::from_secs(1));
        assert_eq!(settings.teams.page_url, "http://127.0.0.1:9/admin/main/randomdrawnteam/7/change/");
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings = Settings::load("cfg/config_test.json").unwrap();

        assert_eq!(settings.weather.latitude, 42.12);
        assert_eq!(settings.weather.longitude, -86.45);
        assert_eq!(settings.weather.element_id, "weather-content");
        assert_eq!(settings.teams.timeout_secs, 30);
    }

    #[test]
    fn test_missing_required_file_fails() {
        match Settings::load("cfg/does_not_exist.json") {
            Err(SettingsError::Invalid { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let settings = Settings::load_or_default("cfg/does_not_exist.json").unwrap();

        assert_eq!(settings.weather.base_uri, OpenMeteoProvider::BASE_URI);
        assert_eq!(settings.weather.league_timezone().unwrap(), chrono_tz::America::Detroit);
    }

    #[test]
    fn test_unknown_time_zone() {
        let settings = WeatherSettings { timezone: String::from("Mars/Olympus"), ..WeatherSettings::default() };

        assert!(settings.league_timezone().is_err());
    }
}
