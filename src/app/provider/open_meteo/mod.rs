use actix_web::client;
use actix_web::client::ClientRequest;
use futures::future::err as fut_err;
use futures::Future;
use std::time::Duration;
use url::Url;

use crate::app::forecast::DailyForecast;
use crate::app::provider::{ProviderError, WeatherProvider, WeatherProviderResponse};
use crate::settings::WeatherSettings;

use super::utils;


#[derive(Debug, Serialize, Deserialize)]
struct OpenMeteoResponse {
    daily: DailyForecast,
}

impl WeatherProviderResponse for OpenMeteoResponse {
    fn to_forecast(self) -> DailyForecast {
        self.daily.with_source(OpenMeteoProvider::NAME)
    }
}

pub struct OpenMeteoProvider {
    base_uri: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    timeout: Duration,
}

impl OpenMeteoProvider {
    pub const BASE_URI: &'static str = "https://api.open-meteo.com/v1/forecast";
    const NAME: &'static str = "Open-Meteo";
    const DAILY_FIELDS: &'static str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

    pub fn new(latitude: f64, longitude: f64, timezone: String) -> Self {
        OpenMeteoProvider {
            base_uri: String::from(Self::BASE_URI),
            latitude,
            longitude,
            timezone,
            timeout: Duration::new(10, 0),
        }
    }

    pub fn from_settings(settings: &WeatherSettings) -> Self {
        Self::new(settings.latitude, settings.longitude, settings.timezone.clone())
            .with_base_uri(&settings.base_uri)
            .with_timeout(settings.timeout())
    }

    pub fn with_base_uri(mut self, base_uri: &str) -> Self {
        self.base_uri = base_uri.to_owned();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_forecast_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(&self.base_uri, &[
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("daily", String::from(Self::DAILY_FIELDS)),
            ("temperature_unit", String::from("fahrenheit")),
            ("timezone", self.timezone.clone()),
        ])
    }

    fn build_request(&self) -> Result<ClientRequest, String> {
        let url = self.build_forecast_url().map_err(|e| e.to_string())?;
        client::get(url.as_str()).finish().map_err(|e| e.to_string())
    }
}

impl WeatherProvider for OpenMeteoProvider {
    fn get_daily_forecast(&self) -> Box<super::ProviderForecastFuture> {
        let request = match self.build_request() {
            Ok(req) => req,
            Err(reason) => return Box::new(fut_err(ProviderError::RequestError {
                reason,
                provider_name: Self::NAME.to_owned(),
            })),
        };

        Box::new(
            utils::fetch_json_request::<OpenMeteoResponse>(request, self.timeout)
                .map(|res| {
                    let forecast = res.to_forecast();
                    info!("Forecast from Open-Meteo for {} days", forecast.time.len());
                    forecast
                })
                .map_err(|e| ProviderError::RequestError {
                    reason: e.to_string(),
                    provider_name: Self::NAME.to_owned(),
                })
        )
    }
}
