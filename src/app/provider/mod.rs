use crate::app::forecast::DailyForecast;

pub mod open_meteo;
pub mod utils;

#[derive(Debug, Fail)]
pub enum ProviderError {
    #[fail(display = "Reason:{}, provider: {}!", reason, provider_name)]
    RequestError {
        reason: String,
        provider_name: String,
    },
}

pub type ProviderForecastFuture = dyn futures::Future<Item=DailyForecast, Error=ProviderError>;

pub trait WeatherProviderResponse {
    fn to_forecast(self) -> DailyForecast;
}

pub trait WeatherProvider {
    fn get_daily_forecast(&self) -> Box<ProviderForecastFuture>;
}
