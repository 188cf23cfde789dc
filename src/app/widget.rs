use futures::Future;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio_timer::timeout;
use tokio_timer::Timeout;

use crate::app::forecast::{ForecastError, ForecastSummary};
use crate::app::provider::{ProviderError, WeatherProvider};
use crate::app::Date;
use crate::dom::Document;

pub const DEFAULT_ELEMENT_ID: &str = "weather-content";

pub const NOT_FOUND_PANEL: &str =
    r#"<div class="text-warning small mb-2">No forecast available for the next league day.</div>"#;

pub const ERROR_PANEL: &str = r#"<div class="text-center">
    <div class="text-danger mb-2">
        <i class="fas fa-exclamation-triangle"></i> Could not load weather data
    </div>
    <div class="small text-muted">
        Please check <a href="https://weather.com" target="_blank">weather.com</a> for current conditions
    </div>
</div>"#;

#[derive(Debug, Fail)]
pub enum WidgetError {
    #[fail(display = "Transport failure: {}", reason)]
    TransportFailure {
        reason: String,
    },

    #[fail(display = "No forecast available for {}", date)]
    NotFound {
        date: Date,
    },
}

impl From<ProviderError> for WidgetError {
    fn from(e: ProviderError) -> Self {
        WidgetError::TransportFailure { reason: e.to_string() }
    }
}

impl From<ForecastError> for WidgetError {
    fn from(e: ForecastError) -> Self {
        match e {
            ForecastError::UnsupportedDate { date, .. } => WidgetError::NotFound { date },
            e => WidgetError::TransportFailure { reason: e.to_string() },
        }
    }
}

pub type WidgetResponse = dyn Future<Item=Result<ForecastSummary, WidgetError>, Error=()>;

pub struct WeatherWidget<P, D> {
    provider: P,
    document: Rc<RefCell<D>>,
    timeout: Duration,
    default_element: String,
}

impl<P, D> WeatherWidget<P, D>
    where P: WeatherProvider,
          D: Document + 'static
{
    pub fn new(provider: P, document: Rc<RefCell<D>>) -> Self {
        WeatherWidget {
            provider,
            document,
            timeout: Duration::new(10, 0),
            default_element: String::from(DEFAULT_ELEMENT_ID),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_element(mut self, element_id: &str) -> Self {
        self.default_element = element_id.to_owned();
        self
    }

    /// The request is dropped once the timeout elapses, so a late response never reaches the page.
    pub fn load_forecast(&self, target_date: &str, element_id: Option<&str>) -> Box<WidgetResponse> {
        let element_id = element_id.unwrap_or(self.default_element.as_str()).to_owned();
        let target_date = target_date.to_owned();
        let document = self.document.clone();
        let limit = self.timeout;

        Box::new(
            Timeout::new(self.provider.get_daily_forecast(), limit)
                .map_err(move |e| from_timeout(e, limit))
                .and_then(move |forecast| forecast.find_day(&target_date).map_err(WidgetError::from))
                .map(|day| day.into_summary())
                .then(move |result| {
                    let html = match result {
                        Ok(ref summary) => render_summary(summary),
                        Err(WidgetError::NotFound { ref date }) => {
                            info!("No forecast for {}", date);
                            String::from(NOT_FOUND_PANEL)
                        }
                        Err(ref e) => {
                            error!("Weather API error: {}", e);
                            String::from(ERROR_PANEL)
                        }
                    };

                    if !document.borrow_mut().set_inner_html(&element_id, html) {
                        warn!("Weather container #{} not found", element_id);
                    }

                    Ok::<_, ()>(result)
                })
        )
    }
}

fn from_timeout(e: timeout::Error<ProviderError>, limit: Duration) -> WidgetError {
    if e.is_elapsed() {
        return WidgetError::TransportFailure {
            reason: format!("request aborted after {}ms", limit.as_millis()),
        };
    }

    match e.into_inner() {
        Some(e) => WidgetError::from(e),
        None => WidgetError::TransportFailure { reason: String::from("timer unavailable") },
    }
}

pub fn render_summary(summary: &ForecastSummary) -> String {
    format!(
        r#"<div class="text-center">
    <div class="mb-2" style="font-size:1.5rem;">
        {max}&deg; / {min}&deg;F
    </div>
    <div class="mb-2 {class} fw-bold">{description}</div>
    <div class="small text-muted">
        {precipitation}
    </div>
</div>"#,
        max = summary.max_temp,
        min = summary.min_temp,
        class = summary.weather.severity.css_class(),
        description = summary.weather.description,
        precipitation = summary.precipitation_line(),
    )
}
