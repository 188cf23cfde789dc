use crate::app::codes::{self, WeatherDescription};
use crate::app::Date;
use crate::app::Temperature;

#[derive(Debug, Fail)]
pub enum ForecastError {
    #[fail(display = "Unsupported date {} for provider {} !", date, provider_name)]
    UnsupportedDate {
        date: Date,
        provider_name: String,
    },

    #[fail(display = "Malformed daily series from provider {}: {}", provider_name, reason)]
    MalformedSeries {
        reason: String,
        provider_name: String,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub time: Vec<Date>,
    pub weathercode: Vec<Option<i64>>,
    pub temperature_2m_max: Vec<Option<Temperature>>,
    pub temperature_2m_min: Vec<Option<Temperature>>,
    pub precipitation_sum: Vec<Option<f64>>,

    #[serde(skip)]
    pub(crate) source_name: String,
}

impl DailyForecast {
    pub fn with_source(mut self, source_name: &str) -> Self {
        self.source_name = source_name.to_owned();
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn find_day(&self, date: &str) -> Result<ForecastDay, ForecastError> {
        self.check_series()?;

        let idx = match self.time.iter().position(|day| day == date) {
            Some(idx) => idx,
            None => return Err(ForecastError::UnsupportedDate {
                date: date.to_owned(),
                provider_name: self.source_name.clone(),
            }),
        };

        Ok(ForecastDay {
            date: self.time[idx].clone(),
            weather_code: self.weathercode[idx],
            max_temp: self.required_temperature(&self.temperature_2m_max, idx, "temperature_2m_max")?,
            min_temp: self.required_temperature(&self.temperature_2m_min, idx, "temperature_2m_min")?,
            precipitation: self.precipitation_sum[idx].unwrap_or(0.0),
        })
    }

    fn check_series(&self) -> Result<(), ForecastError> {
        let days = self.time.len();
        let lengths = [
            ("weathercode", self.weathercode.len()),
            ("temperature_2m_max", self.temperature_2m_max.len()),
            ("temperature_2m_min", self.temperature_2m_min.len()),
            ("precipitation_sum", self.precipitation_sum.len()),
        ];

        match lengths.iter().find(|(_, len)| *len != days) {
            Some((name, len)) => Err(self.malformed(format!("{} has {} entries, time has {}", name, len, days))),
            None => Ok(()),
        }
    }

    fn required_temperature(&self, series: &[Option<Temperature>], idx: usize, name: &str) -> Result<Temperature, ForecastError> {
        series[idx].ok_or_else(|| self.malformed(format!("{} missing for {}", name, self.time[idx])))
    }

    fn malformed(&self, reason: String) -> ForecastError {
        ForecastError::MalformedSeries {
            reason,
            provider_name: self.source_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: Date,
    pub weather_code: Option<i64>,
    pub max_temp: Temperature,
    pub min_temp: Temperature,
    pub precipitation: f64,
}

impl ForecastDay {
    pub fn into_summary(self) -> ForecastSummary {
        ForecastSummary {
            max_temp: round_half_up(self.max_temp),
            min_temp: round_half_up(self.min_temp),
            weather: codes::describe(self.weather_code),
            precipitation: self.precipitation,
            date: self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub date: Date,
    pub max_temp: i64,
    pub min_temp: i64,
    pub weather: WeatherDescription,
    pub precipitation: f64,
}

impl ForecastSummary {
    pub fn temperature_line(&self) -> String {
        format!("{}° / {}°F", self.max_temp, self.min_temp)
    }

    pub fn precipitation_line(&self) -> String {
        if self.precipitation > 0.0 {
            format!("Precipitation: {} in", self.precipitation)
        } else {
            String::from("No precipitation expected")
        }
    }
}

// halves go up, so -2.5 becomes -2
fn round_half_up(value: Temperature) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod daily_forecast_test {
    use crate::app::forecast::{DailyForecast, ForecastError};

    fn create_forecast() -> DailyForecast {
        DailyForecast {
            time: vec![String::from("2019-03-04"), String::from("2019-03-05"), String::from("2019-03-06")],
            weathercode: vec![Some(3), Some(63), None],
            temperature_2m_max: vec![Some(40.1), Some(68.4), Some(50.0)],
            temperature_2m_min: vec![Some(30.0), Some(51.2), Some(41.0)],
            precipitation_sum: vec![Some(0.0), Some(0.12), None],
            ..DailyForecast::default()
        }.with_source("test")
    }

    #[test]
    fn test_find_day_work_as_expected() {
        let day = create_forecast().find_day("2019-03-05").unwrap();

        assert_eq!(day.weather_code, Some(63));
        assert_eq!(day.max_temp, 68.4);
        assert_eq!(day.min_temp, 51.2);
        assert_eq!(day.precipitation, 0.12);
    }

    #[test]
    fn test_find_day_fail_if_no_date() {
        match create_forecast().find_day("2019-03-11") {
            Err(ForecastError::UnsupportedDate { date, provider_name }) => {
                assert_eq!(date, "2019-03-11");
                assert_eq!(provider_name, "test");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_find_day_requires_exact_match() {
        assert!(create_forecast().find_day("2019-3-5").is_err());
        assert!(create_forecast().find_day("2019-03-05T00:00").is_err());
    }

    #[test]
    fn test_find_day_treats_missing_precipitation_as_none() {
        let day = create_forecast().find_day("2019-03-06").unwrap();

        assert_eq!(day.precipitation, 0.0);
        assert_eq!(day.weather_code, None);
    }

    #[test]
    fn test_find_day_fail_on_uneven_series() {
        let mut forecast = create_forecast();
        forecast.temperature_2m_min.pop();

        match forecast.find_day("2019-03-04") {
            Err(ForecastError::MalformedSeries { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_find_day_fail_on_missing_temperature() {
        let mut forecast = create_forecast();
        forecast.temperature_2m_max[1] = None;

        assert!(forecast.find_day("2019-03-05").is_err());
    }
}

#[cfg(test)]
mod forecast_summary_test {
    use crate::app::codes::Severity;
    use crate::app::forecast::ForecastDay;

    fn create_day(max_temp: f64, min_temp: f64, precipitation: f64) -> ForecastDay {
        ForecastDay {
            date: String::from("2019-03-05"),
            weather_code: Some(63),
            max_temp,
            min_temp,
            precipitation,
        }
    }

    #[test]
    fn test_summary_rounds_temperatures() {
        let summary = create_day(68.4, 51.2, 0.0).into_summary();

        assert_eq!(summary.temperature_line(), "68° / 51°F");
        assert_eq!(summary.weather.description, "Rain");
        assert_eq!(summary.weather.severity, Severity::Info);
    }

    #[test]
    fn test_summary_rounds_halves_up() {
        let summary = create_day(70.5, -2.5, 0.0).into_summary();

        assert_eq!(summary.max_temp, 71);
        assert_eq!(summary.min_temp, -2);
    }

    #[test]
    fn test_summary_precipitation_line() {
        assert_eq!(create_day(60.0, 50.0, 0.0).into_summary().precipitation_line(), "No precipitation expected");
        assert_eq!(create_day(60.0, 50.0, 0.12).into_summary().precipitation_line(), "Precipitation: 0.12 in");
    }
}
