#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Bright,
    Muted,
    Info,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Bright => "text-warning",
            Severity::Muted => "text-muted",
            Severity::Info => "text-info",
            Severity::Danger => "text-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherDescription {
    pub description: &'static str,
    pub severity: Severity,
}

pub const UNKNOWN: WeatherDescription = WeatherDescription {
    description: "Unknown",
    severity: Severity::Muted,
};

const WEATHER_CODES: &[(i64, &str, Severity)] = &[
    (0, "Clear", Severity::Bright),
    (1, "Mainly clear", Severity::Bright),
    (2, "Partly cloudy", Severity::Muted),
    (3, "Overcast", Severity::Muted),
    (45, "Foggy", Severity::Muted),
    (48, "Foggy", Severity::Muted),
    (51, "Light drizzle", Severity::Info),
    (53, "Drizzle", Severity::Info),
    (55, "Heavy drizzle", Severity::Info),
    (56, "Freezing drizzle", Severity::Info),
    (57, "Heavy freezing drizzle", Severity::Info),
    (61, "Light rain", Severity::Info),
    (63, "Rain", Severity::Info),
    (65, "Heavy rain", Severity::Info),
    (66, "Freezing rain", Severity::Info),
    (67, "Heavy freezing rain", Severity::Info),
    (71, "Light snow", Severity::Info),
    (73, "Snow", Severity::Info),
    (75, "Heavy snow", Severity::Info),
    (77, "Snow grains", Severity::Info),
    (80, "Light showers", Severity::Info),
    (81, "Showers", Severity::Info),
    (82, "Heavy showers", Severity::Info),
    (85, "Light snow showers", Severity::Info),
    (86, "Heavy snow showers", Severity::Info),
    (95, "Thunderstorm", Severity::Danger),
    (96, "Thunderstorm w/ hail", Severity::Danger),
    (99, "Severe thunderstorm", Severity::Danger),
];

pub fn describe(code: Option<i64>) -> WeatherDescription {
    code.and_then(|code| WEATHER_CODES.iter().find(|(known, _, _)| *known == code))
        .map(|&(_, description, severity)| WeatherDescription { description, severity })
        .unwrap_or(UNKNOWN)
}
