use std::fmt;

use crate::units::temperature::Unit;

/// Icon shown when no condition is available (placeholder cards).
pub const DEFAULT_ICON: &str = "🌡️";

/// Style token used when no condition is available.
pub const DEFAULT_STYLE: &str = "cloudy";

const SUNNY: &[i32] = &[0];
const PARTLY_CLOUDY: &[i32] = &[1, 2, 3];
const FOG: &[i32] = &[45, 48];
const RAIN: &[i32] = &[51, 53, 55, 61, 63, 65, 80, 81, 82];
const SNOW: &[i32] = &[71, 73, 75, 77, 85, 86];
const THUNDERSTORM: &[i32] = &[95, 96, 99];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    #[cfg(test)]
    pub const ALL: [Condition; 7] = [
        Condition::Sunny,
        Condition::PartlyCloudy,
        Condition::Cloudy,
        Condition::Fog,
        Condition::Rain,
        Condition::Snow,
        Condition::Thunderstorm,
    ];

    /// Classify a WMO weather code. Codes outside the known tables are `Cloudy`.
    pub fn classify(code: i32) -> Self {
        let table: [(&[i32], Condition); 6] = [
            (SUNNY, Condition::Sunny),
            (PARTLY_CLOUDY, Condition::PartlyCloudy),
            (FOG, Condition::Fog),
            (RAIN, Condition::Rain),
            (SNOW, Condition::Snow),
            (THUNDERSTORM, Condition::Thunderstorm),
        ];
        table
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, cond)| *cond)
            .unwrap_or(Condition::Cloudy)
    }

    pub fn text(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Fog => "Fog",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁️",
            Condition::Fog => "🌫️",
            Condition::Rain => "🌧️",
            Condition::Snow => "🌨️",
            Condition::Thunderstorm => "⛈️",
        }
    }

    /// Gradient token the main card is styled with.
    pub fn style_class(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::PartlyCloudy => "partly",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::Rain => "rain",
            Condition::Snow => "snow",
            Condition::Thunderstorm => "storm",
        }
    }
}

/// Icon for an optional condition, falling back to [`DEFAULT_ICON`].
pub fn icon_for(cond: Option<Condition>) -> &'static str {
    cond.map_or(DEFAULT_ICON, |c| c.icon())
}

/// Style token for an optional condition, falling back to [`DEFAULT_STYLE`].
pub fn style_class_for(cond: Option<Condition>) -> &'static str {
    cond.map_or(DEFAULT_STYLE, |c| c.style_class())
}

/// One day of the forecast as shown on the cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub day: String,
    pub temp_c: i32,
    pub temp_f: i32,
    pub condition: Condition,
}

impl DailyForecast {
    pub fn temperature(&self, unit: Unit) -> i32 {
        match unit {
            Unit::Celsius => self.temp_c,
            Unit::Fahrenheit => self.temp_f,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[test]
fn test_classify_tables() {
    assert_eq!(Condition::classify(0), Condition::Sunny);
    for code in [1, 2, 3] {
        assert_eq!(Condition::classify(code), Condition::PartlyCloudy);
    }
    for code in [45, 48] {
        assert_eq!(Condition::classify(code), Condition::Fog);
    }
    for code in [51, 53, 55, 61, 63, 65, 80, 81, 82] {
        assert_eq!(Condition::classify(code), Condition::Rain);
    }
    for code in [71, 73, 75, 77, 85, 86] {
        assert_eq!(Condition::classify(code), Condition::Snow);
    }
    for code in [95, 96, 99] {
        assert_eq!(Condition::classify(code), Condition::Thunderstorm);
    }
}

#[test]
fn test_classify_unknown_is_cloudy() {
    for code in [4, 44, 56, 66, 100, -1, i32::MAX] {
        assert_eq!(Condition::classify(code), Condition::Cloudy);
    }
}

#[test]
fn test_classify_is_total() {
    for code in 0..=99 {
        let cond = Condition::classify(code);
        assert!(Condition::ALL.contains(&cond), "code {code}");
    }
}

#[test]
fn test_icon_and_style_lookup() {
    for cond in Condition::ALL {
        assert_ne!(icon_for(Some(cond)), DEFAULT_ICON);
        assert!(!style_class_for(Some(cond)).is_empty());
    }
    assert_eq!(icon_for(None), DEFAULT_ICON);
    assert_eq!(style_class_for(None), DEFAULT_STYLE);
    assert_eq!(Condition::Thunderstorm.style_class(), "storm");
    assert_eq!(Condition::PartlyCloudy.to_string(), "Partly Cloudy");
}
