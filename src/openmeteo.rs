use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::cities::City;
use crate::error::FetchError;
use crate::units::temperature::{round_half_up, whole_c2f};
use crate::weather::{Condition, DailyForecast};

pub const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const USER_AGENT: &str = "wxdash";

#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    pub daily: Option<Daily>,

    // Requested alongside the daily block but not displayed.
    #[allow(dead_code)]
    pub hourly: Option<Hourly>,

    #[allow(dead_code)]
    pub current: Option<Current>,
}

#[derive(Deserialize, Debug)]
pub struct Daily {
    pub time: Vec<String>,

    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<Option<f64>>,

    pub weathercode: Vec<Option<i32>>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct Hourly {
    #[serde(default)]
    pub time: Vec<String>,

    #[serde(rename = "temperature_2m", default)]
    pub temperature: Vec<Option<f64>>,

    #[serde(default)]
    pub weathercode: Vec<Option<i32>>,
}

#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct Current {
    pub time: Option<String>,

    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
}

/// Fetches daily forecasts for a city. Cheap to clone; each clone shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ForecastLoader {
    client: Client,
    base_url: String,
}

impl ForecastLoader {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, city: &City) -> String {
        format!(
            "{}?latitude={}&longitude={}\
             &daily=weathercode,temperature_2m_max\
             &hourly=temperature_2m,weathercode\
             &current=temperature_2m\
             &temperature_unit=celsius&timezone=auto",
            self.base_url, city.latitude, city.longitude
        )
    }

    /// One request, no retry.
    pub fn load(&self, city: &City) -> Result<Vec<DailyForecast>, FetchError> {
        let url = self.url(city);
        tracing::info!(city = city.name, %url, "fetching forecast");

        let res = self.client.get(&url).send()?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(city = city.name, status = status.as_u16(), "forecast request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: ForecastResponse = res.json().map_err(|e| {
            if e.is_decode() {
                FetchError::Parse(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })?;
        let daily = body
            .daily
            .ok_or_else(|| FetchError::Parse("missing daily section".to_string()))?;
        let days = daily_forecasts(&daily)?;
        tracing::info!(city = city.name, days = days.len(), "forecast loaded");
        Ok(days)
    }
}

/// Turns the index-aligned `daily` arrays into forecast records.
pub fn daily_forecasts(daily: &Daily) -> Result<Vec<DailyForecast>, FetchError> {
    let n = daily.time.len();
    if n == 0 {
        return Err(FetchError::Parse("no forecast days".to_string()));
    }
    if daily.temperature_max.len() != n || daily.weathercode.len() != n {
        return Err(FetchError::Parse(format!(
            "daily arrays differ in length: time={n}, temperature_2m_max={}, weathercode={}",
            daily.temperature_max.len(),
            daily.weathercode.len()
        )));
    }

    daily
        .time
        .iter()
        .zip(&daily.temperature_max)
        .zip(&daily.weathercode)
        .map(|((date, &max), &code)| {
            // Missing values read as 0 °C and an unknown (cloudy) code.
            let temp_c = round_half_up(max.unwrap_or(0.0));
            Ok(DailyForecast {
                day: day_label(date)?,
                temp_c,
                temp_f: whole_c2f(temp_c),
                condition: code.map_or(Condition::Cloudy, Condition::classify),
            })
        })
        .collect()
}

/// Abbreviated weekday (`Mon`, `Tue`, ...) of an ISO calendar date.
fn day_label(date: &str) -> Result<String, FetchError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| FetchError::Parse(format!("bad date {date:?}: {e}")))?;
    Ok(date.format("%a").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityRegistry;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 51.05,
            "longitude": -114.08,
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "temperature_2m_max": [5.4, -1.2],
                "weathercode": [0, 61]
            },
            "hourly": {
                "time": ["2024-01-01T00:00"],
                "temperature_2m": [1.0],
                "weathercode": [3]
            },
            "current": { "time": "2024-01-01T00:00", "temperature_2m": 2.5 }
        })
    }

    fn calgary() -> City {
        CityRegistry::default().current().clone()
    }

    async fn load_from(server: &MockServer) -> Result<Vec<DailyForecast>, FetchError> {
        let base_url = format!("{}/v1/forecast", server.uri());
        // The blocking client must live and die outside the async runtime.
        tokio::task::spawn_blocking(move || {
            ForecastLoader::new(&base_url, USER_AGENT)
                .expect("client")
                .load(&calgary())
        })
        .await
        .expect("join")
    }

    #[test]
    fn test_daily_forecasts() {
        let body: ForecastResponse = serde_json::from_value(sample_body()).unwrap();
        let days = daily_forecasts(&body.daily.unwrap()).unwrap();
        assert_eq!(
            days,
            vec![
                DailyForecast {
                    day: "Mon".to_string(),
                    temp_c: 5,
                    temp_f: 41,
                    condition: Condition::Sunny,
                },
                DailyForecast {
                    day: "Tue".to_string(),
                    temp_c: -1,
                    temp_f: 30,
                    condition: Condition::Rain,
                },
            ]
        );
    }

    #[test]
    fn test_null_daily_values() {
        let body: ForecastResponse = serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2024-01-01", "2024-01-02"],
                "temperature_2m_max": [5.4, null],
                "weathercode": [null, 61]
            }
        }))
        .unwrap();
        let days = daily_forecasts(&body.daily.unwrap()).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!((days[0].temp_c, days[0].condition), (5, Condition::Cloudy));
        assert_eq!((days[1].temp_c, days[1].temp_f), (0, 32));
        assert_eq!(days[1].condition, Condition::Rain);
    }

    #[test]
    fn test_misaligned_arrays() {
        let daily = Daily {
            time: vec!["2024-01-01".to_string()],
            temperature_max: vec![Some(1.0), Some(2.0)],
            weathercode: vec![Some(0)],
        };
        assert!(matches!(daily_forecasts(&daily), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_empty_daily() {
        let daily = Daily {
            time: vec![],
            temperature_max: vec![],
            weathercode: vec![],
        };
        assert!(matches!(daily_forecasts(&daily), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_bad_date() {
        let daily = Daily {
            time: vec!["01/02/2024".to_string()],
            temperature_max: vec![Some(1.0)],
            weathercode: vec![Some(0)],
        };
        assert!(matches!(daily_forecasts(&daily), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_url() {
        let loader = ForecastLoader::new("http://localhost/v1/forecast/", USER_AGENT).unwrap();
        let url = loader.url(&calgary());
        assert!(url.starts_with("http://localhost/v1/forecast?latitude=51.0501&longitude=-114.0853"));
        assert!(url.contains("&daily=weathercode,temperature_2m_max"));
        assert!(url.contains("&hourly=temperature_2m,weathercode"));
        assert!(url.contains("&current=temperature_2m"));
        assert!(url.ends_with("&temperature_unit=celsius&timezone=auto"));
    }

    #[tokio::test]
    async fn test_load_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "51.0501"))
            .and(query_param("longitude", "-114.0853"))
            .and(query_param("daily", "weathercode,temperature_2m_max"))
            .and(query_param("temperature_unit", "celsius"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let days = load_from(&server).await.unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].condition, Condition::Rain);
    }

    #[tokio::test]
    async fn test_load_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = load_from(&server).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_load_missing_daily() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "latitude": 1.0 })),
            )
            .mount(&server)
            .await;

        assert!(matches!(load_from(&server).await, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_not_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        assert!(matches!(load_from(&server).await, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_load_transport_failure() {
        // Nothing listens on port 1.
        let loader = ForecastLoader::new("http://127.0.0.1:1/v1/forecast", USER_AGENT).unwrap();
        assert!(matches!(
            loader.load(&calgary()),
            Err(FetchError::Transport(_))
        ));
    }
}
