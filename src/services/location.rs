use crate::config::LocationSettings;
use crate::models::{Coordinates, LocationResponse, NearbyPlace};
use chrono::Datelike;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from the external geographic APIs. These never escape
/// `lookup`; each sub-lookup degrades to a neutral value instead.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// At most this many nearby places are returned
const MAX_PLACES: usize = 8;
/// At most this many places of the same category
const MAX_PER_CATEGORY: usize = 2;

/// OSM tags that count as fitness-relevant places
const PLACE_TAGS: [&str; 7] = [
    "leisure=fitness_centre",
    "leisure=park",
    "leisure=pitch",
    "leisure=swimming_pool",
    "leisure=track",
    "natural=beach_resort",
    "natural=beach",
];

/// Address fields tried in order when reverse geocoding
const CITY_FIELDS: [&str; 9] = [
    "city",
    "town",
    "municipality",
    "village",
    "suburb",
    "neighbourhood",
    "county",
    "state_district",
    "state",
];

/// Location context client
///
/// Combines weather, season, reverse-geocoded city and nearby fitness
/// places for a coordinate pair. Every upstream failure degrades to a
/// neutral value ("unknown" weather, "Unknown" city, empty place list)
/// so a broken geo API never fails a request. Results are cached
/// in-process since weather and places change slowly.
pub struct LocationClient {
    settings: LocationSettings,
    client: Client,
    cache: moka::future::Cache<(i64, i64), LocationResponse>,
}

impl LocationClient {
    pub fn new(settings: LocationSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(settings.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        let cache = moka::future::CacheBuilder::new(settings.cache_size)
            .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
            .build();

        Self {
            settings,
            client,
            cache,
        }
    }

    /// Full location context for a coordinate pair
    pub async fn lookup(&self, latitude: f64, longitude: f64) -> LocationResponse {
        let key = cache_key(latitude, longitude);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!("Location cache hit: {:?}", key);
            return cached;
        }

        let weather = match self.fetch_weather(latitude, longitude).await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Weather lookup failed: {}", e);
                "unknown".to_string()
            }
        };

        let city = match self.reverse_geocode(latitude, longitude).await {
            Ok(city) => city,
            Err(e) => {
                tracing::warn!("Reverse geocoding failed: {}", e);
                "Unknown".to_string()
            }
        };

        let places = match self.fetch_nearby_places(latitude, longitude).await {
            Ok(places) => places,
            Err(e) => {
                tracing::warn!("Nearby places lookup failed: {}", e);
                Vec::new()
            }
        };

        let response = LocationResponse {
            weather,
            season: season_for(latitude, chrono::Utc::now().month()).to_string(),
            location: Coordinates {
                latitude,
                longitude,
            },
            city,
            available_locations: select_diverse(places),
        };

        self.cache.insert(key, response.clone()).await;

        response
    }

    /// Compact weather summary: "<symbol>, <temp>°C"
    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<String, LocationError> {
        let url = format!(
            "{}?lat={}&lon={}",
            self.settings.weather_endpoint, lat, lon
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LocationError::ApiError(format!(
                "Weather API returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let timeseries = json
            .get("properties")
            .and_then(|p| p.get("timeseries"))
            .and_then(|t| t.get(0))
            .ok_or_else(|| LocationError::InvalidResponse("Missing timeseries".into()))?;

        let temp = timeseries
            .pointer("/data/instant/details/air_temperature")
            .and_then(Value::as_f64)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let symbol = timeseries
            .pointer("/data/next_1_hours/summary/symbol_code")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        Ok(format!("{}, {}°C", symbol, temp))
    }

    /// City name for a coordinate pair, tried from the most specific
    /// address field down, with a display-name fallback
    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<String, LocationError> {
        let url = format!(
            "{}?format=json&lat={}&lon={}&zoom=14&addressdetails=1&accept-language=en",
            self.settings.geocode_endpoint, lat, lon
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(LocationError::ApiError(format!(
                "Geocoding API returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        if let Some(address) = json.get("address") {
            for field in CITY_FIELDS {
                if let Some(city) = address.get(field).and_then(Value::as_str) {
                    return Ok(city.to_string());
                }
            }
        }

        // Fallback: first meaningful component of the display name
        if let Some(display_name) = json.get("display_name").and_then(Value::as_str) {
            for part in display_name.split(',') {
                let part = part.trim();
                if part.len() > 2 && part.parse::<u64>().is_err() {
                    return Ok(part.to_string());
                }
            }
        }

        Ok("Unknown".to_string())
    }

    /// Named fitness places around the coordinate from an Overpass query
    async fn fetch_nearby_places(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<NearbyPlace>, LocationError> {
        let radius = self.settings.search_radius_m;
        let clauses: String = PLACE_TAGS
            .iter()
            .map(|tag| format!("node[{}](around:{},{},{});", tag, radius, lat, lon))
            .collect();
        let query = format!("[out:json];({});out center;", clauses);

        let response = self
            .client
            .post(&self.settings.overpass_endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("data={}", urlencoding::encode(&query)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::ApiError(format!(
                "Overpass API returned {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let elements = json
            .get("elements")
            .and_then(Value::as_array)
            .ok_or_else(|| LocationError::InvalidResponse("Missing elements array".into()))?;

        let places = elements
            .iter()
            .filter_map(|element| {
                let tags = element.get("tags")?;
                let name = tags.get("name").and_then(Value::as_str)?;

                let place_type = tags
                    .get("leisure")
                    .or_else(|| tags.get("natural"))
                    .and_then(Value::as_str)
                    .unwrap_or("other");

                Some(NearbyPlace {
                    name: name.to_string(),
                    place_type: place_type.to_string(),
                    lat: element.get("lat").and_then(Value::as_f64),
                    lon: element.get("lon").and_then(Value::as_f64),
                })
            })
            .collect();

        Ok(places)
    }
}

/// Meteorological season for a latitude and month (1-12), flipped for
/// the southern hemisphere
pub fn season_for(latitude: f64, month: u32) -> &'static str {
    let northern = match month {
        12 | 1 | 2 => "winter",
        3..=5 => "spring",
        6..=8 => "summer",
        _ => "autumn",
    };

    if latitude >= 0.0 {
        northern
    } else {
        match northern {
            "winter" => "summer",
            "spring" => "autumn",
            "summer" => "winter",
            _ => "spring",
        }
    }
}

/// Cap the place list at MAX_PLACES total and MAX_PER_CATEGORY per
/// category, preserving input order
pub fn select_diverse(places: Vec<NearbyPlace>) -> Vec<NearbyPlace> {
    let mut selected: Vec<NearbyPlace> = Vec::new();

    for place in places {
        if selected.len() >= MAX_PLACES {
            break;
        }
        let category_count = selected
            .iter()
            .filter(|p| p.place_type == place.place_type)
            .count();
        if category_count < MAX_PER_CATEGORY {
            selected.push(place);
        }
    }

    selected
}

/// Coordinates rounded to ~100m so nearby lookups share a cache entry
fn cache_key(lat: f64, lon: f64) -> (i64, i64) {
    ((lat * 1000.0).round() as i64, (lon * 1000.0).round() as i64)
}
