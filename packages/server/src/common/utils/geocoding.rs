use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

/// Nominatim API response for geocoding
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocoded location for the producer directory map
#[derive(Debug, Clone)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Geocode a coastal community to lat/lng coordinates using Nominatim
/// (OpenStreetMap). Public endpoint, no credentials.
///
/// Coordinates are rounded to 3 decimal places - the directory map pins
/// communities, not individual farms.
///
/// # Arguments
/// * `community` - Community or district name (e.g., "Ribeirão da Ilha")
/// * `municipality` - Municipality (e.g., "Florianópolis")
#[instrument]
pub async fn geocode_community(community: &str, municipality: &str) -> Result<GeocodedLocation> {
    let query = format!("{}, {}, Brasil", community.trim(), municipality.trim());
    let url = format!(
        "https://nominatim.openstreetmap.org/search?q={}&format=json&limit=1",
        urlencoding::encode(&query)
    );

    debug!("Geocoding community: {}", query);

    let client = reqwest::Client::new();
    let response: Vec<NominatimResponse> = client
        .get(&url)
        .header("User-Agent", "MarsulAssociacao/1.0 (Diretório de Produtores)")
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, community = %community, "Geocoding API request failed");
            anyhow!("Geocoding API request failed: {}", e)
        })?
        .json()
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to parse geocoding response");
            anyhow!("Failed to parse geocoding response: {}", e)
        })?;

    let result = response.first().ok_or_else(|| {
        warn!(community = %community, municipality = %municipality, "Community not found by geocoding API");
        anyhow!("Community not found: {}", query)
    })?;

    let lat: f64 = result
        .lat
        .parse()
        .map_err(|e| anyhow!("Invalid latitude in response: {}", e))?;
    let lng: f64 = result
        .lon
        .parse()
        .map_err(|e| anyhow!("Invalid longitude in response: {}", e))?;

    let (rounded_lat, rounded_lng) = round_coords(lat, lng);

    debug!(
        "Geocoded {} → ({}, {})",
        query, rounded_lat, rounded_lng
    );

    Ok(GeocodedLocation {
        latitude: rounded_lat,
        longitude: rounded_lng,
        display_name: result.display_name.clone(),
    })
}

/// Round coordinates to 3 decimal places (≈100m, community-level pins)
pub fn round_coords(lat: f64, lng: f64) -> (f64, f64) {
    ((lat * 1000.0).round() / 1000.0, (lng * 1000.0).round() / 1000.0)
}
