// src/api.rs
// HTTP client for the offers endpoint: one GET per load, lenient per-record
// decoding so a single malformed entry cannot take down the whole feed.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::BolsaError;
use crate::offer::Offer;

#[derive(Clone)]
pub struct OffersClient {
    client: Client,
    endpoint: String,
}

impl OffersClient {
    /// An explicit endpoint (CLI flag) wins over the configured one.
    pub fn new(config: &Config, endpoint_override: Option<&str>) -> Self {
        let endpoint = endpoint_override
            .map(str::to_string)
            .unwrap_or_else(|| config.api.endpoint.clone());
        info!("Offers endpoint: {}", endpoint);
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the feed once. No retry and no timeout: a failure is reported
    /// to the caller, which keeps whatever list it already had.
    pub async fn fetch_offers(&self) -> Result<Vec<Offer>, BolsaError> {
        debug!("Fetching offers from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Offers endpoint answered {}", status);
            return Err(BolsaError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        // The whole body must be a JSON array; individual records inside it
        // are decoded leniently.
        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| BolsaError::MalformedFeed(e.to_string()))?;

        let offers = decode_records(records);
        info!("Fetched {} offers", offers.len());
        Ok(offers)
    }
}

/// Decodes each record on its own, skipping (and logging) malformed ones so
/// the rest of the feed still loads.
fn decode_records(records: Vec<serde_json::Value>) -> Vec<Offer> {
    let total = records.len();
    let mut offers = Vec::with_capacity(total);
    for record in records {
        match serde_json::from_value::<Offer>(record) {
            Ok(offer) => offers.push(offer),
            Err(e) => warn!("Skipping malformed offer record: {}", e),
        }
    }
    if offers.len() < total {
        warn!(
            "Dropped {} of {} offer records from the feed",
            total - offers.len(),
            total
        );
    }
    offers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good_record() -> serde_json::Value {
        json!({
            "id": "1",
            "courseName": "Sistemas de Informação",
            "rating": 4.0,
            "fullPrice": 500.0,
            "offeredPrice": 300.0,
            "kind": "ead",
            "level": "tecnologo",
            "iesLogo": "logo.png",
            "iesName": "UNIBAR"
        })
    }

    #[test]
    fn decodes_a_well_formed_feed() {
        let offers = decode_records(vec![good_record(), good_record()]);
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].course_name, "Sistemas de Informação");
    }

    #[test]
    fn skips_malformed_records_and_keeps_the_rest() {
        let offers = decode_records(vec![
            good_record(),
            json!({ "id": "2", "courseName": "Sem preço" }),
            json!("not even an object"),
            good_record(),
        ]);
        assert_eq!(offers.len(), 2);
    }

    #[test]
    fn empty_feed_decodes_to_an_empty_list() {
        assert!(decode_records(Vec::new()).is_empty());
    }

    #[test]
    fn decodes_the_bundled_sample_feed() {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(include_str!("../demos/offers.json")).unwrap();
        let offers = decode_records(records);
        assert_eq!(offers.len(), 8);
        assert_eq!(offers[0].course_name, "Administração");
        assert_eq!(offers[0].kind, crate::offer::Kind::Presencial);
        assert_eq!(offers[7].level, crate::offer::Level::Tecnologo);
    }

    #[test]
    fn endpoint_override_wins_over_config() {
        let config = Config::default();
        let client = OffersClient::new(&config, Some("http://yonder:9999/offers"));
        assert_eq!(client.endpoint(), "http://yonder:9999/offers");

        let client = OffersClient::new(&config, None);
        assert_eq!(client.endpoint(), "http://localhost:3000/offers");
    }
}
