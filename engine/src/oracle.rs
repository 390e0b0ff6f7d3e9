//! Boost token price feed
//!
//! Oracle failures never reach users: callers go through
//! [`price_or_fallback`], which degrades to a hard-coded constant with a
//! logged warning.

use log::warn;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use vaultmine_core::constants::{
    FALLBACK_NATIVE_PRICE, FALLBACK_PARTNER_PRICE, ORACLE_TIMEOUT_SECS,
};
use vaultmine_core::BoostToken;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("price request failed: {0}")]
    Request(String),

    #[error("malformed price response: {0}")]
    Malformed(String),
}

pub trait PriceOracle: Send + Sync {
    fn price(
        &self,
        token: BoostToken,
    ) -> impl Future<Output = std::result::Result<Decimal, OracleError>> + Send;
}

/// Current market price of a boost token in stable units, or the fallback
/// constant when the feed is down or returns garbage.
pub async fn price_or_fallback<O: PriceOracle>(oracle: &O, token: BoostToken) -> Decimal {
    match oracle.price(token).await {
        Ok(price) if price > Decimal::ZERO => price,
        Ok(price) => {
            warn!("oracle returned non-positive price {price} for {token:?}, using fallback");
            fallback_price(token)
        }
        Err(err) => {
            warn!("price oracle unavailable for {token:?}: {err}, using fallback");
            fallback_price(token)
        }
    }
}

pub fn fallback_price(token: BoostToken) -> Decimal {
    match token {
        BoostToken::Native => FALLBACK_NATIVE_PRICE,
        BoostToken::Partner => FALLBACK_PARTNER_PRICE,
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: f64,
}

/// HTTP price feed with a bounded per-request timeout.
pub struct HttpPriceOracle {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPriceOracle {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpPriceOracle {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn symbol(token: BoostToken) -> &'static str {
        match token {
            BoostToken::Native => "vmt",
            BoostToken::Partner => "partner",
        }
    }
}

impl PriceOracle for HttpPriceOracle {
    async fn price(&self, token: BoostToken) -> std::result::Result<Decimal, OracleError> {
        let url = format!("{}/prices/{}", self.base_url, Self::symbol(token));
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(ORACLE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| OracleError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| OracleError::Request(e.to_string()))?;

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(e.to_string()))?;

        Decimal::from_f64_retain(body.price)
            .ok_or_else(|| OracleError::Malformed(format!("unrepresentable price {}", body.price)))
    }
}
