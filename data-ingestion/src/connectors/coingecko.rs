use std::time::Duration;

use chrono::{TimeZone, Utc};
use common::{MarketSnapshot, PriceSeries};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::error::FetchError;

/// CoinGecko REST connector
/// Every call is wrapped in a client-side timeout and never retried
pub struct CoinGeckoConnector {
    config: ProviderConfig,
    client: Client,
}

/// One entry of `/coins/markets`
#[derive(Debug, Deserialize)]
struct CoinMarket {
    id: String,
    symbol: String,
    name: String,
    current_price: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
    high_24h: Option<f64>,
    low_24h: Option<f64>,
    total_volume: Option<f64>,
    #[serde(default)]
    ath: Option<f64>,
    #[serde(default)]
    atl: Option<f64>,
}

impl CoinMarket {
    /// Assets without a usable price are dropped
    fn into_snapshot(self) -> Option<MarketSnapshot> {
        let price = self.current_price.filter(|p| p.is_finite() && *p > 0.0)?;
        Some(MarketSnapshot {
            id: self.id,
            symbol: self.symbol.to_uppercase(),
            name: self.name,
            current_price: price,
            high_24h: self.high_24h,
            low_24h: self.low_24h,
            volume_24h: self.total_volume.unwrap_or(0.0),
            market_cap: self.market_cap.unwrap_or(0.0),
            market_cap_rank: self.market_cap_rank,
            price_change_pct_24h: self.price_change_percentage_24h,
            ath: self.ath,
            atl: self.atl,
        })
    }
}

/// `/coins/{id}/market_chart` body: `[timestamp_ms, value]` pairs
#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    total_volumes: Vec<[f64; 2]>,
}

impl MarketChart {
    fn into_series(self) -> Result<PriceSeries, FetchError> {
        let prices = self
            .prices
            .ok_or_else(|| FetchError::Schema("market chart has no prices".to_string()))?;

        let timestamps = prices
            .iter()
            .filter_map(|[ts, _]| Utc.timestamp_millis_opt(*ts as i64).single())
            .collect::<Vec<_>>();

        Ok(PriceSeries {
            // Keep timestamps only when every point had a valid one
            timestamps: if timestamps.len() == prices.len() {
                timestamps
            } else {
                Vec::new()
            },
            prices: prices.iter().map(|[_, price]| *price).collect(),
            volumes: self.total_volumes.iter().map(|[_, volume]| *volume).collect(),
        })
    }
}

impl CoinGeckoConnector {
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::default())
    }

    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// GET `path` and decode the JSON body, aborting after `limit`
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        limit: Duration,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("x_cg_demo_api_key", key)]);
        }

        debug!("GET {} (timeout {:?})", path, limit);

        let call = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Transport {
                    status: Some(status.as_u16()),
                    message: format!("API error: {}", status),
                });
            }
            Ok::<String, FetchError>(response.text().await?)
        };

        let body = match tokio::time::timeout(limit, call).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    after_ms: limit.as_millis() as u64,
                })
            }
        };

        serde_json::from_str(&body).map_err(|e| FetchError::Schema(format!("{}: {}", path, e)))
    }
}

impl Default for CoinGeckoConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for CoinGeckoConnector {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<MarketSnapshot>, FetchError> {
        let query = [
            ("vs_currency", self.config.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", limit.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ];

        let markets: Vec<CoinMarket> = self
            .get_json("/coins/markets", &query, self.config.batch_timeout())
            .await?;

        if markets.is_empty() {
            return Err(FetchError::Schema("empty market list".to_string()));
        }

        let total = markets.len();
        let snapshots: Vec<MarketSnapshot> = markets
            .into_iter()
            .filter_map(CoinMarket::into_snapshot)
            .collect();

        info!(
            "Fetched {} market snapshots ({} without price skipped)",
            snapshots.len(),
            total - snapshots.len()
        );
        Ok(snapshots)
    }

    async fn fetch_market_chart(
        &self,
        asset_id: &str,
        days: u32,
        timeout: Duration,
    ) -> Result<PriceSeries, FetchError> {
        let path = format!("/coins/{}/market_chart", asset_id.to_lowercase());
        let query = [
            ("vs_currency", self.config.vs_currency.clone()),
            ("days", days.to_string()),
        ];

        let chart: MarketChart = self.get_json(&path, &query, timeout).await?;
        let series = chart.into_series()?;

        debug!("Fetched {} chart points for {}", series.len(), asset_id);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request with a canned HTTP response
    async fn serve_once(response: String) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        addr
    }

    fn json_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    fn connector_for(addr: SocketAddr, timeout_ms: u64) -> CoinGeckoConnector {
        CoinGeckoConnector::with_config(ProviderConfig {
            base_url: format!("http://{}", addr),
            batch_timeout_ms: timeout_ms,
            history_timeout_ms: timeout_ms,
            ..ProviderConfig::default()
        })
    }

    #[test]
    fn test_parse_coin_market() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "current_price": 69420.0,
            "price_change_percentage_24h": -2.5,
            "market_cap": 1300000000000,
            "market_cap_rank": 1,
            "high_24h": 70000,
            "low_24h": 68000,
            "total_volume": 28000000000,
            "ath": 73000,
            "atl": 67.81
        }"#;

        let market: CoinMarket = serde_json::from_str(json).unwrap();
        let snapshot = market.into_snapshot().unwrap();
        assert_eq!(snapshot.symbol, "BTC");
        assert_eq!(snapshot.market_cap_rank, Some(1));
        assert_eq!(snapshot.price_change_pct_24h, Some(-2.5));
        assert_eq!(snapshot.atl, Some(67.81));
    }

    #[test]
    fn test_market_without_price_is_dropped() {
        let json = r#"{"id": "x", "symbol": "x", "name": "X", "current_price": null,
            "price_change_percentage_24h": null, "market_cap": null, "market_cap_rank": null,
            "high_24h": null, "low_24h": null, "total_volume": null}"#;
        let market: CoinMarket = serde_json::from_str(json).unwrap();
        assert!(market.into_snapshot().is_none());
    }

    #[test]
    fn test_parse_market_chart() {
        let json = r#"{
            "prices": [[1708627200000, 100.5], [1708630800000, 101.0]],
            "total_volumes": [[1708627200000, 5000], [1708630800000, 5200]]
        }"#;
        let chart: MarketChart = serde_json::from_str(json).unwrap();
        let series = chart.into_series().unwrap();
        assert_eq!(series.prices, vec![100.5, 101.0]);
        assert_eq!(series.volumes, vec![5000.0, 5200.0]);
        assert_eq!(series.timestamps.len(), 2);
    }

    #[test]
    fn test_market_chart_without_prices_is_schema_error() {
        let chart: MarketChart = serde_json::from_str(r#"{"total_volumes": []}"#).unwrap();
        assert!(matches!(chart.into_series(), Err(FetchError::Schema(_))));
    }

    #[tokio::test]
    async fn test_fetch_markets_success() {
        let body = r#"[{"id": "ethereum", "symbol": "eth", "name": "Ethereum",
            "current_price": 3500.0, "price_change_percentage_24h": 1.8,
            "market_cap": 420000000000, "market_cap_rank": 2,
            "high_24h": 3550, "low_24h": 3400, "total_volume": 15000000000}]"#;
        let addr = serve_once(json_response(body)).await;

        let snapshots = connector_for(addr, 2_000).fetch_markets(500).await.unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, "ethereum");
        assert_eq!(snapshots[0].volume_24h, 15_000_000_000.0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let addr = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        )
        .await;

        let err = connector_for(addr, 2_000).fetch_markets(10).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_non_array_body_is_schema_error() {
        let addr = serve_once(json_response(r#"{"status": {"error_code": 429}}"#)).await;
        let err = connector_for(addr, 2_000).fetch_markets(10).await.unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }

    #[tokio::test]
    async fn test_empty_array_is_schema_error() {
        let addr = serve_once(json_response("[]")).await;
        let err = connector_for(addr, 2_000).fetch_markets(10).await.unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(socket);
            }
        });

        let err = connector_for(addr, 100)
            .fetch_market_chart("bitcoin", 30, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { after_ms: 100 }));
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = connector_for(addr, 2_000).fetch_markets(10).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { status: None, .. }));
    }
}
