//! Osmosis LCD (REST) provider.
//!
//! Every query is tried against the configured endpoints in order; the first
//! successful, well-formed answer wins. When all endpoints fail the provider
//! reports [`ProviderError::DataUnavailable`] listing each endpoint's failure.

use super::responses::{
    ClaimableIncentivesResponse, ClaimableSpreadRewardsResponse, LiquidityPerTickRangeResponse,
    PoolResponse, PositionByIdResponse, SpotPriceResponse, into_rewards,
};
use crate::PoolDataProvider;
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use clapr_domain::entities::{Pool, PoolId, Position, PositionId, RewardRecord};
use clapr_domain::metrics::liquidity_distribution::TickLiquidity;
use clapr_domain::value_objects::SpotPrice;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Header pinning a Cosmos SDK query to a block height.
pub const BLOCK_HEIGHT_HEADER: &str = "x-cosmos-block-height";

const POSITION_BY_ID_PATH: &str = "/osmosis/concentratedliquidity/v1beta1/position_by_id";
const CLAIMABLE_SPREAD_REWARDS_PATH: &str =
    "/osmosis/concentratedliquidity/v1beta1/claimable_spread_rewards";
const CLAIMABLE_INCENTIVES_PATH: &str =
    "/osmosis/concentratedliquidity/v1beta1/claimable_incentives";
const LIQUIDITY_PER_TICK_RANGE_PATH: &str =
    "/osmosis/concentratedliquidity/v1beta1/liquidity_per_tick_range";
const POOLS_PATH: &str = "/osmosis/poolmanager/v1beta1/pools";

/// Joins an endpoint and a query path, keeping any path prefix the
/// endpoint carries.
#[must_use]
pub fn endpoint_url(endpoint: &str, path: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), path)
}

/// Provider backed by Osmosis REST endpoints.
#[derive(Debug, Clone)]
pub struct LcdProvider {
    client: Client,
    config: ProviderConfig,
}

impl LcdProvider {
    /// Creates a new LcdProvider.
    ///
    /// # Errors
    /// Returns an error if no endpoint is configured or the HTTP client
    /// cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.endpoints.is_empty() {
            return Err(ProviderError::InvalidConfig {
                key: crate::config::ENV_ENDPOINTS,
                value: String::new(),
            });
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Returns a provider sharing this one's client, pinned to `height`.
    #[must_use]
    pub fn at_height(&self, height: Option<u64>) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone().with_block_height(height),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let mut failures = Vec::with_capacity(self.config.endpoints.len());

        for endpoint in &self.config.endpoints {
            let url = endpoint_url(endpoint, path);
            let mut request = self.client.get(&url).query(query);
            if let Some(height) = self.config.block_height {
                request = request.header(BLOCK_HEIGHT_HEADER, height.to_string());
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    debug!(endpoint = %endpoint, resource, error = %err, "Request failed");
                    failures.push(format!("{endpoint}: {err}"));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                debug!(endpoint = %endpoint, resource, status = %status, "Endpoint returned error status");
                failures.push(format!("{endpoint}: HTTP {status}"));
                continue;
            }

            match response.json::<T>().await {
                Ok(body) => {
                    debug!(endpoint = %endpoint, resource, "Fetched");
                    return Ok(body);
                }
                Err(err) => {
                    debug!(endpoint = %endpoint, resource, error = %err, "Malformed response");
                    failures.push(format!("{endpoint}: malformed response: {err}"));
                }
            }
        }

        warn!(resource, attempts = failures.len(), "All endpoints failed");
        Err(ProviderError::unavailable(resource, failures.join("; ")))
    }
}

#[async_trait]
impl PoolDataProvider for LcdProvider {
    async fn position(&self, position_id: PositionId) -> Result<Position, ProviderError> {
        let resource = format!("position {position_id}");
        let response: PositionByIdResponse = self
            .get_json(
                &resource,
                POSITION_BY_ID_PATH,
                &[("position_id", position_id.to_string())],
            )
            .await?;
        response.position.position.into_position()
    }

    async fn pool(&self, pool_id: PoolId) -> Result<Pool, ProviderError> {
        let resource = format!("pool {pool_id}");
        let path = format!("{POOLS_PATH}/{pool_id}");
        let response: PoolResponse = self.get_json(&resource, &path, &[]).await?;
        response.pool.into_pool()
    }

    async fn spot_price(&self, pool: &Pool) -> Result<SpotPrice, ProviderError> {
        let resource = format!("spot price of pool {}", pool.id);
        let path = format!("{POOLS_PATH}/{}/prices", pool.id);
        let response: SpotPriceResponse = self
            .get_json(
                &resource,
                &path,
                &[
                    ("base_asset_denom", pool.token0_denom.clone()),
                    ("quote_asset_denom", pool.token1_denom.clone()),
                ],
            )
            .await?;
        Ok(SpotPrice::for_pool(response.value(&resource)?, pool))
    }

    async fn claimable_spread_rewards(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError> {
        let resource = format!("spread rewards of position {position_id}");
        let response: ClaimableSpreadRewardsResponse = self
            .get_json(
                &resource,
                CLAIMABLE_SPREAD_REWARDS_PATH,
                &[("position_id", position_id.to_string())],
            )
            .await?;
        into_rewards(&resource, response.claimable_spread_rewards)
    }

    async fn claimable_incentives(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<RewardRecord>, ProviderError> {
        let resource = format!("incentives of position {position_id}");
        let response: ClaimableIncentivesResponse = self
            .get_json(
                &resource,
                CLAIMABLE_INCENTIVES_PATH,
                &[("position_id", position_id.to_string())],
            )
            .await?;
        if !response.forfeited_incentives.is_empty() {
            debug!(
                position = %position_id,
                forfeited = response.forfeited_incentives.len(),
                "Ignoring forfeited incentives"
            );
        }
        into_rewards(&resource, response.claimable_incentives)
    }

    async fn liquidity_per_tick_range(
        &self,
        pool_id: PoolId,
    ) -> Result<Vec<TickLiquidity>, ProviderError> {
        let resource = format!("liquidity per tick range of pool {pool_id}");
        let response: LiquidityPerTickRangeResponse = self
            .get_json(
                &resource,
                LIQUIDITY_PER_TICK_RANGE_PATH,
                &[("pool_id", pool_id.to_string())],
            )
            .await?;
        response
            .liquidity
            .into_iter()
            .map(|row| row.into_tick_liquidity(&resource))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clapr_domain::report::YieldCalculator;
    use clapr_domain::value_objects::MeasurementWindow;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(servers: &[&MockServer]) -> LcdProvider {
        let config = ProviderConfig::default()
            .with_endpoints(servers.iter().map(|server| server.uri()).collect())
            .with_timeout(Duration::from_secs(5));
        LcdProvider::new(config).unwrap()
    }

    fn position_body(liquidity: Option<&str>) -> serde_json::Value {
        let mut position = json!({
            "position_id": "42",
            "address": "osmo1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq",
            "pool_id": "1066",
            "lower_tick": "100",
            "upper_tick": "400",
            "join_time": "2024-03-01T00:00:00Z"
        });
        if let Some(liquidity) = liquidity {
            position["liquidity"] = json!(liquidity);
        }
        json!({
            "position": {
                "position": position,
                "claimable_spread_rewards": [],
                "claimable_incentives": [],
                "forfeited_incentives": []
            }
        })
    }

    async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        assert_eq!(
            endpoint_url("https://rest.lavenderfive.com:443/osmosis", POOLS_PATH),
            "https://rest.lavenderfive.com:443/osmosis/osmosis/poolmanager/v1beta1/pools"
        );
        assert_eq!(
            endpoint_url("https://lcd.osmosis.zone/", POSITION_BY_ID_PATH),
            "https://lcd.osmosis.zone/osmosis/concentratedliquidity/v1beta1/position_by_id"
        );
    }

    #[test]
    fn test_new_requires_endpoints() {
        let config = ProviderConfig::default().with_endpoints(Vec::new());
        assert!(matches!(
            LcdProvider::new(config),
            Err(ProviderError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_at_height_keeps_everything_else() {
        let provider = LcdProvider::new(
            ProviderConfig::default().with_timeout(Duration::from_millis(1_500)),
        )
        .unwrap();
        let pinned = provider.at_height(Some(9_000_000));
        assert_eq!(pinned.config().block_height, Some(9_000_000));
        assert_eq!(pinned.config().timeout, Duration::from_millis(1_500));
        assert_eq!(pinned.config().endpoints, provider.config().endpoints);
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_report_every_failure() {
        let config = ProviderConfig::default()
            .with_endpoints(vec![
                "http://127.0.0.1:9".to_string(),
                "http://127.0.0.1:9/prefix".to_string(),
            ])
            .with_timeout(Duration::from_millis(500));
        let provider = LcdProvider::new(config).unwrap();

        match provider.position(PositionId(1)).await {
            Err(ProviderError::DataUnavailable { resource, reason }) => {
                assert_eq!(resource, "position 1");
                assert!(reason.contains("http://127.0.0.1:9:"));
                assert!(reason.contains("http://127.0.0.1:9/prefix:"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_next_endpoint_on_error_status() {
        let failing = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&failing)
            .await;

        let working = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/osmosis/poolmanager/v1beta1/pools/5/prices"))
            .and(query_param("base_asset_denom", "uosmo"))
            .and(query_param("quote_asset_denom", "uusdc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spot_price": "2.5"})))
            .expect(1)
            .mount(&working)
            .await;

        let pool = Pool::new(5, "uosmo", "uusdc");
        let spot = provider_for(&[&failing, &working])
            .spot_price(&pool)
            .await
            .unwrap();
        assert_eq!(spot, SpotPrice::for_pool(dec!(2.5), &pool));
    }

    #[tokio::test]
    async fn test_block_height_header_is_sent_when_pinned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/osmosis/poolmanager/v1beta1/pools/5/prices"))
            .and(header(BLOCK_HEIGHT_HEADER, "77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spot_price": "2.5"})))
            .mount(&server)
            .await;

        let pool = Pool::new(5, "uosmo", "uusdc");
        let provider = provider_for(&[&server]);

        let pinned = provider.at_height(Some(77)).spot_price(&pool).await.unwrap();
        assert_eq!(pinned.value, dec!(2.5));

        // Unpinned requests do not match the mock and get a 404.
        assert!(matches!(
            provider.spot_price(&pool).await,
            Err(ProviderError::DataUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_falls_through() {
        let incomplete = MockServer::start().await;
        mount_json(&incomplete, POSITION_BY_ID_PATH, position_body(None)).await;

        let complete = MockServer::start().await;
        mount_json(&complete, POSITION_BY_ID_PATH, position_body(Some("1000"))).await;

        let position = provider_for(&[&incomplete, &complete])
            .position(PositionId(42))
            .await
            .unwrap();
        assert_eq!(position.liquidity, dec!(1000));
        assert_eq!(position.pool_id, PoolId(1066));

        match provider_for(&[&incomplete]).position(PositionId(42)).await {
            Err(ProviderError::DataUnavailable { reason, .. }) => {
                assert!(reason.contains("malformed response"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_snapshot_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(POSITION_BY_ID_PATH))
            .and(query_param("position_id", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(position_body(Some("1000"))))
            .mount(&server)
            .await;
        mount_json(
            &server,
            "/osmosis/poolmanager/v1beta1/pools/1066",
            json!({"pool": {
                "@type": "/osmosis.concentratedliquidity.v1beta1.Pool",
                "id": "1066",
                "token0": "uosmo",
                "token1": "uusdc"
            }}),
        )
        .await;
        mount_json(
            &server,
            "/osmosis/poolmanager/v1beta1/pools/1066/prices",
            json!({"spot_price": "2.000000000000000000"}),
        )
        .await;
        mount_json(
            &server,
            CLAIMABLE_SPREAD_REWARDS_PATH,
            json!({"claimable_spread_rewards": [{"denom": "uosmo", "amount": "50"}]}),
        )
        .await;
        mount_json(
            &server,
            CLAIMABLE_INCENTIVES_PATH,
            json!({
                "claimable_incentives": [{"denom": "uion", "amount": "25"}],
                "forfeited_incentives": [{"denom": "uion", "amount": "3"}]
            }),
        )
        .await;

        let snapshot = provider_for(&[&server])
            .snapshot(PositionId(42))
            .await
            .unwrap();
        assert_eq!(snapshot.pool, Pool::new(1066, "uosmo", "uusdc"));
        assert_eq!(snapshot.spread_rewards, vec![RewardRecord::new("uosmo", dec!(50))]);
        assert_eq!(snapshot.incentive_rewards, vec![RewardRecord::new("uion", dec!(25))]);

        let report = YieldCalculator::new()
            .compute_snapshot(&snapshot, &MeasurementWindow::from_secs(86_400).unwrap())
            .unwrap();
        assert!((report.apr - dec!(1225.0857)).abs() < dec!(0.0001));
    }
}
