//! Response bodies of the Osmosis LCD queries used by the provider.
//!
//! The chain encodes every integer and decimal as a JSON string; conversion
//! into domain types happens here so malformed fields surface as
//! [`ProviderError::InvalidField`].

use crate::error::ProviderError;
use clapr_domain::entities::{Pool, PoolId, Position, PositionId, RewardRecord};
use clapr_domain::metrics::liquidity_distribution::TickLiquidity;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

fn parse_field<T: FromStr>(
    resource: &str,
    field: &'static str,
    value: &str,
) -> Result<T, ProviderError> {
    value.trim().parse::<T>().map_err(|_| ProviderError::InvalidField {
        resource: resource.to_string(),
        field,
        value: value.to_string(),
    })
}

/// `GET /osmosis/concentratedliquidity/v1beta1/position_by_id`
#[derive(Debug, Clone, Deserialize)]
pub struct PositionByIdResponse {
    pub position: FullPositionBreakdown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullPositionBreakdown {
    pub position: PositionRecord,
    #[serde(default)]
    pub claimable_spread_rewards: Vec<CoinRecord>,
    #[serde(default)]
    pub claimable_incentives: Vec<CoinRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionRecord {
    pub position_id: String,
    pub pool_id: String,
    pub lower_tick: String,
    pub upper_tick: String,
    pub liquidity: String,
}

impl PositionRecord {
    /// Converts the record without validating the tick invariant; that is
    /// the yield core's job.
    pub fn into_position(self) -> Result<Position, ProviderError> {
        let resource = format!("position {}", self.position_id);
        Ok(Position {
            id: PositionId(parse_field(&resource, "position_id", &self.position_id)?),
            pool_id: PoolId(parse_field(&resource, "pool_id", &self.pool_id)?),
            lower_tick: parse_field(&resource, "lower_tick", &self.lower_tick)?,
            upper_tick: parse_field(&resource, "upper_tick", &self.upper_tick)?,
            liquidity: parse_field::<Decimal>(&resource, "liquidity", &self.liquidity)?,
        })
    }
}

/// A `Coin` or `DecCoin`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinRecord {
    pub denom: String,
    pub amount: String,
}

impl CoinRecord {
    pub fn into_reward(self, resource: &str) -> Result<RewardRecord, ProviderError> {
        let amount = parse_field::<Decimal>(resource, "amount", &self.amount)?;
        Ok(RewardRecord::new(self.denom, amount))
    }
}

pub(crate) fn into_rewards(
    resource: &str,
    coins: Vec<CoinRecord>,
) -> Result<Vec<RewardRecord>, ProviderError> {
    coins
        .into_iter()
        .map(|coin| coin.into_reward(resource))
        .collect()
}

/// `GET /osmosis/poolmanager/v1beta1/pools/{pool_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PoolResponse {
    pub pool: PoolRecord,
}

/// Only concentrated-liquidity pools carry `token0`/`token1`.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolRecord {
    pub id: String,
    pub token0: Option<String>,
    pub token1: Option<String>,
}

impl PoolRecord {
    pub fn into_pool(self) -> Result<Pool, ProviderError> {
        let resource = format!("pool {}", self.id);
        let id: u64 = parse_field(&resource, "id", &self.id)?;
        match (self.token0, self.token1) {
            (Some(token0), Some(token1)) => Ok(Pool::new(id, token0, token1)),
            _ => Err(ProviderError::unavailable(
                resource,
                "not a concentrated-liquidity pool (token0/token1 missing)",
            )),
        }
    }
}

/// `GET /osmosis/poolmanager/v1beta1/pools/{pool_id}/prices`
#[derive(Debug, Clone, Deserialize)]
pub struct SpotPriceResponse {
    pub spot_price: String,
}

impl SpotPriceResponse {
    /// Parses the price. A non-zero price too small for `Decimal`'s 28
    /// fractional digits would round to zero, so it is rejected as an
    /// invalid field instead.
    pub fn value(&self, resource: &str) -> Result<Decimal, ProviderError> {
        let value: Decimal = parse_field(resource, "spot_price", &self.spot_price)?;
        let has_nonzero_digit = self.spot_price.chars().any(|c| matches!(c, '1'..='9'));
        if value.is_zero() && has_nonzero_digit {
            return Err(ProviderError::InvalidField {
                resource: resource.to_string(),
                field: "spot_price",
                value: self.spot_price.clone(),
            });
        }
        Ok(value)
    }
}

/// `GET /osmosis/concentratedliquidity/v1beta1/claimable_spread_rewards`
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimableSpreadRewardsResponse {
    #[serde(default)]
    pub claimable_spread_rewards: Vec<CoinRecord>,
}

/// `GET /osmosis/concentratedliquidity/v1beta1/claimable_incentives`
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimableIncentivesResponse {
    #[serde(default)]
    pub claimable_incentives: Vec<CoinRecord>,
    #[serde(default)]
    pub forfeited_incentives: Vec<CoinRecord>,
}

/// `GET /osmosis/concentratedliquidity/v1beta1/liquidity_per_tick_range`
#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityPerTickRangeResponse {
    pub liquidity: Vec<TickLiquidityRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickLiquidityRecord {
    pub liquidity_amount: String,
    pub lower_tick: String,
    pub upper_tick: String,
}

impl TickLiquidityRecord {
    pub fn into_tick_liquidity(self, resource: &str) -> Result<TickLiquidity, ProviderError> {
        Ok(TickLiquidity::new(
            parse_field(resource, "lower_tick", &self.lower_tick)?,
            parse_field(resource, "upper_tick", &self.upper_tick)?,
            parse_field(resource, "liquidity_amount", &self.liquidity_amount)?,
        ))
    }
}
