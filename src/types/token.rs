use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One token snapshot as returned by the launches query.
///
/// Numeric columns arrive as either JSON numbers or strings depending on the
/// query, so they are kept raw and parsed where they are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRow {
    #[serde(default)]
    pub symbol: Value,
    #[serde(default)]
    pub token_address: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub address: Value,
    #[serde(default)]
    pub price_change_pct: Value,
    #[serde(default)]
    pub pct_supply_top10_wallets: Value,
    #[serde(default)]
    pub volume_usd: Value,
    #[serde(default)]
    pub current_price_usd: Value,
    #[serde(default)]
    pub graduated_at: Value,
}

impl TokenRow {
    /// Chain address; launches queries name it `token_address`, others `address`.
    pub fn address(&self) -> &Value {
        if self.token_address.is_null() {
            &self.address
        } else {
            &self.token_address
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub symbol: Value,
    pub address: Value,
    pub price_change_pct: f64,
    pub wallet_concentration: f64,
    pub risk_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskyTokensReport {
    pub total_risky_tokens: usize,
    pub risky_tokens: Vec<RiskAssessment>,
}

impl RiskyTokensReport {
    pub fn new(risky_tokens: Vec<RiskAssessment>) -> Self {
        Self {
            total_risky_tokens: risky_tokens.len(),
            risky_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDataReport {
    pub rows: Vec<Value>,
    pub latest_price: Value,
}
