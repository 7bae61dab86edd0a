//! Risky-token classification.
//!
//! Two independent rules run on every row: a price-move rule (pump or rug)
//! and a holder-concentration rule. Rows that trip neither are dropped.

use serde_json::Value;

use super::numeric::{is_truthy, parse_lenient};
use crate::types::{RiskAssessment, TokenRow};

/// Price change (percent) above which a token is treated as pumped.
pub const PUMP_THRESHOLD_PCT: f64 = 1000.0;
/// Price change (percent) below which a token is treated as rugged.
pub const RUG_THRESHOLD_PCT: f64 = -90.0;
/// Share of supply held by the top 10 wallets above which a token is flagged.
pub const CONCENTRATION_THRESHOLD_PCT: f64 = 90.0;

pub const PUMP_REASON: &str = "Token likely being pumped, risk of being rugged";
pub const RUG_REASON: &str = "Rugged, liquidity pulled";
pub const CONCENTRATION_REASON: &str = "High top wallet concentration";

const REASON_SEPARATOR: &str = " & ";

/// Classify raw upstream rows, keeping only the flagged ones.
///
/// Never fails: a row that is not an object, or whose numeric columns do not
/// parse, is simply not flagged.
pub fn classify(rows: &[Value]) -> Vec<RiskAssessment> {
    rows.iter()
        .map(|row| serde_json::from_value::<TokenRow>(row.clone()).unwrap_or_default())
        .map(|row| assess(&row))
        .filter(|assessment| !assessment.risk_reason.is_empty())
        .collect()
}

/// Assess a single row. An empty `risk_reason` means the row is not risky.
pub fn assess(row: &TokenRow) -> RiskAssessment {
    let price_change = parse_lenient(&row.price_change_pct);
    let concentration = if is_truthy(&row.pct_supply_top10_wallets) {
        parse_lenient(&row.pct_supply_top10_wallets)
    } else {
        Some(0.0)
    };

    let mut reasons: Vec<&str> = Vec::with_capacity(2);

    if let Some(pct) = price_change {
        if pct > PUMP_THRESHOLD_PCT {
            reasons.push(PUMP_REASON);
        } else if pct < RUG_THRESHOLD_PCT {
            reasons.push(RUG_REASON);
        }
    }

    if matches!(concentration, Some(pct) if pct > CONCENTRATION_THRESHOLD_PCT) {
        reasons.push(CONCENTRATION_REASON);
    }

    RiskAssessment {
        symbol: row.symbol.clone(),
        address: row.address().clone(),
        price_change_pct: price_change.unwrap_or(0.0),
        wallet_concentration: concentration.unwrap_or(0.0),
        risk_reason: reasons.join(REASON_SEPARATOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(price_change: Value, concentration: Option<Value>) -> Value {
        let mut row = json!({
            "symbol": "PEPE",
            "token_address": "So1anaAddr",
            "price_change_pct": price_change,
        });
        if let Some(c) = concentration {
            row["pct_supply_top10_wallets"] = c;
        }
        row
    }

    #[test]
    fn test_pump_rule() {
        let result = classify(&[row(json!("1500"), None)]);
        assert_eq!(result.len(), 1);
        assert!(result[0].risk_reason.contains("likely being pumped"));
        assert_eq!(result[0].price_change_pct, 1500.0);
        assert_eq!(result[0].address, json!("So1anaAddr"));
    }

    #[test]
    fn test_rug_rule() {
        let result = classify(&[row(json!("-95"), None)]);
        assert_eq!(result.len(), 1);
        assert!(result[0].risk_reason.contains("liquidity pulled"));
    }

    #[test]
    fn test_quiet_token_is_excluded() {
        assert!(classify(&[row(json!("50"), None)]).is_empty());
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let rows = [
            row(json!(1000), None),
            row(json!(-90), None),
            row(json!(0), Some(json!(90))),
        ];
        assert!(classify(&rows).is_empty());
    }

    #[test]
    fn test_concentration_rule_standalone() {
        let result = classify(&[row(json!("50"), Some(json!("95")))]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].risk_reason, "High top wallet concentration");
        assert_eq!(result[0].wallet_concentration, 95.0);
    }

    #[test]
    fn test_combined_reasons_keep_order() {
        let result = classify(&[row(json!("2000"), Some(json!("92")))]);
        assert_eq!(
            result[0].risk_reason,
            "Token likely being pumped, risk of being rugged & High top wallet concentration"
        );
    }

    #[test]
    fn test_rug_and_concentration() {
        let result = classify(&[row(json!(-99.5), Some(json!(97.2)))]);
        assert_eq!(
            result[0].risk_reason,
            "Rugged, liquidity pulled & High top wallet concentration"
        );
    }

    #[test]
    fn test_unparseable_fields_degrade_to_zero() {
        assert!(classify(&[row(json!("not-a-number"), None)]).is_empty());

        let assessment = assess(&TokenRow {
            price_change_pct: json!("not-a-number"),
            pct_supply_top10_wallets: json!("n/a"),
            ..TokenRow::default()
        });
        assert_eq!(assessment.price_change_pct, 0.0);
        assert_eq!(assessment.wallet_concentration, 0.0);
        assert!(assessment.risk_reason.is_empty());
    }

    #[test]
    fn test_concentration_still_flags_when_price_unparseable() {
        let result = classify(&[row(Value::Null, Some(json!(99)))]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price_change_pct, 0.0);
        assert_eq!(result[0].risk_reason, CONCENTRATION_REASON);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let rows = [json!(42), json!("row"), json!(null), row(json!("5000"), None)];
        let result = classify(&rows);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].symbol, json!("PEPE"));
    }

    #[test]
    fn test_address_falls_back_to_address_column() {
        let result = classify(&[json!({"address": "Addr2", "price_change_pct": 2000})]);
        assert_eq!(result[0].address, json!("Addr2"));
        assert_eq!(result[0].symbol, Value::Null);
    }

    #[test]
    fn test_serialized_shape() {
        let result = classify(&[row(json!("1500"), None)]);
        let value = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "symbol": "PEPE",
                "address": "So1anaAddr",
                "priceChangePct": 1500.0,
                "walletConcentration": 0.0,
                "riskReason": PUMP_REASON,
            })
        );
    }
}
