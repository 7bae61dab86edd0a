use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named query operations exposed by the API.
///
/// The name doubles as the cache key, so each operation owns an independent
/// cache slot even when two of them share an upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    GlobalStats,
    GraduatedTokens,
    Volume24h,
    TopLaunches,
    VolumeBrackets,
    ChartData,
    RiskyTokens,
    /// Checked against the token allow-list even though volume is not per-token upstream.
    TokenVolume,
    TokenInfo,
    TopHolders,
    PriceData,
}

/// Which part of the upstream response becomes the envelope `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// The full execution response, metadata included
    Whole,
    /// Only the `result` object (`rows` + `metadata`)
    ResultSet,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::GlobalStats,
        Operation::GraduatedTokens,
        Operation::Volume24h,
        Operation::TopLaunches,
        Operation::VolumeBrackets,
        Operation::ChartData,
        Operation::RiskyTokens,
        Operation::TokenVolume,
        Operation::TokenInfo,
        Operation::TopHolders,
        Operation::PriceData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GlobalStats => "getGlobalStats",
            Operation::GraduatedTokens => "getGraduatedtokens",
            Operation::Volume24h => "get24hVolume",
            Operation::TopLaunches => "getTopLaunches",
            Operation::VolumeBrackets => "getVolumeBrackets",
            Operation::ChartData => "getchartdata",
            Operation::RiskyTokens => "getRiskyTokens",
            Operation::TokenVolume => "getTokenVolume",
            Operation::TokenInfo => "getTokenInfo",
            Operation::TopHolders => "getTopHolders",
            Operation::PriceData => "getPriceData",
        }
    }

    /// Dune query backing this operation. These ids are fixed upstream.
    pub fn query_id(&self) -> u64 {
        match self {
            Operation::GlobalStats => 4996314,
            Operation::GraduatedTokens => 5013312,
            Operation::Volume24h => 4996419,
            Operation::TopLaunches | Operation::RiskyTokens => 5013341,
            Operation::VolumeBrackets => 5013376,
            Operation::ChartData => 5013509,
            Operation::TokenVolume => 5046420,
            Operation::TokenInfo => 5019005,
            Operation::TopHolders => 5018459,
            Operation::PriceData => 5019108,
        }
    }

    pub fn payload(&self) -> Payload {
        match self {
            Operation::GlobalStats => Payload::Whole,
            _ => Payload::ResultSet,
        }
    }

    /// Fixed error text returned when a token-scoped operation gets a token
    /// outside the allow-list.
    pub fn unsupported_token_message(&self) -> Option<&'static str> {
        match self {
            Operation::TokenInfo => Some("Token information not available"),
            Operation::TopHolders => Some("Top holders information not available"),
            Operation::PriceData => Some("Price data not available"),
            // Volume takes a token id too, so it is held to the same allow-list.
            Operation::TokenVolume => Some("Token volume information not available"),
            _ => None,
        }
    }

    /// Message used when the upstream replies without result rows.
    pub fn missing_data_error(&self) -> &'static str {
        match self {
            Operation::PriceData => "No price data available",
            _ => "No data returned from Dune query",
        }
    }

    /// Message used when the upstream failure carries no text of its own.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            Operation::RiskyTokens => "Failed to analyze risky tokens",
            Operation::TokenVolume => "Failed to fetch volume data from Dune",
            Operation::TokenInfo => "Failed to fetch token data from Dune",
            Operation::TopHolders => "Failed to fetch top holders data from Dune",
            Operation::PriceData => "Failed to fetch price data from Dune",
            _ => "Failed to fetch data from Dune",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}
