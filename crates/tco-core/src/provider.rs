//! # Storage Providers
//!
//! The fixed set of bring-your-own-database infrastructure providers whose
//! storage rates are passed through at zero margin.
//!
//! ## Provider Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Lake / Warehouse        │ securityLake, bigquery                       │
//! │  Columnar Analytics      │ clickhouse, databricks                       │
//! │  Search / SIEM-Optimized │ opensearch, snowflake, elasticsearch         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys are the wire names the calculator pages send. An unrecognized key is
//! an error, never a silent fallback to the default provider.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PricingError;

/// A storage provider the platform can run on top of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Provider {
    /// Amazon Security Lake (S3 + Athena).
    #[serde(rename = "securityLake")]
    SecurityLake,
    #[serde(rename = "bigquery")]
    BigQuery,
    #[serde(rename = "clickhouse")]
    ClickHouse,
    #[serde(rename = "databricks")]
    Databricks,
    #[serde(rename = "opensearch")]
    OpenSearch,
    #[serde(rename = "snowflake")]
    Snowflake,
    #[serde(rename = "elasticsearch")]
    Elasticsearch,
}

impl Provider {
    /// Every provider, in the order the comparison pages list them.
    pub const ALL: [Provider; 7] = [
        Provider::SecurityLake,
        Provider::BigQuery,
        Provider::ClickHouse,
        Provider::Databricks,
        Provider::OpenSearch,
        Provider::Snowflake,
        Provider::Elasticsearch,
    ];

    /// Wire key, as accepted by [`str::parse`].
    pub fn key(&self) -> &'static str {
        match self {
            Provider::SecurityLake => "securityLake",
            Provider::BigQuery => "bigquery",
            Provider::ClickHouse => "clickhouse",
            Provider::Databricks => "databricks",
            Provider::OpenSearch => "opensearch",
            Provider::Snowflake => "snowflake",
            Provider::Elasticsearch => "elasticsearch",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Provider {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "securityLake" | "security_lake" => Ok(Provider::SecurityLake),
            "bigquery" => Ok(Provider::BigQuery),
            "clickhouse" => Ok(Provider::ClickHouse),
            "databricks" => Ok(Provider::Databricks),
            "opensearch" => Ok(Provider::OpenSearch),
            "snowflake" => Ok(Provider::Snowflake),
            "elasticsearch" => Ok(Provider::Elasticsearch),
            other => Err(PricingError::config(
                "providers",
                format!("unknown provider '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for provider in Provider::ALL {
            let parsed: Provider = provider.key().parse().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let err = "azureDataExplorer".parse::<Provider>().unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidConfiguration { ref table, ref reason }
                if table == "providers" && reason.contains("azureDataExplorer")
        ));
    }

    #[test]
    fn test_serde_uses_wire_keys() {
        let json = serde_json::to_string(&Provider::SecurityLake).unwrap();
        assert_eq!(json, "\"securityLake\"");
        let back: Provider = serde_json::from_str("\"opensearch\"").unwrap();
        assert_eq!(back, Provider::OpenSearch);
    }
}
