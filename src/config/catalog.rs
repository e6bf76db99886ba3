//! Strategy profile catalog

use crate::config::{StrategyKind, StrategyProfile};
use crate::data::Timeframe;
use crate::error::PairtraderError;
use crate::Result;
use std::collections::HashMap;
use tracing::debug;

/// Catalog mapping (symbol, timeframe) to a strategy profile.
///
/// Looked up once per run, before any candle is processed; a missing entry
/// is a configuration error, not a runtime one.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    profiles: HashMap<(String, Timeframe), StrategyProfile>,
}

impl ProfileCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Insert or replace a profile
    pub fn insert(
        &mut self,
        symbol: impl Into<String>,
        timeframe: Timeframe,
        profile: StrategyProfile,
    ) {
        self.profiles.insert((symbol.into(), timeframe), profile);
    }

    /// Look up the profile for a (symbol, timeframe) pair
    pub fn get(&self, symbol: &str, timeframe: Timeframe) -> Result<&StrategyProfile> {
        self.profiles
            .get(&(symbol.to_string(), timeframe))
            .ok_or_else(|| PairtraderError::ConfigurationMissing {
                symbol: symbol.to_string(),
                timeframe: timeframe.as_str().to_string(),
            })
    }

    /// Number of configured (symbol, timeframe) entries
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Load a catalog from a JSON document of the form
    /// `{"BTCUSDT": {"1h": { ...profile... }, ...}, ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, StrategyProfile>> =
            serde_json::from_str(json).map_err(|e| PairtraderError::ConfigurationInvalid {
                reason: e.to_string(),
            })?;

        let mut catalog = Self::new();
        for (symbol, by_timeframe) in raw {
            for (tf, profile) in by_timeframe {
                let timeframe: Timeframe =
                    tf.parse()
                        .map_err(|reason| PairtraderError::ConfigurationInvalid { reason })?;
                catalog.insert(symbol.clone(), timeframe, profile);
            }
        }
        debug!("loaded {} catalog entries from JSON", catalog.len());
        Ok(catalog)
    }

    /// Built-in catalog covering the six reference pairs across 15m/1h/4h.
    pub fn default_catalog() -> Self {
        let mut catalog = Self::new();

        let mut add = |symbol: &str,
                       timeframe: Timeframe,
                       kind: StrategyKind,
                       extra_caution: bool,
                       // (min_change, oversold, overbought, min_vol_ratio,
                       //  max_volatility, atr_mult, min_conf, trend_strength)
                       p: (f64, f64, f64, f64, f64, f64, f64, f64)| {
            catalog.insert(
                symbol,
                timeframe,
                StrategyProfile {
                    kind,
                    min_change_pct: p.0,
                    rsi_oversold: p.1,
                    rsi_overbought: p.2,
                    min_volume_ratio: p.3,
                    max_volatility: p.4,
                    atr_multiplier: p.5,
                    min_confidence: p.6,
                    trend_filter_strength: p.7,
                    bb_extreme: 0.2,
                    extra_caution,
                },
            );
        };

        use StrategyKind::*;
        use Timeframe::*;

        add("BTCUSDT", M15, TrendFollowing, false, (1.5, 38.0, 62.0, 1.2, 8.0, 1.8, 60.0, 0.8));
        add("BTCUSDT", H1, TrendFollowing, false, (2.0, 35.0, 65.0, 1.15, 9.0, 2.0, 58.0, 1.0));
        add("BTCUSDT", H4, TrendFollowing, false, (2.5, 32.0, 68.0, 1.1, 10.0, 2.2, 55.0, 1.2));

        add("ETHUSDT", M15, MeanReversion, false, (2.0, 35.0, 65.0, 1.1, 11.0, 2.0, 55.0, 0.6));
        add("ETHUSDT", H1, MeanReversion, false, (2.5, 33.0, 67.0, 1.15, 12.0, 2.2, 57.0, 0.8));
        add("ETHUSDT", H4, MeanReversion, false, (3.0, 30.0, 70.0, 1.2, 13.0, 2.5, 60.0, 1.0));

        add("SOLUSDT", M15, Momentum, false, (2.5, 32.0, 68.0, 1.0, 15.0, 2.3, 52.0, 0.4));
        add("SOLUSDT", H1, Momentum, false, (3.0, 30.0, 70.0, 1.05, 16.0, 2.5, 55.0, 0.5));
        add("SOLUSDT", H4, Momentum, false, (3.5, 28.0, 72.0, 1.1, 17.0, 2.8, 58.0, 0.7));

        add("BNBUSDT", M15, RangeTrading, false, (1.8, 36.0, 64.0, 1.15, 9.0, 1.9, 58.0, 0.7));
        add("BNBUSDT", H1, RangeTrading, false, (2.2, 34.0, 66.0, 1.2, 10.0, 2.1, 60.0, 0.9));
        add("BNBUSDT", H4, RangeTrading, false, (2.8, 31.0, 69.0, 1.25, 11.0, 2.3, 62.0, 1.1));

        add("ADAUSDT", M15, MeanReversion, false, (2.2, 34.0, 66.0, 1.1, 13.0, 2.1, 54.0, 0.5));
        add("ADAUSDT", H1, MeanReversion, false, (2.8, 32.0, 68.0, 1.15, 14.0, 2.3, 56.0, 0.7));
        add("ADAUSDT", H4, MeanReversion, false, (3.2, 30.0, 70.0, 1.2, 15.0, 2.6, 59.0, 0.9));

        add("DOGEUSDT", M15, Momentum, true, (3.0, 30.0, 70.0, 0.9, 20.0, 3.0, 50.0, 0.3));
        add("DOGEUSDT", H1, Momentum, true, (3.5, 28.0, 72.0, 0.95, 22.0, 3.2, 52.0, 0.4));
        add("DOGEUSDT", H4, Momentum, true, (4.0, 25.0, 75.0, 1.0, 25.0, 3.5, 55.0, 0.5));

        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_coverage() {
        let catalog = ProfileCatalog::default_catalog();
        assert_eq!(catalog.len(), 18);

        let btc = catalog.get("BTCUSDT", Timeframe::H1).unwrap();
        assert_eq!(btc.kind, StrategyKind::TrendFollowing);
        assert_eq!(btc.min_change_pct, 2.0);

        let doge = catalog.get("DOGEUSDT", Timeframe::H4).unwrap();
        assert_eq!(doge.kind, StrategyKind::Momentum);
        assert!(doge.extra_caution);
    }

    #[test]
    fn test_missing_entry_is_configuration_error() {
        let catalog = ProfileCatalog::default_catalog();
        let err = catalog.get("XRPUSDT", Timeframe::H1).unwrap_err();
        assert!(matches!(
            err,
            PairtraderError::ConfigurationMissing { .. }
        ));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "BTCUSDT": {
                "1h": {
                    "kind": "TREND_FOLLOWING",
                    "min_change_pct": 2.0,
                    "rsi_oversold": 35,
                    "rsi_overbought": 65,
                    "min_volume_ratio": 1.15,
                    "max_volatility": 9,
                    "atr_multiplier": 2.0,
                    "min_confidence": 58,
                    "trend_filter_strength": 1.0
                }
            }
        }"#;
        let catalog = ProfileCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("BTCUSDT", Timeframe::H1).is_ok());

        let err = ProfileCatalog::from_json_str("{\"BTCUSDT\": {\"3m\": {}}}").unwrap_err();
        assert!(matches!(err, PairtraderError::ConfigurationInvalid { .. }));
    }
}
