//! Risk/Return Labeler
//!
//! Pure mapping from asset class and volatility proxy to static labels.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{AssetClass, RiskAssessment, RiskLevel};

/// Volatility at or above which an asset is labelled High risk
pub const HIGH_VOLATILITY: f64 = 0.06;

/// Volatility at or above which an asset is labelled Medium risk
pub const MEDIUM_VOLATILITY: f64 = 0.02;

pub fn risk_level(volatility: f64) -> RiskLevel {
    if volatility >= HIGH_VOLATILITY {
        RiskLevel::High
    } else if volatility >= MEDIUM_VOLATILITY {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Fixed expected return per class, as a ratio
pub fn expected_return(class: AssetClass) -> Decimal {
    match class {
        AssetClass::Crypto => dec!(0.08),
        AssetClass::Forex => dec!(0.02),
        AssetClass::Stock | AssetClass::Etf => dec!(0.05),
    }
}

/// Volatility assumed when the provider gave no day change
pub fn default_volatility(class: AssetClass) -> f64 {
    match class {
        AssetClass::Crypto => 0.08,
        AssetClass::Forex => 0.02,
        AssetClass::Stock | AssetClass::Etf => 0.015,
    }
}

pub fn holding_period(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => "Short-term",
        RiskLevel::Medium => "6-12 months",
        RiskLevel::Low => "12+ months",
    }
}

pub fn assess(class: AssetClass, volatility: f64) -> RiskAssessment {
    let risk = risk_level(volatility);
    RiskAssessment {
        risk,
        expected_return: expected_return(class),
        holding_period: holding_period(risk),
    }
}

/// `amount × (1 + expected_return)`, rounded to cents; `None` when it overflows
pub fn estimated_value(amount: Decimal, expected_return: Decimal) -> Option<Decimal> {
    Decimal::ONE
        .checked_add(expected_return)
        .and_then(|growth| amount.checked_mul(growth))
        .map(|value| value.round_dp(2))
}

/// Render a return ratio as a two-decimal percent string (0.08 → "8.00%")
pub fn format_percent(ratio: Decimal) -> String {
    format!("{:.2}%", ratio * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(risk_level(0.0), RiskLevel::Low);
        assert_eq!(risk_level(0.0199), RiskLevel::Low);
        assert_eq!(risk_level(0.02), RiskLevel::Medium);
        assert_eq!(risk_level(0.0599), RiskLevel::Medium);
        assert_eq!(risk_level(0.06), RiskLevel::High);
        assert_eq!(risk_level(1.5), RiskLevel::High);
    }

    #[test]
    fn test_risk_is_monotonic_in_volatility() {
        let mut previous = RiskLevel::Low;
        for step in 0..=200 {
            let level = risk_level(f64::from(step) * 0.001);
            assert!(level >= previous, "risk dropped at step {step}");
            previous = level;
        }
    }

    #[test]
    fn test_default_labels_per_class() {
        let crypto = assess(AssetClass::Crypto, default_volatility(AssetClass::Crypto));
        assert_eq!(crypto.risk, RiskLevel::High);
        assert_eq!(crypto.holding_period, "Short-term");

        let forex = assess(AssetClass::Forex, default_volatility(AssetClass::Forex));
        assert_eq!(forex.risk, RiskLevel::Medium);
        assert_eq!(forex.holding_period, "6-12 months");

        let stock = assess(AssetClass::Stock, default_volatility(AssetClass::Stock));
        assert_eq!(stock.risk, RiskLevel::Low);
        assert_eq!(stock.holding_period, "12+ months");
        assert_eq!(expected_return(AssetClass::Etf), expected_return(AssetClass::Stock));
    }

    #[test]
    fn test_estimated_value() {
        assert_eq!(estimated_value(dec!(100), dec!(0.02)), Some(dec!(102)));
        assert_eq!(estimated_value(dec!(1000), dec!(0.08)), Some(dec!(1080)));
        assert_eq!(estimated_value(dec!(33.333), dec!(0.05)), Some(dec!(35.00)));
        assert_eq!(estimated_value(dec!(12.34), dec!(0.05)), Some(dec!(12.96)));
    }

    #[test]
    fn test_estimated_value_overflow() {
        assert_eq!(estimated_value(Decimal::MAX, dec!(0.05)), None);
        assert_eq!(estimated_value(dec!(75000000000000000000000000000), dec!(0.08)), None);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.08)), "8.00%");
        assert_eq!(format_percent(dec!(0.02)), "2.00%");
        assert_eq!(format_percent(dec!(0.05)), "5.00%");
    }
}
