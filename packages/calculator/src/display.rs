// ABOUTME: Human-readable rendering of calculation results
// ABOUTME: Currency, percent, hour and payback formatting that parses back to numbers

use serde::Serialize;
use thiserror::Error;

use crate::engine::{CalculationResult, Payback};

const CURRENCY_DECIMALS: u32 = 2;
const PERCENT_DECIMALS: u32 = 1;
const HOURS_DECIMALS: u32 = 1;
const PAYBACK_DECIMALS: u32 = 2;

const NO_PAYBACK: &str = "No payback";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot read {field} from '{value}'")]
pub struct DisplayParseError {
    pub field: &'static str,
    pub value: String,
}

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Already far beyond the precision of `decimals`
        return value;
    }
    scaled.round() / factor
}

/// Fixed-point text using the same rounding as [`round_to`]
fn fixed(value: f64, decimals: u32, group_thousands: bool) -> String {
    // Adding 0.0 turns -0.0 into 0.0
    let rounded = round_to(value, decimals) + 0.0;
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (text.as_str(), None),
    };
    let whole = if group_thousands {
        group(whole)
    } else {
        whole.to_string()
    };

    match frac {
        Some(frac) => format!("{sign}{whole}.{frac}"),
        None => format!("{sign}{whole}"),
    }
}

fn group(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1515.5` -> `$1,515.50`, `-12.3` -> `-$12.30`
pub fn format_currency(value: f64) -> String {
    let text = fixed(value, CURRENCY_DECIMALS, true);
    match text.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${text}"),
    }
}

pub fn parse_currency(text: &str) -> Option<f64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits: String = rest.trim_start_matches('$').replace(',', "");
    let value = digits.parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", fixed(value, PERCENT_DECIMALS, false))
}

pub fn parse_percent(text: &str) -> Option<f64> {
    text.trim().strip_suffix('%')?.trim().parse().ok()
}

pub fn format_hours(value: f64) -> String {
    format!("{} hrs", fixed(value, HOURS_DECIMALS, true))
}

pub fn parse_hours(text: &str) -> Option<f64> {
    text.trim()
        .strip_suffix("hrs")?
        .trim()
        .replace(',', "")
        .parse()
        .ok()
}

pub fn format_payback(payback: &Payback) -> String {
    match payback {
        Payback::Months(months) => format!("{} months", fixed(*months, PAYBACK_DECIMALS, true)),
        Payback::NoPayback => NO_PAYBACK.to_string(),
    }
}

pub fn parse_payback(text: &str) -> Option<Payback> {
    let text = text.trim();
    if text == NO_PAYBACK {
        return Some(Payback::NoPayback);
    }
    text.strip_suffix("months")?
        .trim()
        .replace(',', "")
        .parse()
        .ok()
        .map(Payback::Months)
}

/// Result fields rendered for presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResult {
    pub human_hours: String,
    pub ai_hours: String,
    pub hours_saved: String,
    pub human_cost: String,
    pub ai_cost: String,
    pub savings: String,
    pub savings_percent: String,
    pub payback: String,
    pub quality_score: String,
}

/// Numbers recovered from a [`DisplayResult`], at display precision
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySummary {
    pub human_hours: f64,
    pub ai_hours: f64,
    pub hours_saved: f64,
    pub human_cost: f64,
    pub ai_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
    pub payback: Payback,
    pub quality_score: f64,
}

impl DisplaySummary {
    /// What a result should read back as after rendering
    pub fn expected_for(result: &CalculationResult) -> Self {
        Self {
            human_hours: round_to(result.human_hours_per_period, HOURS_DECIMALS),
            ai_hours: round_to(result.ai_hours_per_period, HOURS_DECIMALS),
            hours_saved: round_to(result.hours_saved_per_period, HOURS_DECIMALS),
            human_cost: round_to(result.human_cost_per_period, CURRENCY_DECIMALS),
            ai_cost: round_to(result.ai_cost_per_period, CURRENCY_DECIMALS),
            savings: round_to(result.savings_absolute, CURRENCY_DECIMALS),
            savings_percent: round_to(result.savings_percent, PERCENT_DECIMALS),
            payback: match result.payback_period_months {
                Payback::Months(m) => Payback::Months(round_to(m, PAYBACK_DECIMALS)),
                Payback::NoPayback => Payback::NoPayback,
            },
            quality_score: round_to(result.quality_score_percent, PERCENT_DECIMALS),
        }
    }
}

impl From<&CalculationResult> for DisplayResult {
    fn from(result: &CalculationResult) -> Self {
        Self {
            human_hours: format_hours(result.human_hours_per_period),
            ai_hours: format_hours(result.ai_hours_per_period),
            hours_saved: format_hours(result.hours_saved_per_period),
            human_cost: format_currency(result.human_cost_per_period),
            ai_cost: format_currency(result.ai_cost_per_period),
            savings: format_currency(result.savings_absolute),
            savings_percent: format_percent(result.savings_percent),
            payback: format_payback(&result.payback_period_months),
            quality_score: format_percent(result.quality_score_percent),
        }
    }
}

impl DisplayResult {
    pub fn to_numeric(&self) -> Result<DisplaySummary, DisplayParseError> {
        fn read<T>(
            field: &'static str,
            text: &str,
            parse: impl Fn(&str) -> Option<T>,
        ) -> Result<T, DisplayParseError> {
            parse(text).ok_or_else(|| DisplayParseError {
                field,
                value: text.to_string(),
            })
        }

        Ok(DisplaySummary {
            human_hours: read("humanHours", &self.human_hours, parse_hours)?,
            ai_hours: read("aiHours", &self.ai_hours, parse_hours)?,
            hours_saved: read("hoursSaved", &self.hours_saved, parse_hours)?,
            human_cost: read("humanCost", &self.human_cost, parse_currency)?,
            ai_cost: read("aiCost", &self.ai_cost, parse_currency)?,
            savings: read("savings", &self.savings, parse_currency)?,
            savings_percent: read("savingsPercent", &self.savings_percent, parse_percent)?,
            payback: read("payback", &self.payback, parse_payback)?,
            quality_score: read("qualityScore", &self.quality_score, parse_percent)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1515.5), "$1,515.50");
        assert_eq!(format_currency(82.5), "$82.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-1234567.891), "-$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$1,515.50"), Some(1515.5));
        assert_eq!(parse_currency("-$12.30"), Some(-12.3));
        assert_eq!(parse_currency("twelve"), None);
    }

    #[test]
    fn test_percent_and_hours() {
        assert_eq!(format_percent(97.8), "97.8%");
        assert_eq!(format_percent(-4.25), "-4.3%");
        assert_eq!(parse_percent("97.8%"), Some(97.8));
        assert_eq!(format_hours(1250.0), "1,250.0 hrs");
        assert_eq!(parse_hours("1,250.0 hrs"), Some(1250.0));
    }

    #[test]
    fn test_payback_text() {
        assert_eq!(format_payback(&Payback::NoPayback), "No payback");
        assert_eq!(format_payback(&Payback::Months(2.345)), "2.35 months");
        assert_eq!(parse_payback("No payback"), Some(Payback::NoPayback));
        assert_eq!(parse_payback("0.01 months"), Some(Payback::Months(0.01)));
        assert_eq!(parse_payback("soon"), None);
    }

    #[test]
    fn test_huge_values_keep_their_magnitude() {
        let big = 2f64.powi(130);
        let text = format_currency(big);
        assert_eq!(
            text,
            "$1,361,129,467,683,753,853,853,498,429,727,072,845,824.00"
        );
        assert_eq!(parse_currency(&text), Some(big));

        assert_eq!(round_to(f64::MAX, CURRENCY_DECIMALS), f64::MAX);
        assert_eq!(parse_currency(&format_currency(f64::MAX)), Some(f64::MAX));
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_percent(-0.04), "0.0%");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group("1"), "1");
        assert_eq!(group("123"), "123");
        assert_eq!(group("1234"), "1,234");
        assert_eq!(group("1234567"), "1,234,567");
    }
}
