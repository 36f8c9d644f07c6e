// ABOUTME: Cost and savings formulas for the volume-based calculators
// ABOUTME: Pure function from validated input and catalog profiles to a calculation result

use roikit_catalog::{Catalog, CalculatorProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalcError, InvalidReason};
use crate::input::{
    ensure_finite, validate_ratio, CalculationInput, FIELD_HOURLY_COST, FIELD_OVERSIGHT,
    FIELD_PLATFORM, FIELD_TOOL, FIELD_VOLUME,
};

/// Share of AI processing time billed at the human rate for review
pub const DEFAULT_OVERSIGHT_FACTOR: f64 = 0.10;

/// Per-invocation parameters that distinguish calculator variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputeOptions {
    pub oversight_factor: f64,
    pub require_tool: bool,
    pub require_platform: bool,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            oversight_factor: DEFAULT_OVERSIGHT_FACTOR,
            require_tool: false,
            require_platform: false,
        }
    }
}

impl ComputeOptions {
    pub fn for_calculator(profile: &CalculatorProfile) -> Self {
        Self {
            oversight_factor: profile.oversight_factor,
            require_tool: profile.requires_tool,
            require_platform: profile.uses_platform,
        }
    }

    pub fn with_oversight_factor(mut self, oversight_factor: f64) -> Self {
        self.oversight_factor = oversight_factor;
        self
    }
}

/// Months until savings cover the tool's monthly cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "months")]
pub enum Payback {
    Months(f64),
    /// Savings are zero or negative, so the tool never pays for itself
    NoPayback,
}

impl Payback {
    fn from_savings(fixed_cost: f64, savings: f64) -> Self {
        if savings > 0.0 {
            Payback::Months(fixed_cost / savings)
        } else {
            Payback::NoPayback
        }
    }

    pub fn months(&self) -> Option<f64> {
        match self {
            Payback::Months(months) => Some(*months),
            Payback::NoPayback => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub task_id: String,
    pub tool_id: Option<String>,
    pub platform_id: Option<String>,
    pub oversight_factor: f64,
    pub human_hours_per_period: f64,
    pub ai_hours_per_period: f64,
    pub hours_saved_per_period: f64,
    pub human_cost_per_period: f64,
    pub ai_cost_per_period: f64,
    pub savings_absolute: f64,
    pub savings_percent: f64,
    pub payback_period_months: Payback,
    pub quality_score_percent: f64,
}

/// Run the savings formula for one input against the catalog.
///
/// Input is validated before any catalog lookup, so an invalid form never
/// touches the catalog. No partial result is produced on failure.
pub fn compute(
    input: &CalculationInput,
    catalog: &Catalog,
    options: &ComputeOptions,
) -> Result<CalculationResult, CalcError> {
    input.validate()?;
    validate_ratio(FIELD_OVERSIGHT, options.oversight_factor)?;

    let task = catalog
        .find_task(&input.selected_task_id)
        .ok_or_else(|| CalcError::UnknownTask(input.selected_task_id.clone()))?;

    let tool = match input.selected_tool_id.as_deref() {
        Some(id) => Some(
            catalog
                .find_tool(id)
                .ok_or_else(|| CalcError::UnknownTool(id.to_string()))?,
        ),
        None if options.require_tool => {
            return Err(CalcError::invalid(FIELD_TOOL, InvalidReason::Missing))
        }
        None => None,
    };

    let platform = match input.selected_platform_id.as_deref() {
        Some(id) => Some(
            catalog
                .find_platform(id)
                .ok_or_else(|| CalcError::UnknownPlatform(id.to_string()))?,
        ),
        None if options.require_platform => {
            return Err(CalcError::invalid(FIELD_PLATFORM, InvalidReason::Missing))
        }
        None => None,
    };

    let tool_cost = tool.map(|t| t.monthly_cost).unwrap_or(0.0);

    // Huge or tiny finite inputs can still push products out of range
    let human_hours = ensure_finite(FIELD_VOLUME, input.volume_per_period * task.human_time_per_unit)?;
    let ai_hours = ensure_finite(FIELD_VOLUME, input.volume_per_period * task.ai_time_per_unit)?;
    let human_cost = ensure_finite(FIELD_HOURLY_COST, human_hours * input.human_hourly_cost)?;
    let ai_cost = ensure_finite(
        FIELD_HOURLY_COST,
        tool_cost + ai_hours * input.human_hourly_cost * options.oversight_factor,
    )?;

    let bonus = platform.map(|p| p.bonus_multiplier).unwrap_or(1.0);
    let savings = ensure_finite(FIELD_HOURLY_COST, (human_cost - ai_cost) * bonus)?;

    let savings_percent = if human_cost > 0.0 {
        ensure_finite(FIELD_VOLUME, savings / human_cost * 100.0)?
    } else {
        0.0
    };

    let payback = Payback::from_savings(tool_cost, savings);
    if let Payback::Months(months) = payback {
        ensure_finite(FIELD_VOLUME, months)?;
    }

    debug!(
        task = %task.id,
        tool = ?tool.map(|t| &t.id),
        platform = ?platform.map(|p| &p.id),
        savings,
        "Computed savings"
    );

    Ok(CalculationResult {
        task_id: task.id.clone(),
        tool_id: tool.map(|t| t.id.clone()),
        platform_id: platform.map(|p| p.id.clone()),
        oversight_factor: options.oversight_factor,
        human_hours_per_period: human_hours,
        ai_hours_per_period: ai_hours,
        hours_saved_per_period: human_hours - ai_hours,
        human_cost_per_period: human_cost,
        ai_cost_per_period: ai_cost,
        savings_absolute: savings,
        savings_percent,
        payback_period_months: payback,
        quality_score_percent: task.quality_ratio * 100.0,
    })
}

/// Resolve a calculator variant and run it, optionally overriding its oversight factor
pub fn compute_with_calculator(
    input: &CalculationInput,
    catalog: &Catalog,
    calculator_id: &str,
    oversight_override: Option<f64>,
) -> Result<CalculationResult, CalcError> {
    input.validate()?;

    let profile = catalog
        .find_calculator(calculator_id)
        .ok_or_else(|| CalcError::UnknownCalculator(calculator_id.to_string()))?;

    let mut options = ComputeOptions::for_calculator(profile);
    if let Some(factor) = oversight_override {
        options = options.with_oversight_factor(factor);
    }

    compute(input, catalog, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_payback_sentinel_for_non_positive_savings() {
        assert_eq!(Payback::from_savings(20.0, 0.0), Payback::NoPayback);
        assert_eq!(Payback::from_savings(20.0, -10.0), Payback::NoPayback);
        assert_eq!(Payback::from_savings(20.0, 40.0), Payback::Months(0.5));
    }

    #[test]
    fn test_free_tool_pays_back_immediately() {
        let input = CalculationInput::new(10.0, 40.0, "social-media");
        let result = compute(&input, Catalog::builtin(), &ComputeOptions::default()).unwrap();

        assert_eq!(result.payback_period_months, Payback::Months(0.0));
        assert_eq!(result.tool_id, None);
    }

    #[test]
    fn test_platform_bonus_scales_savings() {
        let catalog = Catalog::builtin();
        let base = CalculationInput::new(100.0, 30.0, "product-descriptions").with_tool("jasper");
        let options = ComputeOptions::default().with_oversight_factor(0.25);

        let plain = compute(&base, catalog, &options).unwrap();
        let shopify = compute(&base.clone().with_platform("shopify"), catalog, &options).unwrap();

        assert_close(shopify.savings_absolute, plain.savings_absolute * 1.2);
        assert_close(shopify.human_cost_per_period, plain.human_cost_per_period);
        assert_close(shopify.ai_cost_per_period, plain.ai_cost_per_period);
        assert_eq!(shopify.platform_id.as_deref(), Some("shopify"));
    }

    #[test]
    fn test_required_tool_missing() {
        let input = CalculationInput::new(10.0, 40.0, "content-writing");
        let options = ComputeOptions {
            require_tool: true,
            ..Default::default()
        };

        let err = compute(&input, Catalog::builtin(), &options).unwrap_err();
        assert_eq!(err, CalcError::invalid(FIELD_TOOL, InvalidReason::Missing));
    }

    #[test]
    fn test_invalid_oversight_factor() {
        let input = CalculationInput::new(10.0, 40.0, "content-writing");
        let options = ComputeOptions::default().with_oversight_factor(1.5);

        let err = compute(&input, Catalog::builtin(), &options).unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid(FIELD_OVERSIGHT, InvalidReason::OutOfRange)
        );
    }

    #[test]
    fn test_compute_with_calculator_uses_profile_factor() {
        let input = CalculationInput::new(20.0, 50.0, "data-analysis");
        let result =
            compute_with_calculator(&input, Catalog::builtin(), "agency", None).unwrap();

        assert_eq!(result.oversight_factor, 0.7);
        // 20 reports * 1h * $50 * 0.7
        assert_close(result.ai_cost_per_period, 700.0);
    }

    #[test]
    fn test_compute_with_calculator_override() {
        let input = CalculationInput::new(20.0, 50.0, "data-analysis");
        let result =
            compute_with_calculator(&input, Catalog::builtin(), "agency", Some(0.1)).unwrap();

        assert_eq!(result.oversight_factor, 0.1);
        assert_close(result.ai_cost_per_period, 100.0);
    }

    #[test]
    fn test_unknown_calculator() {
        let input = CalculationInput::new(20.0, 50.0, "data-analysis");
        let err = compute_with_calculator(&input, Catalog::builtin(), "mystery", None).unwrap_err();

        assert_eq!(err, CalcError::UnknownCalculator("mystery".to_string()));
    }
}
