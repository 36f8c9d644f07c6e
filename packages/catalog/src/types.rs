// ABOUTME: Catalog profile type definitions
// ABOUTME: Immutable coefficients that parameterize the savings formulas

use serde::{Deserialize, Serialize};

/// One category of automatable work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProfile {
    pub id: String,
    pub label: String,
    /// Human unit of volume, e.g. "articles/month"
    pub unit: String,
    /// Hours a person spends per unit
    pub human_time_per_unit: f64,
    /// Hours of AI processing per unit, normally below the human time
    pub ai_time_per_unit: f64,
    /// AI output quality relative to human work (0.0 - 1.0)
    pub quality_ratio: f64,
}

impl TaskProfile {
    /// True when the AI takes longer than a person, which yields negative savings
    pub fn is_slower_than_human(&self) -> bool {
        self.ai_time_per_unit > self.human_time_per_unit
    }
}

/// A priced automation tool or subscription tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolProfile {
    pub id: String,
    pub label: String,
    pub monthly_cost: f64,
}

/// Ecommerce platform with a multiplier applied to aggregate savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub id: String,
    pub label: String,
    pub bonus_multiplier: f64,
}

/// Task entry of the weekly-hours ROI calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiTaskProfile {
    pub id: String,
    pub label: String,
    /// Fraction of weekly hours the AI takes over (0.0 - 1.0)
    pub time_saved_ratio: f64,
}

/// One calculator variant and the constants that distinguish it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorProfile {
    pub id: String,
    pub label: String,
    /// Fraction of AI processing time billed at the human rate for review
    pub oversight_factor: f64,
    #[serde(default)]
    pub requires_tool: bool,
    #[serde(default)]
    pub uses_platform: bool,
}
