// ABOUTME: Input model for the savings calculators
// ABOUTME: Field descriptions, raw form parsing and numeric validation rules

use roikit_catalog::CalculatorProfile;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, InvalidReason};

pub const FIELD_VOLUME: &str = "volumePerPeriod";
pub const FIELD_HOURLY_COST: &str = "humanHourlyCost";
pub const FIELD_TASK: &str = "selectedTaskId";
pub const FIELD_TOOL: &str = "selectedToolId";
pub const FIELD_PLATFORM: &str = "selectedPlatformId";
pub const FIELD_OVERSIGHT: &str = "oversightFactor";

const DEFAULT_VOLUME: f64 = 50.0;
const DEFAULT_HOURLY_COST: f64 = 25.0;

/// Validated values for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub volume_per_period: f64,
    pub human_hourly_cost: f64,
    pub selected_task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_tool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_platform_id: Option<String>,
}

impl CalculationInput {
    pub fn new(volume_per_period: f64, human_hourly_cost: f64, task_id: impl Into<String>) -> Self {
        Self {
            volume_per_period,
            human_hourly_cost,
            selected_task_id: task_id.into(),
            selected_tool_id: None,
            selected_platform_id: None,
        }
    }

    pub fn with_tool(mut self, tool_id: impl Into<String>) -> Self {
        self.selected_tool_id = Some(tool_id.into());
        self
    }

    pub fn with_platform(mut self, platform_id: impl Into<String>) -> Self {
        self.selected_platform_id = Some(platform_id.into());
        self
    }

    /// Check numeric fields and required ids without consulting any catalog
    pub fn validate(&self) -> Result<(), CalcError> {
        validate_positive(FIELD_VOLUME, self.volume_per_period)?;
        validate_positive(FIELD_HOURLY_COST, self.human_hourly_cost)?;

        if self.selected_task_id.trim().is_empty() {
            return Err(CalcError::invalid(FIELD_TASK, InvalidReason::Missing));
        }

        Ok(())
    }
}

/// Raw values as collected by a form or command line, before parsing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub volume: Option<String>,
    pub hourly_cost: Option<String>,
    pub task: Option<String>,
    pub tool: Option<String>,
    pub platform: Option<String>,
}

impl FormInput {
    pub fn parse(&self) -> Result<CalculationInput, CalcError> {
        let volume_per_period = parse_positive(FIELD_VOLUME, self.volume.as_deref())?;
        let human_hourly_cost = parse_positive(FIELD_HOURLY_COST, self.hourly_cost.as_deref())?;
        let selected_task_id = required_id(FIELD_TASK, self.task.as_deref())?;

        Ok(CalculationInput {
            volume_per_period,
            human_hourly_cost,
            selected_task_id,
            selected_tool_id: optional_id(self.tool.as_deref()),
            selected_platform_id: optional_id(self.platform.as_deref()),
        })
    }
}

/// Parse a required, strictly positive number
pub fn parse_positive(field: &'static str, raw: Option<&str>) -> Result<f64, CalcError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CalcError::invalid(field, InvalidReason::Missing))?;

    let value = raw
        .parse::<f64>()
        .map_err(|_| CalcError::invalid(field, InvalidReason::NotNumeric))?;

    validate_positive(field, value)?;
    Ok(value)
}

/// Reject NaN, infinities, zero and negatives
pub fn validate_positive(field: &'static str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, InvalidReason::NotFinite));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid(field, InvalidReason::NotPositive));
    }
    Ok(())
}

/// Validate a fraction in [0, 1]
pub fn validate_ratio(field: &'static str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, InvalidReason::NotFinite));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::invalid(field, InvalidReason::OutOfRange));
    }
    Ok(())
}

/// Reject a derived figure that left f64 range, blaming `field`
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, InvalidReason::Overflow))
    }
}

pub(crate) fn required_id(field: &'static str, raw: Option<&str>) -> Result<String, CalcError> {
    optional_id(raw).ok_or_else(|| CalcError::invalid(field, InvalidReason::Missing))
}

fn optional_id(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Where a choice field takes its options from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChoiceSource {
    Tasks,
    Tools,
    Platforms,
    RoiTasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FieldKind {
    Number { default: f64 },
    Choice { source: ChoiceSource },
}

/// Describes one form field a calculator needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Ordered form fields for a calculator variant
pub fn fields_for(profile: &CalculatorProfile) -> Vec<FieldSpec> {
    let mut fields = vec![
        FieldSpec {
            name: FIELD_TASK,
            label: "Task type",
            kind: FieldKind::Choice {
                source: ChoiceSource::Tasks,
            },
            required: true,
        },
        FieldSpec {
            name: FIELD_VOLUME,
            label: "Volume per month",
            kind: FieldKind::Number {
                default: DEFAULT_VOLUME,
            },
            required: true,
        },
        FieldSpec {
            name: FIELD_HOURLY_COST,
            label: "Human hourly cost",
            kind: FieldKind::Number {
                default: DEFAULT_HOURLY_COST,
            },
            required: true,
        },
        FieldSpec {
            name: FIELD_TOOL,
            label: "AI tool",
            kind: FieldKind::Choice {
                source: ChoiceSource::Tools,
            },
            required: profile.requires_tool,
        },
    ];

    if profile.uses_platform {
        fields.push(FieldSpec {
            name: FIELD_PLATFORM,
            label: "Platform",
            kind: FieldKind::Choice {
                source: ChoiceSource::Platforms,
            },
            required: true,
        });
    }

    fields
}
