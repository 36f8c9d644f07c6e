// ABOUTME: Weekly-hours ROI calculator
// ABOUTME: Converts hours saved per week into weekly, monthly and yearly savings

use roikit_catalog::Catalog;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CalcError;
use crate::input::{ensure_finite, parse_positive, required_id, validate_positive};

pub const FIELD_HOURS_PER_WEEK: &str = "hoursPerWeek";
pub const FIELD_HOURLY_RATE: &str = "hourlyRate";
pub const FIELD_ROI_TASK: &str = "taskId";

/// Average number of weeks in a month
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Calculator id reported for ROI lead events
pub const ROI_CALCULATOR_ID: &str = "roi";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInput {
    pub hours_per_week: f64,
    pub hourly_rate: f64,
    pub task_id: String,
}

impl RoiInput {
    pub fn new(hours_per_week: f64, hourly_rate: f64, task_id: impl Into<String>) -> Self {
        Self {
            hours_per_week,
            hourly_rate,
            task_id: task_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        validate_positive(FIELD_HOURS_PER_WEEK, self.hours_per_week)?;
        validate_positive(FIELD_HOURLY_RATE, self.hourly_rate)?;
        required_id(FIELD_ROI_TASK, Some(&self.task_id))?;
        Ok(())
    }
}

/// Raw ROI form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiForm {
    pub hours_per_week: Option<String>,
    pub hourly_rate: Option<String>,
    pub task: Option<String>,
}

impl RoiForm {
    pub fn parse(&self) -> Result<RoiInput, CalcError> {
        Ok(RoiInput {
            hours_per_week: parse_positive(FIELD_HOURS_PER_WEEK, self.hours_per_week.as_deref())?,
            hourly_rate: parse_positive(FIELD_HOURLY_RATE, self.hourly_rate.as_deref())?,
            task_id: required_id(FIELD_ROI_TASK, self.task.as_deref())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub task_id: String,
    pub hours_saved_per_week: f64,
    pub weekly_savings: f64,
    /// Rounded to the nearest whole currency unit
    pub monthly_savings: f64,
    pub yearly_savings: f64,
}

pub fn compute_roi(input: &RoiInput, catalog: &Catalog) -> Result<RoiResult, CalcError> {
    input.validate()?;

    let task = catalog
        .find_roi_task(&input.task_id)
        .ok_or_else(|| CalcError::UnknownTask(input.task_id.clone()))?;

    let hours_saved_per_week = input.hours_per_week * task.time_saved_ratio;
    let weekly_savings = ensure_finite(FIELD_HOURLY_RATE, hours_saved_per_week * input.hourly_rate)?;
    let monthly_savings = ensure_finite(FIELD_HOURLY_RATE, (weekly_savings * WEEKS_PER_MONTH).round())?;
    let yearly_savings = ensure_finite(FIELD_HOURLY_RATE, monthly_savings * MONTHS_PER_YEAR)?;

    debug!(task = %task.id, monthly_savings, "Computed ROI");

    Ok(RoiResult {
        task_id: task.id.clone(),
        hours_saved_per_week,
        weekly_savings,
        monthly_savings,
        yearly_savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidReason;

    #[test]
    fn test_roi_content_creation() {
        let input = RoiInput::new(10.0, 50.0, "content-creation");
        let result = compute_roi(&input, Catalog::builtin()).unwrap();

        assert!((result.hours_saved_per_week - 7.0).abs() < 1e-9);
        assert!((result.weekly_savings - 350.0).abs() < 1e-9);
        assert_eq!(result.monthly_savings, 1516.0);
        assert_eq!(result.yearly_savings, 18192.0);
    }

    #[test]
    fn test_roi_unknown_task() {
        let input = RoiInput::new(10.0, 50.0, "time-travel");
        let err = compute_roi(&input, Catalog::builtin()).unwrap_err();

        assert_eq!(err, CalcError::UnknownTask("time-travel".to_string()));
    }

    #[test]
    fn test_roi_form_missing_rate() {
        let form = RoiForm {
            hours_per_week: Some("10".to_string()),
            hourly_rate: None,
            task: Some("research".to_string()),
        };

        assert_eq!(
            form.parse(),
            Err(CalcError::invalid(FIELD_HOURLY_RATE, InvalidReason::Missing))
        );
    }

    #[test]
    fn test_roi_rejects_zero_hours() {
        let input = RoiInput::new(0.0, 50.0, "research");
        let err = compute_roi(&input, Catalog::builtin()).unwrap_err();

        assert_eq!(
            err,
            CalcError::invalid(FIELD_HOURS_PER_WEEK, InvalidReason::NotPositive)
        );
    }

    #[test]
    fn test_roi_overflow_is_rejected() {
        let input = RoiInput::new(1e300, 1e300, "content-creation");
        let err = compute_roi(&input, Catalog::builtin()).unwrap_err();

        assert_eq!(
            err,
            CalcError::invalid(FIELD_HOURLY_RATE, InvalidReason::Overflow)
        );
    }
}
