// ABOUTME: Calculator facade used by presentation layers
// ABOUTME: Runs calculations against a catalog and notifies the lead capture hook on success

use roikit_catalog::Catalog;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::engine::{compute_with_calculator, CalculationResult};
use crate::error::CalcError;
use crate::input::CalculationInput;
use crate::roi::{compute_roi, RoiInput, RoiResult, ROI_CALCULATOR_ID};

/// Emitted after a successful calculation when the visitor left an email
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadEvent {
    pub email: String,
    pub calculator_id: String,
    pub task_id: String,
    pub monthly_savings: f64,
}

/// Side channel for lead collection. Implementations must not block on delivery.
#[cfg_attr(test, mockall::automock)]
pub trait LeadCaptureHook: Send + Sync {
    fn on_result(&self, event: &LeadEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLeadCapture;

impl LeadCaptureHook for NoopLeadCapture {
    fn on_result(&self, _event: &LeadEvent) {}
}

pub struct Calculator<'a, H: LeadCaptureHook = NoopLeadCapture> {
    catalog: &'a Catalog,
    hook: H,
    oversight_override: Option<f64>,
}

impl<'a> Calculator<'a, NoopLeadCapture> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            hook: NoopLeadCapture,
            oversight_override: None,
        }
    }
}

impl<'a, H: LeadCaptureHook> Calculator<'a, H> {
    pub fn with_hook<N: LeadCaptureHook>(self, hook: N) -> Calculator<'a, N> {
        Calculator {
            catalog: self.catalog,
            hook,
            oversight_override: self.oversight_override,
        }
    }

    /// Replace every calculator's own oversight factor
    pub fn with_oversight_override(mut self, oversight_factor: Option<f64>) -> Self {
        self.oversight_override = oversight_factor;
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn calculate(
        &self,
        calculator_id: &str,
        input: &CalculationInput,
        email: Option<&str>,
    ) -> Result<CalculationResult, CalcError> {
        let result =
            compute_with_calculator(input, self.catalog, calculator_id, self.oversight_override)?;

        if let Some(email) = email {
            self.notify(LeadEvent {
                email: email.trim().to_string(),
                calculator_id: calculator_id.to_string(),
                task_id: result.task_id.clone(),
                monthly_savings: result.savings_absolute,
            });
        }

        Ok(result)
    }

    pub fn calculate_roi(
        &self,
        input: &RoiInput,
        email: Option<&str>,
    ) -> Result<RoiResult, CalcError> {
        let result = compute_roi(input, self.catalog)?;

        if let Some(email) = email {
            self.notify(LeadEvent {
                email: email.trim().to_string(),
                calculator_id: ROI_CALCULATOR_ID.to_string(),
                task_id: result.task_id.clone(),
                monthly_savings: result.monthly_savings,
            });
        }

        Ok(result)
    }

    fn notify(&self, event: LeadEvent) {
        if !is_plausible_email(&event.email) {
            warn!("Skipping lead capture for malformed email address");
            return;
        }

        debug!(calculator = %event.calculator_id, "Dispatching lead event");
        let outcome = catch_unwind(AssertUnwindSafe(|| self.hook.on_result(&event)));
        if outcome.is_err() {
            warn!(calculator = %event.calculator_id, "Lead capture hook panicked");
        }
    }
}

/// Single '@' with a non-empty local part and a dotted domain
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
