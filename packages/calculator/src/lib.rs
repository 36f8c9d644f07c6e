// ABOUTME: Savings calculation engine shared by every calculator variant
// ABOUTME: Pure input validation, cost/savings formulas, display formatting and lead hooks

pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod roi;
pub mod service;

pub use display::{DisplayParseError, DisplayResult, DisplaySummary};
pub use engine::{
    compute, compute_with_calculator, CalculationResult, ComputeOptions, Payback,
    DEFAULT_OVERSIGHT_FACTOR,
};
pub use error::{CalcError, InvalidReason};
pub use input::{fields_for, CalculationInput, ChoiceSource, FieldKind, FieldSpec, FormInput};
pub use roi::{compute_roi, RoiForm, RoiInput, RoiResult, ROI_CALCULATOR_ID, WEEKS_PER_MONTH};
pub use service::{is_plausible_email, Calculator, LeadCaptureHook, LeadEvent, NoopLeadCapture};
