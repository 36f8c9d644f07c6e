// ABOUTME: Catalog loading, validation and lookup
// ABOUTME: Parses catalog JSON once and serves read-only profiles by stable id

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{CalculatorProfile, PlatformProfile, RoiTaskProfile, TaskProfile, ToolProfile};

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

lazy_static! {
    /// Catalog compiled into the binary
    pub static ref BUILTIN_CATALOG: Catalog =
        Catalog::from_json_str(BUILTIN_CATALOG_JSON).expect("Built-in catalog is invalid");
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Empty id in {table}")]
    EmptyId { table: &'static str },

    #[error("Duplicate id '{id}' in {table}")]
    DuplicateId { table: &'static str, id: String },

    #[error("Invalid {field} for '{id}' in {table}: {value} ({rule})")]
    InvalidCoefficient {
        table: &'static str,
        id: String,
        field: &'static str,
        value: f64,
        rule: &'static str,
    },
}

/// Read-only lookup tables consumed by the calculation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    version: String,
    #[serde(default)]
    tasks: Vec<TaskProfile>,
    #[serde(default)]
    tools: Vec<ToolProfile>,
    #[serde(default)]
    platforms: Vec<PlatformProfile>,
    #[serde(default)]
    roi_tasks: Vec<RoiTaskProfile>,
    #[serde(default)]
    calculators: Vec<CalculatorProfile>,
}

impl Catalog {
    /// The catalog shipped with Roikit
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        debug!(
            "Loaded catalog {} ({} tasks, {} tools, {} platforms, {} ROI tasks, {} calculators)",
            catalog.version,
            catalog.tasks.len(),
            catalog.tools.len(),
            catalog.platforms.len(),
            catalog.roi_tasks.len(),
            catalog.calculators.len()
        );
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        debug!("Reading catalog from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn find_task(&self, id: &str) -> Option<&TaskProfile> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_tool(&self, id: &str) -> Option<&ToolProfile> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn find_platform(&self, id: &str) -> Option<&PlatformProfile> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn find_roi_task(&self, id: &str) -> Option<&RoiTaskProfile> {
        self.roi_tasks.iter().find(|t| t.id == id)
    }

    pub fn find_calculator(&self, id: &str) -> Option<&CalculatorProfile> {
        self.calculators.iter().find(|c| c.id == id)
    }

    /// Tasks in catalog order
    pub fn list_tasks(&self) -> &[TaskProfile] {
        &self.tasks
    }

    pub fn list_tools(&self) -> &[ToolProfile] {
        &self.tools
    }

    pub fn list_platforms(&self) -> &[PlatformProfile] {
        &self.platforms
    }

    pub fn list_roi_tasks(&self) -> &[RoiTaskProfile] {
        &self.roi_tasks
    }

    pub fn list_calculators(&self) -> &[CalculatorProfile] {
        &self.calculators
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_ids("tasks", self.tasks.iter().map(|t| t.id.as_str()))?;
        check_ids("tools", self.tools.iter().map(|t| t.id.as_str()))?;
        check_ids("platforms", self.platforms.iter().map(|p| p.id.as_str()))?;
        check_ids("roiTasks", self.roi_tasks.iter().map(|t| t.id.as_str()))?;
        check_ids("calculators", self.calculators.iter().map(|c| c.id.as_str()))?;

        for task in &self.tasks {
            let field = Field::new("tasks", &task.id);
            field.positive("humanTimePerUnit", task.human_time_per_unit)?;
            field.non_negative("aiTimePerUnit", task.ai_time_per_unit)?;
            field.ratio("qualityRatio", task.quality_ratio)?;

            if task.is_slower_than_human() {
                warn!(
                    "Task '{}' takes longer with AI ({}h) than by hand ({}h); savings will be negative",
                    task.id, task.ai_time_per_unit, task.human_time_per_unit
                );
            }
        }

        for tool in &self.tools {
            Field::new("tools", &tool.id).non_negative("monthlyCost", tool.monthly_cost)?;
        }

        for platform in &self.platforms {
            Field::new("platforms", &platform.id)
                .non_negative("bonusMultiplier", platform.bonus_multiplier)?;
        }

        for task in &self.roi_tasks {
            Field::new("roiTasks", &task.id).ratio("timeSavedRatio", task.time_saved_ratio)?;
        }

        for calculator in &self.calculators {
            Field::new("calculators", &calculator.id)
                .ratio("oversightFactor", calculator.oversight_factor)?;
        }

        Ok(())
    }
}

fn check_ids<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyId { table });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Coefficient checks for a single catalog entry
struct Field<'a> {
    table: &'static str,
    id: &'a str,
}

impl<'a> Field<'a> {
    fn new(table: &'static str, id: &'a str) -> Self {
        Self { table, id }
    }

    fn positive(&self, field: &'static str, value: f64) -> Result<(), CatalogError> {
        self.check(field, value, value.is_finite() && value > 0.0, "must be > 0")
    }

    fn non_negative(&self, field: &'static str, value: f64) -> Result<(), CatalogError> {
        self.check(field, value, value.is_finite() && value >= 0.0, "must be >= 0")
    }

    fn ratio(&self, field: &'static str, value: f64) -> Result<(), CatalogError> {
        self.check(
            field,
            value,
            value.is_finite() && (0.0..=1.0).contains(&value),
            "must be between 0 and 1",
        )
    }

    fn check(
        &self,
        field: &'static str,
        value: f64,
        ok: bool,
        rule: &'static str,
    ) -> Result<(), CatalogError> {
        if ok {
            Ok(())
        } else {
            Err(CatalogError::InvalidCoefficient {
                table: self.table,
                id: self.id.to_string(),
                field,
                value,
                rule,
            })
        }
    }
}
