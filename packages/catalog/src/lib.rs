// ABOUTME: Static reference catalog for the savings calculators
// ABOUTME: JSON-backed task, tool, platform and calculator profiles with in-memory lookup

pub mod registry;
pub mod types;

pub use registry::{Catalog, CatalogError, BUILTIN_CATALOG};
pub use types::{CalculatorProfile, PlatformProfile, RoiTaskProfile, TaskProfile, ToolProfile};
