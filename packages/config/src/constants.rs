// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Roikit

// Catalog Configuration
pub const ROIKIT_CATALOG_PATH: &str = "ROIKIT_CATALOG_PATH";

// Calculation Defaults
pub const ROIKIT_OVERSIGHT_FACTOR: &str = "ROIKIT_OVERSIGHT_FACTOR";

// Preference Storage
pub const ROIKIT_PREFERENCES_PATH: &str = "ROIKIT_PREFERENCES_PATH";
pub const ROIKIT_HOME: &str = "ROIKIT_HOME";

// System Environment Variables
pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE"; // Windows

/// Directory name created under the user's home directory
pub const ROIKIT_DIR_NAME: &str = ".roikit";

/// File name of the persisted preference document
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
