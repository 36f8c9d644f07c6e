pub mod calc;
pub mod catalog;
pub mod prefs;
pub mod utils;
