//! Configuration module
//!
//! Generator settings and the descriptor family rules they carry.

pub mod family;
pub mod settings;

pub use family::{FamilyProfile, FamilyRule, SecretRef};
pub use settings::{FragmentPaths, Settings};
