//! Repository traits for settings.

use crate::errors::Result;

/// Read access to persisted key/value settings.
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get a single setting value by key.
    fn get_setting(&self, setting_key: &str) -> Result<String>;
}
