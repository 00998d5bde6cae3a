use super::SettingsRepositoryTrait;
use crate::constants::ENGINE_SETTINGS_KEY;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{EngineSettings, EngineSettingsUpdate};
use log::{debug, warn};
use std::sync::{Arc, RwLock};

pub trait SettingsServiceTrait: Send + Sync {
    /// Loads the persisted engine settings, falling back to defaults when none are stored.
    fn load_engine_settings(&self) -> Result<EngineSettings>;

    /// Shared handle the valuation services read from.
    fn engine_settings(&self) -> Arc<RwLock<EngineSettings>>;

    /// Applies an update to the shared, in-memory settings.
    fn update_engine_settings(&self, update: &EngineSettingsUpdate) -> Result<EngineSettings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    engine_settings: Arc<RwLock<EngineSettings>>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Result<Self> {
        let service = Self {
            settings_repository,
            engine_settings: Arc::new(RwLock::new(EngineSettings::default())),
        };
        let loaded = service.load_engine_settings()?;
        *service
            .engine_settings
            .write()
            .map_err(|_| Error::Unexpected("engine settings lock poisoned".to_string()))? = loaded;
        Ok(service)
    }
}

impl SettingsServiceTrait for SettingsService {
    fn load_engine_settings(&self) -> Result<EngineSettings> {
        match self.settings_repository.get_setting(ENGINE_SETTINGS_KEY) {
            Ok(raw) => {
                let settings = EngineSettings::from_json(&raw)?;
                debug!("Loaded engine settings: {:?}", settings);
                Ok(settings)
            }
            Err(Error::Database(DatabaseError::NotFound(_))) => {
                warn!("No engine settings stored. Using defaults.");
                Ok(EngineSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    fn engine_settings(&self) -> Arc<RwLock<EngineSettings>> {
        self.engine_settings.clone()
    }

    fn update_engine_settings(&self, update: &EngineSettingsUpdate) -> Result<EngineSettings> {
        let mut guard = self
            .engine_settings
            .write()
            .map_err(|_| Error::Unexpected("engine settings lock poisoned".to_string()))?;
        guard.apply(update);
        Ok(guard.clone())
    }
}
