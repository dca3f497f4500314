//! Service container for dependency injection
//!
//! Wires up the factory and services from the loaded settings.

use std::sync::Arc;

use crate::application::services::CopyService;
use crate::application::ConfigurationFactory;
use crate::config::Settings;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Opens configurations by URI
    pub factory: Arc<ConfigurationFactory>,

    pub copy: CopyService,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let factory = Arc::new(ConfigurationFactory::new(Arc::clone(&settings)));
        let copy = CopyService::new(Arc::clone(&factory));

        Self {
            settings,
            factory,
            copy,
        }
    }
}
