use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{TemplateSource, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub templates: Arc<dyn TemplateSource>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        templates: Arc<dyn TemplateSource>,
    ) -> Self {
        Self {
            config,
            version_control,
            templates,
        }
    }
}
