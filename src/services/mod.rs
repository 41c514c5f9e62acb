pub mod template_source;
pub mod version_control;

pub use template_source::TemplateSource;
pub use version_control::VersionControlService;
