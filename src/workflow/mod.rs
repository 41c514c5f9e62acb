pub mod changes;
pub mod templates;
