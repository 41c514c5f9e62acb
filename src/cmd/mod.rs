pub mod changes;
pub mod serve;
pub mod suggest;
pub mod templates;
