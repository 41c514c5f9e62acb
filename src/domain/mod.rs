pub mod change;
pub mod recommend;
pub mod taxonomy;
pub mod template;
