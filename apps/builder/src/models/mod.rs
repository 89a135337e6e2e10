pub mod draft;
pub mod resume;
