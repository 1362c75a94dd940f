pub mod json;
pub mod method;
pub mod path;
