//! Application-template descriptors: discovery, parsing, and schema.

pub mod loader;
pub mod schema;

pub use loader::{Format, candidates, load, output_path};
pub use schema::{Descriptor, Parameter, TemplateObject};
