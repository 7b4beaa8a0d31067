//! `templatedoc` - AsciiDoc documentation for application templates
//!
//! Reads application-template descriptors (JSON or YAML), extracts their
//! parameters and objects into AsciiDoc tables, renders one page per
//! descriptor through a page template, and builds an index page.

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod docgen;
pub mod error;
pub mod observability;
