//! Crate for the `lambda-telemetry` project
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod extension;
pub mod logger;
pub mod telemetry;

pub const EXTENSION_NAME: &str = "newrelic-lambda-extension";
pub const EXTENSION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value sent in the `User-Agent` header for a given extension name.
#[must_use]
pub fn user_agent(extension_name: &str) -> String {
    format!("{extension_name}/{EXTENSION_VERSION}")
}
