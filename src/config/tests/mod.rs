//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, reference, format, and request assembly
//! - `local_discovery_config`: `no_local_discovery` and checkout fallbacks

mod field_resolution;
mod helpers;
