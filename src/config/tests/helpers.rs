//! Shared test helpers for configuration tests.

use std::ffi::OsString;

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::ReleaseConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Helper to compose a [`ReleaseConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> ReleaseConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    ReleaseConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Configuration naming every setting needed for a run against `acme/widgets`.
pub fn complete_config() -> ReleaseConfig {
    ReleaseConfig {
        owner: Some("acme".to_owned()),
        repo: Some("widgets".to_owned()),
        branch: Some("main".to_owned()),
        prev_ref: Some("v1.0".to_owned()),
        curr_ref: Some("v1.1".to_owned()),
        ..Default::default()
    }
}

/// Converts string literals into the argument vector `load_from_iter` takes.
pub fn args(values: &[&str]) -> Vec<OsString> {
    values.iter().map(OsString::from).collect()
}
