// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for junction-runner.
//!
//! The built-in defaults live in `default-config.toml`. A user-provided TOML file may be layered
//! on top of them.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::Utf8Path;
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Configuration shared by the tree announcer and the execution event translator.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    tree: TreeConfig,
    failures: FailuresConfig,
    unknown_keys: BTreeSet<String>,
}

impl BridgeConfig {
    /// The default configuration, as TOML.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    const DEFAULT_CONFIG_LABEL: &'static str = "<default config>";

    /// The largest accepted `tree.first-test-id`.
    ///
    /// The legacy side stores ids as signed 32-bit integers.
    pub const MAX_FIRST_TEST_ID: u32 = i32::MAX as u32;

    /// Loads the default configuration, with `config_file` layered on top if given.
    pub fn from_sources(config_file: Option<&Utf8Path>) -> Result<Self, ConfigParseError> {
        let mut builder = Self::make_default_config();
        if let Some(config_file) = config_file {
            builder = builder.add_source(File::new(config_file.as_str(), FileFormat::Toml));
        }

        let label = config_file.unwrap_or(Utf8Path::new(Self::DEFAULT_CONFIG_LABEL));
        Self::build_and_deserialize_config(builder)
            .map_err(|kind| ConfigParseError::new(label, kind))
    }

    /// Returns the protocol id handed out to the first registered entry.
    pub fn first_test_id(&self) -> u32 {
        self.tree.first_test_id
    }

    /// Returns the unique-id segment prefix that marks dynamic test factories.
    pub fn factory_marker(&self) -> &str {
        &self.tree.factory_marker
    }

    /// Returns the delimiter appended after every value of a multiple-failures comparison.
    pub fn comparison_delimiter(&self) -> &str {
        &self.failures.comparison_delimiter
    }

    /// Returns the configuration keys that were present but not recognized.
    pub fn unknown_keys(&self) -> &BTreeSet<String> {
        &self.unknown_keys
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize_config(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigParseErrorKind> {
        let config = builder
            .build()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut unknown_keys = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            unknown_keys.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let deserialized: BridgeConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| ConfigParseErrorKind::DeserializeError(Box::new(error)))?;

        let first_test_id = deserialized.tree.first_test_id;
        if !(1..=Self::MAX_FIRST_TEST_ID).contains(&first_test_id) {
            return Err(ConfigParseErrorKind::InvalidFirstTestId {
                value: first_test_id,
                max: Self::MAX_FIRST_TEST_ID,
            });
        }

        Ok(Self {
            tree: deserialized.tree,
            failures: deserialized.failures,
            unknown_keys,
        })
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::from_sources(None).expect("default config is always valid")
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct BridgeConfigDeserialize {
    tree: TreeConfig,
    failures: FailuresConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TreeConfig {
    first_test_id: u32,
    factory_marker: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FailuresConfig {
    comparison_delimiter: String,
}
