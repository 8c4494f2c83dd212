// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Engine properties
//!
//! Free-form key/value settings forwarded to the execution engine. This
//! crate neither interprets nor validates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::WfcatError;

/// Engine configuration properties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize the properties to YAML
    pub fn to_yaml(&self) -> Result<String, WfcatError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}
