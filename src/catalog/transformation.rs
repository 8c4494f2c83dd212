// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Transformation catalog structures
//!
//! A transformation is an executable unit bound to a site, optionally run
//! inside a container. Container references are resolved by name and
//! rejected eagerly when dangling, rather than deferred to the engine's
//! own submission-time validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::WfcatError;

/// Catalog of transformations and the containers they run in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformationCatalog {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,

    pub transformations: Vec<Transformation>,
}

impl TransformationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container. Duplicate names are rejected.
    pub fn add_container(&mut self, container: Container) -> Result<(), WfcatError> {
        if self.containers.iter().any(|c| c.name == container.name) {
            return Err(WfcatError::DuplicateContainer {
                name: container.name,
            });
        }
        self.containers.push(container);
        Ok(())
    }

    /// Register a transformation. Duplicate names are rejected, and a
    /// reference to a container that was never added fails fast.
    pub fn add_transformation(&mut self, transformation: Transformation) -> Result<(), WfcatError> {
        if self
            .transformations
            .iter()
            .any(|t| t.name == transformation.name)
        {
            return Err(WfcatError::DuplicateTransformation {
                name: transformation.name,
            });
        }

        if let Some(container) = &transformation.container {
            if !self.containers.iter().any(|c| &c.name == container) {
                return Err(WfcatError::UnknownContainer {
                    transformation: transformation.name,
                    container: container.clone(),
                });
            }
        }

        self.transformations.push(transformation);
        Ok(())
    }

    /// Get a transformation by name
    pub fn get_transformation(&self, name: &str) -> Option<&Transformation> {
        self.transformations.iter().find(|t| t.name == name)
    }

    /// Serialize the catalog to YAML
    pub fn to_yaml(&self) -> Result<String, WfcatError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// A single executable unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    /// Transformation name (must be unique within the catalog)
    pub name: String,

    /// Site that can run this transformation
    pub site: String,

    /// Physical path of the executable
    pub pfn: PathBuf,

    /// Whether the executable is copied to the execution site.
    /// `false` means it is assumed pre-installed and must not be staged.
    pub stageable: bool,

    /// Container this transformation runs in, by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

impl Transformation {
    pub fn new(
        name: impl Into<String>,
        site: impl Into<String>,
        pfn: impl Into<PathBuf>,
        stageable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            site: site.into(),
            pfn: pfn.into(),
            stageable,
            container: None,
        }
    }

    /// Bind this transformation to a container by name
    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }
}

/// A container image registered with the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name (must be unique within the catalog)
    pub name: String,

    /// Image packaging format
    #[serde(rename = "type")]
    pub format: ContainerFormat,

    /// Path to the image archive
    pub image: PathBuf,

    /// Site where the image is considered resident
    pub image_site: String,
}

impl Container {
    pub fn new(
        name: impl Into<String>,
        format: ContainerFormat,
        image: impl Into<PathBuf>,
        image_site: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            format,
            image: image.into(),
            image_site: image_site.into(),
        }
    }
}

/// Container image packaging formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Docker,
    Singularity,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Docker => write!(f, "docker"),
            Self::Singularity => write!(f, "singularity"),
        }
    }
}
