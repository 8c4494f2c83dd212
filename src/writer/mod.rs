// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Catalog serialization
//!
//! Writes the five catalog files the engine consumes. Ordering is fixed:
//! properties first, then the catalogs, then the workflow graph, whose
//! persisted form references transformation and artifact names that must
//! already be resolvable. Writes are sequential with no rollback; a
//! failure leaves earlier files in place.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::{Properties, ReplicaCatalog, SiteCatalog, TransformationCatalog};
use crate::errors::WfcatError;
use crate::workflow::Workflow;

/// Fixed file name for the properties file
pub const PROPERTIES_FILE: &str = "properties.yml";
/// Fixed file name for the site catalog
pub const SITES_FILE: &str = "sites.yml";
/// Fixed file name for the replica catalog
pub const REPLICAS_FILE: &str = "replicas.yml";
/// Fixed file name for the transformation catalog
pub const TRANSFORMATIONS_FILE: &str = "transformations.yml";
/// Default file name for the workflow graph
pub const DEFAULT_WORKFLOW_FILE: &str = "workflow.yml";

/// Writer for the engine's persisted catalog files
pub struct CatalogWriter {
    dir: PathBuf,
    workflow_file: PathBuf,
}

impl CatalogWriter {
    /// Create a writer targeting a working directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            workflow_file: PathBuf::from(DEFAULT_WORKFLOW_FILE),
        }
    }

    /// Override the workflow graph file name
    pub fn with_workflow_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.workflow_file = file.into();
        self
    }

    /// Path the workflow graph will be written to
    pub fn workflow_path(&self) -> PathBuf {
        self.dir.join(&self.workflow_file)
    }

    /// Serialize everything, overwriting existing files.
    ///
    /// Performs no validation beyond serialization; run the workflow
    /// validator first if pre-checks are wanted.
    pub fn write(
        &self,
        properties: &Properties,
        sites: &SiteCatalog,
        replicas: &ReplicaCatalog,
        transformations: &TransformationCatalog,
        workflow: &Workflow,
    ) -> Result<(), WfcatError> {
        self.write_file(PROPERTIES_FILE, &properties.to_yaml()?)?;
        self.write_file(SITES_FILE, &sites.to_yaml()?)?;
        self.write_file(REPLICAS_FILE, &replicas.to_yaml()?)?;
        self.write_file(TRANSFORMATIONS_FILE, &transformations.to_yaml()?)?;

        let workflow_path = self.workflow_path();
        std::fs::write(&workflow_path, workflow.to_yaml()?)
            .map_err(|e| WfcatError::file_write(&workflow_path, &e))?;
        info!(path = %workflow_path.display(), "wrote workflow graph");

        Ok(())
    }

    fn write_file(&self, name: &str, content: &str) -> Result<(), WfcatError> {
        let path = self.dir.join(name);
        std::fs::write(&path, content).map_err(|e| WfcatError::file_write(&path, &e))?;
        info!(path = %path.display(), "wrote catalog");
        Ok(())
    }
}

/// All file paths a write will produce, in write order
pub fn output_paths(dir: &Path, workflow_file: &Path) -> Vec<PathBuf> {
    vec![
        dir.join(PROPERTIES_FILE),
        dir.join(SITES_FILE),
        dir.join(REPLICAS_FILE),
        dir.join(TRANSFORMATIONS_FILE),
        dir.join(workflow_file),
    ]
}
