// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Replica catalog structures
//!
//! A replica maps a logical artifact name to a physical path on a site.
//! These describe data that exists before the workflow runs; outputs a job
//! registers at run time are the engine's business.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::WfcatError;

/// Catalog of pre-existing artifact locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplicaCatalog {
    pub replicas: Vec<ReplicaEntry>,
}

impl ReplicaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one physical location for one named artifact.
    ///
    /// Entries for distinct sites are additive. Re-registering the same
    /// (site, artifact) pair replaces the path in place; insertion order
    /// is otherwise preserved.
    pub fn add_replica(
        &mut self,
        site: impl Into<String>,
        lfn: impl Into<String>,
        pfn: impl Into<PathBuf>,
    ) -> &mut Self {
        let site = site.into();
        let lfn = lfn.into();
        let pfn = pfn.into();

        if let Some(existing) = self
            .replicas
            .iter_mut()
            .find(|r| r.site == site && r.lfn == lfn)
        {
            existing.pfn = pfn;
        } else {
            self.replicas.push(ReplicaEntry { site, lfn, pfn });
        }
        self
    }

    /// Whether any site holds a replica of the named artifact
    pub fn contains(&self, lfn: &str) -> bool {
        self.replicas.iter().any(|r| r.lfn == lfn)
    }

    /// All entries for a given artifact name, in insertion order
    pub fn locations(&self, lfn: &str) -> Vec<&ReplicaEntry> {
        self.replicas.iter().filter(|r| r.lfn == lfn).collect()
    }

    /// Serialize the catalog to YAML
    pub fn to_yaml(&self) -> Result<String, WfcatError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// One known physical location of a named artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicaEntry {
    /// Site holding the replica
    pub site: String,

    /// Logical artifact name
    pub lfn: String,

    /// Physical path on the site
    pub pfn: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut catalog = ReplicaCatalog::new();
        catalog
            .add_replica("local", "dataset.tar.gz", "input/dataset.tar.gz")
            .add_replica("local", "yolov3.cfg", "input/yolov3.cfg");

        assert!(catalog.contains("dataset.tar.gz"));
        assert!(!catalog.contains("motion_output.tar.gz"));
        assert_eq!(catalog.replicas.len(), 2);
    }

    #[test]
    fn test_distinct_sites_are_additive() {
        let mut catalog = ReplicaCatalog::new();
        catalog
            .add_replica("local", "dataset.tar.gz", "input/dataset.tar.gz")
            .add_replica("remote", "dataset.tar.gz", "/data/dataset.tar.gz");

        assert_eq!(catalog.locations("dataset.tar.gz").len(), 2);
    }

    #[test]
    fn test_same_pair_replaces_path() {
        let mut catalog = ReplicaCatalog::new();
        catalog
            .add_replica("local", "dataset.tar.gz", "input/old.tar.gz")
            .add_replica("local", "dataset.tar.gz", "input/new.tar.gz");

        let entries = catalog.locations("dataset.tar.gz");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pfn, PathBuf::from("input/new.tar.gz"));
    }
}
