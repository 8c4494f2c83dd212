// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Site catalog structures
//!
//! A site is an execution or storage location. Storage sites expose
//! directories (shared scratch, long-term storage) behind file servers;
//! execution sites carry scheduling profiles that the engine interprets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::WfcatError;

/// Catalog of execution and storage sites
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteCatalog {
    pub sites: Vec<Site>,
}

impl SiteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a site. Duplicate names are rejected and the first
    /// registration is left untouched.
    pub fn add_site(&mut self, site: Site) -> Result<(), WfcatError> {
        if self.sites.iter().any(|s| s.name == site.name) {
            return Err(WfcatError::DuplicateSite { name: site.name });
        }
        self.sites.push(site);
        Ok(())
    }

    /// Get a site by name
    pub fn get_site(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name == name)
    }

    /// Serialize the catalog to YAML
    pub fn to_yaml(&self) -> Result<String, WfcatError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// A single execution or storage site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Site name (must be unique within the catalog)
    pub name: String,

    /// Storage directories exposed by this site
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<Directory>,

    /// Namespaced scheduling profiles, opaque to this crate.
    /// Stored and forwarded verbatim for the engine to interpret.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, BTreeMap<String, String>>,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directories: Vec::new(),
            profiles: BTreeMap::new(),
        }
    }

    /// Add a storage directory
    pub fn add_directory(mut self, directory: Directory) -> Self {
        self.directories.push(directory);
        self
    }

    /// Add a profile entry under a namespace
    pub fn add_profile(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.profiles
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

/// A storage directory declaration on a site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Role of this directory
    #[serde(rename = "directoryType")]
    pub role: DirectoryRole,

    /// Filesystem path on the site
    pub path: String,

    /// Access endpoints for this directory
    #[serde(default)]
    pub file_servers: Vec<FileServer>,
}

impl Directory {
    pub fn new(role: DirectoryRole, path: impl Into<String>) -> Self {
        Self {
            role,
            path: path.into(),
            file_servers: Vec::new(),
        }
    }

    /// Add an access endpoint
    pub fn add_file_server(mut self, server: FileServer) -> Self {
        self.file_servers.push(server);
        self
    }
}

/// Role of a site directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DirectoryRole {
    /// Scratch space shared between jobs during execution
    SharedScratch,
    /// Long-term storage for staged-out outputs
    LocalStorage,
}

impl std::fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharedScratch => write!(f, "sharedScratch"),
            Self::LocalStorage => write!(f, "localStorage"),
        }
    }
}

/// A protocol endpoint through which a directory is reachable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileServer {
    /// Endpoint URL (protocol + path)
    pub url: String,

    /// Operations the endpoint supports
    pub operation: FileServerOperation,
}

impl FileServer {
    pub fn new(url: impl Into<String>, operation: FileServerOperation) -> Self {
        Self {
            url: url.into(),
            operation,
        }
    }
}

/// Operations a file server endpoint supports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileServerOperation {
    Get,
    Put,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_site() -> Site {
        Site::new("local").add_directory(
            Directory::new(DirectoryRole::SharedScratch, "/wf/scratch")
                .add_file_server(FileServer::new("file:///wf/scratch", FileServerOperation::All)),
        )
    }

    #[test]
    fn test_add_site() {
        let mut catalog = SiteCatalog::new();
        catalog.add_site(local_site()).unwrap();

        let site = catalog.get_site("local").unwrap();
        assert_eq!(site.directories.len(), 1);
        assert_eq!(site.directories[0].role, DirectoryRole::SharedScratch);
    }

    #[test]
    fn test_duplicate_site_rejected() {
        let mut catalog = SiteCatalog::new();
        catalog.add_site(local_site()).unwrap();

        let second = Site::new("local");
        let result = catalog.add_site(second);
        assert!(matches!(result, Err(WfcatError::DuplicateSite { .. })));

        // First registration untouched
        assert_eq!(catalog.get_site("local").unwrap().directories.len(), 1);
        assert_eq!(catalog.sites.len(), 1);
    }

    #[test]
    fn test_profiles_are_namespaced() {
        let site = Site::new("condorpool")
            .add_profile("pegasus", "style", "condor")
            .add_profile("pegasus", "data.configuration", "condorio")
            .add_profile("condor", "universe", "vanilla");

        assert_eq!(site.profiles["pegasus"]["style"], "condor");
        assert_eq!(site.profiles["condor"]["universe"], "vanilla");
    }

    #[test]
    fn test_site_catalog_yaml_shape() {
        let mut catalog = SiteCatalog::new();
        catalog.add_site(local_site()).unwrap();

        let yaml = catalog.to_yaml().unwrap();
        assert!(yaml.contains("name: local"));
        assert!(yaml.contains("directoryType: sharedScratch"));
        assert!(yaml.contains("operation: all"));
    }
}
