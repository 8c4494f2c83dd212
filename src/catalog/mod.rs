// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 wfcat contributors

//! Catalog structures consumed by the execution engine
//!
//! Sites, transformations, and replicas are built independently and only
//! reference each other by name; cross-catalog consistency is checked by
//! the workflow validator, not here.

mod properties;
mod replica;
mod site;
mod transformation;

pub use properties::Properties;
pub use replica::{ReplicaCatalog, ReplicaEntry};
pub use site::{Directory, DirectoryRole, FileServer, FileServerOperation, Site, SiteCatalog};
pub use transformation::{Container, ContainerFormat, Transformation, TransformationCatalog};
