//! Package name to install path lookup.
//!
//! # Architecture
//!
//! This crate defines the [`PackageLocator`] trait, the only contract between
//! `package://` resolution and whatever knows where packages live on disk.
//! The locator is a mechanism; callers pick the policy by choosing or
//! composing implementations:
//!
//! - [`MapLocator`] - explicit name to path table
//! - [`SearchPathLocator`] - scans a list of roots for package manifests
//! - [`ChainLocator`] - primary locator with a fallback

mod error;
mod locator;
mod search;

pub use error::{Error, Result};
pub use locator::{ChainLocator, MapLocator, PackageLocator, validate_name};
pub use search::{
    DEFAULT_MAX_DEPTH, MANIFEST_FILE, PACKAGE_PATH_ENV, ROS_PACKAGE_PATH_ENV, SearchPathLocator,
};
