//! Pure transformations for resource retrieval.
//!
//! Identifier classification and `package://` rewriting live here. Nothing
//! in this module touches the network or the filesystem; package lookup is
//! delegated to a [`PackageLocator`](resource_package::PackageLocator).

mod scheme;

pub use scheme::{FILE_SCHEME, PACKAGE_SCHEME, Resolved, Scheme, Strategy, classify, resolve};
