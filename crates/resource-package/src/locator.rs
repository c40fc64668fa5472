use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub trait PackageLocator {
    /// Return the base directory of the package called `name`.
    fn locate(&self, name: &str) -> Result<PathBuf>;
}

impl<T: PackageLocator + ?Sized> PackageLocator for &T {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        (**self).locate(name)
    }
}

impl<T: PackageLocator + ?Sized> PackageLocator for Box<T> {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        (**self).locate(name)
    }
}

/// Reject names that could escape a search root.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct MapLocator {
    packages: HashMap<String, PathBuf>,
}

impl MapLocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.insert(name, path);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.packages.insert(name.into(), path.into());
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.packages.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<N: Into<String>, P: Into<PathBuf>> FromIterator<(N, P)> for MapLocator {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut locator = Self::new();
        for (name, path) in iter {
            locator.insert(name, path);
        }
        locator
    }
}

impl PackageLocator for MapLocator {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownPackage(name.to_string()))
    }
}

/// Tries `primary`, and `fallback` only when the package is unknown to it.
#[derive(Debug, Clone)]
pub struct ChainLocator<L1, L2> {
    primary:  L1,
    fallback: L2,
}

impl<L1, L2> ChainLocator<L1, L2>
where
    L1: PackageLocator,
    L2: PackageLocator,
{
    pub fn new(primary: L1, fallback: L2) -> Self {
        Self { primary, fallback }
    }
}

impl<L1, L2> PackageLocator for ChainLocator<L1, L2>
where
    L1: PackageLocator,
    L2: PackageLocator,
{
    fn locate(&self, name: &str) -> Result<PathBuf> {
        match self.primary.locate(name) {
            Err(Error::UnknownPackage(_)) => self.fallback.locate(name),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_locator_known_and_unknown() {
        let locator = MapLocator::new().with("robot_description", "/opt/pkgs/robot_description");

        assert_eq!(
            locator.locate("robot_description").unwrap(),
            PathBuf::from("/opt/pkgs/robot_description")
        );
        assert!(matches!(
            locator.locate("missing"),
            Err(Error::UnknownPackage(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_map_locator_from_iter() {
        let locator: MapLocator = [("a", "/a"), ("b", "/b")].into_iter().collect();
        assert_eq!(locator.len(), 2);
        assert_eq!(locator.get("b"), Some(Path::new("/b")));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("meshes").is_ok());
        assert!(validate_name("my-pkg_2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }

    #[test]
    fn test_chain_locator_fallback() {
        let primary = MapLocator::new().with("pkg1", "/primary/pkg1");
        let fallback = MapLocator::new()
            .with("pkg1", "/fallback/pkg1")
            .with("pkg2", "/fallback/pkg2");

        let locator = ChainLocator::new(primary, fallback);

        assert_eq!(locator.locate("pkg1").unwrap(), PathBuf::from("/primary/pkg1"));
        assert_eq!(locator.locate("pkg2").unwrap(), PathBuf::from("/fallback/pkg2"));
        assert!(matches!(locator.locate("pkg3"), Err(Error::UnknownPackage(_))));
    }

    #[test]
    fn test_chain_locator_does_not_mask_invalid_name() {
        let locator = ChainLocator::new(MapLocator::new(), MapLocator::new().with("x", "/x"));
        assert!(matches!(locator.locate("../x"), Err(Error::InvalidName(_))));
    }

    #[test]
    fn test_locator_through_reference_and_box() {
        let locator = MapLocator::new().with("pkg", "/pkg");
        let by_ref: &dyn PackageLocator = &locator;
        let boxed: Box<dyn PackageLocator> = Box::new(locator.clone());

        assert_eq!(by_ref.locate("pkg").unwrap(), PathBuf::from("/pkg"));
        assert_eq!(boxed.locate("pkg").unwrap(), PathBuf::from("/pkg"));
    }
}
