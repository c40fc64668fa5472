use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::locator::validate_name;
use crate::{Error, PackageLocator, Result};

/// Manifest file that marks a directory as a package.
pub const MANIFEST_FILE: &str = "package.xml";

/// Primary environment variable holding the package search path.
pub const PACKAGE_PATH_ENV: &str = "RESOURCE_PACKAGE_PATH";

/// Fallback environment variable, read when [`PACKAGE_PATH_ENV`] is unset.
pub const ROS_PACKAGE_PATH_ENV: &str = "ROS_PACKAGE_PATH";

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Finds packages by scanning an ordered list of root directories.
///
/// A package `P` is a directory named `P` containing [`MANIFEST_FILE`]. A
/// root may itself be a package. The search does not descend into other
/// packages, skips hidden directories, and visits siblings in name order.
/// The first root that yields a match wins.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    roots:     Vec<PathBuf>,
    max_depth: usize,
}

impl Default for SearchPathLocator {
    fn default() -> Self {
        Self::new(Vec::<PathBuf>::new())
    }
}

impl SearchPathLocator {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots:     roots.into_iter().map(Into::into).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Build a locator from [`PACKAGE_PATH_ENV`], falling back to
    /// [`ROS_PACKAGE_PATH_ENV`]. Unset variables give an empty search path.
    pub fn from_env() -> Self {
        let value = std::env::var_os(PACKAGE_PATH_ENV)
            .or_else(|| std::env::var_os(ROS_PACKAGE_PATH_ENV));
        match value {
            Some(value) => Self::from_path_list(&value),
            None => Self::new(Vec::<PathBuf>::new()),
        }
    }

    /// Split a platform path list (`:` on Unix, `;` on Windows).
    pub fn from_path_list(list: &OsStr) -> Self {
        Self::new(std::env::split_paths(list).filter(|p| !p.as_os_str().is_empty()))
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn push_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Join the roots back into a platform path list.
    pub fn to_path_list(&self) -> Result<std::ffi::OsString> {
        std::env::join_paths(&self.roots).map_err(|e| Error::SearchPath(e.to_string()))
    }

    fn find_in(&self, dir: &Path, name: &str, depth: usize) -> Option<PathBuf> {
        let is_package = dir.join(MANIFEST_FILE).is_file();
        if is_package {
            return (dir.file_name() == Some(OsStr::new(name))).then(|| dir.to_path_buf());
        }
        if depth == 0 {
            return None;
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return None;
            }
        };
        // `Path::is_dir` follows symlinks; the depth bound stops link cycles.
        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        children.sort();

        children
            .iter()
            .find_map(|child| self.find_in(child, name, depth - 1))
    }
}

impl PackageLocator for SearchPathLocator {
    fn locate(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        for root in &self.roots {
            if let Some(found) = self.find_in(root, name, self.max_depth) {
                tracing::debug!(package = name, path = %found.display(), "located package");
                return Ok(found);
            }
        }
        Err(Error::UnknownPackage(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_package(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), "<package/>").unwrap();
    }

    #[test]
    fn test_locate_direct_child() {
        let root = tempdir().unwrap();
        make_package(&root.path().join("meshes"));

        let locator = SearchPathLocator::new([root.path()]);
        assert_eq!(locator.locate("meshes").unwrap(), root.path().join("meshes"));
    }

    #[test]
    fn test_locate_nested_within_depth() {
        let root = tempdir().unwrap();
        make_package(&root.path().join("src").join("stack").join("arm"));

        let locator = SearchPathLocator::new([root.path()]);
        assert_eq!(
            locator.locate("arm").unwrap(),
            root.path().join("src").join("stack").join("arm")
        );

        let shallow = SearchPathLocator::new([root.path()]).max_depth(1);
        assert!(matches!(shallow.locate("arm"), Err(Error::UnknownPackage(_))));
    }

    #[test]
    fn test_root_is_itself_the_package() {
        let root = tempdir().unwrap();
        let pkg = root.path().join("gripper");
        make_package(&pkg);

        let locator = SearchPathLocator::new([&pkg]);
        assert_eq!(locator.locate("gripper").unwrap(), pkg);
    }

    #[test]
    fn test_does_not_descend_into_packages() {
        let root = tempdir().unwrap();
        make_package(&root.path().join("outer"));
        make_package(&root.path().join("outer").join("inner"));

        let locator = SearchPathLocator::new([root.path()]);
        assert!(matches!(locator.locate("inner"), Err(Error::UnknownPackage(_))));
    }

    #[test]
    fn test_directory_without_manifest_is_not_a_package() {
        let root = tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("plain")).unwrap();

        let locator = SearchPathLocator::new([root.path()]);
        assert!(matches!(locator.locate("plain"), Err(Error::UnknownPackage(_))));
    }

    #[test]
    fn test_first_root_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        make_package(&first.path().join("dup"));
        make_package(&second.path().join("dup"));

        let locator = SearchPathLocator::new([first.path(), second.path()]);
        assert_eq!(locator.locate("dup").unwrap(), first.path().join("dup"));
    }

    #[test]
    fn test_hidden_directories_skipped() {
        let root = tempdir().unwrap();
        make_package(&root.path().join(".cache").join("ghost"));

        let locator = SearchPathLocator::new([root.path()]);
        assert!(locator.locate("ghost").is_err());
    }

    #[test]
    fn test_missing_root_is_ignored() {
        let root = tempdir().unwrap();
        make_package(&root.path().join("present"));

        let locator = SearchPathLocator::new([root.path().join("nope"), root.path().to_path_buf()]);
        assert!(locator.locate("present").is_ok());
    }

    #[test]
    fn test_default_uses_default_depth() {
        let root = tempdir().unwrap();
        make_package(&root.path().join("meshes"));

        let locator = SearchPathLocator::default().push_root(root.path());
        assert_eq!(locator.locate("meshes").unwrap(), root.path().join("meshes"));
        assert!(SearchPathLocator::default().roots().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_package_is_found() {
        let store = tempdir().unwrap();
        let workspace = tempdir().unwrap();
        let real = store.path().join("build").join("gripper");
        make_package(&real);
        std::os::unix::fs::symlink(&real, workspace.path().join("gripper")).unwrap();

        let locator = SearchPathLocator::new([workspace.path()]);
        assert_eq!(
            locator.locate("gripper").unwrap(),
            workspace.path().join("gripper")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let root = tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("a")).unwrap();
        std::os::unix::fs::symlink(root.path(), root.path().join("a").join("loop")).unwrap();

        let locator = SearchPathLocator::new([root.path()]);
        assert!(matches!(locator.locate("missing"), Err(Error::UnknownPackage(_))));
    }

    #[test]
    fn test_path_list_round_trip() {
        let a = PathBuf::from("/opt/a");
        let b = PathBuf::from("/opt/b");
        let list = std::env::join_paths([&a, &b]).unwrap();

        let locator = SearchPathLocator::from_path_list(&list);
        assert_eq!(locator.roots(), &[a, b]);
        assert_eq!(locator.to_path_list().unwrap(), list);
    }

    #[test]
    fn test_invalid_name_rejected() {
        let locator = SearchPathLocator::new(Vec::<PathBuf>::new());
        assert!(matches!(locator.locate("../etc"), Err(Error::InvalidName(_))));
    }
}
