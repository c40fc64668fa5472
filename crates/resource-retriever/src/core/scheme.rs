use std::fmt;
use std::path::PathBuf;

use resource_package::PackageLocator;

use crate::error::ResolveError;

pub const PACKAGE_SCHEME: &str = "package";

pub const FILE_SCHEME: &str = "file";

/// Syntactic form of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `package://<name>/<relative-path>`
    Package,
    /// `file://<path>`
    File,
    /// No `scheme://` prefix at all.
    BarePath,
    /// Any other `scheme://`.
    Network,
}

/// How a resolved identifier is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    LocalFile,
    Network,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::LocalFile => write!(f, "local-file"),
            Strategy::Network => write!(f, "network"),
        }
    }
}

/// A concretely fetchable target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Local(PathBuf),
    Network(String),
}

impl Resolved {
    pub fn strategy(&self) -> Strategy {
        match self {
            Resolved::Local(_) => Strategy::LocalFile,
            Resolved::Network(_) => Strategy::Network,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Local(path) => write!(f, "{}", path.display()),
            Resolved::Network(url) => write!(f, "{url}"),
        }
    }
}

/// Split `scheme://rest`, requiring an RFC 3986 scheme before the separator.
fn split_scheme(identifier: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = identifier.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

/// Classify an identifier by its syntax alone.
///
/// # Examples
///
/// ```
/// use resource_retriever::core::{Scheme, classify};
///
/// assert_eq!(classify("package://robot/meshes/base.stl"), Scheme::Package);
/// assert_eq!(classify("file:///tmp/base.stl"), Scheme::File);
/// assert_eq!(classify("/tmp/base.stl"), Scheme::BarePath);
/// assert_eq!(classify("https://example.com/base.stl"), Scheme::Network);
/// ```
pub fn classify(identifier: &str) -> Scheme {
    match split_scheme(identifier) {
        Some((scheme, _)) if scheme.eq_ignore_ascii_case(PACKAGE_SCHEME) => Scheme::Package,
        Some((scheme, _)) if scheme.eq_ignore_ascii_case(FILE_SCHEME) => Scheme::File,
        Some(_) => Scheme::Network,
        None => Scheme::BarePath,
    }
}

/// Rewrite an identifier into a fetchable target.
///
/// `package://P/rel` becomes the local path `<base of P>/rel`, `file://`
/// loses its prefix (and an optional `localhost` authority), bare paths are
/// local as-is, and everything else is passed through as a network URL.
pub fn resolve<L>(identifier: &str, locator: &L) -> Result<Resolved, ResolveError>
where
    L: PackageLocator + ?Sized,
{
    let resolved = rewrite(identifier, locator)?;
    tracing::debug!(
        identifier,
        scheme = ?classify(identifier),
        strategy = %resolved.strategy(),
        resolved = %resolved,
        "resolved identifier"
    );
    Ok(resolved)
}

fn rewrite<L>(identifier: &str, locator: &L) -> Result<Resolved, ResolveError>
where
    L: PackageLocator + ?Sized,
{
    let Some((scheme, rest)) = split_scheme(identifier) else {
        return Ok(Resolved::Local(PathBuf::from(identifier)));
    };

    if scheme.eq_ignore_ascii_case(PACKAGE_SCHEME) {
        let (package, relative) = rest
            .split_once('/')
            .ok_or(ResolveError::MalformedPackageUri)?;
        if package.is_empty() {
            return Err(ResolveError::MalformedPackageUri);
        }
        let base = locator.locate(package)?;
        let relative = relative.trim_start_matches('/');
        Ok(Resolved::Local(if relative.is_empty() {
            base
        } else {
            base.join(relative)
        }))
    } else if scheme.eq_ignore_ascii_case(FILE_SCHEME) {
        let path = rest
            .strip_prefix("localhost")
            .filter(|path| path.starts_with('/'))
            .unwrap_or(rest);
        Ok(Resolved::Local(PathBuf::from(path)))
    } else {
        Ok(Resolved::Network(identifier.to_string()))
    }
}
