//! Import specifier resolution.
//!
//! Two rules only:
//!
//! - Relative specifiers (leading `.`) join the importing module's directory.
//!   A file name with no `.`-delimited extension gets `.js` appended.
//! - Everything else is a package name and maps to `<root>/node_modules/<name>`
//!   with no `package.json` lookup and no extension probing.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{BuildError, Result};
use crate::module_id::ModuleId;

/// Extension appended to relative specifiers that have none.
pub const DEFAULT_EXTENSION: &str = "js";

/// Directory under the project root holding package-style dependencies.
pub const PACKAGES_DIR: &str = "node_modules";

/// Check if a specifier is relative to the importing module.
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Whether the last path segment of `specifier` already carries an extension.
///
/// The file name is split on `.`; more than one segment counts as having an
/// extension (`a.js`, `a.test.js`). `.`/`..` and trailing-slash specifiers
/// name directories and are left untouched.
pub fn has_extension(specifier: &str) -> bool {
    let file_name = specifier.rsplit(['/', '\\']).next().unwrap_or(specifier);
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return true;
    }
    file_name.split('.').count() > 1
}

/// Resolves raw specifiers to [`ModuleId`]s.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into().clean(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `specifier` as written in a module located in `importer_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidSpecifier`] for empty specifiers, specifiers
    /// containing NUL bytes, or when the result is not an absolute path.
    pub fn resolve(&self, specifier: &str, importer_dir: &Path) -> Result<ModuleId> {
        validate(specifier)?;

        let candidate = if is_relative(specifier) {
            let with_extension = if has_extension(specifier) {
                specifier.to_string()
            } else {
                format!("{specifier}.{DEFAULT_EXTENSION}")
            };
            importer_dir.join(with_extension)
        } else if Path::new(specifier).is_absolute() {
            PathBuf::from(specifier)
        } else {
            self.root.join(PACKAGES_DIR).join(specifier)
        };

        ModuleId::new(candidate.clean()).map_err(|e| BuildError::InvalidSpecifier {
            specifier: specifier.to_string(),
            reason: e.to_string(),
        })
    }
}

fn validate(specifier: &str) -> Result<()> {
    let reason = if specifier.trim().is_empty() {
        "specifier is empty"
    } else if specifier.contains('\0') {
        "specifier contains a null byte"
    } else {
        return Ok(());
    };

    Err(BuildError::InvalidSpecifier {
        specifier: specifier.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolver() -> Resolver {
        Resolver::new("/p")
    }

    #[test]
    fn appends_default_extension() {
        let id = resolver().resolve("./a", Path::new("/p/src")).unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/a.js"));
    }

    #[test]
    fn keeps_multi_segment_file_names() {
        let id = resolver()
            .resolve("./a.test.js", Path::new("/p/src"))
            .unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/a.test.js"));

        let id = resolver().resolve("./data.json", Path::new("/p/src")).unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/data.json"));
    }

    #[test]
    fn resolves_parent_directory() {
        let id = resolver()
            .resolve("../lib/util", Path::new("/p/src/app"))
            .unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/lib/util.js"));
    }

    #[test]
    fn dots_in_directories_do_not_count_as_extension() {
        let id = resolver()
            .resolve("./v1.2/index", Path::new("/p/src"))
            .unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/v1.2/index.js"));
    }

    #[test]
    fn package_specifiers_resolve_under_node_modules() {
        for dir in ["/p/src", "/p/src/deeply/nested", "/elsewhere"] {
            let id = resolver().resolve("lodash", Path::new(dir)).unwrap();
            assert_eq!(id.as_path(), Path::new("/p/node_modules/lodash"));
        }

        let id = resolver().resolve("lodash/fp", Path::new("/p/src")).unwrap();
        assert_eq!(id.as_path(), Path::new("/p/node_modules/lodash/fp"));
    }

    #[test]
    fn rejects_empty_specifier() {
        let err = resolver().resolve("", Path::new("/p/src")).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSpecifier { .. }));
    }

    #[test]
    fn rejects_null_byte() {
        let err = resolver()
            .resolve("./a\0b", Path::new("/p/src"))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidSpecifier { .. }));
    }

    #[test]
    fn rejects_relative_importer_dir() {
        let err = resolver().resolve("./a", Path::new("src")).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSpecifier { .. }));
    }

    proptest! {
        #[test]
        fn relative_names_without_dots_gain_js(name in "[a-z][a-z0-9_-]{0,12}") {
            let id = resolver().resolve(&format!("./{name}"), Path::new("/p/src")).unwrap();
            let expected = Path::new("/p/src").join(format!("{name}.js"));
            prop_assert_eq!(id.as_path(), expected.as_path());
        }

        #[test]
        fn resolution_is_absolute_and_clean(
            segments in prop::collection::vec("[a-z]{1,6}", 1..5),
            ups in 0usize..3,
        ) {
            let specifier = format!("./{}{}", "../".repeat(ups), segments.join("/"));
            let id = resolver().resolve(&specifier, Path::new("/p/src/a/b/c")).unwrap();
            prop_assert!(id.as_path().is_absolute());
            let cleaned = id.as_path().to_path_buf().clean();
            prop_assert_eq!(id.as_path(), cleaned.as_path());
        }
    }
}
