//! Lexical path helpers shared by the classifier and the checker.
//!
//! Nothing here touches the filesystem: locations declared in source files
//! may not exist yet, and membership tests must work on resolved paths
//! regardless.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path lexically, folding `.` and `..` components.
///
/// A `..` that would climb above the root is dropped.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves a declared root against the project root.
///
/// Absolute paths pass through (normalized); relative ones are joined.
#[must_use]
pub fn resolve_root(project_root: &Path, declared: &str) -> PathBuf {
    let declared = Path::new(declared);
    if declared.is_absolute() {
        normalize(declared)
    } else {
        normalize(&project_root.join(declared))
    }
}

/// Joins a member segment onto its parent location.
///
/// The result never leaves `parent`: leading separators are stripped and a
/// `..` that would climb above `parent` is dropped.
#[must_use]
pub fn join_location(parent: &Path, segment: &str) -> PathBuf {
    let segment = segment.trim_start_matches(['/', '\\']);
    let mut location = normalize(parent);
    let depth = location.components().count();
    for component in Path::new(segment).components() {
        match component {
            Component::Normal(part) => location.push(part),
            Component::ParentDir => {
                if location.components().count() > depth {
                    location.pop();
                }
            }
            _ => {}
        }
    }
    location
}

/// Returns `true` when `file` is `location` itself or lies beneath it.
///
/// Comparison is component-wise, so `/src/domain-old/x.ts` is not inside
/// `/src/domain`.
#[must_use]
pub fn is_in_location(file: &Path, location: &Path) -> bool {
    file.starts_with(location)
}

/// Strips the file extension from a path relative to `base`.
///
/// Returns `None` when `file` is not under `base`.
#[must_use]
pub fn relative_stem(file: &Path, base: &Path) -> Option<PathBuf> {
    let relative = file.strip_prefix(base).ok()?;
    let mut stem = relative.to_path_buf();
    strip_ts_extension(&mut stem);
    Some(stem)
}

fn strip_ts_extension(path: &mut PathBuf) {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    let trimmed = name
        .strip_suffix(".d.ts")
        .or_else(|| name.rsplit_once('.').map(|(stem, _)| stem))
        .map(str::to_owned);
    if let Some(trimmed) = trimmed {
        path.set_file_name(trimmed);
    }
}

/// Renders `path` relative to `root` for display, falling back to the full
/// path.
#[must_use]
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_dots() {
        assert_eq!(
            normalize(Path::new("/p/src/./domain/../infra")),
            PathBuf::from("/p/src/infra")
        );
    }

    #[test]
    fn normalize_keeps_leading_parent_on_relative_paths() {
        assert_eq!(normalize(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize(Path::new("../../x")), PathBuf::from("../../x"));
    }

    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn resolve_root_relative_and_absolute() {
        let root = Path::new("/project");
        assert_eq!(resolve_root(root, "src"), PathBuf::from("/project/src"));
        assert_eq!(resolve_root(root, "./src/"), PathBuf::from("/project/src"));
        assert_eq!(resolve_root(root, "/elsewhere"), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn join_location_accepts_nested_override() {
        assert_eq!(
            join_location(Path::new("/p/src"), "infra/db"),
            PathBuf::from("/p/src/infra/db")
        );
    }

    #[test]
    fn join_location_stays_under_parent() {
        let parent = Path::new("/p/src");
        assert_eq!(join_location(parent, "/infra"), PathBuf::from("/p/src/infra"));
        assert_eq!(join_location(parent, "//infra/"), PathBuf::from("/p/src/infra"));
        assert_eq!(join_location(parent, "../../etc"), PathBuf::from("/p/src/etc"));
        assert_eq!(join_location(parent, "a/../b"), PathBuf::from("/p/src/b"));
        assert_eq!(join_location(parent, "./"), PathBuf::from("/p/src"));
    }

    #[test]
    fn membership_is_boundary_safe() {
        let loc = Path::new("/p/src/domain");
        assert!(is_in_location(Path::new("/p/src/domain/a.ts"), loc));
        assert!(is_in_location(Path::new("/p/src/domain"), loc));
        assert!(!is_in_location(Path::new("/p/src/domain-old/a.ts"), loc));
    }

    #[test]
    fn relative_stem_drops_extension() {
        let stem = relative_stem(Path::new("/p/ui/forms/login.tsx"), Path::new("/p/ui")).unwrap();
        assert_eq!(stem, PathBuf::from("forms/login"));
        let stem = relative_stem(Path::new("/p/types/a.d.ts"), Path::new("/p/types")).unwrap();
        assert_eq!(stem, PathBuf::from("a"));
        assert!(relative_stem(Path::new("/q/a.ts"), Path::new("/p")).is_none());
    }

    #[test]
    fn display_relative_falls_back() {
        assert_eq!(
            display_relative(Path::new("/p/src/a.ts"), Path::new("/p")),
            "src/a.ts"
        );
        assert_eq!(display_relative(Path::new("/q/a.ts"), Path::new("/p")), "/q/a.ts");
    }
}
