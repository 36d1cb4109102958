//! Path helpers shared by the file tools

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, folding `.` and `..` without touching the disk
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Keep leading '..' on relative paths; never pop past the root
                match normalized.components().next_back() {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => normalized.push(".."),
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Join `path` onto `root` and normalize the result
///
/// Absolute paths replace the root. No containment check is made: a path
/// such as `../x` resolves outside `root`.
pub fn resolve_path(root: &Path, path: &str) -> PathBuf {
    normalize_path(&root.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_path(Path::new("/work"), "a/./b/../c.txt"),
            PathBuf::from("/work/a/c.txt")
        );
    }

    #[test]
    fn test_resolve_parent_escape_is_honored() {
        assert_eq!(
            resolve_path(Path::new("/work/project"), "../other/x.txt"),
            PathBuf::from("/work/other/x.txt")
        );
    }

    #[test]
    fn test_resolve_absolute_path_replaces_root() {
        assert_eq!(
            resolve_path(Path::new("/work"), "/etc/hosts"),
            PathBuf::from("/etc/hosts")
        );
    }

    #[test]
    fn test_normalize_never_pops_root() {
        assert_eq!(normalize_path(Path::new("/../../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }
}
