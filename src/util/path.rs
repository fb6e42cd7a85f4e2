use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path; unexpandable paths are returned as is.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        assert_eq!(expand_path(Path::new("a/b.toml")), PathBuf::from("a/b.toml"));
    }

    #[test]
    fn test_expand_path_leaves_unknown_vars() {
        let p = Path::new("$MANSION_SURELY_UNSET_VAR/x.toml");
        assert_eq!(expand_path(p), p.to_path_buf());
    }
}
