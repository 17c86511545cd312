use std::path::{Path, PathBuf};

/// Searches for a file with the given name in `start_path` and its ancestor
/// directories, returning the nearest match.
pub(crate) fn find_in_ancestors<P: AsRef<Path>>(start_path: P, target_name: &str) -> Option<PathBuf> {
    start_path
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(target_name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_in_current_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("refs.config.json");
        fs::write(&target, "{}").unwrap();

        assert_eq!(find_in_ancestors(temp_dir.path(), "refs.config.json"), Some(target));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("refs.config.json"), "{}").unwrap();
        let closer = temp_dir.path().join("a").join("refs.config.json");
        fs::write(&closer, "{}").unwrap();

        assert_eq!(find_in_ancestors(&nested, "refs.config.json"), Some(closer));
    }

    #[test]
    fn test_directories_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("refs.config.json")).unwrap();
        let nested = temp_dir.path().join("src");
        fs::create_dir(&nested).unwrap();

        assert_eq!(find_in_ancestors(&nested, "refs.config.json"), None);
    }
}
