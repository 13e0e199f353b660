use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Rend un chemin absolu par rapport au répertoire courant, sans exiger
/// son existence.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Supprime les chemins dupliqués en conservant l'ordre d'origine.
pub fn dedupe_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let absolute = if cfg!(windows) { r"C:\opt\cache" } else { "/opt/cache" };
        assert_eq!(absolutize(Path::new(absolute)), PathBuf::from(absolute));
    }

    #[test]
    fn absolutize_anchors_relative_paths_to_cwd() {
        let resolved = absolutize(Path::new("snapshots"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("snapshots"));
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let paths = vec![
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            PathBuf::from("/a"),
            PathBuf::from("/c"),
        ];
        assert_eq!(
            dedupe_paths(paths),
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
    }
}
