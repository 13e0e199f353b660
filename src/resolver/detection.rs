//! Détection d'un Chromium déjà téléchargé parmi les dossiers candidats.

use std::path::{Path, PathBuf};

use crate::fetcher::{Platform, SnapshotFetcher};
use crate::options::ResolverOptions;
use crate::revision::RevisionInfo;
use crate::utils::path::{absolutize, dedupe_paths};

/// Profondeur maximale de remontée dans les dossiers parents du répertoire
/// courant.
const MAX_ANCESTOR_DEPTH: usize = 5;

/// Résultat d'une détection locale réussie.
pub(crate) struct Detection {
    /// Fiche de la révision trouvée.
    pub info: RevisionInfo,
    /// La révision a été trouvée dans le cache utilisateur lui-même.
    pub in_user_folder: bool,
}

/// Construit la liste ordonnée des dossiers candidats: chemins explicites,
/// cache utilisateur, puis ancêtres du répertoire courant joints au nom du
/// dossier de cache, du plus proche au plus lointain.
pub(crate) fn candidate_list(options: &ResolverOptions, user_folder: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = options
        .detection_paths
        .iter()
        .map(|raw| absolutize(Path::new(raw)))
        .collect();

    candidates.push(user_folder.to_path_buf());

    if let Ok(cwd) = std::env::current_dir() {
        let mut current = Some(cwd.as_path());
        let mut depth = 0;
        while let Some(dir) = current {
            if depth >= MAX_ANCESTOR_DEPTH {
                break;
            }
            candidates.push(dir.join(&options.folder_name));
            current = dir.parent();
            depth += 1;
        }
    }

    dedupe_paths(candidates)
}

/// Sonde les candidats dans l'ordre et retourne la première révision
/// complète. Lecture seule, sans reprise: une absence n'est pas transitoire.
pub(crate) fn detect(
    candidates: &[PathBuf],
    user_folder: &Path,
    platform: Platform,
    revision: &str,
) -> Option<Detection> {
    for candidate in candidates {
        let info = SnapshotFetcher::new(candidate, platform).revision_info(revision);
        if info.local {
            return Some(Detection {
                in_user_folder: candidate == user_folder,
                info,
            });
        }
    }
    None
}
