//! Accès au dépôt de snapshots Chromium: disposition du cache local,
//! sondage des miroirs et récupération des archives.

/// Extraction des archives zip de snapshots.
mod archive;
/// Téléchargement en flux avec délai d'inactivité.
mod download;
/// Cartographie plateforme vers URLs et chemins.
pub mod platform;

pub use platform::Platform;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AttemptError;
use crate::revision::RevisionInfo;

/// Accès à un dossier de cache de snapshots, éventuellement lié à un miroir.
pub struct SnapshotFetcher {
    folder: PathBuf,
    platform: Platform,
    host: Option<String>,
}

impl SnapshotFetcher {
    /// Fetcher purement local, sans hôte de téléchargement (détection).
    pub fn new(folder: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            folder: folder.into(),
            platform,
            host: None,
        }
    }

    /// Associe un miroir de téléchargement au fetcher.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Dossier de cache sondé par ce fetcher.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Dossier local d'une révision donnée.
    pub fn revision_dir(&self, revision: &str) -> PathBuf {
        self.folder.join(self.platform.cache_key(revision))
    }

    /// Construit la fiche d'une révision avec son état de présence locale.
    pub fn revision_info(&self, revision: &str) -> RevisionInfo {
        let revision_dir = self.revision_dir(revision);
        let executable_path = self.platform.executable_path(&revision_dir);
        RevisionInfo {
            revision: revision.to_string(),
            folder: self.folder.clone(),
            revision_dir,
            local: executable_path.is_file(),
            executable_path,
            launchable: false,
            chromium_version: None,
            resolver_version: crate::revision::RESOLVER_VERSION,
        }
    }

    /// Vérifie par une requête HEAD que l'archive est publiée sur le miroir.
    /// Un hôte muet au-delà de `probe_timeout` est traité comme indisponible.
    pub async fn can_download(
        &self,
        client: &reqwest::Client,
        revision: &str,
        probe_timeout: Duration,
    ) -> bool {
        let Some(url) = self.download_url(revision) else {
            return false;
        };
        match tokio::time::timeout(probe_timeout, client.head(&url).send()).await {
            Ok(Ok(response)) => response.status().is_success(),
            Ok(Err(error)) => {
                log::debug!("HEAD {url} failed: {error}");
                false
            }
            Err(_) => {
                log::debug!("HEAD {url} got no answer within {probe_timeout:?}");
                false
            }
        }
    }

    /// Télécharge et extrait la révision, puis retourne sa fiche à jour.
    pub async fn download(
        &self,
        client: &reqwest::Client,
        revision: &str,
        inactivity_timeout: Duration,
        on_progress: impl FnMut(u64, u64),
    ) -> Result<RevisionInfo, AttemptError> {
        let url = self
            .download_url(revision)
            .ok_or_else(|| AttemptError::Unavailable(revision.to_string()))?;
        fs::create_dir_all(&self.folder)?;

        let archive_path = self
            .folder
            .join(format!("download-{}.zip", self.platform.cache_key(revision)));
        let _cleanup = download::ArchiveGuard::new(archive_path.clone());
        download::fetch_archive(client, &url, &archive_path, inactivity_timeout, on_progress)
            .await?;

        let revision_dir = self.revision_dir(revision);
        let blocking_archive = archive_path.clone();
        let blocking_dir = revision_dir.clone();
        let outcome =
            tokio::task::spawn_blocking(move || archive::extract_zip(&blocking_archive, &blocking_dir))
                .await
                .map_err(|error| AttemptError::Archive(error.to_string()))?;
        if let Err(error) = outcome {
            // Un dossier partiellement extrait ne doit pas passer pour un
            // téléchargement complet lors des détections suivantes.
            let _ = fs::remove_dir_all(&revision_dir);
            return Err(AttemptError::Archive(error));
        }

        Ok(self.revision_info(revision))
    }

    /// Révisions de la plateforme courante déjà présentes dans le cache.
    pub fn local_revisions(&self) -> Vec<String> {
        let mut revisions = Vec::new();
        let Ok(entries) = fs::read_dir(&self.folder) else {
            return revisions;
        };
        let prefix = format!("{}-", self.platform.cache_prefix());
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(revision) = name.strip_prefix(&prefix) {
                revisions.push(revision.to_string());
            }
        }
        revisions
    }

    /// Supprime le dossier local d'une révision.
    pub fn remove(&self, revision: &str) -> std::io::Result<()> {
        fs::remove_dir_all(self.revision_dir(revision))
    }

    fn download_url(&self, revision: &str) -> Option<String> {
        self.host
            .as_deref()
            .map(|host| self.platform.download_url(host, revision))
    }
}

/// Crée au besoin le dossier de cache, ouvert en écriture à tous.
///
/// Un échec de création n'est pas fatal: le chemin est retourné tel quel et
/// l'erreur réelle se manifestera à la tentative de téléchargement.
pub fn ensure_cache_folder(root: &Path, folder_name: &str) -> PathBuf {
    let folder = root.join(folder_name);
    if folder.is_dir() {
        return folder;
    }

    if let Err(error) = fs::create_dir_all(&folder) {
        log::warn!("Cache folder is not writable: {}: {error}", folder.display());
        return folder;
    }

    // Certains umask retirent le bit d'écriture par défaut.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(error) = fs::set_permissions(&folder, fs::Permissions::from_mode(0o777)) {
            log::warn!(
                "Failed to loosen permissions on {}: {error}",
                folder.display()
            );
        }
    }

    folder
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVISION: &str = "1403386";

    fn fake_local_revision(folder: &Path, platform: Platform, revision: &str) {
        let revision_dir = folder.join(platform.cache_key(revision));
        let executable = platform.executable_path(&revision_dir);
        fs::create_dir_all(executable.parent().unwrap()).unwrap();
        fs::write(&executable, b"").unwrap();
    }

    #[test]
    fn revision_info_reports_missing_download() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SnapshotFetcher::new(dir.path(), Platform::Linux);

        let info = fetcher.revision_info(REVISION);
        assert!(!info.local);
        assert_eq!(info.revision, REVISION);
        assert!(info.executable_path.starts_with(dir.path()));
    }

    #[test]
    fn revision_info_detects_completed_download() {
        let dir = tempfile::tempdir().unwrap();
        fake_local_revision(dir.path(), Platform::Linux, REVISION);

        let fetcher = SnapshotFetcher::new(dir.path(), Platform::Linux);
        assert!(fetcher.revision_info(REVISION).local);
    }

    #[test]
    fn local_revisions_only_lists_current_platform() {
        let dir = tempfile::tempdir().unwrap();
        fake_local_revision(dir.path(), Platform::Linux, "100");
        fake_local_revision(dir.path(), Platform::Linux, "200");
        fake_local_revision(dir.path(), Platform::Win64, "300");
        fs::write(dir.path().join("download-linux-400.zip"), b"").unwrap();

        let fetcher = SnapshotFetcher::new(dir.path(), Platform::Linux);
        let mut revisions = fetcher.local_revisions();
        revisions.sort();
        assert_eq!(revisions, vec!["100", "200"]);
    }

    #[test]
    fn remove_deletes_the_revision_dir() {
        let dir = tempfile::tempdir().unwrap();
        fake_local_revision(dir.path(), Platform::Linux, "100");

        let fetcher = SnapshotFetcher::new(dir.path(), Platform::Linux);
        fetcher.remove("100").unwrap();
        assert!(fetcher.local_revisions().is_empty());
    }

    #[test]
    fn ensure_cache_folder_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let folder = ensure_cache_folder(dir.path(), ".chromium-test-snapshots");
        assert!(folder.is_dir());

        // Idempotent sur un dossier déjà présent.
        let again = ensure_cache_folder(dir.path(), ".chromium-test-snapshots");
        assert_eq!(folder, again);
    }
}
