use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::{timeout_at, Instant};

use crate::error::AttemptError;

/// Garde RAII qui supprime l'archive (partielle ou extraite) en sortie de scope.
pub(crate) struct ArchiveGuard(PathBuf);

impl ArchiveGuard {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self(path)
    }
}

impl Drop for ArchiveGuard {
    /// Tente la suppression sans propager d'erreur.
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Télécharge `url` vers `archive_path` en rapportant l'avancement cumulé.
///
/// Le délai d'inactivité couvre l'envoi de la requête jusqu'au premier octet
/// reçu et n'est jamais réarmé ensuite: un transfert lent mais actif n'est
/// pas interrompu.
pub(crate) async fn fetch_archive(
    client: &reqwest::Client,
    url: &str,
    archive_path: &Path,
    inactivity_timeout: Duration,
    mut on_progress: impl FnMut(u64, u64),
) -> Result<(), AttemptError> {
    let deadline = Instant::now() + inactivity_timeout;
    let stalled = || AttemptError::Stalled(inactivity_timeout);

    let response = timeout_at(deadline, client.get(url).send())
        .await
        .map_err(|_| stalled())??;
    let response = response.error_for_status()?;
    let total = response.content_length().unwrap_or(0);
    let mut stream = response.bytes_stream();

    let mut file = File::create(archive_path).await?;
    let mut downloaded: u64 = 0;

    let first = timeout_at(deadline, stream.next())
        .await
        .map_err(|_| stalled())?;

    let mut pending = first;
    while let Some(chunk) = pending {
        let chunk: Bytes = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_progress(downloaded, total);
        pending = stream.next().await;
    }

    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("download-linux-1.zip");
        std::fs::write(&path, b"partial").unwrap();

        {
            let _guard = ArchiveGuard::new(path.clone());
        }
        assert!(!path.exists());
    }

    #[test]
    fn guard_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let _guard = ArchiveGuard::new(dir.path().join("never-created.zip"));
    }
}
