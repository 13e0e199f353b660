use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

/// Décompresse une archive snapshot dans le dossier d'une révision.
///
/// Les permissions Unix des entrées sont restaurées pour que l'exécutable
/// extrait reste lançable; les liens symboliques du bundle macOS sont
/// recréés plutôt que copiés.
pub(crate) fn extract_zip(archive_path: &Path, destination: &Path) -> Result<(), String> {
    let file =
        File::open(archive_path).map_err(|e| format!("Failed to open downloaded archive: {e}"))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| format!("Invalid snapshot archive: {e}"))?;

    fs::create_dir_all(destination)
        .map_err(|e| format!("Failed to create revision directory: {e}"))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| format!("Failed to read archive entry: {e}"))?;
        let target = match entry.enclosed_name() {
            Some(relative) => destination.join(relative),
            None => continue,
        };

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| format!("Failed to create directory: {e}"))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory: {e}"))?;
        }

        write_entry(&mut entry, &target)?;
    }

    Ok(())
}

/// Matérialise une entrée d'archive: lien symbolique ou fichier ordinaire.
fn write_entry(entry: &mut zip::read::ZipFile<'_>, target: &Path) -> Result<(), String> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        // Les entrées de type lien portent S_IFLNK dans leur mode Unix.
        if entry
            .unix_mode()
            .is_some_and(|mode| mode & 0o170000 == 0o120000)
        {
            let mut raw = Vec::new();
            io::Read::read_to_end(entry, &mut raw)
                .map_err(|e| format!("Failed to read symlink entry: {e}"))?;
            let link_target = String::from_utf8_lossy(&raw).to_string();
            let _ = fs::remove_file(target);
            return std::os::unix::fs::symlink(&link_target, target)
                .map_err(|e| format!("Failed to recreate symlink: {e}"));
        }

        let mut out =
            File::create(target).map_err(|e| format!("Failed to create file: {e}"))?;
        io::copy(entry, &mut out).map_err(|e| format!("Failed to write file: {e}"))?;

        if let Some(mode) = entry.unix_mode() {
            let _ = fs::set_permissions(target, fs::Permissions::from_mode(mode & 0o7777));
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        let mut out =
            File::create(target).map_err(|e| format!("Failed to create file: {e}"))?;
        io::copy(entry, &mut out).map_err(|e| format!("Failed to write file: {e}"))?;
        Ok(())
    }
}
