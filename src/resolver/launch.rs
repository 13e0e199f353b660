//! Validation de lancement du binaire résolu.
//!
//! Purement diagnostique: un échec renseigne la fiche finale mais
//! n'interrompt jamais la résolution.

use std::io::ErrorKind;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use crate::revision::RevisionInfo;
use crate::utils::process::sanitize_cmd_error;

lazy_static! {
    /// Ligne de version telle qu'imprimée par Chromium, Chrome ou un build
    /// headless (`Chromium 131.0.6778.69`, `HeadlessChrome/131.0.0.0`).
    static ref VERSION_LINE: Regex =
        Regex::new(r"(?i)\b(?:chromium|chrome|headlesschrome)\b[^\d\n]*\d[\d.]*").unwrap();
}

/// Délai maximal accordé au binaire pour imprimer sa version.
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Résultat de la validation de lancement.
#[derive(Debug, Default)]
pub(crate) struct LaunchReport {
    pub launchable: bool,
    pub chromium_version: Option<String>,
}

/// Lance le binaire en headless pour vérifier qu'il est exécutable et
/// relever sa version.
pub(crate) async fn validate(info: &RevisionInfo) -> LaunchReport {
    let mut command = info.launch_command();
    command.arg("--version");

    let output = match tokio::time::timeout(LAUNCH_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(error)) => {
            let (outcome, detail) = classify_spawn_error(&error);
            log::warn!("Chromium launch check failed ({outcome}): {detail}");
            return LaunchReport::default();
        }
        Err(_) => {
            log::warn!("Chromium launch check timed out after {LAUNCH_TIMEOUT:?}");
            return LaunchReport::default();
        }
    };

    if !output.status.success() {
        log::warn!(
            "Chromium launch check exited with {}: {}",
            output.status,
            sanitize_cmd_error(&output)
        );
        return LaunchReport::default();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = first_non_empty_line(&stdout);
    match VERSION_LINE.find(&line) {
        Some(found) => LaunchReport {
            launchable: true,
            chromium_version: Some(found.as_str().trim().to_string()),
        },
        None => {
            log::warn!("Chromium launch check printed no version line: {line:?}");
            LaunchReport::default()
        }
    }
}

/// Retourne la première ligne non vide d'un texte.
fn first_non_empty_line(text: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| text.trim().to_string())
}

/// Classe une erreur de lancement en diagnostic stable.
fn classify_spawn_error(error: &std::io::Error) -> (&'static str, String) {
    if error.kind() == ErrorKind::NotFound {
        return ("missing", "Executable not found".to_string());
    }

    if error.kind() == ErrorKind::PermissionDenied {
        return (
            "not_executable",
            "Permission denied while executing Chromium".to_string(),
        );
    }

    let msg = error.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("exec format error")
        || lower.contains("bad cpu type")
        || lower.contains("cannot execute")
    {
        return ("not_executable", msg);
    }

    ("exec_failed", msg)
}
