use std::path::PathBuf;

use serde::Serialize;
use tokio::process::Command;

use crate::utils::process::configure_command_no_window;

/// Version de la bibliothèque, reportée dans chaque fiche émise.
pub const RESOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Arguments de lancement headless sans sandbox du binaire résolu.
pub const LAUNCH_ARGS: &[&str] = &["--headless", "--no-sandbox", "--disable-gpu"];

/// Fiche d'une révision résolue, enrichie au fil des étapes puis émise une
/// seule fois par résolution.
#[derive(Clone, Debug, Serialize)]
pub struct RevisionInfo {
    /// Identifiant de la révision snapshot.
    pub revision: String,
    /// Dossier de cache contenant la révision.
    pub folder: PathBuf,
    /// Sous-dossier propre à la révision.
    pub revision_dir: PathBuf,
    /// Chemin de l'exécutable Chromium.
    pub executable_path: PathBuf,
    /// Un téléchargement complet est présent localement.
    pub local: bool,
    /// Le binaire a passé la validation de lancement.
    pub launchable: bool,
    /// Version rapportée par le binaire, quand il est lançable.
    pub chromium_version: Option<String>,
    /// Version de cette bibliothèque.
    pub resolver_version: &'static str,
}

impl RevisionInfo {
    /// Commande prête à l'emploi pour piloter le binaire résolu en headless.
    pub fn launch_command(&self) -> Command {
        let mut command = Command::new(&self.executable_path);
        command.args(LAUNCH_ARGS);
        configure_command_no_window(&mut command);
        command
    }
}
