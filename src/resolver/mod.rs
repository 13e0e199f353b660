//! Enchaînement des étapes d'une résolution: détection locale,
//! téléchargement avec bascule d'hôtes, validation de lancement puis
//! émission de la fiche finale.

/// Recherche d'un téléchargement local existant.
mod detection;
/// Boucle de bascule d'hôtes et de reprise bornée.
mod download;
/// Validation de lancement headless.
mod launch;

use std::path::PathBuf;

use crate::error::ResolveError;
use crate::fetcher::{self, Platform};
use crate::options::ResolverOptions;
use crate::progress::ProgressReporter;
use crate::revision::{RevisionInfo, RESOLVER_VERSION};

/// Déroule une résolution complète pour un jeu d'options.
pub struct Resolver {
    options: ResolverOptions,
    platform: Platform,
    reporter: ProgressReporter,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            platform: Platform::current(),
            reporter: ProgressReporter::new(),
        }
    }

    /// Exécute les étapes dans l'ordre et émet la fiche finale une seule
    /// fois; seule l'exhaustion des cycles de reprise est une erreur.
    pub async fn run(mut self) -> Result<RevisionInfo, ResolveError> {
        let revision = self.options.target_revision().to_string();
        self.reporter
            .log(&format!("Resolve chromium revision: {revision}"));

        let root = self.cache_root()?;
        let user_folder = fetcher::ensure_cache_folder(&root, &self.options.folder_name);

        self.reporter.log("Detecting local chromium ...");
        let candidates = detection::candidate_list(&self.options, &user_folder);
        let found = detection::detect(&candidates, &user_folder, self.platform, &revision);

        let mut info = match found {
            Some(detected) => {
                let origin = if detected.in_user_folder {
                    "user cache"
                } else {
                    "detection path"
                };
                self.reporter.log(&format!(
                    "Detected chromium revision is already downloaded ({origin})."
                ));
                detected.info
            }
            None => {
                self.reporter.log("Not found local chromium");
                match download::run(
                    &self.options,
                    &revision,
                    &user_folder,
                    self.platform,
                    &mut self.reporter,
                )
                .await
                {
                    Ok(info) => info,
                    Err(error) => {
                        self.reporter.finish();
                        log::error!("{error}");
                        return Err(error);
                    }
                }
            }
        };

        let report = launch::validate(&info).await;
        info.launchable = report.launchable;
        info.chromium_version = report.chromium_version;

        self.reporter.finish();
        self.reporter
            .log(&format!("Chromium executable: {}", info.executable_path.display()));
        self.reporter
            .log(&format!("Chromium launchable: {}", info.launchable));
        if let Some(version) = &info.chromium_version {
            self.reporter.log(&format!("Chromium version: {version}"));
        }
        self.reporter.log(&format!("Resolver version: {RESOLVER_VERSION}"));

        Ok(info)
    }

    /// Racine du cache: option explicite, sinon répertoire personnel.
    fn cache_root(&self) -> Result<PathBuf, ResolveError> {
        match &self.options.download_root {
            Some(root) => Ok(root.clone()),
            None => dirs::home_dir().ok_or(ResolveError::NoCacheRoot),
        }
    }
}
