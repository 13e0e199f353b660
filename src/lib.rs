//! Résolution d'un binaire Chromium local pour l'automatisation headless.
//!
//! Détecte un snapshot déjà téléchargé dans les dossiers candidats, sinon le
//! récupère depuis une liste de miroirs avec bascule d'hôtes et reprise
//! bornée, valide son lancement puis émet une fiche [`RevisionInfo`] unique.

/// Erreurs publiques de résolution.
mod error;
/// Accès au dépôt de snapshots: plateformes, cache, téléchargement.
mod fetcher;
/// Options fusionnées sur les valeurs par défaut.
mod options;
/// Rendu de la progression de téléchargement.
mod progress;
/// Enchaînement des étapes d'une résolution.
mod resolver;
/// Fiche de révision émise en fin de résolution.
mod revision;
/// Utilitaires transverses.
mod utils;

pub use error::ResolveError;
pub use fetcher::Platform;
pub use options::{ResolverOptions, DEFAULT_FOLDER_NAME, DEFAULT_HOSTS, DEFAULT_REVISION};
pub use resolver::Resolver;
pub use revision::{RevisionInfo, LAUNCH_ARGS, RESOLVER_VERSION};

/// Résout un Chromium local pour les options données.
///
/// Émet exactement une fiche par appel; l'épuisement des cycles de reprise
/// est la seule erreur terminale de téléchargement.
pub async fn resolve(options: ResolverOptions) -> Result<RevisionInfo, ResolveError> {
    Resolver::new(options).run().await
}
