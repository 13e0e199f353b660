use std::time::Duration;

use thiserror::Error;

/// Erreur terminale d'une résolution.
///
/// Seul l'épuisement des cycles de reprise est fatal: tous les autres
/// incidents sont absorbés par la boucle de téléchargement ou convertis en
/// métadonnées de la fiche finale.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Tous les hôtes de tous les cycles de reprise ont échoué.
    #[error("failed to download Chromium r{revision} after {cycles} retry cycle(s)")]
    RetryExhausted {
        /// Révision qui était visée.
        revision: String,
        /// Nombre de cycles complets consommés.
        cycles: u32,
    },
    /// Aucun répertoire personnel disponible pour héberger le cache.
    #[error("no usable home directory to host the snapshot cache")]
    NoCacheRoot,
}

/// Échec d'une tentative de téléchargement, absorbé par la bascule d'hôtes.
#[derive(Debug, Error)]
pub(crate) enum AttemptError {
    /// L'hôte ne publie pas la révision demandée.
    #[error("revision {0} is not available on this host")]
    Unavailable(String),
    /// Aucun octet reçu avant l'expiration du délai d'inactivité.
    #[error("no byte received within {0:?}")]
    Stalled(Duration),
    /// Échec du transfert HTTP.
    #[error("transfer failed: {0}")]
    Transfer(#[from] reqwest::Error),
    /// Archive reçue mais inexploitable.
    #[error("archive extraction failed: {0}")]
    Archive(String),
    /// Erreur d'entrée/sortie locale.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
