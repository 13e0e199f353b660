//! Boucle de téléchargement: bascule d'hôtes et cycles de reprise bornés.

use std::path::Path;

use crate::error::{AttemptError, ResolveError};
use crate::fetcher::{Platform, SnapshotFetcher};
use crate::options::ResolverOptions;
use crate::progress::ProgressReporter;
use crate::revision::RevisionInfo;

/// Position courante dans la liste d'hôtes et compte des cycles de reprise.
///
/// Vit le temps d'une seule résolution, possédé par la boucle de
/// téléchargement.
#[derive(Debug)]
pub(crate) struct DownloadState {
    host_index: usize,
    retry_cycle: u32,
    host_count: usize,
    max_retry: u32,
}

/// Décision prise après l'échec d'une tentative.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Advance {
    /// Essayer l'hôte suivant de la liste.
    NextHost,
    /// Liste épuisée: repartir du premier hôte pour un nouveau cycle.
    NewCycle,
    /// Tous les cycles autorisés sont consommés.
    Exhausted,
}

impl DownloadState {
    pub(crate) fn new(host_count: usize, max_retry: u32) -> Self {
        Self {
            host_index: 0,
            retry_cycle: 0,
            host_count,
            max_retry,
        }
    }

    pub(crate) fn host_index(&self) -> usize {
        self.host_index
    }

    /// Avance sur l'hôte suivant, en entamant un nouveau cycle après le
    /// dernier de la liste.
    pub(crate) fn advance(&mut self) -> Advance {
        self.host_index += 1;
        if self.host_index < self.host_count {
            return Advance::NextHost;
        }

        self.host_index = 0;
        self.retry_cycle += 1;
        if self.retry_cycle >= self.max_retry {
            Advance::Exhausted
        } else {
            Advance::NewCycle
        }
    }
}

/// Déroule la boucle jusqu'au succès ou à l'épuisement des cycles.
///
/// Les échecs de tentative sont journalisés puis absorbés; seule
/// l'exhaustion remonte à l'appelant, sans fiche émise.
pub(crate) async fn run(
    options: &ResolverOptions,
    revision: &str,
    user_folder: &Path,
    platform: Platform,
    reporter: &mut ProgressReporter,
) -> Result<RevisionInfo, ResolveError> {
    let exhausted = || ResolveError::RetryExhausted {
        revision: revision.to_string(),
        cycles: options.retry,
    };

    if options.hosts.is_empty() || options.retry == 0 {
        return Err(exhausted());
    }

    let client = reqwest::Client::new();
    let mut state = DownloadState::new(options.hosts.len(), options.retry);

    loop {
        let host = &options.hosts[state.host_index()];
        let kind = if state.host_index() == 0 {
            "host"
        } else {
            "mirror host"
        };
        reporter.log(&format!("Download from {kind}: {host} ..."));

        match attempt(options, revision, user_folder, platform, host, &client, reporter).await {
            Ok(info) => {
                reporter.log(&format!("Chromium downloaded to {}", user_folder.display()));
                cleanup_other_revisions(user_folder, platform, revision);
                return Ok(info);
            }
            Err(AttemptError::Unavailable(_)) => {
                reporter.log(&format!("Can download {revision}: false"));
            }
            Err(error) => {
                log::error!("Failed to download Chromium r{revision}: {error}. retry ...");
            }
        }

        match state.advance() {
            Advance::Exhausted => return Err(exhausted()),
            Advance::NewCycle => reporter.log("Retry Chromium downloading ..."),
            Advance::NextHost => {}
        }

        // Pas de martèlement des miroirs entre deux tentatives.
        tokio::time::sleep(options.host_switch_delay).await;
    }
}

/// Une tentative complète sur un hôte: sondage de disponibilité puis
/// téléchargement sous délai d'inactivité.
async fn attempt(
    options: &ResolverOptions,
    revision: &str,
    user_folder: &Path,
    platform: Platform,
    host: &str,
    client: &reqwest::Client,
    reporter: &mut ProgressReporter,
) -> Result<RevisionInfo, AttemptError> {
    let fetcher = SnapshotFetcher::new(user_folder, platform).with_host(host);

    if !fetcher
        .can_download(client, revision, options.inactivity_timeout)
        .await
    {
        return Err(AttemptError::Unavailable(revision.to_string()));
    }
    reporter.log(&format!("Can download {revision}: true"));

    fetcher
        .download(client, revision, options.inactivity_timeout, |downloaded, total| {
            reporter.show(downloaded, total);
        })
        .await
}

/// Purge les autres révisions du cache; un échec de purge ne remet pas en
/// cause le succès du téléchargement.
fn cleanup_other_revisions(user_folder: &Path, platform: Platform, keep: &str) {
    let fetcher = SnapshotFetcher::new(user_folder, platform);
    for revision in fetcher.local_revisions() {
        if revision == keep {
            continue;
        }
        if let Err(error) = fetcher.remove(&revision) {
            log::warn!("Failed to remove cached revision {revision}: {error}");
        }
    }
}
