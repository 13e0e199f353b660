use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Révision Chromium utilisée quand l'appelant n'en fixe aucune.
pub const DEFAULT_REVISION: &str = "1403386";

/// Nom par défaut du dossier de cache des snapshots.
pub const DEFAULT_FOLDER_NAME: &str = ".chromium-browser-snapshots";

/// Miroirs interrogés dans l'ordre pour le téléchargement.
pub const DEFAULT_HOSTS: &[&str] = &[
    "https://storage.googleapis.com",
    "https://cdn.npmmirror.com/binaries",
];

fn default_inactivity_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_host_switch_delay() -> Duration {
    Duration::from_secs(1)
}

/// Options d'une résolution, fusionnées sur les valeurs par défaut.
///
/// Figées une fois la résolution démarrée.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Révision cible; retombe sur [`DEFAULT_REVISION`] si absente.
    pub revision: Option<String>,
    /// Dossiers de cache supplémentaires sondés avant le cache utilisateur.
    /// Accepte une liste ou une chaîne séparée par des virgules.
    #[serde(deserialize_with = "string_or_list")]
    pub detection_paths: Vec<String>,
    /// Nom du dossier de cache créé sous `download_root`.
    pub folder_name: String,
    /// Racine hébergeant le dossier de cache; retombe sur le répertoire
    /// personnel de l'utilisateur si absente.
    pub download_root: Option<PathBuf>,
    /// Hôtes miroirs interrogés dans l'ordre.
    pub hosts: Vec<String>,
    /// Nombre maximal de cycles complets sur la liste d'hôtes.
    pub retry: u32,
    /// Délai sans octet reçu avant d'abandonner une tentative.
    #[serde(skip, default = "default_inactivity_timeout")]
    pub inactivity_timeout: Duration,
    /// Pause observée entre deux tentatives d'hôtes.
    #[serde(skip, default = "default_host_switch_delay")]
    pub host_switch_delay: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            revision: None,
            detection_paths: Vec::new(),
            folder_name: DEFAULT_FOLDER_NAME.to_string(),
            download_root: None,
            hosts: DEFAULT_HOSTS.iter().map(|host| host.to_string()).collect(),
            retry: 3,
            inactivity_timeout: default_inactivity_timeout(),
            host_switch_delay: default_host_switch_delay(),
        }
    }
}

impl ResolverOptions {
    /// Révision effectivement visée par la résolution.
    pub fn target_revision(&self) -> &str {
        self.revision.as_deref().unwrap_or(DEFAULT_REVISION)
    }
}

/// Désérialise une liste de chemins donnée soit en tableau, soit en chaîne
/// séparée par des virgules.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        OneOrMany::Many(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = ResolverOptions::default();
        assert_eq!(options.folder_name, DEFAULT_FOLDER_NAME);
        assert_eq!(options.hosts.len(), 2);
        assert_eq!(options.retry, 3);
        assert_eq!(options.target_revision(), DEFAULT_REVISION);
        assert_eq!(options.inactivity_timeout, Duration::from_secs(30));
        assert_eq!(options.host_switch_delay, Duration::from_secs(1));
    }

    #[test]
    fn empty_json_yields_defaults() {
        let options: ResolverOptions = serde_json::from_str("{}").unwrap();
        assert!(options.revision.is_none());
        assert!(options.detection_paths.is_empty());
        assert_eq!(options.retry, 3);
        // Les champs non sérialisés gardent leurs valeurs par défaut.
        assert_eq!(options.inactivity_timeout, Duration::from_secs(30));
        assert_eq!(options.host_switch_delay, Duration::from_secs(1));
    }

    #[test]
    fn detection_paths_accepts_comma_separated_string() {
        let options: ResolverOptions =
            serde_json::from_str(r#"{"detection_paths": "/opt/a, /opt/b,"}"#).unwrap();
        assert_eq!(options.detection_paths, vec!["/opt/a", "/opt/b"]);
    }

    #[test]
    fn detection_paths_accepts_list() {
        let options: ResolverOptions =
            serde_json::from_str(r#"{"detection_paths": ["/opt/a", "/opt/b"]}"#).unwrap();
        assert_eq!(options.detection_paths, vec!["/opt/a", "/opt/b"]);
    }

    #[test]
    fn explicit_revision_overrides_default() {
        let options: ResolverOptions =
            serde_json::from_str(r#"{"revision": "1153778", "retry": 5}"#).unwrap();
        assert_eq!(options.target_revision(), "1153778");
        assert_eq!(options.retry, 5);
    }
}
