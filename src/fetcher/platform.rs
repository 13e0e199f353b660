use std::path::{Path, PathBuf};

use serde::Serialize;

/// Plateformes couvertes par le dépôt de snapshots Chromium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linux,
    Mac,
    MacArm,
    Win32,
    Win64,
}

impl Platform {
    /// Détecte la plateforme du process courant.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            if cfg!(target_arch = "aarch64") {
                Platform::MacArm
            } else {
                Platform::Mac
            }
        } else if cfg!(target_os = "windows") {
            if cfg!(target_pointer_width = "64") {
                Platform::Win64
            } else {
                Platform::Win32
            }
        } else {
            Platform::Linux
        }
    }

    /// Segment du dépôt de snapshots pour cette plateforme.
    pub fn snapshot_segment(self) -> &'static str {
        match self {
            Platform::Linux => "Linux_x64",
            Platform::Mac => "Mac",
            Platform::MacArm => "Mac_Arm",
            Platform::Win32 => "Win",
            Platform::Win64 => "Win_x64",
        }
    }

    /// Nom de l'archive publiée pour cette plateforme.
    pub fn archive_name(self) -> &'static str {
        match self {
            Platform::Linux => "chrome-linux.zip",
            Platform::Mac | Platform::MacArm => "chrome-mac.zip",
            Platform::Win32 | Platform::Win64 => "chrome-win.zip",
        }
    }

    /// Préfixe des dossiers de révision dans le cache local.
    pub fn cache_prefix(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::MacArm => "mac_arm",
            Platform::Win32 => "win32",
            Platform::Win64 => "win64",
        }
    }

    /// Nom du dossier local d'une révision (`linux-1403386`, ...).
    pub fn cache_key(self, revision: &str) -> String {
        format!("{}-{revision}", self.cache_prefix())
    }

    /// URL complète de l'archive d'une révision sur un hôte donné.
    pub fn download_url(self, host: &str, revision: &str) -> String {
        format!(
            "{}/chromium-browser-snapshots/{}/{revision}/{}",
            host.trim_end_matches('/'),
            self.snapshot_segment(),
            self.archive_name()
        )
    }

    /// Chemin de l'exécutable à l'intérieur du dossier d'une révision.
    pub fn executable_path(self, revision_dir: &Path) -> PathBuf {
        match self {
            Platform::Linux => revision_dir.join("chrome-linux").join("chrome"),
            Platform::Mac | Platform::MacArm => revision_dir
                .join("chrome-mac")
                .join("Chromium.app")
                .join("Contents")
                .join("MacOS")
                .join("Chromium"),
            Platform::Win32 | Platform::Win64 => revision_dir.join("chrome-win").join("chrome.exe"),
        }
    }
}
