//! Rendu de la progression de téléchargement.
//!
//! L'indicateur s'efface le temps d'imprimer une ligne de journal puis
//! reprend, pour ne jamais entrelacer barre et logs sur la même sortie.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Fraction d'avancement; définie à 0 quand le total est inconnu.
pub fn fraction(downloaded: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    downloaded as f64 / total as f64
}

/// Convertit un nombre d'octets en mégaoctets arrondis à une décimale.
pub fn to_megabytes(bytes: u64) -> String {
    let mb = bytes as f64 / 1024.0 / 1024.0;
    format!("{} Mb", (mb * 10.0).round() / 10.0)
}

/// Indicateur de progression du téléchargement courant.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    saw_length: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: None,
            saw_length: false,
        }
    }

    /// Met à jour l'indicateur avec l'avancement cumulé.
    pub fn show(&mut self, downloaded: u64, total: u64) {
        let bar = self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(bar_style());
            bar
        });

        if total > 0 && !self.saw_length {
            bar.set_length(total);
            self.saw_length = true;
        }

        let percent = (fraction(downloaded, total) * 100.0).round();
        bar.set_message(format!(
            "{} / {} ({percent}%)",
            to_megabytes(downloaded),
            to_megabytes(total)
        ));
        bar.set_position(downloaded);
    }

    /// Imprime une ligne de suivi sans l'entrelacer avec la barre: le rendu
    /// est suspendu le temps de l'impression puis reprend.
    pub fn log(&self, message: &str) {
        match &self.bar {
            Some(bar) if !bar.is_finished() => bar.suspend(|| println!("{message}")),
            _ => println!("{message}"),
        }
    }

    /// Retire la barre de l'écran une fois le téléchargement terminé.
    pub fn finish(&mut self) {
        self.saw_length = false;
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("Downloading Chromium - {msg} [{bar:30}]")
        .unwrap()
        .progress_chars("=> ")
}
