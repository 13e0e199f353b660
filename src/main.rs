//! Binaire de résolution: imprime le chemin de l'exécutable résolu et sort
//! avec un statut non nul quand tous les cycles de reprise échouent.
//!
//! Usage: `chromium-resolver [--config options.json] [revision]`

use chromium_resolver::ResolverOptions;

/// Charge les options depuis un fichier de configuration JSON.
fn load_options(path: &str) -> ResolverOptions {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            eprintln!("ERROR: cannot read configuration {path}: {error}");
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&raw) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("ERROR: invalid configuration {path}: {error}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let mut options = ResolverOptions::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(path) = args.next() {
                    options = load_options(&path);
                }
            }
            revision => options.revision = Some(revision.to_string()),
        }
    }

    match chromium_resolver::resolve(options).await {
        Ok(info) => println!("{}", info.executable_path.display()),
        Err(error) => {
            eprintln!("ERROR: {error}");
            std::process::exit(1);
        }
    }
}
