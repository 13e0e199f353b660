/// Utilitaires transverses de manipulation de chemins.
pub mod path;
/// Utilitaires transverses de gestion de process externes.
pub mod process;
