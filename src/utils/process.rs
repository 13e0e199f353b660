/// Configure la commande pour éviter l'ouverture d'une fenêtre console sur
/// Windows lors du lancement du binaire.
pub fn configure_command_no_window(command: &mut tokio::process::Command) {
    #[cfg(target_os = "windows")]
    {
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        command.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = command;
    }
}

/// Extrait un message d'erreur lisible depuis la sortie d'un process,
/// stderr en priorité.
pub fn sanitize_cmd_error(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
