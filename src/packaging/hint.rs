use std::path::Path;

/// Advisory shown after installation when no config exists yet.
pub fn install_hint(config_path: &Path) -> Option<String> {
    if config_path.exists() {
        return None;
    }

    Some(format!(
        "Run 'cyberark-ssh init' to create a starter config at {}",
        config_path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn hint_only_when_config_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".cyberark-ssh.yaml");

        let hint = install_hint(&path).unwrap();
        assert!(hint.contains(&path.display().to_string()));

        std::fs::write(&path, "user: a\n").unwrap();
        assert_eq!(install_hint(&path), None);
    }
}
