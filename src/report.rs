use std::fmt;
use std::path::Path;

use crate::model::config::Config;

/// Text printed by `cyberark-ssh list`.
pub fn render_listing(config: &Config, config_path: &Path) -> String {
    Listing {
        config,
        config_path,
    }
    .to_string()
}

struct Listing<'a> {
    config: &'a Config,
    config_path: &'a Path,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;

        if !config.aliases.is_empty() {
            writeln!(f, "{:<20} EXPANDS TO", "ALIAS")?;
            writeln!(f, "{:<20} {}", "-".repeat(20), "-".repeat(40))?;
            for (alias, host) in &config.aliases {
                writeln!(f, "{alias:<20} {host}")?;
            }
            writeln!(f)?;
        }

        if config.servers.is_empty() {
            writeln!(
                f,
                "no servers configured — edit {}",
                self.config_path.display()
            )?;
        } else {
            writeln!(
                f,
                "{:<40} {:<20} {:<15} DOMAIN",
                "SERVER", "VAULT", "ACCOUNT"
            )?;
            writeln!(
                f,
                "{:<40} {:<20} {:<15} {}",
                "-".repeat(40),
                "-".repeat(20),
                "-".repeat(15),
                "-".repeat(15)
            )?;
            for (server, entry) in &config.servers {
                let vault = if entry.vault.is_empty() {
                    format!("{} (default)", config.default_vault)
                } else {
                    entry.vault.clone()
                };
                let account = or_default(&entry.account, &config.default_account);
                let domain = or_default(&entry.domain, &config.default_domain);
                writeln!(f, "{server:<40} {vault:<20} {account:<15} {domain}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "default vault:   {}", or_none(&config.default_vault))?;
        writeln!(f, "default account: {}", or_none(&config.default_account))?;
        writeln!(f, "default domain:  {}", or_none(&config.default_domain))?;
        writeln!(f, "cyberark host:   {}", config.cyberark_host)?;
        writeln!(f, "port:            {}", config.port())?;
        writeln!(f, "user:            {}", config.user)?;
        if !config.ssh_args.is_empty() {
            writeln!(f, "ssh_args:        {}", config.ssh_args.join(" "))?;
        }

        Ok(())
    }
}

fn or_default(value: &str, default: &str) -> String {
    match (value.is_empty(), default.is_empty()) {
        (false, _) => value.to_string(),
        (true, false) => format!("{default} (default)"),
        (true, true) => "-".to_string(),
    }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> Config {
        Config::from_yaml(raw, Path::new("test.yaml")).unwrap()
    }

    #[test]
    fn lists_aliases_servers_and_defaults() {
        let cfg = config(
            r#"
user: alice
cyberark_host: psmp.example.com
default_vault: base
default_account: root
ssh_args: ["-o", "BatchMode=yes"]
aliases:
  w: web.example.com
servers:
  web.example.com: web_safe
  db.example.com:
    domain: corp
"#,
        );

        let out = render_listing(&cfg, Path::new("/home/a/.cyberark-ssh.yaml"));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], format!("{:<20} EXPANDS TO", "ALIAS"));
        assert_eq!(lines[2], format!("{:<20} web.example.com", "w"));
        assert_eq!(lines[3], "");
        assert!(lines[4].starts_with("SERVER"));
        // BTreeMap order: db before web.
        assert_eq!(
            lines[6],
            format!(
                "{:<40} {:<20} {:<15} corp",
                "db.example.com", "base (default)", "root (default)"
            )
        );
        assert_eq!(
            lines[7],
            format!(
                "{:<40} {:<20} {:<15} -",
                "web.example.com", "web_safe", "root (default)"
            )
        );
        assert!(out.contains("default vault:   base\n"));
        assert!(out.contains("default domain:  (none)\n"));
        assert!(out.contains("port:            22\n"));
        assert!(out.ends_with("ssh_args:        -o BatchMode=yes\n"));
    }

    #[test]
    fn unset_fields_without_defaults() {
        let cfg = config(
            r#"
user: alice
cyberark_host: h
servers:
  app02:
    account: admin
  app03:
"#,
        );

        let out = render_listing(&cfg, Path::new("/cfg.yaml"));
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("SERVER"));
        assert_eq!(
            lines[2],
            format!("{:<40} {:<20} {:<15} -", "app02", " (default)", "admin")
        );
        assert_eq!(
            lines[3],
            format!("{:<40} {:<20} {:<15} -", "app03", " (default)", "-")
        );
        assert!(out.contains("default vault:   (none)\n"));
    }

    #[test]
    fn empty_config_points_at_the_file() {
        let cfg = config("user: alice\ncyberark_host: h\n");
        let out = render_listing(&cfg, Path::new("/cfg.yaml"));

        assert!(out.starts_with("no servers configured — edit /cfg.yaml\n"));
        assert!(!out.contains("ALIAS"));
        assert!(!out.contains("ssh_args"));
    }
}
