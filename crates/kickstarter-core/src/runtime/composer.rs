//! Package manager detection

use std::path::Path;

/// Local phar picked up from the current directory
const COMPOSER_PHAR: &str = "composer.phar";

/// How to invoke composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    program: String,
    args: Vec<String>,
}

impl Composer {
    /// Detect composer: `env_var` override, then `./composer.phar`, then `composer` on PATH
    pub fn detect(cwd: &Path, env_var: &str) -> Self {
        Self::detect_with(cwd, std::env::var(env_var).ok().as_deref())
    }

    pub fn detect_with(cwd: &Path, env_override: Option<&str>) -> Self {
        if let Some(parts) = env_override.and_then(split_command) {
            return parts;
        }

        let phar = cwd.join(COMPOSER_PHAR);
        if phar.is_file() {
            // Absolute, so commands run from the project folder still find it
            return Self {
                program: "php".to_string(),
                args: vec![phar.display().to_string()],
            };
        }

        Self {
            program: "composer".to_string(),
            args: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The invocation as a shell command prefix
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| quote(part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn split_command(command: &str) -> Option<Composer> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some(Composer {
        program,
        args: parts.collect(),
    })
}

fn quote(part: &str) -> String {
    if part.chars().any(char::is_whitespace) {
        format!("\"{}\"", part)
    } else {
        part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_composer_on_path() {
        let dir = TempDir::new().unwrap();
        let composer = Composer::detect_with(dir.path(), None);
        assert_eq!(composer.command_line(), "composer");
    }

    #[test]
    fn test_prefers_local_phar() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("composer.phar"), "").unwrap();

        let composer = Composer::detect_with(dir.path(), None);
        assert_eq!(composer.program(), "php");
        assert_eq!(
            composer.args(),
            [dir.path().join("composer.phar").display().to_string()]
        );
    }

    #[test]
    fn test_env_override_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("composer.phar"), "").unwrap();

        let composer = Composer::detect_with(dir.path(), Some("php8.2 /opt/composer.phar"));
        assert_eq!(composer.command_line(), "php8.2 /opt/composer.phar");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let dir = TempDir::new().unwrap();
        let composer = Composer::detect_with(dir.path(), Some("   "));
        assert_eq!(composer.command_line(), "composer");
    }

    #[test]
    fn test_command_line_quotes_paths_with_spaces() {
        let composer = Composer {
            program: "php".to_string(),
            args: vec!["/home/jane/my projects/composer.phar".to_string()],
        };
        assert_eq!(
            composer.command_line(),
            "php \"/home/jane/my projects/composer.phar\""
        );
    }
}
