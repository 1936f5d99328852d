//! Advisory detection of the tools the setup steps call

use super::composer::Composer;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `program args... --version` and keep the first output line
pub fn probe(name: &'static str, program: &str, args: &[String]) -> ToolInfo {
    let output = Command::new(program).args(args).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            ToolInfo {
                name,
                version,
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Probe PHP, composer and yarn; never fails, missing tools are just reported
pub fn check_tools(composer: &Composer) -> Vec<ToolInfo> {
    vec![
        probe("PHP", "php", &[]),
        probe("Composer", composer.program(), composer.args()),
        probe("Yarn", "yarn", &[]),
    ]
}
