//! Typed descriptors for the external setup steps
//!
//! Each step carries its own command template instead of passing raw
//! command strings through the workflow.

use super::composer::Composer;
use super::process::ShellCommand;
use std::fmt;
use std::path::Path;

/// Environment the embedded application's console runs in
const CONSOLE_ENV: &str = "test";

/// An external setup step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupStep {
    AcquireSkeleton,
    RefreshAutoload,
    BuildAssets,
    CreateDatabase,
    LoadFixtures,
    StartServer,
}

/// Values the command templates are filled with
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub composer: &'a Composer,
    pub skeleton_package: &'a str,
    /// Directory the install was started from
    pub cwd: &'a Path,
    pub folder_name: &'a str,
    /// Embedded application, relative to the project folder
    pub application_dir: &'a str,
    /// Flags appended to every composer invocation (`--no-ansi`, `--quiet`)
    pub passthrough: &'a [&'static str],
}

impl<'a> StepContext<'a> {
    fn project_dir(&self) -> std::path::PathBuf {
        self.cwd.join(self.folder_name)
    }

    fn composer(&self, args: &str) -> String {
        let mut command = format!("{} {}", self.composer.command_line(), args);
        for flag in self.passthrough {
            command.push(' ');
            command.push_str(flag);
        }
        command
    }

    fn console(&self, args: &str) -> String {
        format!(
            "(cd {} && bin/console {} -e {})",
            self.application_dir, args, CONSOLE_ENV
        )
    }

    fn yarn(&self, args: &str) -> String {
        format!("(cd {} && yarn {})", self.application_dir, args)
    }
}

impl SetupStep {
    /// Short name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            SetupStep::AcquireSkeleton => "Installing the skeleton",
            SetupStep::RefreshAutoload => "Refreshing the autoloader",
            SetupStep::BuildAssets => "Building assets",
            SetupStep::CreateDatabase => "Creating the database",
            SetupStep::LoadFixtures => "Loading fixtures",
            SetupStep::StartServer => "Starting the server",
        }
    }

    /// Progress line shown before the step runs
    pub fn announcement(&self) -> &'static str {
        match self {
            SetupStep::AcquireSkeleton => "Installing Plugin Skeleton...",
            SetupStep::RefreshAutoload => "Optimizing the autoloader...",
            SetupStep::BuildAssets => "Building assets...",
            SetupStep::CreateDatabase => "Creating SQLite database...",
            SetupStep::LoadFixtures => "Loading fixtures...",
            SetupStep::StartServer => "Starting the internal server...",
        }
    }

    /// Yes/no question gating an optional step
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            SetupStep::AcquireSkeleton | SetupStep::RefreshAutoload => None,
            SetupStep::BuildAssets => Some("Install and build assets?"),
            SetupStep::CreateDatabase => Some("Setup and create a SQLite database?"),
            SetupStep::LoadFixtures => Some("Load Fixtures into database?"),
            SetupStep::StartServer => Some("Start the internal server?"),
        }
    }

    pub fn command(&self, ctx: &StepContext<'_>) -> ShellCommand {
        match self {
            SetupStep::AcquireSkeleton => ShellCommand::new([ctx.composer(&format!(
                "create-project {} {}",
                ctx.skeleton_package, ctx.folder_name
            ))])
            .in_dir(ctx.cwd),
            SetupStep::RefreshAutoload => {
                ShellCommand::new([ctx.composer("dump-autoload --optimize")])
                    .in_dir(ctx.project_dir())
            }
            SetupStep::BuildAssets => ShellCommand::new([
                ctx.yarn("install"),
                ctx.yarn("build"),
                ctx.console("assets:install public"),
            ])
            .in_dir(ctx.project_dir()),
            SetupStep::CreateDatabase => ShellCommand::new([
                ctx.console("doctrine:database:create"),
                ctx.console("doctrine:schema:create"),
            ])
            .in_dir(ctx.project_dir()),
            SetupStep::LoadFixtures => {
                ShellCommand::new([ctx.console("sylius:fixtures:load")]).in_dir(ctx.project_dir())
            }
            SetupStep::StartServer => {
                ShellCommand::new([ctx.console("server:run -d public")]).in_dir(ctx.project_dir())
            }
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_context<T>(passthrough: &[&'static str], f: impl FnOnce(&StepContext<'_>) -> T) -> T {
        let composer = Composer::detect_with(Path::new("/work"), Some("composer"));
        let ctx = StepContext {
            composer: &composer,
            skeleton_package: "sylius/plugin-skeleton",
            cwd: Path::new("/work"),
            folder_name: "IronManSyliusFooPlugin",
            application_dir: "tests/Application",
            passthrough,
        };
        f(&ctx)
    }

    #[test]
    fn test_acquire_runs_create_project_from_cwd() {
        let command = with_context(&[], |ctx| SetupStep::AcquireSkeleton.command(ctx));
        assert_eq!(
            command.script(),
            "composer create-project sylius/plugin-skeleton IronManSyliusFooPlugin"
        );
        assert_eq!(command.working_dir(), Some(Path::new("/work")));
    }

    #[test]
    fn test_passthrough_flags_only_reach_composer() {
        let flags = &["--no-ansi", "--quiet"];
        let refresh = with_context(flags, |ctx| SetupStep::RefreshAutoload.command(ctx));
        let assets = with_context(flags, |ctx| SetupStep::BuildAssets.command(ctx));

        assert_eq!(
            refresh.script(),
            "composer dump-autoload --optimize --no-ansi --quiet"
        );
        assert!(!assets.script().contains("--quiet"));
    }

    #[test]
    fn test_post_steps_run_in_project_folder() {
        for step in [
            SetupStep::RefreshAutoload,
            SetupStep::BuildAssets,
            SetupStep::CreateDatabase,
            SetupStep::LoadFixtures,
            SetupStep::StartServer,
        ] {
            let command = with_context(&[], |ctx| step.command(ctx));
            assert_eq!(
                command.working_dir(),
                Some(Path::new("/work/IronManSyliusFooPlugin")),
                "{step}"
            );
        }
    }

    #[test]
    fn test_console_commands_target_embedded_application() {
        let command = with_context(&[], |ctx| SetupStep::CreateDatabase.command(ctx));
        assert_eq!(
            command.commands(),
            [
                "(cd tests/Application && bin/console doctrine:database:create -e test)",
                "(cd tests/Application && bin/console doctrine:schema:create -e test)",
            ]
        );
    }

    #[test]
    fn test_only_post_install_steps_ask_for_confirmation() {
        assert!(SetupStep::AcquireSkeleton.confirmation().is_none());
        assert!(SetupStep::RefreshAutoload.confirmation().is_none());
        assert_eq!(
            SetupStep::StartServer.confirmation(),
            Some("Start the internal server?")
        );
    }
}
