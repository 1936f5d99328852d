//! The guided install workflow
//!
//! Answers are gathered once into an immutable [`ProjectDetails`], then the
//! [`InstallWorkflow`] walks its stages in a fixed order:
//!
//! 1. verify the destination folder is free (skipped with `--force`)
//! 2. install the skeleton
//! 3. customize it
//! 4. refresh the autoloader
//! 5. to 8. optional, confirmation-gated post-install steps
//!
//! Required stages halt the workflow on failure. Declined optional stages are
//! skipped; failing optional stages are reported and the workflow moves on.

use crate::customize::{self, env, ProjectDetails};
use crate::error::KickstartError;
use crate::naming::{AuthorRecord, PackageIdentifier};
use crate::product::SkeletonConfig;
use crate::runtime::{CommandRunner, Composer, SetupStep, StepContext};
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Attempts allowed for each validated prompt
pub const MAX_ATTEMPTS: usize = 2;

/// Questions and progress messages exchanged with the operator
pub trait Interaction {
    /// Ask for free text; `default` is returned for an empty answer
    fn input(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool>;

    fn info(&mut self, message: &str) -> io::Result<()>;

    fn success(&mut self, message: &str) -> io::Result<()>;

    fn warning(&mut self, message: &str) -> io::Result<()>;
}

/// Options taken from the command line
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub package_name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Install even if the destination folder already exists
    pub force: bool,
    /// Never prompt; use defaults for every question
    pub no_interaction: bool,
    pub no_ansi: bool,
    pub quiet: bool,
}

impl InstallOptions {
    /// Flags forwarded to every composer invocation
    pub fn passthrough(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.no_ansi {
            flags.push("--no-ansi");
        }
        if self.quiet {
            flags.push("--quiet");
        }
        flags
    }
}

/// Collect the project details, prompting for anything missing
///
/// Values given as options are validated without prompting.
pub fn gather<C: SkeletonConfig, I: Interaction>(
    config: &C,
    options: &InstallOptions,
    ui: &mut I,
) -> Result<ProjectDetails> {
    let convention = config.naming_convention();
    let interactive = !options.no_interaction;

    let identifier = match &options.package_name {
        Some(name) => PackageIdentifier::parse(name, convention)?,
        None if !interactive => {
            return Err(KickstartError::MissingInput {
                what: "package name",
            }
            .into())
        }
        None => ask_validated(ui, "Package name (<vendor>/<name>)", None, |answer| {
            PackageIdentifier::parse(answer, convention)
        })?,
    };

    let author = match &options.author {
        Some(author) => AuthorRecord::parse(author)?,
        None if !interactive => None,
        None => ask_validated(
            ui,
            "Author (Jane Doe <jane.doe@sylius.com>), n to skip",
            Some("n"),
            AuthorRecord::parse,
        )?,
    };

    let description = match &options.description {
        Some(description) => description.clone(),
        None if !interactive => String::new(),
        None => ui.input("Description", Some(""))?,
    };

    let license = match &options.license {
        Some(license) => license.clone(),
        None if !interactive => String::new(),
        None => ui.input("License", Some(""))?,
    };

    Ok(ProjectDetails::new(identifier, author, description, license))
}

/// Ask until `validate` accepts the answer or the attempts run out
fn ask_validated<I, T, F>(
    ui: &mut I,
    prompt: &str,
    default: Option<&str>,
    validate: F,
) -> Result<T>
where
    I: Interaction,
    F: Fn(&str) -> Result<T, KickstartError>,
{
    let mut attempt = 1;
    loop {
        let answer = ui.input(prompt, default)?;
        match validate(answer.trim()) {
            Ok(value) => return Ok(value),
            Err(err) if attempt < MAX_ATTEMPTS => {
                ui.warning(&err.to_string())?;
                attempt += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Fail when something other than the current directory occupies `path`
pub fn verify_destination_absent(path: &Path, cwd: &Path) -> Result<(), KickstartError> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(());
    }

    let is_cwd = match (fs::canonicalize(path), fs::canonicalize(cwd)) {
        (Ok(path), Ok(cwd)) => path == cwd,
        _ => false,
    };
    if is_cwd {
        Ok(())
    } else {
        Err(KickstartError::DestinationExists {
            path: path.to_path_buf(),
        })
    }
}

/// A workflow stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    VerifyDestinationAbsent,
    AcquireTemplate,
    Customize,
    RefreshDependencyMetadata,
    BuildAssets,
    CreateDatabase,
    LoadFixtures,
    StartServer,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::VerifyDestinationAbsent,
        Stage::AcquireTemplate,
        Stage::Customize,
        Stage::RefreshDependencyMetadata,
        Stage::BuildAssets,
        Stage::CreateDatabase,
        Stage::LoadFixtures,
        Stage::StartServer,
    ];

    /// The external step this stage runs, if any
    pub fn setup_step(&self) -> Option<SetupStep> {
        match self {
            Stage::VerifyDestinationAbsent | Stage::Customize => None,
            Stage::AcquireTemplate => Some(SetupStep::AcquireSkeleton),
            Stage::RefreshDependencyMetadata => Some(SetupStep::RefreshAutoload),
            Stage::BuildAssets => Some(SetupStep::BuildAssets),
            Stage::CreateDatabase => Some(SetupStep::CreateDatabase),
            Stage::LoadFixtures => Some(SetupStep::LoadFixtures),
            Stage::StartServer => Some(SetupStep::StartServer),
        }
    }

    /// Question gating an optional stage
    pub fn confirmation(&self) -> Option<&'static str> {
        self.setup_step().and_then(|step| step.confirmation())
    }

    pub fn is_required(&self) -> bool {
        self.confirmation().is_none()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::VerifyDestinationAbsent => write!(f, "Checking the destination"),
            Stage::Customize => write!(f, "Customizing the skeleton"),
            other => match other.setup_step() {
                Some(step) => write!(f, "{}", step),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

/// What happened to each stage of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowOutcome {
    pub project_dir: PathBuf,
    pub completed: Vec<Stage>,
    pub skipped: Vec<Stage>,
    pub failed: Vec<Stage>,
}

/// The install state machine for one project
pub struct InstallWorkflow<'a, C: SkeletonConfig> {
    config: &'a C,
    details: &'a ProjectDetails,
    cwd: PathBuf,
    composer: Composer,
    skeleton_package: String,
    force: bool,
    interactive: bool,
    passthrough: Vec<&'static str>,
}

impl<'a, C: SkeletonConfig> InstallWorkflow<'a, C> {
    pub fn new(
        config: &'a C,
        details: &'a ProjectDetails,
        options: &InstallOptions,
        cwd: PathBuf,
        composer: Composer,
        skeleton_package: impl Into<String>,
    ) -> Self {
        Self {
            config,
            details,
            cwd,
            composer,
            skeleton_package: skeleton_package.into(),
            force: options.force,
            interactive: !options.no_interaction,
            passthrough: options.passthrough(),
        }
    }

    pub fn project_dir(&self) -> PathBuf {
        self.cwd.join(self.details.folder_name())
    }

    /// Run every stage in order
    pub async fn execute<I: Interaction, R: CommandRunner>(
        &self,
        ui: &mut I,
        runner: &R,
    ) -> Result<WorkflowOutcome> {
        let mut outcome = WorkflowOutcome {
            project_dir: self.project_dir(),
            ..WorkflowOutcome::default()
        };

        for stage in Stage::ALL {
            if stage == Stage::VerifyDestinationAbsent && self.force {
                ui.info("Skipping the destination check (--force)")?;
                outcome.skipped.push(stage);
                continue;
            }

            if let Some(question) = stage.confirmation() {
                let accepted = self.interactive && ui.confirm(question, false)?;
                if !accepted {
                    outcome.skipped.push(stage);
                    continue;
                }
            }

            match self.run_stage(stage, ui, runner).await {
                Ok(()) => outcome.completed.push(stage),
                Err(err) if !stage.is_required() => {
                    ui.warning(&format!("{:#}", err))?;
                    outcome.failed.push(stage);
                }
                Err(err) => return Err(err),
            }
        }

        ui.success(&format!(
            "Your plugin is ready in folder {}/",
            self.details.folder_name()
        ))?;
        Ok(outcome)
    }

    async fn run_stage<I: Interaction, R: CommandRunner>(
        &self,
        stage: Stage,
        ui: &mut I,
        runner: &R,
    ) -> Result<()> {
        match stage {
            Stage::VerifyDestinationAbsent => {
                verify_destination_absent(&self.project_dir(), &self.cwd)?;
                Ok(())
            }
            Stage::Customize => self.customize(ui),
            Stage::CreateDatabase => {
                let application = self.project_dir().join(self.config.application_dir());
                env::prepare_sqlite_env(&application)?;
                self.run_step(SetupStep::CreateDatabase, ui, runner).await
            }
            other => match other.setup_step() {
                Some(step) => self.run_step(step, ui, runner).await,
                None => Ok(()),
            },
        }
    }

    fn customize<I: Interaction>(&self, ui: &mut I) -> Result<()> {
        ui.info("Configure your plugin...")?;
        let report = customize::customize(self.config, &self.project_dir(), self.details)
            .with_context(|| format!("Failed to customize {}", self.details.folder_name()))?;
        ui.info(&format!(
            "Rewrote {} of {} files, renamed {} source files",
            report.contents.files_rewritten,
            report.contents.files_visited,
            report.sources.files_renamed
        ))?;
        Ok(())
    }

    async fn run_step<I: Interaction, R: CommandRunner>(
        &self,
        step: SetupStep,
        ui: &mut I,
        runner: &R,
    ) -> Result<()> {
        ui.info(step.announcement())?;

        let folder_name = self.details.folder_name();
        let ctx = StepContext {
            composer: &self.composer,
            skeleton_package: &self.skeleton_package,
            cwd: &self.cwd,
            folder_name: &folder_name,
            application_dir: self.config.application_dir(),
            passthrough: &self.passthrough,
        };
        let command = step.command(&ctx);
        let code = runner.run(&command).await?;
        if code == 0 {
            return Ok(());
        }

        let err = match step {
            SetupStep::AcquireSkeleton => KickstartError::AcquisitionFailed {
                command: command.script(),
                code,
            },
            other => KickstartError::CommandFailed {
                step: other.label(),
                command: command.script(),
                code,
            },
        };
        Err(err.into())
    }
}
