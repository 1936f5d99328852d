//! Kickstarter Core - Install a plugin skeleton and turn it into your own project
//!
//! The library installs a skeleton package through the package manager, then
//! rewrites it in place: placeholder namespaces and identifiers are replaced
//! across the tree, sample sources are renamed, and the manifest is retargeted
//! at the new package.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Identifier and author parsing, substitution
//!   planning, tree rewriting, manifest customization, process running
//! - **Layer 2: Workflow Orchestration** - `SkeletonConfig` trait and the
//!   `InstallWorkflow` state machine, driven through the `Interaction` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//! - `email-validation` (default): Rejects author strings with a malformed address
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kickstarter_core::{
//!     customize, PackageIdentifier, ProjectDetails, SkeletonConfig, SyliusPlugin,
//! };
//!
//! let config = SyliusPlugin;
//! let identifier =
//!     PackageIdentifier::parse("iron-man/sylius-foo-plugin", config.naming_convention())?;
//! let details = ProjectDetails::new(identifier, None, "", "MIT");
//! customize::customize(&config, Path::new("IronManSyliusFooPlugin"), &details)?;
//! ```

pub mod customize;
pub mod error;
pub mod naming;
pub mod product;
pub mod runtime;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use customize::{ProjectDetails, RuleSet, SubstitutionRule, TreeRewriter};
pub use error::{KickstartError, NamingRule};
pub use naming::{AuthorRecord, NamingConvention, PackageIdentifier, ProjectNamespace};
pub use product::{SkeletonConfig, SyliusPlugin};
pub use workflow::{InstallOptions, InstallWorkflow, Interaction, Stage, WorkflowOutcome};

#[cfg(feature = "tui")]
pub use tui::run;
