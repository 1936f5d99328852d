//! Error types for installing and customizing a skeleton
//!
//! Every variant renders as a message naming the violated rule or the failing
//! path, so the CLI can print it verbatim before exiting non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which naming convention a package name violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRule {
    /// The name must start with this prefix
    Prefix(&'static str),
    /// The name must end with this suffix
    Suffix(&'static str),
}

impl fmt::Display for NamingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingRule::Prefix(prefix) => write!(f, "it should start with \"{}\"", prefix),
            NamingRule::Suffix(suffix) => write!(f, "it should end with \"{}\"", suffix),
        }
    }
}

/// Errors raised while installing or customizing a project
#[derive(Debug, Error)]
pub enum KickstartError {
    /// The identifier is not a lowercase `vendor/name` pair.
    #[error(
        "The package name {input} is invalid, it should be lowercase and have a vendor name, \
         a forward slash, and a package name, matching: [a-z0-9_.-]+/[a-z0-9_.-]+"
    )]
    MalformedIdentifier { input: String },

    /// The name segment breaks the product's naming convention.
    #[error("The plugin name {segment} is invalid, {rule}")]
    NamingConventionViolation { segment: String, rule: NamingRule },

    /// The author string is not `Name <email>` with a valid address.
    #[error(
        "Invalid author string \"{input}\". Must be in the format: John Smith <john@example.com>"
    )]
    MalformedAuthorString { input: String },

    /// The target folder is already occupied.
    #[error("Directory already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    /// The package manager did not produce the skeleton.
    #[error("Installing the skeleton failed with exit code {code}: {command}")]
    AcquisitionFailed { command: String, code: i32 },

    /// A required external step exited non-zero.
    #[error("{step} failed with exit code {code}: {command}")]
    CommandFailed {
        step: &'static str,
        command: String,
        code: i32,
    },

    /// An external command could not be started at all.
    #[error("Failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Reading, writing or renaming a file of the project tree failed.
    #[error("Failed to rewrite {}", path.display())]
    RewriteIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest could not be read or parsed.
    #[error("Failed to parse manifest {}: {reason}", path.display())]
    ManifestParse { path: PathBuf, reason: String },

    /// The customized manifest could not be written back.
    #[error("Failed to write manifest {}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required answer is missing and prompting is disabled.
    #[error("Missing required input: {what} (pass it as an option or drop --no-interaction)")]
    MissingInput { what: &'static str },

    /// The substitution matcher could not be built.
    #[error("Failed to plan substitutions")]
    RulePlan(#[from] regex::Error),
}

/// Result alias for the library layer
pub type Result<T, E = KickstartError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_violation_names_the_rule() {
        let err = KickstartError::NamingConventionViolation {
            segment: "foo-plugin".to_string(),
            rule: NamingRule::Prefix("sylius"),
        };
        assert_eq!(
            err.to_string(),
            "The plugin name foo-plugin is invalid, it should start with \"sylius\""
        );
    }

    #[test]
    fn test_destination_exists_names_the_path() {
        let err = KickstartError::DestinationExists {
            path: PathBuf::from("IronManSyliusFooPlugin"),
        };
        assert!(err.to_string().contains("IronManSyliusFooPlugin"));
    }
}
