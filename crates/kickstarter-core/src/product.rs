//! Product configuration trait for kickstarter binaries
//!
//! This trait describes the generic skeleton a binary installs and the
//! conventions its generated projects follow.

use crate::customize::rules::Baseline;
use crate::naming::identifier::NamingConvention;

/// Configuration trait for different skeleton products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The skeleton package and the environment variables overriding it
/// - The baseline placeholders embedded in the skeleton
/// - Naming conventions and directory layout of generated projects
pub trait SkeletonConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Package the package manager materializes as the template project
    fn skeleton_package(&self) -> &'static str;

    /// Environment variable name for overriding the skeleton package
    fn skeleton_package_env(&self) -> &'static str;

    /// Environment variable name for overriding the package manager command
    fn composer_env(&self) -> &'static str;

    /// Placeholder namespace and identifiers embedded in the skeleton
    fn baseline(&self) -> Baseline;

    /// Prefix and suffix every package name must carry
    fn naming_convention(&self) -> NamingConvention;

    /// Word stripped from the folder name to obtain the plain class prefix
    fn suffix_word(&self) -> &'static str;

    /// Separator between namespace segments in generated code
    fn namespace_separator(&self) -> &'static str {
        "\\"
    }

    /// Namespace root under which test classes live
    fn test_namespace_root(&self) -> &'static str;

    /// Directory names never touched by the content pass, at any depth
    fn excluded_dirs(&self) -> &'static [&'static str];

    /// Source directory scanned by the rename pass
    fn source_dir(&self) -> &'static str;

    /// Extension of source files renamed by the rename pass
    fn source_extension(&self) -> &'static str;

    /// Autoload directory mapped to the production namespace
    fn source_autoload_dir(&self) -> &'static str;

    /// Autoload directory mapped to the test namespace
    fn test_autoload_dir(&self) -> &'static str;

    /// Manifest file name at the project root
    fn manifest_file(&self) -> &'static str {
        "composer.json"
    }

    /// Embedded application used by the post-install steps
    fn application_dir(&self) -> &'static str;
}

/// The Sylius plugin skeleton
#[derive(Debug, Clone, Copy, Default)]
pub struct SyliusPlugin;

impl SkeletonConfig for SyliusPlugin {
    fn display_name(&self) -> &'static str {
        "Sylius Plugin Kickstarter"
    }

    fn cli_description(&self) -> &'static str {
        "Installs and customize the plugin skeleton"
    }

    fn skeleton_package(&self) -> &'static str {
        "sylius/plugin-skeleton"
    }

    fn skeleton_package_env(&self) -> &'static str {
        "KICKSTARTER_SKELETON"
    }

    fn composer_env(&self) -> &'static str {
        "KICKSTARTER_COMPOSER"
    }

    fn baseline(&self) -> Baseline {
        Baseline {
            namespace: "Acme\\SyliusExamplePlugin",
            identifier: "AcmeSyliusExamplePlugin",
            short_identifier: "AcmeSyliusExample",
        }
    }

    fn naming_convention(&self) -> NamingConvention {
        NamingConvention {
            prefix: "sylius",
            suffix: "plugin",
        }
    }

    fn suffix_word(&self) -> &'static str {
        "Plugin"
    }

    fn test_namespace_root(&self) -> &'static str {
        "Tests"
    }

    fn excluded_dirs(&self) -> &'static [&'static str] {
        &["node_modules", "vendor"]
    }

    fn source_dir(&self) -> &'static str {
        "src"
    }

    fn source_extension(&self) -> &'static str {
        "php"
    }

    fn source_autoload_dir(&self) -> &'static str {
        "src/"
    }

    fn test_autoload_dir(&self) -> &'static str {
        "tests/"
    }

    fn application_dir(&self) -> &'static str {
        "tests/Application"
    }
}
