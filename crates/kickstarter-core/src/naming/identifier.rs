//! `vendor/name` package identifiers and the namespaces derived from them

use super::case::pascal_case;
use crate::error::{KickstartError, NamingRule, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_.-]+/[a-z0-9_.-]+$").expect("package name pattern is valid")
});

/// Prefix and suffix the name segment of every identifier must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingConvention {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

/// A validated `vendor/name` identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentifier {
    vendor: String,
    name: String,
}

impl PackageIdentifier {
    /// Parse and validate a `vendor/name` string against a naming convention
    pub fn parse(input: &str, convention: NamingConvention) -> Result<Self> {
        let malformed = || KickstartError::MalformedIdentifier {
            input: input.to_string(),
        };

        if !PACKAGE_NAME.is_match(input) {
            return Err(malformed());
        }
        let (vendor, name) = input.split_once('/').ok_or_else(malformed)?;

        if !name.starts_with(convention.prefix) {
            return Err(KickstartError::NamingConventionViolation {
                segment: name.to_string(),
                rule: NamingRule::Prefix(convention.prefix),
            });
        }
        if !name.ends_with(convention.suffix) {
            return Err(KickstartError::NamingConventionViolation {
                segment: name.to_string(),
                rule: NamingRule::Suffix(convention.suffix),
            });
        }

        Ok(Self {
            vendor: vendor.to_string(),
            name: name.to_string(),
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive the PascalCase namespace pair
    ///
    /// Segments are split on punctuation and the pieces capitalized. A vendor
    /// made only of punctuation (`-/sylius-foo-plugin`) passes validation and
    /// yields an empty vendor, so the namespace starts with the separator.
    pub fn namespace(&self) -> ProjectNamespace {
        ProjectNamespace {
            vendor: pascal_case(&self.vendor),
            name: pascal_case(&self.name),
        }
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.name)
    }
}

/// PascalCase vendor and name, e.g. `IronMan` + `SyliusProductOnDemandPlugin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNamespace {
    vendor: String,
    name: String,
}

impl ProjectNamespace {
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-disk project root: both parts without a separator
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.vendor, self.name)
    }

    /// Code namespace, e.g. `IronMan\SyliusProductOnDemandPlugin`
    pub fn qualified(&self, separator: &str) -> String {
        format!("{}{}{}", self.vendor, separator, self.name)
    }

    /// Folder name with the trailing suffix word removed, used as class prefix
    pub fn plain_name(&self, suffix_word: &str) -> String {
        let folder = self.folder_name();
        match folder.strip_suffix(suffix_word) {
            Some(plain) => plain.to_string(),
            None => folder,
        }
    }
}
