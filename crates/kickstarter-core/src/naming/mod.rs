//! Identifier, namespace and author parsing
//!
//! This module provides:
//! - Case conversion between package-name, PascalCase and snake_case forms
//! - `vendor/name` identifier validation and namespace derivation
//! - `Name <email>` author parsing

pub mod author;
pub mod case;
pub mod identifier;

pub use author::AuthorRecord;
pub use identifier::{NamingConvention, PackageIdentifier, ProjectNamespace};
