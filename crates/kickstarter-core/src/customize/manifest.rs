//! composer.json customization
//!
//! The document is kept as an order-preserving JSON map so untouched keys
//! stay where the skeleton put them.

use super::ProjectDetails;
use crate::customize::rules::Baseline;
use crate::error::{KickstartError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How namespaces map onto autoload directories
#[derive(Debug, Clone, Copy)]
pub struct AutoloadLayout {
    pub separator: &'static str,
    pub test_root: &'static str,
    pub source_dir: &'static str,
    pub test_dir: &'static str,
}

impl AutoloadLayout {
    /// psr-4 key for production classes, e.g. `IronMan\SyliusFooPlugin\`
    pub fn source_key(&self, namespace: &str) -> String {
        format!("{}{}", namespace, self.separator)
    }

    /// psr-4 key for test classes, e.g. `Tests\IronMan\SyliusFooPlugin\`
    pub fn test_key(&self, namespace: &str) -> String {
        format!(
            "{}{}{}{}",
            self.test_root, self.separator, namespace, self.separator
        )
    }
}

/// A loaded manifest document
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let parse_error = |reason: String| KickstartError::ManifestParse {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(parse_error("top level is not an object".to_string())),
        }
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.document.insert(key.to_string(), value.into());
    }

    /// The `autoload.psr-4` map, created when absent
    pub fn psr4_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let path = &self.path;
        let autoload = object_entry(&mut self.document, "autoload", path)?;
        object_entry(autoload, "psr-4", path)
    }

    /// Write the document back with composer's four-space indentation
    pub fn save(&self) -> Result<()> {
        let write_error = |source: io::Error| KickstartError::ManifestWrite {
            path: self.path.clone(),
            source,
        };

        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.document
            .serialize(&mut serializer)
            .map_err(|e| write_error(io::Error::from(e)))?;
        buffer.push(b'\n');

        fs::write(&self.path, buffer).map_err(write_error)
    }
}

fn object_entry<'m>(
    map: &'m mut Map<String, Value>,
    key: &str,
    path: &Path,
) -> Result<&'m mut Map<String, Value>> {
    map.entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| KickstartError::ManifestParse {
            path: path.to_path_buf(),
            reason: format!("\"{}\" is not an object", key),
        })
}

/// Retarget the manifest at `details`
///
/// The baseline autoload entries are removed after the new ones are added,
/// so they never survive, even when the namespaces collide.
pub fn customize_manifest(
    path: &Path,
    details: &ProjectDetails,
    baseline: &Baseline,
    layout: &AutoloadLayout,
) -> Result<()> {
    let mut manifest = Manifest::load(path)?;

    manifest.set("name", details.identifier.to_string());
    if let Some(author) = &details.author {
        let authors = serde_json::to_value(vec![author]).map_err(|e| {
            KickstartError::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        manifest.set("authors", authors);
    }
    manifest.set("description", details.description.as_str());
    manifest.set("license", details.license.as_str());

    let namespace = details.namespace.qualified(layout.separator);
    let psr4 = manifest.psr4_mut()?;
    psr4.insert(layout.source_key(&namespace), layout.source_dir.into());
    psr4.insert(layout.test_key(&namespace), layout.test_dir.into());
    psr4.shift_remove(&layout.source_key(baseline.namespace));
    psr4.shift_remove(&layout.test_key(baseline.namespace));

    manifest.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{AuthorRecord, NamingConvention, PackageIdentifier};
    use tempfile::TempDir;

    const BASELINE: Baseline = Baseline {
        namespace: "Acme\\SyliusExamplePlugin",
        identifier: "AcmeSyliusExamplePlugin",
        short_identifier: "AcmeSyliusExample",
    };

    const LAYOUT: AutoloadLayout = AutoloadLayout {
        separator: "\\",
        test_root: "Tests",
        source_dir: "src/",
        test_dir: "tests/",
    };

    const SKELETON: &str = r#"{
    "name": "sylius/plugin-skeleton",
    "type": "sylius-plugin",
    "description": "Acme example plugin for Sylius.",
    "license": "MIT",
    "authors": [{"name": "Sylius", "email": "team@sylius.com"}],
    "require": {"php": "^8.0"},
    "autoload": {
        "psr-4": {
            "Acme\\SyliusExamplePlugin\\": "src/",
            "Tests\\Acme\\SyliusExamplePlugin\\": "tests/"
        }
    },
    "config": {"sort-packages": true}
}"#;

    fn details(package: &str, author: Option<AuthorRecord>) -> ProjectDetails {
        let identifier = PackageIdentifier::parse(
            package,
            NamingConvention {
                prefix: "sylius",
                suffix: "plugin",
            },
        )
        .unwrap();
        ProjectDetails::new(identifier, author, "Adds on-demand availability", "MIT")
    }

    fn seed(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("composer.json");
        fs::write(&path, contents).unwrap();
        path
    }

    fn reload(path: &Path) -> Map<String, Value> {
        Manifest::load(path).unwrap().document().clone()
    }

    #[test]
    fn test_customize_sets_fields_and_autoload() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, SKELETON);
        let author = AuthorRecord {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
        };

        customize_manifest(
            &path,
            &details("iron-man/sylius-product-on-demand-plugin", Some(author)),
            &BASELINE,
            &LAYOUT,
        )
        .unwrap();

        let doc = reload(&path);
        assert_eq!(doc["name"], "iron-man/sylius-product-on-demand-plugin");
        assert_eq!(doc["description"], "Adds on-demand availability");
        assert_eq!(doc["license"], "MIT");
        assert_eq!(
            doc["authors"],
            serde_json::json!([{"name": "Jane Doe", "email": "jane.doe@example.com"}])
        );

        let psr4 = doc["autoload"]["psr-4"].as_object().unwrap();
        let keys: Vec<&str> = psr4.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "IronMan\\SyliusProductOnDemandPlugin\\",
                "Tests\\IronMan\\SyliusProductOnDemandPlugin\\"
            ]
        );
        assert_eq!(psr4["IronMan\\SyliusProductOnDemandPlugin\\"], "src/");
        assert_eq!(psr4["Tests\\IronMan\\SyliusProductOnDemandPlugin\\"], "tests/");
    }

    #[test]
    fn test_customize_keeps_key_order_and_indentation() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, SKELETON);

        customize_manifest(
            &path,
            &details("iron-man/sylius-foo-plugin", None),
            &BASELINE,
            &LAYOUT,
        )
        .unwrap();

        let doc = reload(&path);
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["name", "type", "description", "license", "authors", "require", "autoload", "config"]
        );
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n    \"name\""));
        assert!(written.ends_with("}\n"));
    }

    #[test]
    fn test_customize_without_author_keeps_authors() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, SKELETON);

        customize_manifest(
            &path,
            &details("iron-man/sylius-foo-plugin", None),
            &BASELINE,
            &LAYOUT,
        )
        .unwrap();

        assert_eq!(
            reload(&path)["authors"],
            serde_json::json!([{"name": "Sylius", "email": "team@sylius.com"}])
        );
    }

    #[test]
    fn test_baseline_entries_never_survive_a_collision() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, SKELETON);

        customize_manifest(
            &path,
            &details("acme/sylius-example-plugin", None),
            &BASELINE,
            &LAYOUT,
        )
        .unwrap();

        let doc = reload(&path);
        assert!(doc["autoload"]["psr-4"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_customize_creates_missing_autoload() {
        let dir = TempDir::new().unwrap();
        let path = seed(&dir, r#"{"name": "sylius/plugin-skeleton"}"#);

        customize_manifest(
            &path,
            &details("iron-man/sylius-foo-plugin", None),
            &BASELINE,
            &LAYOUT,
        )
        .unwrap();

        assert_eq!(
            reload(&path)["autoload"]["psr-4"]["IronMan\\SyliusFooPlugin\\"],
            "src/"
        );
    }

    #[test]
    fn test_invalid_manifest_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        for contents in ["{ not json", "[1, 2]", r#"{"autoload": "src"}"#] {
            let path = seed(&dir, contents);
            let err = customize_manifest(
                &path,
                &details("iron-man/sylius-foo-plugin", None),
                &BASELINE,
                &LAYOUT,
            )
            .unwrap_err();
            assert!(
                matches!(err, KickstartError::ManifestParse { .. }),
                "{contents} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_save_into_vanished_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("IronManSyliusFooPlugin");
        fs::create_dir(&project).unwrap();
        let path = project.join("composer.json");
        fs::write(&path, SKELETON).unwrap();

        let mut manifest = Manifest::load(&path).unwrap();
        manifest.set("license", "MIT");
        fs::remove_dir_all(&project).unwrap();

        let err = manifest.save().unwrap_err();
        assert!(
            matches!(&err, KickstartError::ManifestWrite { path: failed, .. } if *failed == path),
            "got {err:?}"
        );
    }

    #[test]
    fn test_missing_manifest_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("composer.json")).unwrap_err();
        assert!(matches!(err, KickstartError::ManifestParse { .. }));
    }
}
