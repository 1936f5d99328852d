//! Customizing a seeded skeleton tree end to end

use kickstarter_core::customize::{self, Manifest};
use kickstarter_core::{
    AuthorRecord, PackageIdentifier, ProjectDetails, SkeletonConfig, SyliusPlugin,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLUGIN_CLASS: &str = "<?php

declare(strict_types=1);

namespace Acme\\SyliusExamplePlugin;

use Symfony\\Component\\HttpKernel\\Bundle\\Bundle;

final class AcmeSyliusExamplePlugin extends Bundle
{
}
";

const EXTENSION_CLASS: &str = "<?php

namespace Acme\\SyliusExamplePlugin\\DependencyInjection;

final class AcmeSyliusExampleExtension
{
    public function getAlias(): string
    {
        return 'acme_sylius_example';
    }
}
";

const SERVICES: &str = "services:
    Acme\\SyliusExamplePlugin\\Controller\\GreetingController:
        tags: ['controller.service_arguments']
";

const BUNDLES: &str = "<?php

return [
    Acme\\SyliusExamplePlugin\\AcmeSyliusExamplePlugin::class => ['all' => true],
];
";

const MANIFEST: &str = r#"{
    "name": "sylius/plugin-skeleton",
    "type": "sylius-plugin",
    "description": "Acme example plugin for Sylius.",
    "license": "MIT",
    "require": {
        "php": "^8.0",
        "sylius/sylius": "~1.12.0"
    },
    "autoload": {
        "psr-4": {
            "Acme\\SyliusExamplePlugin\\": "src/",
            "Tests\\Acme\\SyliusExamplePlugin\\": "tests/"
        }
    }
}
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn seed_skeleton(root: &Path) {
    write(root, "src/AcmeSyliusExamplePlugin.php", PLUGIN_CLASS);
    write(
        root,
        "src/DependencyInjection/AcmeSyliusExampleExtension.php",
        EXTENSION_CLASS,
    );
    write(root, "src/Resources/config/services.yml", SERVICES);
    write(root, "tests/Application/config/bundles.php", BUNDLES);
    write(root, "composer.json", MANIFEST);
    write(root, "vendor/acme/AcmeSyliusExamplePlugin.php", PLUGIN_CLASS);
    write(
        root,
        "tests/Application/node_modules/acme/index.js",
        "// Acme\\SyliusExamplePlugin\n",
    );
}

fn iron_man_details() -> ProjectDetails {
    let identifier = PackageIdentifier::parse(
        "iron-man/sylius-product-on-demand-plugin",
        SyliusPlugin.naming_convention(),
    )
    .unwrap();
    let author = AuthorRecord::parse("Jane Doe <jane.doe@example.com>").unwrap();
    ProjectDetails::new(identifier, author, "Adds on-demand availability", "MIT")
}

#[test]
fn customize_retargets_the_whole_skeleton() {
    let dir = TempDir::new().unwrap();
    let details = iron_man_details();
    let root = dir.path().join(details.folder_name());
    seed_skeleton(&root);

    let report = customize::customize(&SyliusPlugin, &root, &details).unwrap();
    assert_eq!(report.sources.files_renamed, 2);

    // Non-source file carries the derived namespace
    let bundles = fs::read_to_string(root.join("tests/Application/config/bundles.php")).unwrap();
    assert!(bundles.contains(
        "IronMan\\SyliusProductOnDemandPlugin\\IronManSyliusProductOnDemandPlugin::class"
    ));
    let services = fs::read_to_string(root.join("src/Resources/config/services.yml")).unwrap();
    assert!(services.contains("IronMan\\SyliusProductOnDemandPlugin\\Controller"));

    // Source files are renamed along with their classes
    assert!(!root.join("src/AcmeSyliusExamplePlugin.php").exists());
    let plugin =
        fs::read_to_string(root.join("src/IronManSyliusProductOnDemandPlugin.php")).unwrap();
    assert!(plugin.contains("namespace IronMan\\SyliusProductOnDemandPlugin;"));
    assert!(plugin.contains("final class IronManSyliusProductOnDemandPlugin extends Bundle"));

    let extension = fs::read_to_string(
        root.join("src/DependencyInjection/IronManSyliusProductOnDemandExtension.php"),
    )
    .unwrap();
    assert!(extension.contains("final class IronManSyliusProductOnDemandExtension"));
    assert!(extension.contains("'iron_man_sylius_product_on_demand'"));

    // Manifest
    let manifest = Manifest::load(&root.join("composer.json")).unwrap();
    let doc = manifest.document();
    assert_eq!(doc["name"], "iron-man/sylius-product-on-demand-plugin");
    assert_eq!(
        doc["authors"],
        serde_json::json!([{"name": "Jane Doe", "email": "jane.doe@example.com"}])
    );
    assert_eq!(doc["description"], "Adds on-demand availability");
    assert_eq!(doc["license"], "MIT");
    let psr4 = doc["autoload"]["psr-4"].as_object().unwrap();
    assert_eq!(psr4["IronMan\\SyliusProductOnDemandPlugin\\"], "src/");
    assert_eq!(psr4["Tests\\IronMan\\SyliusProductOnDemandPlugin\\"], "tests/");
    assert!(!psr4.contains_key("Acme\\SyliusExamplePlugin\\"));
    assert!(!psr4.contains_key("Tests\\Acme\\SyliusExamplePlugin\\"));
}

#[test]
fn customize_never_touches_dependency_directories() {
    let dir = TempDir::new().unwrap();
    let details = iron_man_details();
    let root = dir.path().join(details.folder_name());
    seed_skeleton(&root);

    customize::customize(&SyliusPlugin, &root, &details).unwrap();

    assert_eq!(
        fs::read_to_string(root.join("vendor/acme/AcmeSyliusExamplePlugin.php")).unwrap(),
        PLUGIN_CLASS
    );
    assert_eq!(
        fs::read_to_string(root.join("tests/Application/node_modules/acme/index.js")).unwrap(),
        "// Acme\\SyliusExamplePlugin\n"
    );
}

#[test]
fn second_content_pass_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let details = iron_man_details();
    let root = dir.path().join(details.folder_name());
    seed_skeleton(&root);

    customize::customize(&SyliusPlugin, &root, &details).unwrap();
    let report = customize::customize(&SyliusPlugin, &root, &details).unwrap();

    assert_eq!(report.contents.files_rewritten, 0);
    assert_eq!(report.sources.files_renamed, 0);
}

#[test]
fn customize_without_manifest_fails_after_rewriting() {
    let dir = TempDir::new().unwrap();
    let details = iron_man_details();
    let root = dir.path().join(details.folder_name());
    seed_skeleton(&root);
    fs::remove_file(root.join("composer.json")).unwrap();

    let err = customize::customize(&SyliusPlugin, &root, &details).unwrap_err();
    assert!(matches!(
        err,
        kickstarter_core::KickstartError::ManifestParse { .. }
    ));
    assert!(root.join("src/IronManSyliusProductOnDemandPlugin.php").exists());
}
