//! Integration tests for upmscan-core
//!
//! These run the full pipeline against real project layouts on disk.

use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;
use upmscan_core::{
    declared_version, Category, CatalogOptions, CollectingSink, DiagnosticKind, PackageCatalog,
    VersionStrategy,
};
use upmscan_fs::{MemoryFileSystem, NativeFileSystem};

fn write_project(manifest: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("Packages")).unwrap();
    fs::write(temp_dir.path().join("Packages/manifest.json"), manifest).unwrap();
    temp_dir
}

fn native_catalog(
    root: &Path,
    strategy: VersionStrategy,
) -> (PackageCatalog<NativeFileSystem>, Rc<CollectingSink>) {
    let fs = Rc::new(NativeFileSystem::new(root).unwrap());
    let sink = Rc::new(CollectingSink::new());
    let options = CatalogOptions {
        strategy,
        ..Default::default()
    };
    let catalog = PackageCatalog::with_options(fs, options).with_sink(sink.clone());
    (catalog, sink)
}

#[test]
fn test_end_to_end_classification() {
    let project = write_project(
        r#"{"dependencies":{"com.unity.ads":"1.0.0","com.mycompany.tool":"git+https://github.com/me/tool.git#v2.0.0","com.openupm.x":"1.2.3"},"scopedRegistries":[{"url":"https://package.openupm.com","scopes":["com.openupm"]}]}"#,
    );
    let (catalog, sink) = native_catalog(project.path(), VersionStrategy::Declared);

    let packages = catalog.all_packages(None);
    let categories: Vec<Category> = packages.iter().map(|p| p.category()).collect();
    assert_eq!(
        categories,
        vec![Category::Unity, Category::Git, Category::OpenUpm]
    );

    let displays: Vec<String> = packages.iter().map(|p| p.display_name()).collect();
    assert_eq!(
        displays,
        vec![
            "com.unity.ads@1.0.0",
            "com.mycompany.tool@v2.0.0",
            "com.openupm.x@1.2.3"
        ]
    );
    assert!(sink.is_empty());
}

#[test]
fn test_realistic_unity_project_with_cache() {
    let project = write_project(
        r#"{
  "scopedRegistries": [
    {
      "name": "package.openupm.com",
      "url": "https://package.openupm.com",
      "scopes": ["com.cysharp", "jp.keijiro"]
    },
    {
      "name": "Company",
      "url": "https://npm.company.example",
      "scopes": ["com.company"]
    }
  ],
  "dependencies": {
    "com.cysharp.unitask": "2.5.4",
    "com.company.analytics": "0.3.0",
    "com.github.asus4.tflite": "https://github.com/asus4/tf-lite-unity-sample.git?path=Packages/com.github.asus4.tflite",
    "com.unity.inputsystem": "1.7.0",
    "com.unity.modules.physics": "1.0.0"
  }
}"#,
    );

    let cache = project.path().join("Library/PackageCache");
    fs::create_dir_all(cache.join("com.cysharp.unitask@2.5.4")).unwrap();
    fs::create_dir_all(cache.join("com.unity.inputsystem@1.7.0")).unwrap();
    let git_folder = cache.join("com.github.asus4.tflite@9d0b8e7a1c");
    fs::create_dir_all(&git_folder).unwrap();
    fs::write(
        git_folder.join("package.json"),
        r#"{"name":"com.github.asus4.tflite","version":"2.14.0"}"#,
    )
    .unwrap();

    let (catalog, sink) = native_catalog(project.path(), VersionStrategy::Cache);
    let groups = catalog.packages_by_type(None);

    let names = |category: Category| -> Vec<String> {
        groups[&category]
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    };
    assert_eq!(
        names(Category::Unity),
        vec!["com.unity.inputsystem", "com.unity.modules.physics"]
    );
    assert_eq!(names(Category::Git), vec!["com.github.asus4.tflite"]);
    assert_eq!(names(Category::OpenUpm), vec!["com.cysharp.unitask"]);
    assert_eq!(names(Category::Standard), vec!["com.company.analytics"]);

    assert_eq!(groups[&Category::Git][0].version(), "2.14.0");
    assert_eq!(groups[&Category::OpenUpm][0].version(), "2.5.4");

    // Built-in modules never land in the cache
    assert_eq!(groups[&Category::Unity][1].version(), "");
    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::LookupMiss);
}

#[test]
fn test_cache_lookup_miss_reports_exactly_once() {
    let project = write_project(r#"{"dependencies":{}}"#);
    fs::create_dir_all(project.path().join("Library/PackageCache/com.unity.ugui@1.0.0")).unwrap();
    let (catalog, sink) = native_catalog(project.path(), VersionStrategy::Declared);

    assert_eq!(catalog.cache_version("com.nobody.nothing"), "");
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.diagnostics()[0].kind, DiagnosticKind::LookupMiss);
}

#[cfg(unix)]
#[test]
fn test_symlinked_cache_folder_keeps_folder_version() {
    let project = write_project(r#"{"dependencies":{"com.me.local":"file:../../local"}}"#);
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("package.json"), r#"{"version":"3.1.4"}"#).unwrap();

    let cache = project.path().join("Library/PackageCache");
    fs::create_dir_all(&cache).unwrap();
    std::os::unix::fs::symlink(outside.path(), cache.join("com.me.local@1.0.0")).unwrap();

    let (catalog, sink) = native_catalog(project.path(), VersionStrategy::Declared);
    assert_eq!(catalog.cache_version("com.me.local"), "1.0.0");

    let diagnostics = sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedInput);
}

#[test]
fn test_missing_cache_dir_reports_missing_input() {
    let project = write_project(r#"{"dependencies":{}}"#);
    let (catalog, sink) = native_catalog(project.path(), VersionStrategy::Declared);

    assert_eq!(catalog.cache_version("com.unity.ugui"), "");
    assert_eq!(sink.diagnostics()[0].kind, DiagnosticKind::MissingInput);
}

#[test]
fn test_no_dependencies_key() {
    for manifest in [r#"{}"#, r#"{"dependencies": "1.0.0"}"#, r#"{"dependencies": null}"#] {
        let project = write_project(manifest);
        let (catalog, _) = native_catalog(project.path(), VersionStrategy::Declared);
        assert!(catalog.all_packages(None).is_empty(), "{manifest}");
        assert!(catalog.packages_by_type(None).is_empty());
    }
}

#[test]
fn test_missing_manifest_never_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (catalog, sink) = native_catalog(temp_dir.path(), VersionStrategy::Cache);

    assert!(catalog.all_packages(None).is_empty());
    assert!(catalog.packages(Category::Unity, None).is_empty());
    assert_eq!(catalog.render_text(None), "Packages (0)\n");
    assert_eq!(sink.len(), 3);
    assert!(sink
        .diagnostics()
        .iter()
        .all(|d| d.kind == DiagnosticKind::MissingInput));
}

#[test]
fn test_each_query_rereads_disk() {
    let project = write_project(r#"{"dependencies":{"com.a.b":"1.0.0"}}"#);
    let (catalog, _) = native_catalog(project.path(), VersionStrategy::Declared);
    assert_eq!(catalog.all_packages(None).len(), 1);

    fs::write(
        project.path().join("Packages/manifest.json"),
        r#"{"dependencies":{"com.a.b":"1.0.0","com.c.d":"2.0.0"}}"#,
    )
    .unwrap();
    assert_eq!(catalog.all_packages(None).len(), 2);
}

#[test]
fn test_bare_version_round_trips() {
    for version in ["1.0.0", "2.3.4-preview.1", "0.0.1-exp"] {
        assert_eq!(declared_version(version), version);
    }
}

fn dependency_entry() -> impl Strategy<Value = (String, String)> {
    let name = prop_oneof![
        "com\\.unity\\.[a-z]{1,8}",
        "com\\.openupm\\.[a-z]{1,8}",
        "com\\.[a-z]{1,8}\\.[a-z]{1,8}",
    ];
    let value = prop_oneof![
        "[0-9]\\.[0-9]\\.[0-9]",
        "git\\+https://github\\.com/[a-z]{1,8}/[a-z]{1,8}\\.git#v[0-9]",
        "https://gitlab\\.com/[a-z]{1,8}/[a-z]{1,8}\\.git",
    ];
    (name, value)
}

proptest! {
    #[test]
    fn prop_groups_partition_all_packages(entries in prop::collection::vec(dependency_entry(), 0..12)) {
        let dependencies: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        let manifest = serde_json::json!({
            "dependencies": dependencies,
            "scopedRegistries": [{"url": "https://package.openupm.com", "scopes": ["com.openupm"]}],
        });

        let fs = MemoryFileSystem::empty("/project").unwrap();
        fs.add_file("Packages/manifest.json", manifest.to_string()).unwrap();
        let catalog = PackageCatalog::new(Rc::new(fs)).with_sink(Rc::new(CollectingSink::new()));

        let all: Vec<_> = catalog.all_packages(None);
        let groups = catalog.packages_by_type(None);

        let grouped_total: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(grouped_total, all.len());
        prop_assert!(groups.values().all(|members| !members.is_empty()));

        let all_set: HashSet<_> = all.iter().cloned().collect();
        let grouped_set: HashSet<_> = groups.values().flatten().cloned().collect();
        prop_assert_eq!(all_set, grouped_set);

        for (category, members) in &groups {
            prop_assert!(members.iter().all(|m| m.category() == *category));
        }
    }
}
