use std::path::PathBuf;

fn builtin_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/catalog/builtin.toml")
}

/// Test that the embedded catalog exists in src/catalog
#[test]
fn test_builtin_catalog_exists() {
    let catalog_path = builtin_catalog_path();

    assert!(
        catalog_path.exists(),
        "Built-in catalog should exist at {:?}",
        catalog_path
    );
}

/// Test that the embedded catalog can be loaded and parsed
#[test]
fn test_builtin_catalog_loads() {
    let content = std::fs::read_to_string(builtin_catalog_path())
        .expect("Should be able to read catalog file");

    let catalog: toml::Value = toml::from_str(&content).expect("Catalog should be valid TOML");
    let sections = catalog
        .get("sections")
        .and_then(toml::Value::as_array)
        .expect("Catalog should have a sections array");

    assert_eq!(sections.len(), 10);
    for section in sections {
        for key in ["id", "title", "content"] {
            assert!(
                section.get(key).and_then(toml::Value::as_str).is_some(),
                "Every section needs a string '{}'",
                key
            );
        }
    }
}
