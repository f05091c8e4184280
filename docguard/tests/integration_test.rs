use std::path::PathBuf;
use std::process::Command;

fn get_workspace_root() -> PathBuf {
    // Get the workspace root by going up from the manifest directory
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).parent().unwrap().to_path_buf()
}

fn docguard() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_docguard"));
    command.env_remove("RUST_LOG").env_remove("API_KEY");
    command
}

#[test]
fn test_demo_workspace_exists() {
    let demo_path = get_workspace_root().join("demos");
    assert!(demo_path.exists(), "demos directory should exist");
    assert!(
        demo_path.join("docguard.toml").exists(),
        "demo should have a configuration file"
    );
    assert!(
        demo_path.join("catalog.json").exists(),
        "demo should have a JSON catalog"
    );
}

#[test]
fn test_demo_catalog_is_valid_json() {
    let content = std::fs::read_to_string(get_workspace_root().join("demos/catalog.json"))
        .expect("Should be able to read demo catalog");
    let sections: serde_json::Value =
        serde_json::from_str(&content).expect("Demo catalog should be valid JSON");
    assert_eq!(sections.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_validate_demo_catalog() {
    let output = docguard()
        .arg("validate")
        .arg(get_workspace_root().join("demos/catalog.json"))
        .output()
        .expect("Failed to run docguard");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 sections, 3 entries, ids unique"));
}

#[test]
fn test_build_demo_site() {
    let out_dir = tempfile::tempdir().unwrap();
    let output_path = out_dir.path().join("index.html");

    let status = docguard()
        .arg("build")
        .arg("--config")
        .arg(get_workspace_root().join("demos/docguard.toml"))
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("Failed to run docguard");
    assert!(status.success());

    let html = std::fs::read_to_string(&output_path).unwrap();
    assert!(html.contains("<title>Resource Server Notes</title>"));
    assert!(html.contains("<html lang=\"en\" class=\"dark\">"));
    assert!(html.contains("<a class=\"nav-section active\" href=\"#resource-server\">"));
    assert!(html.contains("<pre class=\"mermaid\">"));
    assert!(html.contains("<code class=\"language-yaml\">"));
}

#[test]
fn test_search_and_show_builtin() {
    let empty = tempfile::tempdir().unwrap();
    let config = empty.path().join("docguard.toml");

    let output = docguard()
        .args(["search", "csrf", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run docguard");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("best-practices"));

    let output = docguard()
        .args(["show", "intro", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run docguard");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("1. Introduction\n"));
}

#[test]
fn test_show_subsection_prints_its_own_body() {
    let empty = tempfile::tempdir().unwrap();
    let config = empty.path().join("docguard.toml");

    let output = docguard()
        .args(["show", "jwt-implementation", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to run docguard");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("4. Common Use Cases / 4.3 JWT Authentication\n"));
    assert!(stdout.contains("Stateless security using tokens"));
    assert!(!stdout.contains("Implementation guides for form login"));
}

#[test]
fn test_init_refuses_non_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("keep.txt"), "x").unwrap();

    let status = docguard()
        .arg("init")
        .arg(dir.path())
        .status()
        .expect("Failed to run docguard");
    assert!(!status.success());

    let status = docguard()
        .arg("init")
        .arg(dir.path())
        .arg("--force")
        .status()
        .expect("Failed to run docguard");
    assert!(status.success());
    assert!(dir.path().join("docguard.toml").exists());
    assert!(dir.path().join("catalog.toml").exists());
}
