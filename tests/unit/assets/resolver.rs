use super::*;

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("adreel-resolver-{name}-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("fonts")).unwrap();
    dir
}

#[test]
fn normalizes_separators_and_dots() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b\\c.ttf").unwrap(), "a/b/c.ttf");
}

#[test]
fn rejects_escaping_and_empty_paths() {
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../secret.png").is_err());
    assert!(normalize_rel_path("a/../../b").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn fs_resolver_finds_existing_files() {
    let root = temp_root("found");
    std::fs::write(root.join("fonts/Inter.ttf"), b"not really a font").unwrap();
    let r = FsAssetResolver::new(&root);
    let p = r.resolve("fonts\\Inter.ttf").unwrap();
    assert_eq!(p, root.join("fonts/Inter.ttf"));
    assert_eq!(r.root(), root.as_path());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn fs_resolver_reports_missing_files_as_asset_errors() {
    let root = temp_root("missing");
    let r = FsAssetResolver::new(&root);
    assert!(matches!(
        r.resolve("fonts/missing.ttf"),
        Err(AdreelError::Asset(_))
    ));
    assert!(matches!(
        r.resolve("../escape.ttf"),
        Err(AdreelError::Asset(_))
    ));
    let _ = std::fs::remove_dir_all(root);
}
