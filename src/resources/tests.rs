use super::*;
use std::io::Read;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("firetor-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn read_all(mut reader: Box<dyn Read + Send>) -> String {
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn test_directory_resources_open_file() {
    let dir = scratch_dir("open");
    std::fs::create_dir_all(dir.join("keys")).unwrap();
    std::fs::write(dir.join("keys/admin.json"), "{\"a\":1}").unwrap();

    let resources = DirectoryResources::new(&dir);

    assert_eq!(read_all(resources.open("keys/admin.json").unwrap()), "{\"a\":1}");
    // Leading slashes are ignored, like classpath lookups.
    assert_eq!(read_all(resources.open("/keys/admin.json").unwrap()), "{\"a\":1}");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_directory_resources_missing_file() {
    let dir = scratch_dir("missing");
    let resources = DirectoryResources::new(&dir);

    match resources.open("nope.json") {
        Err(FiretorError::ResourceNotFound(name)) => assert_eq!(name, "nope.json"),
        other => panic!("expected ResourceNotFound, got {:?}", other.map(|_| ())),
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_directory_resources_reject_directories_and_traversal() {
    let dir = scratch_dir("traversal");
    std::fs::create_dir_all(dir.join("sub")).unwrap();
    let resources = DirectoryResources::new(dir.join("sub"));

    assert!(matches!(resources.open(""), Err(FiretorError::ResourceNotFound(_))));
    assert!(matches!(resources.open("."), Err(FiretorError::ResourceNotFound(_))));
    assert!(matches!(resources.open("../secret.json"), Err(FiretorError::ResourceNotFound(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_embedded_resources() {
    let resources = EmbeddedResources::new()
        .with("admin.json", b"first".to_vec())
        .with("./admin.json", b"second".to_vec());

    assert!(resources.contains("admin.json"));
    assert!(resources.contains("/admin.json"));
    assert_eq!(read_all(resources.open("admin.json").unwrap()), "second");
    assert!(matches!(resources.open("other.json"), Err(FiretorError::ResourceNotFound(_))));
}

#[test]
fn test_arc_loader_delegates() {
    let resources: Arc<dyn ResourceLoader> =
        Arc::new(EmbeddedResources::new().with("k.json", b"{}".to_vec()));
    assert_eq!(read_all(resources.open("k.json").unwrap()), "{}");
}
