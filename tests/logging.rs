use std::{fs, thread::sleep, time::Duration};

use tempfile::tempdir;

// One test per binary: the global subscriber can only be installed once.
#[test]
fn writes_log_file_into_missing_directories() {
    let dir = tempdir().unwrap();
    let log_dir = dir.path().join("logs").join("session");
    let path = log_dir.join("whiteboard.log");
    assert!(!log_dir.exists());

    whiteboard::logging::init(true, Some(path.clone()));
    tracing::info!("stroke committed");

    sleep(Duration::from_millis(200));

    assert!(log_dir.is_dir(), "log directory was not created");
    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("stroke committed"));
}
