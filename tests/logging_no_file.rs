use std::{thread::sleep, time::Duration};

use tempfile::tempdir;

#[test]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("whiteboard.log");

    whiteboard::logging::init(false, None);
    whiteboard::logging::init(false, None);
    tracing::info!("test");

    sleep(Duration::from_millis(100));

    assert!(!path.exists(), "log file should not be created");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
