#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use openbrd::db::store::{SqliteTrackStore, TrackStore};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn brd() -> Command {
    cargo_bin_cmd!("openbrd")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_openbrd.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a replay CSV into the temp dir
pub fn replay_file(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_replay.csv", name));
    fs::write(&path, content).expect("write replay csv");
    path.to_string_lossy().to_string()
}

/// Initialize DB via CLI (test mode: no config file touched)
pub fn init_db(db_path: &str) {
    brd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and store three tracks: two valid, one corrupted.
/// Returns the ids in insertion order.
pub fn init_db_with_tracks(db_path: &str) -> Vec<i64> {
    init_db(db_path);

    let store = SqliteTrackStore::open(db_path).expect("open store");
    let a = store
        .insert(
            "1700000012,45.1,9.1;1700000018,45.2,9.2;1700000030,45.3,9.3",
            "1700000010,Start;1700000020,Pause;1700000025,Start;1700000040,Stop",
        )
        .expect("insert a");
    let b = store
        .insert("1700001005,44.5,8.5", "1700001000,Start;1700001010,Stop")
        .expect("insert b");
    let c = store
        .insert("garbage", "1700002000,Start;1700002010,Stop")
        .expect("insert c");

    vec![a.id, b.id, c.id]
}
