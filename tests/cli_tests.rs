mod common;

use common::{brd, init_db, init_db_with_tracks, replay_file, setup_test_db, temp_out};
use predicates::prelude::*;
use std::path::Path;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    brd()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database initialized"));

    assert!(Path::new(&db_path).exists());
}

#[test]
fn test_list_empty_database() {
    let db_path = setup_test_db("list_empty");
    init_db(&db_path);

    brd()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tracks recorded yet"));
}

#[test]
fn test_list_flags_corrupted_tracks() {
    let db_path = setup_test_db("list_corrupted");
    init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "list", "--segments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable (corrupted)"))
        .stdout(predicate::str::contains("3 track(s)"))
        .stdout(predicate::str::contains("2 / 1 point(s) per segment"));
}

#[test]
fn test_show_prints_segments() {
    let db_path = setup_test_db("show_segments");
    let ids = init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "show", &ids[0].to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Track #{}", ids[0])))
        .stdout(predicate::str::contains("segment 1"))
        .stdout(predicate::str::contains("(2 points)"))
        .stdout(predicate::str::contains("45.3, 9.3"));
}

#[test]
fn test_show_corrupted_track_reports_it() {
    let db_path = setup_test_db("show_corrupted");
    let ids = init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "show", &ids[2].to_string()])
        .assert()
        .success()
        .stderr(predicate::str::contains("unavailable (corrupted)"));
}

#[test]
fn test_show_unknown_track_fails() {
    let db_path = setup_test_db("show_unknown");
    init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Track not found: 999"));
}

#[test]
fn test_del_with_yes_removes_track() {
    let db_path = setup_test_db("del_yes");
    let ids = init_db_with_tracks(&db_path);
    let id = ids[1].to_string();

    brd()
        .args(["--db", &db_path, "del", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 track(s) deleted"));

    brd()
        .args(["--db", &db_path, "show", &id])
        .assert()
        .failure();

    brd()
        .args(["--db", &db_path, "log", "--print", "--op", "del"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 track(s)"));

    brd()
        .args(["--db", &db_path, "log", "--print", "--op", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log operation 'bogus'"));
}

#[test]
fn test_del_unknown_ids_are_ignored() {
    let db_path = setup_test_db("del_unknown");
    let ids = init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "del", &ids[0].to_string(), "4242", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 requested track(s) did not exist"))
        .stdout(predicate::str::contains("1 track(s) deleted"));
}

#[test]
fn test_del_cancelled_keeps_track() {
    let db_path = setup_test_db("del_cancelled");
    let ids = init_db_with_tracks(&db_path);
    let id = ids[0].to_string();

    brd()
        .args(["--db", &db_path, "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled"));

    brd()
        .args(["--db", &db_path, "show", &id])
        .assert()
        .success();
}

#[test]
fn test_record_loop_via_stdin() {
    let db_path = setup_test_db("record_stdin");
    init_db(&db_path);
    let replay = replay_file("record_stdin", "latitude,longitude\n45.0,9.0\n45.1,9.1\n");

    brd()
        .args([
            "--db",
            &db_path,
            "record",
            "--replay",
            &replay,
            "--interval-ms",
            "5",
        ])
        .write_stdin("status\nremote\nremote 1\nstart\nfly\nstop\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("state=stopped"))
        .stdout(predicate::str::contains("Remote signal without value ignored"))
        .stdout(predicate::str::contains("unknown command 'fly'"))
        .stdout(predicate::str::contains(
            "Recorder closed: 2 applied, 1 ignored, 2 rejected.",
        ));
}

#[test]
fn test_record_without_usable_replay_fails() {
    let db_path = setup_test_db("record_bad_replay");
    init_db(&db_path);
    let replay = replay_file("record_bad_replay", "latitude,longitude\n");

    brd()
        .args(["--db", &db_path, "record", "--replay", &replay])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Positioning error"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_db");
    init_db_with_tracks(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    brd()
        .args(["--db", &db_path, "backup", "--file", &plain])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let zipped = temp_out("backup_zip", "zip");
    brd()
        .args(["--db", &db_path, "backup", "--file", &zipped, "--compress"])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("db_check_info");
    init_db_with_tracks(&db_path);

    brd()
        .args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity check passed"))
        .stdout(predicate::str::contains("1 corrupted track(s):"))
        .stdout(predicate::str::contains("Total tracks:"));
}
