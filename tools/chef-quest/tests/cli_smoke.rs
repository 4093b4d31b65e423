use assert_cmd::cargo::cargo_bin_cmd;

fn fixture(path: &str) -> String {
    format!("{}/tests/fixtures/{path}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn help_lists_kiosk_flags() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--help");
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    assert!(stdout.contains("--keys"));
    assert!(stdout.contains("--seed"));
    assert!(stdout.contains("--no-log"));
}

#[test]
fn scripted_walkthrough_reaches_cooking() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--config")
        .arg(fixture("configs/kiosk.toml"))
        .arg("--keys")
        .arg("3sfffu");
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("Time to Cook!"));
    assert!(stdout.contains("phase=cooking recipe=2 step=2 message=script complete keys=6"));
}

#[test]
fn missing_mail_opener_does_not_fail_the_run() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--config")
        .arg(fixture("configs/kiosk.toml"))
        .arg("--keys")
        .arg("c");
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("Write to us: sales@junglejims.com"));
}

#[test]
fn event_log_is_written_as_jsonl() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.current_dir(temp.path()).arg("--keys").arg("1s");
    cmd.assert().success();

    let log = temp.path().join(".cache/chef-quest/quest.jsonl");
    let text = std::fs::read_to_string(&log).expect("log written");
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert_eq!(value["event_type"], "quest.transition");
    }
}

#[test]
fn broken_config_exits_nonzero() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--config")
        .arg(fixture("configs/broken.toml"))
        .arg("--keys")
        .arg("s");
    cmd.assert().failure();
}

#[test]
fn missing_config_exits_nonzero() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--config")
        .arg(fixture("configs/missing.toml"))
        .arg("--keys")
        .arg("s");
    cmd.assert().failure();
}

#[test]
fn log_pruning_leaves_neighbouring_files_alone() {
    let temp = tempfile::tempdir().expect("tempdir");
    let notes = temp.path().join("my-notes.txt");
    std::fs::write(&notes, vec![b'n'; 2048]).expect("notes");
    let log = temp.path().join("quest.jsonl");
    let config = temp.path().join("kiosk.toml");
    std::fs::write(
        &config,
        format!(
            "[logging]\npath = {:?}\nbudget_bytes = 1024\n",
            log.display().to_string()
        ),
    )
    .expect("config");

    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.arg("--config").arg(&config).arg("--keys").arg("1s");
    cmd.assert().success();

    assert!(notes.exists());
    assert!(log.exists());
}

#[test]
fn oversized_surface_is_rejected_without_crashing() {
    let mut cmd = cargo_bin_cmd!("chef-quest");
    cmd.args(["--no-log", "--keys", "", "--width", "65535", "--height", "65535"]);
    let out = cmd.assert().failure();
    let stderr = String::from_utf8(out.get_output().stderr.clone()).expect("utf8");
    assert!(stderr.contains("surface must be at most"));
}
