use std::process::Command;

const BINARY: &str = env!("CARGO_BIN_EXE_heavy-machine-gun");

#[test]
fn headless_run_prints_a_summary() {
    let output = Command::new(BINARY)
        .args(["run", "--seed", "11", "--duration-secs", "20", "--frame-ms", "20"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch heavy-machine-gun");

    assert!(output.status.success(), "run should succeed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("games played: 1"), "{stdout}");
    assert!(stdout.contains("best score:"), "{stdout}");
    assert!(stdout.contains("final level:"), "{stdout}");
}

#[test]
fn high_score_file_is_written_and_reused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scores.toml");
    let config = dir.path().join("run.toml");
    std::fs::write(
        &config,
        format!(
            "version = 1\nseed = 4\nduration_secs = 90\nframe_ms = 20\nautopilot = false\nhigh_score_path = {:?}\n",
            path.display().to_string()
        ),
    )
    .expect("write config");

    for _ in 0..2 {
        let output = Command::new(BINARY)
            .args(["run", "--config"])
            .arg(&config)
            .env("RUST_LOG", "warn")
            .output()
            .expect("failed to launch heavy-machine-gun");
        assert!(output.status.success(), "run should succeed: {output:?}");
    }

    let stored = std::fs::read_to_string(&path).unwrap_or_default();
    if !stored.is_empty() {
        assert!(stored.contains("heavy-machine-gun.high-score"), "{stored}");
    }
}

#[test]
fn unsupported_config_version_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("run.toml");
    std::fs::write(&config, "version = 9\n").expect("write config");

    let output = Command::new(BINARY)
        .args(["run", "--config"])
        .arg(&config)
        .output()
        .expect("failed to launch heavy-machine-gun");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported run config version 9"), "{stderr}");
}
