use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "maze-lab"])
        .status()
        .expect("failed to invoke cargo check for maze-lab CLI binary");

    assert!(status.success(), "cargo check --bin maze-lab should succeed");
}

#[test]
fn solve_reports_a_word_for_the_embedded_map() {
    let output = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["run", "--quiet", "--bin", "maze-lab", "--", "solve"])
        .output()
        .expect("failed to run the maze-lab CLI binary");

    assert!(output.status.success(), "maze-lab solve should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("shortest accepting word"),
        "solve should print a word for the embedded map, got: {stdout}"
    );
}
