use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn snippix(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snippix"));
    cmd.env("SNIPPIX_CONFIG_DIR", config_dir)
        .env_remove("SNIPPIX_CONFIG_PATH");
    cmd
}

#[test]
fn renders_fenced_snippet_from_stdin() {
    let dir = tempdir().expect("temp dir");
    let out_path = dir.path().join("out.png");
    let mut child = snippix(dir.path())
        .args(["--font", "builtin", "--strict", "-o"])
        .arg(&out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .expect("spawn snippix");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"```rust\nfn main() {}\n```\n")
        .expect("write stdin");
    let status = child.wait().expect("wait");
    assert!(status.success());

    let bytes = fs::read(&out_path).expect("read output");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn renders_file_as_webp() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("query.sql");
    fs::write(&input, "SELECT id FROM users;\n").expect("write input");
    let out_path = dir.path().join("out.webp");
    let status = snippix(dir.path())
        .args(["--font", "builtin", "--style", "plain"])
        .arg(&input)
        .arg("-o")
        .arg(&out_path)
        .status()
        .expect("run snippix");
    assert!(status.success());
    let bytes = fs::read(&out_path).expect("read output");
    assert_eq!(&bytes[..4], b"RIFF");
}

#[test]
fn strict_unknown_theme_fails() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("a.py");
    fs::write(&input, "print(1)\n").expect("write input");
    let output = snippix(dir.path())
        .args(["--font", "builtin", "--strict", "-t", "sunburst"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .output()
        .expect("run snippix");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: unknown theme: sunburst"));
}
