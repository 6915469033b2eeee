#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

use fileckr::frame::{encode_to_vec, Canvas, Dimensions, FrameConfig, ImageCodec, PngCodec};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "fileckr-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn fileckr(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fileckr"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .env_remove("FILECKR_LEGACY")
        .output()
        .expect("fileckr should run")
}

#[test]
fn encode_then_decode_restores_bytes() {
    let dir = unique_temp_dir("roundtrip");
    let input = dir.join("input.bin");
    let image = dir.join("input.png");
    let output = dir.join("output.bin");

    let content: Vec<u8> = (0..10_000u32).map(|i| (i % 253) as u8).collect();
    std::fs::write(&input, &content).expect("input should be writable");

    let encoded = fileckr(&["encode".as_ref(), input.as_os_str(), image.as_os_str()]);
    assert!(encoded.status.success(), "encode failed: {encoded:?}");
    let png = std::fs::read(&image).expect("image should exist");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = fileckr(&["decode".as_ref(), image.as_os_str(), output.as_os_str()]);
    assert!(decoded.status.success(), "decode failed: {decoded:?}");
    assert_eq!(std::fs::read(&output).expect("output should exist"), content);

    let _ = std::fs::remove_dir_all(&dir);
}

#[cfg(unix)]
#[test]
fn decode_restores_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let dir = unique_temp_dir("mode");
    let input = dir.join("script.sh");
    let image = dir.join("script.png");
    let output = dir.join("restored.sh");

    std::fs::write(&input, b"#!/bin/sh\necho hi\n").expect("input should be writable");
    std::fs::set_permissions(&input, std::fs::Permissions::from_mode(0o750))
        .expect("mode should be settable");

    assert!(fileckr(&["encode".as_ref(), input.as_os_str(), image.as_os_str()])
        .status
        .success());
    assert!(fileckr(&["decode".as_ref(), image.as_os_str(), output.as_os_str()])
        .status
        .success());

    let mode = std::fs::metadata(&output)
        .expect("output should exist")
        .permissions()
        .mode();
    assert_eq!(mode & 0o7777, 0o750);

    let untouched = dir.join("untouched.sh");
    assert!(fileckr(&[
        "decode".as_ref(),
        image.as_os_str(),
        untouched.as_os_str(),
        "--no-mode".as_ref(),
    ])
    .status
    .success());
    assert_eq!(
        std::fs::read(&untouched).expect("output should exist"),
        b"#!/bin/sh\necho hi\n"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn legacy_roundtrip() {
    let dir = unique_temp_dir("legacy");
    let input = dir.join("input.txt");
    let image = dir.join("input.png");
    let output = dir.join("output.txt");
    std::fs::write(&input, b"lorempsum").expect("input should be writable");

    assert!(fileckr(&[
        "encode".as_ref(),
        "--legacy".as_ref(),
        input.as_os_str(),
        image.as_os_str()
    ])
    .status
    .success());
    assert!(fileckr(&[
        "decode".as_ref(),
        "--legacy".as_ref(),
        image.as_os_str(),
        output.as_os_str()
    ])
    .status
    .success());
    assert_eq!(std::fs::read(&output).expect("output should exist"), b"lorempsum");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn inspect_prints_json_report() {
    let dir = unique_temp_dir("inspect");
    let image = dir.join("hello.png");
    let png = encode_to_vec(b"hello", 0o644, &FrameConfig::default()).expect("encode");
    std::fs::write(&image, png).expect("image should be writable");

    let out = fileckr(&[
        "--format".as_ref(),
        "json".as_ref(),
        "inspect".as_ref(),
        image.as_os_str(),
    ]);
    assert!(out.status.success(), "inspect failed: {out:?}");

    let stdout = String::from_utf8(out.stdout).expect("stdout should be utf-8");
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(report["width"], 20);
    assert_eq!(report["height"], 20);
    assert_eq!(report["size"], 5);
    assert_eq!(report["mode"], "0644");
    assert_eq!(report["fits"], true);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn truncated_image_fails_and_removes_output() {
    let dir = unique_temp_dir("truncated");
    let image = dir.join("bad.png");
    let output = dir.join("out.bin");

    let mut canvas = Canvas::new(Dimensions::new(20, 20)).expect("canvas");
    canvas.as_bytes_mut()[..8].copy_from_slice(&u64::MAX.to_le_bytes());
    let mut png = Vec::new();
    PngCodec::default()
        .write_canvas(&canvas, &mut png)
        .expect("png encode");
    std::fs::write(&image, png).expect("image should be writable");

    let out = fileckr(&["decode".as_ref(), image.as_os_str(), output.as_os_str()]);
    assert_eq!(out.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("truncated frame"), "stderr: {stderr}");
    assert!(!output.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn non_image_input_is_rejected() {
    let dir = unique_temp_dir("garbage");
    let image = dir.join("not.png");
    let output = dir.join("out.bin");
    std::fs::write(&image, b"plain text, not a picture").expect("writable");

    let out = fileckr(&["decode".as_ref(), image.as_os_str(), output.as_os_str()]);
    assert_eq!(out.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to decode image"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn wrong_argument_count_fails() {
    let out = fileckr(&["encode".as_ref(), "only-one".as_ref()]);
    assert!(!out.status.success());

    let out = fileckr(&["decode".as_ref(), "a".as_ref(), "b".as_ref(), "c".as_ref()]);
    assert!(!out.status.success());
}

#[test]
fn missing_input_fails() {
    let dir = unique_temp_dir("missing");
    let out = fileckr(&[
        "encode".as_ref(),
        dir.join("nope.bin").as_os_str(),
        dir.join("nope.png").as_os_str(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.join("nope.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
