//! Shared test helpers for modbook integration tests.
//!
//! All tests use temp directories: each gets its own config and address
//! book via `setup_book()`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Sample address book used by the CLI tests.
pub const SAMPLE_BOOK: &str = r#"{
  "persons": [
    {
      "name": "Alex Yeoh",
      "phone": "91234567",
      "email": "alex@example.com",
      "address": "Blk 30 Geylang Street 29",
      "tags": ["friends"],
      "roles": [{ "code": "CS1101S", "role": "student" }]
    },
    {
      "name": "Bernice Yu",
      "phone": "98765432",
      "email": "bernice@example.com",
      "tags": ["colleagues", "friends"]
    },
    {
      "name": "Charlotte Oliveiro",
      "phone": "93210283",
      "email": "charlotte@example.com",
      "roles": [
        { "code": "CS1101S", "role": "student" },
        { "code": "CS1101S", "role": "tutor" }
      ],
      "description": "Runs the Friday tutorial"
    }
  ]
}
"#;

/// Create a temp dir holding `.modbook/config.toml` that points at
/// `data/addressbook.json`, seeded with [`SAMPLE_BOOK`].
pub fn setup_book() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::create_dir_all(dir.path().join(".modbook")).unwrap();
    std::fs::write(
        dir.path().join(".modbook/config.toml"),
        "[book]\npath = \"data/addressbook.json\"\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(book_path(dir.path()), SAMPLE_BOOK).unwrap();
    dir
}

/// Path of the address book inside a dir created by [`setup_book`].
pub fn book_path(dir: &Path) -> PathBuf {
    dir.join("data/addressbook.json")
}

/// Run modbook with the given args in the given directory.
pub fn modbook_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modbook"))
        .args(args)
        .current_dir(dir)
        .env_remove("MODBOOK_LOG")
        .env_remove("MODBOOK_CONFIG")
        .output()
        .expect("failed to execute modbook")
}

/// Run modbook and assert it succeeds. Returns stdout as string.
pub fn modbook_ok(dir: &Path, args: &[&str]) -> String {
    let out = modbook_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "modbook {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run modbook and assert it fails. Returns stderr as string.
pub fn modbook_err(dir: &Path, args: &[&str]) -> String {
    let out = modbook_in(dir, args);
    assert!(
        !out.status.success(),
        "modbook {} unexpectedly succeeded:\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// Read the on-disk book as raw text.
pub fn read_book(dir: &Path) -> String {
    std::fs::read_to_string(book_path(dir)).expect("failed to read address book")
}
