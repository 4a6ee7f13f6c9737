use std::path::PathBuf;

pub const INPUT_FILE: &str = "input.txt";

pub fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn default_input() -> PathBuf {
    crate_root().join(INPUT_FILE)
}
