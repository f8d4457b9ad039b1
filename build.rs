//! Build script for the Spotify web relay.
//!
//! Copies the `.env.example` template into the local data directory next to
//! the `.env` file the server reads at startup, so a fresh install has a
//! starting point for its client credentials.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to `<data_local_dir>/spotrelay/.env.example`.
///
/// - Linux: `~/.local/share/spotrelay/.env.example`
/// - macOS: `~/Library/Application Support/spotrelay/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotrelay/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotrelay");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
