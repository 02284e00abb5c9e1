use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=LABELDCM_GIT_HASH={hash}");

    if let Some(git_dir) = resolve_git_dir() {
        for name in ["HEAD", "refs", "packed-refs"] {
            emit_rerun(&git_dir.join(name));
        }
    }
}

fn resolve_git_dir() -> Option<PathBuf> {
    env::var_os("GIT_DIR")
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(".git")).filter(|dir| dir.is_dir()))
}

fn emit_rerun(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Some(display) = path.to_str() {
        println!("cargo:rerun-if-changed={display}");
    }
}
