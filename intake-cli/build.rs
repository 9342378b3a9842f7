use std::path::{Path, PathBuf};
use std::process::Command;

/// Short commit id shown in the interactive screen's title bar.
fn short_sha(repo: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}

/// `HEAD` only changes on checkout; commits move the branch ref it names.
fn watch_head(git_dir: &Path) {
    let head = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head.display());

    let Ok(contents) = std::fs::read_to_string(&head) else {
        return;
    };
    if let Some(reference) = contents.trim().strip_prefix("ref: ") {
        println!("cargo:rerun-if-changed={}", git_dir.join(reference).display());
        // packed refs are rewritten by gc and fetch
        println!("cargo:rerun-if-changed={}", git_dir.join("packed-refs").display());
    }
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo = PathBuf::from(manifest_dir).join("..");

    let sha = short_sha(&repo).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=INTAKE_BUILD_SHA={sha}");

    watch_head(&repo.join(".git"));
}
