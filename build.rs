use std::process::Command;

/// `dev <branch> <hash>` suffix for non-release builds, when a checkout is
/// available.
fn dev_suffix() -> Option<String> {
    let git = |args: &[&str]| {
        Command::new("git")
            .args(args)
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
    };

    let hash = git(&["rev-parse", "--short", "HEAD"])?;
    Some(match git(&["rev-parse", "--abbrev-ref", "HEAD"]) {
        Some(branch) => format!("dev {branch} {hash}"),
        None => format!("dev {hash}"),
    })
}

fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap();

    // GIT_UP_VERSION_DISPLAY: what `git-up --version` prints; carries the
    // branch/hash suffix except in release builds.
    let display = match dev_suffix() {
        Some(suffix) if std::env::var("GIT_UP_BUILD_RELEASE").is_err() => {
            format!("{version} ({suffix})")
        }
        _ => version,
    };
    println!("cargo:rustc-env=GIT_UP_VERSION_DISPLAY={display}");

    // Only re-run when HEAD changes (branch switch, new commit)
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=GIT_UP_BUILD_RELEASE");
}
