use std::path::Path;
use std::process::Command;

/// `git describe` for the workspace, or `unknown` outside a checkout.
fn describe(workspace: &Path) -> String {
    let out = match Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
    {
        Ok(out) if out.status.success() => out.stdout,
        _ => return "unknown".into(),
    };
    match String::from_utf8_lossy(&out).trim() {
        "" => "unknown".into(),
        rev => rev.to_string(),
    }
}

fn main() {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let workspace = Path::new(&manifest).join("..");

    println!("cargo:rustc-env=BOARDSCAN_BUILD_SHA={}", describe(&workspace));
    println!("cargo:rerun-if-changed=build.rs");
    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}
