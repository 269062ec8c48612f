// Copyright (c) 2026 rezky_nightky

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=CASCADE_BUILD");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let target = format!(
        "{}-{}",
        std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "unknown".to_string()),
        std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string()),
    );

    let sha = std::env::var("CASCADE_BUILD")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_short_sha)
        .or_else(|| std::env::var("GITHUB_SHA").ok().and_then(|v| short_hex(&v)))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=CASCADE_BUILD={} ({})", target, sha);
}

fn short_hex(v: &str) -> Option<String> {
    let short: String = v.trim().chars().take(7).collect();
    if !short.is_empty() && short.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(short.to_ascii_lowercase())
    } else {
        None
    }
}

fn git_short_sha() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    short_hex(&String::from_utf8(out.stdout).ok()?)
}
