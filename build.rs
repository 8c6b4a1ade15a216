//! Build script for nutristats
//!
//! Embeds the build number (from CI, `NUTRISTATS_BUILD_NUMBER`) and the
//! compile timestamp.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=NUTRISTATS_BUILD_NUMBER");

    let build_number: u64 = env::var("NUTRISTATS_BUILD_NUMBER")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=NUTRISTATS_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NUTRISTATS_BUILD_TIMESTAMP={}", timestamp);
}
