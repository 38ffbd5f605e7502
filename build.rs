//! Embeds an incrementing build number and the build timestamp.

use std::fs;

const COUNTER_FILE: &str = "build_number.txt";

fn main() {
    println!("cargo:rerun-if-changed=src");

    let previous = fs::read_to_string(COUNTER_FILE)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let build = previous + 1;
    fs::write(COUNTER_FILE, build.to_string()).expect("write build counter");

    let stamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=PANTRY_BUILD_NUMBER={build}");
    println!("cargo:rustc-env=PANTRY_BUILD_TIMESTAMP={stamp}");
    println!("cargo:warning=pantry build #{build} at {stamp}");
}
