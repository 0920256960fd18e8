//! This build script places the `memory.x` linker script where the linker can find it
//! when building the firmware, and records the build time as the initial wall clock.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    // Linker script is only meaningful for the nRF52832 target.
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv7em") {
        File::create(out.join("memory.x"))
            .unwrap()
            .write_all(include_bytes!("memory.x"))
            .unwrap();
        println!("cargo:rustc-link-search={}", out.display());
    }

    // The watch has no RTC backup, so it boots at the time it was built.
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {:?};",
            chrono::Utc::now().timestamp()
        ))
        .unwrap();

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
