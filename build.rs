extern crate rustc_version;
use rustc_version::{version, Version};
use std::env;

fn main() {
    let version = version().unwrap();
    // Generic associated types are needed by the backend traits.
    assert!(version >= Version::new(1, 65, 0));

    println!("cargo:rustc-check-cfg=cfg(x11)");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "linux" | "freebsd" | "dragonfly" | "openbsd" | "netbsd" => println!("cargo:rustc-cfg=x11"),
        _ => (),
    }
}
