use std::{env, path::PathBuf};

/// Physical load address of the kernel image.
const KERNEL_LOAD: u64 = 0x0010_0000;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let ld = manifest_dir.join("kernel.ld");

    assert_eq!(
        KERNEL_LOAD & 0xfff,
        0,
        "KERNEL_LOAD must be 4 KiB aligned (got {KERNEL_LOAD:#x})"
    );

    println!("cargo:rerun-if-changed={}", ld.display());
    println!("cargo:rustc-link-arg-bins=-T{}", ld.display());
    println!("cargo:rustc-link-arg-bins=--defsym=KERNEL_LOAD={KERNEL_LOAD:#x}");
}
