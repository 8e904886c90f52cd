use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    // The blocking driver is generated from the non-blocking one so both issue the exact same
    // register transactions in the same order.
    println!("cargo:rerun-if-changed=src/async.rs");
    let source = std::fs::read_to_string("src/async.rs")?;

    let blocking = source
        .replace("embedded_hal_async", "embedded_hal")
        .replace("async", "")
        .replace(".await", "");

    let mut out_path = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    out_path.push("blocking.rs");

    File::create(out_path)?.write_all(blocking.as_bytes())?;

    Ok(())
}
