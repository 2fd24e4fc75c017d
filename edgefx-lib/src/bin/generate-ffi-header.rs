//! Regenerates `include/edgefx.h` from the `ffi` module.
//!
//! `cargo run -p edgefx --features generate-header --bin generate-ffi-header`

use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))?;
    let header = crate_dir.join("include").join("edgefx.h");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()?;
    if bindings.write_to_file(&header) {
        println!("updated {}", header.display());
    } else {
        println!("{} is up to date", header.display());
    }
    Ok(())
}
