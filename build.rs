use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fs::{read_to_string, write};
use std::path::PathBuf;

const WELCOME_PATH: &str = "resources/welcome.txt";

fn main() {
    _main().unwrap();
}

#[derive(Deserialize)]
struct CargoManifest<'a> {
    #[serde(borrow = "'a")]
    package: Package<'a>,
}

#[derive(Deserialize)]
struct Package<'a> {
    version: &'a str,
}

fn _main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={WELCOME_PATH}");
    println!("cargo:rerun-if-changed=Cargo.toml");

    let banner = read_to_string(WELCOME_PATH)?;
    let cargo = read_to_string("Cargo.toml")?;
    let manifest: CargoManifest = toml::from_str(&cargo)?;

    let mut path = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR not set")?);
    path.push("welcome_info");

    write(
        path,
        banner.replace("${{version}}", manifest.package.version),
    )?;

    Ok(())
}
