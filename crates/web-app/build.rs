#![deny(clippy::pedantic)]

use std::env;

const VARIABLES: [&str; 2] = ["GROWMUSCLE_BACKEND_URL", "GROWMUSCLE_BACKEND_KEY"];

fn main() {
    for variable in VARIABLES {
        println!("cargo:rerun-if-env-changed={variable}");
        let value = env::var(variable).unwrap_or_default();
        println!("cargo:rustc-env={variable}={value}");
    }
}
