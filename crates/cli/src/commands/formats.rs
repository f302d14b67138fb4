//! `formats`: list recognized format identifiers.

use envload_config::Format;

pub fn run() {
    for format in Format::ALL {
        let status = if format.is_available() {
            "available"
        } else {
            "not compiled in"
        };
        println!("{:<10} {:<12} {status}", format.id(), format.aliases().join(","));
    }
}
