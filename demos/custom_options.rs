//! Customizing output with SerializeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_kstruct::{to_string, to_string_with_options, SerializeOptions, Style};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Endpoint {
    path: String,
    methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Api {
    name: String,
    version: u32,
    limits: Limits,
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Serialize)]
struct Limits {
    rps: u32,
    burst: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let api = Api {
        name: "store".to_string(),
        version: 2,
        limits: Limits { rps: 100, burst: 20 },
        endpoints: vec![
            Endpoint {
                path: "/items".to_string(),
                methods: vec!["GET".to_string(), "POST".to_string()],
            },
            Endpoint {
                path: "/items/{id}".to_string(),
                methods: vec!["GET".to_string()],
            },
        ],
    };

    println!("Default (indent 3):");
    println!("{}\n", to_string(&api)?);

    println!("Indent 2:");
    let two = SerializeOptions::new().with_indent(2);
    println!("{}\n", to_string_with_options(&api, two)?);

    println!("Flat:");
    let flat = SerializeOptions::new().with_style(Style::Flat);
    println!("{}", to_string_with_options(&api, flat)?);

    Ok(())
}
