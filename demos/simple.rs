//! Reading, changing and writing a kstruct document.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_kstruct::{from_str, parse, serialize, to_string, Node};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Server {
    host: String,
    port: u16,
    workers: u32,
    tls: bool,
}

const CONFIG: &str = r#"
// server settings
host = "localhost"
port = 8000 + 80
workers = 4
tls = false
"#;

fn main() -> Result<(), Box<dyn Error>> {
    // As a tree
    let mut root = parse(CONFIG)?;
    println!("port as parsed: {}", root.get("port").map_or(0, Node::to_int));

    root.insert("workers", 8);
    println!("Rewritten:\n{}\n", serialize(&root)?);

    // As a Rust type
    let server: Server = from_str(CONFIG)?;
    println!("Deserialized: {:?}", server);

    let text = to_string(&server)?;
    println!("Serialized:\n{}", text);

    Ok(())
}
