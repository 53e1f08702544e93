//! Building trees with the kstruct! macro and the closure builder.
//!
//! Run with: cargo run --example macro

use serde_kstruct::builder::MapBuilder;
use serde_kstruct::{kstruct, serialize, Node};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = kstruct!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "limits": ("strict": true)
    });

    if let Some(root) = config.as_map() {
        println!("From the macro:\n{}\n", serialize(root)?);
    }

    if let Some(features) = config.get("features").and_then(Node::as_list) {
        println!("{} features\n", features.len());
    }

    let root = MapBuilder::build(|b| {
        b.set("name", "demo");
        b.set("timeout", 2.5f32);
        b.set_map("owner", |o| {
            o.attr("verified", true);
            o.set("id", 7i64);
        });
        b.set_list("matrix", |l| {
            l.add_list(|row| {
                row.add(1).add(0);
            });
            l.add_list(|row| {
                row.add(0).add(1);
            });
        });
    });
    println!("From the builder:\n{}", serialize(&root)?);

    Ok(())
}
