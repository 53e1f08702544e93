//! Maps with attributes.
//!
//! Run with: cargo run --example attributes

use serde_kstruct::{parse, serialize, Attribute, Map, Node};
use std::error::Error;

const LAYOUT: &str = r#"
window(title = "main", width = 640, height = 480) {
   toolbar(visible = false)
   panes = [
      (name = "left", size = 0.3),
      (name = "right") { split = 'v' }
   ]
}
"#;

fn describe(map: &Map) -> String {
    map.attributes()
        .map(|(name, attr)| format!("{name}={attr}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn Error>> {
    let root = parse(LAYOUT)?;

    if let Some(window) = root.get("window").and_then(Node::as_map) {
        println!("window: {}", describe(window));
        let width = window.attribute("width").map_or(0, Attribute::to_int);
        println!("width from attribute: {width}");

        if let Some(panes) = window.get("panes").and_then(Node::as_list) {
            for pane in panes.iter().filter_map(Node::as_map) {
                println!("pane: {} ({} children)", describe(pane), pane.len());
            }
        }
    }

    // Attributes only take scalars
    let err = Attribute::new(Node::List(vec![]));
    println!("list as attribute: {:?}", err.err());

    println!("\nCanonical:\n{}", serialize(&root)?);
    Ok(())
}
