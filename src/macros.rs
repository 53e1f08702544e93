/// Builds a [`Node`](crate::Node) from a literal tree.
///
/// Maps use `"key": value` pairs inside braces and may be preceded by a parenthesized
/// attribute list. Inside a map or list, a map with both attributes and children takes
/// an extra pair of parentheses. Any other expression is converted with
/// [`to_node`](crate::to_node), falling back to `null` if it cannot be represented.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{kstruct, Node};
///
/// let node = kstruct!({
///     "name": "Alice",
///     "tags": ["admin", "user"],
///     "window": (("visible": true) { "width": 640 })
/// });
///
/// assert_eq!(node.get("name").and_then(Node::as_str), Some("Alice"));
/// let window = node.get("window").and_then(Node::as_map).unwrap();
/// assert_eq!(window.attribute("visible").and_then(|a| a.as_bool()), Some(true));
/// ```
#[macro_export]
macro_rules! kstruct {
    (null) => {
        $crate::Node::Null
    };

    (true) => {
        $crate::Node::Boolean(true)
    };

    (false) => {
        $crate::Node::Boolean(false)
    };

    ([]) => {
        $crate::Node::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::List(vec![$($crate::kstruct!($elem)),*])
    };

    ({}) => {
        $crate::Node::Map($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key, $crate::kstruct!($value));
        )*
        $crate::Node::Map(map)
    }};

    (( ( $($attr:literal : $attr_value:expr),* $(,)? ) { $($key:literal : $value:tt),* $(,)? } )) => {
        $crate::kstruct!(( $($attr : $attr_value),* ) { $($key : $value),* })
    };

    // attributes followed by a body
    (( $($attr:literal : $attr_value:expr),* $(,)? ) { $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert_attribute($attr, $crate::Attribute::from($attr_value));
        )*
        $(
            map.insert($key, $crate::kstruct!($value));
        )*
        $crate::Node::Map(map)
    }};

    (( $($attr:literal : $attr_value:expr),* $(,)? )) => {
        $crate::kstruct!(( $($attr : $attr_value),* ) {})
    };

    ($s:expr) => {{
        $crate::to_node(&$s).unwrap_or($crate::Node::Null)
    }};
}
