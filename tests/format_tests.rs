use serde_kstruct::token::TokenKind;
use serde_kstruct::{
    evaluate, parse, serialize, serialize_with_options, tokenize, Attribute, Category, Error,
    Map, Node, SerializeOptions,
};

fn canonical(text: &str) -> String {
    serialize(&parse(text).unwrap()).unwrap()
}

#[test]
fn test_scalar_kinds() {
    let root = parse(
        "n = null; b = true; c = 'c'; i = 42; l = 42L; big = 3000000000\n\
         f = 0.5f; d = 3.25; e = 1e3; s = \"str\"",
    )
    .unwrap();
    assert_eq!(root.get("n"), Some(&Node::Null));
    assert_eq!(root.get("b"), Some(&Node::Boolean(true)));
    assert_eq!(root.get("c"), Some(&Node::Char('c')));
    assert_eq!(root.get("i"), Some(&Node::Int(42)));
    assert_eq!(root.get("l"), Some(&Node::Long(42)));
    assert_eq!(root.get("big"), Some(&Node::Long(3_000_000_000)));
    assert_eq!(root.get("f"), Some(&Node::Float(0.5)));
    assert_eq!(root.get("d"), Some(&Node::Double(3.25)));
    assert_eq!(root.get("e"), Some(&Node::Double(1000.0)));
    assert_eq!(root.get("s"), Some(&Node::String("str".to_string())));
}

#[test]
fn test_negative_numbers() {
    let root = parse("a = -1; b = -2L; c = -0.5; d = [-1, -2]").unwrap();
    assert_eq!(root.get("a"), Some(&Node::Int(-1)));
    assert_eq!(root.get("b"), Some(&Node::Long(-2)));
    assert_eq!(root.get("c"), Some(&Node::Double(-0.5)));
    assert_eq!(
        root.get("d"),
        Some(&Node::List(vec![Node::Int(-1), Node::Int(-2)]))
    );
}

#[test]
fn test_comments() {
    let text = "// leading\na = 1 // trailing\n/* block\n /* nested */ still */\nb = 2";
    assert_eq!(canonical(text), "a = 1\nb = 2");
}

#[test]
fn test_verbatim_string() {
    let text = "text = \"\"\"\n    first\n      second\n    \"\"\"";
    let root = parse(text).unwrap();
    assert_eq!(root.get("text").and_then(Node::as_str), Some("first\n  second"));
    assert_eq!(serialize(&root).unwrap(), "text = \"first\\n  second\"");

    let root = parse("s = \"\"\"   Should trim line.   \"\"\"").unwrap();
    assert_eq!(root.get("s").and_then(Node::as_str), Some("Should trim line."));
}

#[test]
fn test_escapes() {
    let root = parse(r#"s = "tab\there \"q\" \$5"; c = '\''; `odd key` = 1"#).unwrap();
    assert_eq!(
        root.get("s").and_then(Node::as_str),
        Some("tab\there \"q\" $5")
    );
    assert_eq!(root.get("c"), Some(&Node::Char('\'')));
    assert_eq!(root.get("odd key"), Some(&Node::Int(1)));
    assert_eq!(
        serialize(&root).unwrap(),
        r#"s = "tab\there \"q\" \$5"
c = '\''
`odd key` = 1"#
    );
}

#[test]
fn test_interpolation_is_rejected() {
    let err = parse("s = \"${x}\"").unwrap_err();
    assert_eq!(err, Error::InterpolationNotSupported { line: 1 });
    assert_eq!(err.category(), Category::Lexical);
}

#[test]
fn test_constant_folding() {
    let root = parse("i = 1 + 2 + 3\nl = 1L + 2L\ns = \"a\" +\n\"b\"").unwrap();
    assert_eq!(root.get("i"), Some(&Node::Int(6)));
    assert_eq!(root.get("l"), Some(&Node::Long(3)));
    assert_eq!(root.get("s").and_then(Node::as_str), Some("ab"));

    let kinds: Vec<_> = evaluate(tokenize("1 + 2L").unwrap())
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int(1),
            TokenKind::Plus,
            TokenKind::Long(2),
            TokenKind::Newline
        ]
    );
}

#[test]
fn test_attributes() {
    let root = parse("window(width = 640, title = \"main\") { visible = true }\ncursor(on = false)")
        .unwrap();
    let window = root.get("window").and_then(Node::as_map).unwrap();
    assert_eq!(window.attribute("width").and_then(Attribute::as_int), Some(640));
    assert_eq!(window.get("visible"), Some(&Node::Boolean(true)));

    let cursor = root.get("cursor").and_then(Node::as_map).unwrap();
    assert!(cursor.is_empty());
    assert_eq!(cursor.attribute("on").and_then(Attribute::as_bool), Some(false));

    assert_eq!(
        serialize(&root).unwrap(),
        "window(width = 640, title = \"main\") {\n   visible = true\n}\ncursor(on = false)"
    );
}

#[test]
fn test_quoted_attribute_keys_round_trip() {
    let mut m = Map::new();
    m.insert_attribute("a.b", 1);
    let mut root = Map::new();
    root.insert("m", m);

    let text = serialize(&root).unwrap();
    assert_eq!(text, "m(`a.b` = 1)");
    assert_eq!(parse(&text).unwrap(), root);
}

#[test]
fn test_attribute_and_child_share_a_name() {
    let root = parse("m(x = 1) { x = 2 }").unwrap();
    let m = root.get("m").and_then(Node::as_map).unwrap();
    assert_eq!(m.attribute("x").and_then(Attribute::as_int), Some(1));
    assert_eq!(m.get("x"), Some(&Node::Int(2)));
}

#[test]
fn test_lists_of_maps() {
    let text = "points = [\n(label = \"origin\"),\n{ x = 1; y = 2 },\n]";
    let root = parse(text).unwrap();
    let points = root.get("points").and_then(Node::as_list).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(
        points[0]
            .as_map()
            .and_then(|m| m.attribute("label"))
            .and_then(Attribute::as_str),
        Some("origin")
    );
    assert_eq!(
        serialize(&root).unwrap(),
        "points = [\n   (label = \"origin\"),\n   {\n      x = 1\n      y = 2\n   }\n]"
    );
}

#[test]
fn test_optional_equals_before_maps() {
    assert_eq!(canonical("a = { b = 1 }"), canonical("a { b = 1 }"));
    assert_eq!(canonical("a {}"), "a {}");
    assert_eq!(canonical("xs = []"), "xs = []");
}

#[test]
fn test_canonical_form_is_stable() {
    let text = "\
name = \"demo\"
server(port = 8080) {
   hosts = [\"a\", \"b\"]
   limits { memory = 512L }
}
matrix = [
   [1, 2],
   [3, 4]
]";
    assert_eq!(canonical(text), text);
}

#[test]
fn test_flat_style() {
    let root = parse("a { b { c = 1; d = 2 } }\ne { f = 1; g = 2 }").unwrap();
    assert_eq!(
        serialize_with_options(&root, SerializeOptions::flat()).unwrap(),
        "a { b { c = 1; d = 2 } }\ne { f = 1; g = 2 }"
    );
    assert_eq!(
        serialize(&root).unwrap(),
        "a {\n   b {\n      c = 1\n      d = 2\n   }\n}\ne {\n   f = 1\n   g = 2\n}"
    );
}

#[test]
fn test_root_with_attributes_is_wrapped() {
    let mut root = Map::new();
    root.insert_attribute("version", 2);
    root.insert("name", "x");
    let text = serialize(&root).unwrap();
    assert_eq!(text, "value(version = 2) { name = \"x\" }");
    assert_eq!(parse(&text).unwrap().get("value"), Some(&Node::Map(root)));
}

#[test]
fn test_empty_key_cannot_be_written() {
    let mut root = Map::new();
    root.insert("", 1);
    let err = serialize(&root).unwrap_err();
    assert_eq!(err, Error::EmptyKeyInTree);
    assert_eq!(err.category(), Category::Contract);
}

#[test]
fn test_non_finite_values_are_written_as_null() {
    let mut root = Map::new();
    root.insert("nan", f64::NAN);
    root.insert("inf", f32::INFINITY);
    assert_eq!(serialize(&root).unwrap(), "nan = null\ninf = null");
}

#[test]
fn test_error_lines() {
    let cases: Vec<(&str, Error)> = vec![
        ("a = 1\na = 2", Error::DuplicateKey { line: 2, key: "a".to_string() }),
        ("a = [1\n2]", Error::MissingComma { line: 2 }),
        ("a = [,]", Error::SuperfluousComma { line: 1 }),
        ("a = 1 b = 2", Error::MissingSemicolon { line: 1 }),
        ("a = 1\n}", Error::SuperfluousCloseBrace { line: 2 }),
        ("a = \"open\nb = 1", Error::MissingEndOfDoubleQuote { line: 1 }),
        ("a = 4k", Error::UnexpectedChar { line: 1, ch: 'k' }),
        ("\n\na = 99999999999999999999", Error::BadDigitSequence {
            line: 3,
            text: "99999999999999999999".to_string(),
        }),
        ("/* never closed", Error::MissingEndOfBlockComment { line: 2 }),
    ];
    for (text, expected) in cases {
        let err = parse(text).unwrap_err();
        assert_eq!(err, expected, "input: {text:?}");
        assert_eq!(err.line(), expected.line());
    }
}
