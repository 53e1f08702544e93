//! The kstruct text format
//!
//! This module documents the format as read by [`parse`](crate::parse) and written by
//! [`serialize`](crate::serialize). It contains no code.
//!
//! # Overview
//!
//! A document is a map. Each entry assigns a value to a key; entries are separated by
//! line breaks or semicolons:
//!
//! ```text
//! // a line comment
//! name = "kstruct"
//! version = 2; stable = true
//! /* block comments /* nest */ too */
//! ```
//!
//! # Keys
//!
//! - A bare key matches `[A-Za-z][-_A-Za-z0-9]*`, for example `userName` or `max-size`.
//! - Any other key is written in backticks: `` `a.b.c` = 7 ``. Backticks take the same
//!   escapes as strings.
//! - Empty keys and duplicate keys within one map are errors.
//! - `true`, `false` and `null` are ordinary keys; they only turn into values after `=`.
//!
//! # Values
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `parent = null` |
//! | Boolean | `true`, `false` | `enabled = true` |
//! | Char | one character in single quotes | `sep = ','` |
//! | Int | decimal digits within 32 bits | `count = 42` |
//! | Long | digits with `L`, or too large for 32 bits | `id = 42L`, `big = 3000000000` |
//! | Float | number with `f` | `ratio = 0.5f` |
//! | Double | number with a fraction or exponent | `pi = 3.14159`, `tiny = 1e-9` |
//! | String | double quotes or triple quotes | `name = "Alice"` |
//! | List | brackets, comma-separated | `xs = [1, 2, 3]` |
//! | Map | braces | `point = { x = 1; y = 2 }` |
//!
//! A leading `-` directly before a digit is part of the number. A digit run followed by a
//! letter that is not a suffix (`4k`) is an error, as is a number beyond the 64-bit range.
//! `0.` is not a number: the dot becomes a separate token that the parser rejects.
//!
//! ## Strings and escapes
//!
//! Quoted strings, chars and backtick keys end on the line they start. The escapes are
//! `\n \r \t \\ \' \" \` \$`. A bare `$` followed by anything that could start a
//! template expression is rejected; interpolation is not supported.
//!
//! Triple-quoted strings may span lines. The indentation shared by all lines after the
//! first is removed, blank first and last lines are dropped and trailing whitespace is
//! trimmed. A string on a single line loses its leading whitespace as well:
//!
//! ```text
//! text = """
//!     first line
//!       indented line
//!     """
//! ```
//!
//! ## Constant folding
//!
//! `+` between two values of the same kind (Int, Long, Float, Double or String) is
//! evaluated while parsing, so `x = 1 + 2` stores `3`. The `+` must be on the same line
//! as its left operand; the right operand may follow on a later line.
//!
//! # Maps and attributes
//!
//! The `=` is optional before a map body. A map may carry attributes in parentheses,
//! in which case the body may be left out entirely:
//!
//! ```text
//! window(width = 640, height = 480) { title = "main" }
//! cursor(visible = false)
//! ```
//!
//! Attributes are separated by commas only, hold scalar values and have their own key
//! namespace, so an attribute and a child may share a name. Attribute keys may be
//! backtick-quoted like child keys. Attributes always follow the key directly:
//! `window = (width = 640) { }` is an error.
//!
//! Maps and lists nest at most 256 levels deep.
//!
//! # Lists
//!
//! List elements are separated by commas; one trailing comma is allowed. Line breaks may
//! appear around elements but never replace a comma. Maps inside lists may have
//! attributes too:
//!
//! ```text
//! points = [
//!    (label = "origin"),
//!    { x = 1; y = 2 },
//! ]
//! ```
//!
//! A list always needs `=`: `xs [1]` is an error.
//!
//! # Canonical form
//!
//! [`serialize`](crate::serialize) writes one entry per line at the root, `key = value`
//! for scalars and lists, `key { ... }` for maps, and breaks nested maps and lists across
//! lines as described in [`Style`](crate::Style). Parsing canonical output and
//! serializing it again yields the same text.
