//! Facade integration tests
//!
//! Checks that the facade exposes a usable surface from both library crates.

use reinhardt_jsx::markup::{Attr, Code, Element, MarkupVisitor, parse_fragment};
use reinhardt_jsx::prelude::*;
use rstest::*;

/// Counts elements in a fragment, including the root.
struct ElementCounter;

impl MarkupVisitor for ElementCounter {
	type Output = usize;
	type Error = std::convert::Infallible;

	fn visit_element(&mut self, element: &Element) -> Result<usize, Self::Error> {
		let children = reinhardt_jsx::markup::codegen::walk_children(self, element)?;
		Ok(1 + children.iter().sum::<usize>())
	}

	fn visit_text(&mut self, _text: &str) -> Result<usize, Self::Error> {
		Ok(0)
	}

	fn visit_embedded_code(&mut self, _code: &Code) -> Result<usize, Self::Error> {
		Ok(0)
	}

	fn visit_attribute(&mut self, _name: &str, _attr: &Attr) -> Result<usize, Self::Error> {
		Ok(0)
	}
}

#[rstest]
fn test_custom_visitor_through_facade() {
	let fragment = parse_fragment("<ul><li>a</li><li>b<br/></li>{x}</ul>").unwrap();
	let count = ElementCounter.visit_element(&fragment.root).unwrap();
	assert_eq!(count, 4);
}

#[rstest]
fn test_prelude_transpiles() {
	let output = transpile_source("var App = React.createClass({render() { return <main/>; }});").unwrap();
	assert_eq!(
		output,
		r#"var App = React.createClass({displayName: "App", render() { return React.createElement("main", null); }});"#
	);
}

#[rstest]
fn test_error_is_reexported() {
	let err: TranspileError = Transpiler::default()
		.transpile_source("x = <a b=/>;")
		.unwrap_err();
	let TranspileError::Markup { source, .. } = err else {
		panic!("expected a markup error");
	};
	let _: MarkupError = source;
}
