//! Transpile integration tests
//!
//! End-to-end behavior of the transpiler on realistic JSX sources.
//!
//! # Test Categories
//!
//! - Round-trip: clean JavaScript passes through untouched
//! - Generation: attribute kinds, spreads, nesting and name casing
//! - Annotation: `displayName` injection and its idempotence
//! - Rejection: malformed markup and host errors abort the whole call

use reinhardt_jsx_core::{TranspileError, TranspileSettings, Transpiler, transpile_file};
use rstest::*;

#[fixture]
fn transpiler() -> Transpiler {
	Transpiler::default()
}

// =============================================================================
// Round-trip
// =============================================================================

#[rstest]
#[case::empty("")]
#[case::comparison("if (a < b && c > d) { e(); }")]
#[case::generics_lookalike("var x = a<b>c;")]
#[case::string_markup("var html = '<div>x</div>';")]
#[case::template_markup("var html = `<p>${x}</p>`;")]
#[case::comment_markup("// <App/>\n/* <b></b> */ run();")]
#[case::module("import React from 'react';\nexport default function f() { return 1; }")]
fn test_clean_source_round_trips(transpiler: Transpiler, #[case] source: &str) {
	assert_eq!(transpiler.transpile_source(source).unwrap(), source);
}

#[rstest]
fn test_output_is_a_fixed_point(transpiler: Transpiler) {
	let source = r#"
var Greeting = React.createClass({
	render: function() {
		return <div className="greeting" {...this.props}>
			Hello, {this.props.name}! "Welcome"
			{this.props.items.map(function (item) { return <Item key={item.id} {...item}/>; })}
		</div>;
	}
});
"#;
	let once = transpiler.transpile_source(source).unwrap();
	assert!(!once.contains("<div"));
	assert_eq!(transpiler.transpile_source(&once).unwrap(), once);
}

// =============================================================================
// Generation
// =============================================================================

#[rstest]
fn test_resumption_leaves_trailing_code(transpiler: Transpiler) {
	assert_eq!(
		transpiler.transpile_source("f(<a/>); g();").unwrap(),
		r#"f(React.createElement("a", null)); g();"#
	);
}

#[rstest]
fn test_attribute_kinds(transpiler: Transpiler) {
	assert_eq!(
		transpiler.transpile_source(r#"x = <a s="v" e={v}/>;"#).unwrap(),
		r#"x = React.createElement("a", {s: "v", e: v});"#
	);
}

#[rstest]
fn test_spread_ordering(transpiler: Transpiler) {
	assert_eq!(
		transpiler
			.transpile_source(r#"x = <N {...a} {...b} c="d"></N>;"#)
			.unwrap(),
		r#"x = React.createElement(N, React.__spread({}, a, b, {c: "d"}));"#
	);
}

#[rstest]
fn test_nested_markup_in_expression_position(transpiler: Transpiler) {
	assert_eq!(
		transpiler.transpile_source("x = <N>{<M/>}</N>;").unwrap(),
		"x = React.createElement(N, null, React.createElement(M, null));"
	);
}

#[rstest]
fn test_template_literal_in_embedded_code(transpiler: Transpiler) {
	assert_eq!(
		transpiler
			.transpile_source("x = <a>{`${'`'}${<b/>}`}</a>;")
			.unwrap(),
		"x = React.createElement(\"a\", null, `${'`'}${React.createElement(\"b\", null)}`);"
	);
}

#[rstest]
#[case::intrinsic("<div/>", r#"React.createElement("div", null)"#)]
#[case::component("<Foo/>", "React.createElement(Foo, null)")]
fn test_name_casing(transpiler: Transpiler, #[case] markup: &str, #[case] call: &str) {
	let output = transpiler
		.transpile_source(&format!("x = {markup};"))
		.unwrap();
	assert_eq!(output, format!("x = {call};"));
}

#[rstest]
fn test_multiline_fragment_keeps_following_lines(transpiler: Transpiler) {
	let source = "var a = (\n  <ul>\n    <li>one</li>\n  </ul>\n);\nvar b = 1;\n";
	assert_eq!(
		transpiler.transpile_source(source).unwrap(),
		"var a = (\n  React.createElement(\"ul\", null, \"\\n    \", \
		 React.createElement(\"li\", null, \"one\"), \"\\n  \")\n);\nvar b = 1;\n"
	);
}

#[rstest]
fn test_arrow_function_bodies(transpiler: Transpiler) {
	assert_eq!(
		transpiler
			.transpile_source("const rows = items.map(i => <Row key={i.id} value={i}/>);")
			.unwrap(),
		"const rows = items.map(i => React.createElement(Row, {key: i.id, value: i}));"
	);
}

#[rstest]
fn test_custom_factory() {
	let settings = TranspileSettings::new()
		.with_factory("h")
		.with_spread_helper("Object.assign");
	let transpiler = Transpiler::new(settings).unwrap();
	assert_eq!(
		transpiler.transpile_source("x = <p {...a}>{b}</p>;").unwrap(),
		r#"x = h("p", Object.assign({}, a), b);"#
	);
}

// =============================================================================
// Annotation
// =============================================================================

#[rstest]
fn test_annotation_is_idempotent(transpiler: Transpiler) {
	let source = "var A = React.createClass({render() { return <a/>; }});";
	let once = transpiler.transpile_source(source).unwrap();
	assert_eq!(once.matches("displayName").count(), 1);

	// A new fragment forces the annotator to run over annotated code
	let again = transpiler
		.transpile_source(&format!("{once}\nvar B = <b/>;"))
		.unwrap();
	assert_eq!(again.matches("displayName").count(), 1);
	assert!(again.starts_with(&once));
}

#[rstest]
fn test_clean_source_is_not_annotated(transpiler: Transpiler) {
	let source = "var A = React.createClass({});";
	assert_eq!(transpiler.transpile_source(source).unwrap(), source);
}

// =============================================================================
// Rejection
// =============================================================================

#[rstest]
#[case::unterminated_value(r#"x = <a b="c>;"#)]
#[case::unclosed_element("x = <a><b></b>;")]
#[case::empty_attribute("x = <a b={}/>;")]
fn test_malformed_markup_is_rejected(transpiler: Transpiler, #[case] source: &str) {
	let err = transpiler.transpile_source(source).unwrap_err();
	assert!(err.is_markup(), "{source}: {err}");
}

#[rstest]
fn test_unterminated_value_reports_position(transpiler: Transpiler) {
	let err = transpiler
		.transpile_source("var ok = <p/>;\nvar bad = <a b=\"c>;")
		.unwrap_err();
	assert_eq!(err.position(), Some((2, 17)));
	assert!(err.to_string().contains("unterminated attribute value"));
}

#[rstest]
fn test_nested_markup_error_reports_file_position(transpiler: Transpiler) {
	let err = transpiler
		.transpile_source("var ok = 1;\nx = <a>{<b c=d/>}</a>;")
		.unwrap_err();
	assert!(err.is_markup(), "{err}");
	assert_eq!(err.position(), Some((2, 14)));
	assert!(err.to_string().starts_with("2:14: "), "{err}");
}

#[rstest]
fn test_host_error_is_surfaced(transpiler: Transpiler) {
	let err = transpiler.transpile_source("var = 1;").unwrap_err();
	assert!(matches!(err, TranspileError::HostParse { line: 1, .. }), "{err:?}");
}

#[rstest]
fn test_host_error_inside_embedded_code(transpiler: Transpiler) {
	let err = transpiler.transpile_source("x = <a>{if}</a>;").unwrap_err();
	assert!(matches!(err, TranspileError::HostParse { .. }), "{err:?}");
}

// =============================================================================
// Files
// =============================================================================

#[rstest]
fn test_transpile_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("app.jsx");
	std::fs::write(&path, "render(<App/>, root);\n").unwrap();

	assert_eq!(
		transpile_file(&path).unwrap(),
		"render(React.createElement(App, null), root);\n"
	);
}
