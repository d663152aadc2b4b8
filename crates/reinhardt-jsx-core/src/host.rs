//! Host parser adapter.
//!
//! The transpiler only needs two things from a JavaScript parser: the
//! diagnostics of a failed parse, and, for a clean parse, the class factory
//! call sites the annotator may rewrite. [`HostParser`] is that contract;
//! [`OxcHostParser`] implements it with `oxc`.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
	Argument, AssignmentExpression, AssignmentTarget, BindingPatternKind, Expression,
	ObjectExpression, ObjectPropertyKind, PropertyKey, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::settings::SourceKind;

/// One error reported by the host parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDiagnostic {
	/// Diagnostic text, verbatim
	pub message: String,
	/// Byte offset the diagnostic points at, if any
	pub offset: Option<usize>,
}

/// An object literal passed as the first argument of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLiteral {
	/// Offset of the opening `{`
	pub left_brace: usize,
	/// Static keys, in source order
	pub keys: Vec<String>,
}

/// `binding = object.method(...)` found by the host parser.
///
/// Covers both assignments to a plain identifier and variable declarators
/// with an initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
	/// Name being assigned or declared
	pub binding: String,
	/// Identifier before the dot
	pub callee_object: String,
	/// Property name after the dot
	pub callee_method: String,
	/// First argument, when it is an object literal
	pub literal: Option<ObjectLiteral>,
}

/// Facts gathered from a clean host parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSyntax {
	/// Member call sites, in source order
	pub call_sites: Vec<CallSite>,
}

/// Outcome of a host parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostParse {
	Clean(HostSyntax),
	Failed(Vec<HostDiagnostic>),
}

/// A JavaScript parser the transpiler can drive.
pub trait HostParser {
	/// Parses `source` as a whole program.
	fn parse(&self, source: &str) -> HostParse;
}

/// [`HostParser`] backed by `oxc_parser`.
///
/// JSX support is left off so that markup surfaces as a parse error.
#[derive(Debug, Clone, Copy)]
pub struct OxcHostParser {
	source_type: SourceType,
}

impl OxcHostParser {
	/// Create a parser for the given source kind
	pub fn new(kind: SourceKind) -> Self {
		let source_type = match kind {
			SourceKind::Module => SourceType::mjs(),
			SourceKind::Script => SourceType::cjs(),
		};
		Self { source_type }
	}
}

impl Default for OxcHostParser {
	fn default() -> Self {
		Self::new(SourceKind::default())
	}
}

impl HostParser for OxcHostParser {
	fn parse(&self, source: &str) -> HostParse {
		let allocator = Allocator::default();
		let ret = Parser::new(&allocator, source, self.source_type).parse();

		if ret.panicked || !ret.errors.is_empty() {
			let diagnostics = ret
				.errors
				.iter()
				.map(|error| HostDiagnostic {
					message: error.message.to_string(),
					offset: error
						.labels
						.as_ref()
						.and_then(|labels| labels.iter().map(|label| label.offset()).min()),
				})
				.collect();
			return HostParse::Failed(diagnostics);
		}

		let mut collector = CallSiteCollector::default();
		collector.visit_program(&ret.program);
		HostParse::Clean(HostSyntax {
			call_sites: collector.call_sites,
		})
	}
}

/// Visitor that records `name = a.b(...)` call sites.
#[derive(Default)]
struct CallSiteCollector {
	call_sites: Vec<CallSite>,
}

impl CallSiteCollector {
	fn record(&mut self, binding: &str, init: &Expression<'_>) {
		let Expression::CallExpression(call) = init else {
			return;
		};
		let Expression::StaticMemberExpression(member) = &call.callee else {
			return;
		};
		let Expression::Identifier(object) = &member.object else {
			return;
		};
		let literal = match call.arguments.first() {
			Some(Argument::ObjectExpression(object)) => Some(object_literal(object)),
			_ => None,
		};
		self.call_sites.push(CallSite {
			binding: binding.to_string(),
			callee_object: object.name.to_string(),
			callee_method: member.property.name.to_string(),
			literal,
		});
	}
}

fn object_literal(object: &ObjectExpression<'_>) -> ObjectLiteral {
	let keys = object
		.properties
		.iter()
		.filter_map(|property| match property {
			ObjectPropertyKind::ObjectProperty(p) if !p.computed => match &p.key {
				PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
				PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
				_ => None,
			},
			_ => None,
		})
		.collect();
	ObjectLiteral {
		left_brace: object.span.start as usize,
		keys,
	}
}

impl<'a> Visit<'a> for CallSiteCollector {
	fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
		if let AssignmentTarget::AssignmentTargetIdentifier(ident) = &it.left {
			self.record(ident.name.as_str(), &it.right);
		}
		walk::walk_assignment_expression(self, it);
	}

	fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
		if let BindingPatternKind::BindingIdentifier(ident) = &it.id.kind
			&& let Some(init) = &it.init
		{
			self.record(ident.name.as_str(), init);
		}
		walk::walk_variable_declarator(self, it);
	}
}
