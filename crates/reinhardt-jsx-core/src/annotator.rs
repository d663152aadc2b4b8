//! `displayName` annotation for class factory literals.
//!
//! `var Hello = React.createClass({render: ...})` becomes
//! `var Hello = React.createClass({displayName: "Hello", render: ...})`.
//! Literals that already carry the key are left alone, so running the
//! annotator twice changes nothing.

use crate::emit::Emitter;
use crate::error::TranspileResult;
use crate::generator::quote;
use crate::host::{CallSite, HostSyntax};
use crate::settings::TranspileSettings;

/// Offsets right after each `{` that needs the key, with the text to insert.
pub fn plan(syntax: &HostSyntax, settings: &TranspileSettings) -> Vec<(usize, String)> {
	let mut inserts: Vec<(usize, String)> = syntax
		.call_sites
		.iter()
		.filter(|site| is_class_factory(site, settings))
		.filter_map(|site| {
			let literal = site.literal.as_ref()?;
			if literal.keys.iter().any(|key| *key == settings.display_name_key) {
				return None;
			}
			Some((
				literal.left_brace + 1,
				format!("{}: {}, ", settings.display_name_key, quote(&site.binding)),
			))
		})
		.collect();
	inserts.sort_by_key(|(offset, _)| *offset);
	inserts.dedup_by_key(|(offset, _)| *offset);
	inserts
}

/// Applies [`plan`] to `source`, which must be the text `syntax` was parsed from.
pub fn annotate(
	source: &str,
	syntax: &HostSyntax,
	settings: &TranspileSettings,
) -> TranspileResult<String> {
	let inserts = plan(syntax, settings);
	if inserts.is_empty() {
		return Ok(source.to_string());
	}
	let mut emitter = Emitter::new(source);
	for (offset, text) in &inserts {
		tracing::debug!(offset, "annotating class factory literal");
		emitter.insert(*offset, text)?;
	}
	Ok(emitter.finish())
}

fn is_class_factory(site: &CallSite, settings: &TranspileSettings) -> bool {
	site.callee_object == settings.class_factory_object
		&& site.callee_method == settings.class_factory_method
}
