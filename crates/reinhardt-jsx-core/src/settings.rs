//! Transpiler settings.
//!
//! Settings name the calls the generated code makes and control the
//! `displayName` annotation. They can be built in code with the `with_*`
//! methods or loaded from a TOML file:
//!
//! ```toml
//! factory = "h"
//! spread_helper = "Object.assign"
//! annotate_display_name = false
//! source_kind = "script"
//! ```

use std::path::Path;

use serde::Deserialize;

/// Error type for settings loading and validation
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting: {0}")]
	Invalid(String),
}

/// How the host parser treats the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	/// ES module (strict mode, `import`/`export` allowed)
	#[default]
	Module,
	/// Classic script
	Script,
}

/// Transpiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranspileSettings {
	/// Callee of every element call
	pub factory: String,
	/// Callee that merges spread groups into one props object
	pub spread_helper: String,
	/// Object half of the class factory callee
	pub class_factory_object: String,
	/// Method half of the class factory callee
	pub class_factory_method: String,
	/// Key injected into class factory literals
	pub display_name_key: String,
	/// Inject the display name key into class factory literals
	pub annotate_display_name: bool,
	/// Parse mode for the host parser
	pub source_kind: SourceKind,
}

impl Default for TranspileSettings {
	fn default() -> Self {
		Self {
			factory: "React.createElement".to_string(),
			spread_helper: "React.__spread".to_string(),
			class_factory_object: "React".to_string(),
			class_factory_method: "createClass".to_string(),
			display_name_key: "displayName".to_string(),
			annotate_display_name: true,
			source_kind: SourceKind::Module,
		}
	}
}

impl TranspileSettings {
	/// Create settings with the React defaults
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_jsx_core::TranspileSettings;
	///
	/// let settings = TranspileSettings::new();
	/// assert_eq!(settings.factory, "React.createElement");
	/// assert!(settings.annotate_display_name);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the element factory callee
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_jsx_core::TranspileSettings;
	///
	/// let settings = TranspileSettings::new().with_factory("h");
	/// assert_eq!(settings.factory, "h");
	/// ```
	pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
		self.factory = factory.into();
		self
	}

	/// Set the spread merge helper callee
	pub fn with_spread_helper(mut self, helper: impl Into<String>) -> Self {
		self.spread_helper = helper.into();
		self
	}

	/// Set the class factory callee (`object.method`)
	pub fn with_class_factory(mut self, object: impl Into<String>, method: impl Into<String>) -> Self {
		self.class_factory_object = object.into();
		self.class_factory_method = method.into();
		self
	}

	/// Set the injected display name key
	pub fn with_display_name_key(mut self, key: impl Into<String>) -> Self {
		self.display_name_key = key.into();
		self
	}

	/// Enable or disable display name annotation
	pub fn with_annotate_display_name(mut self, enable: bool) -> Self {
		self.annotate_display_name = enable;
		self
	}

	/// Set the host parse mode
	pub fn with_source_kind(mut self, kind: SourceKind) -> Self {
		self.source_kind = kind;
		self
	}

	/// Parse and validate settings from TOML text.
	///
	/// Missing keys take their default value; unknown keys are rejected.
	///
	/// # Examples
	///
	/// ```rust
	/// use reinhardt_jsx_core::{SourceKind, TranspileSettings};
	///
	/// let settings = TranspileSettings::from_toml_str(r#"
	/// factory = "h"
	/// source_kind = "script"
	/// "#).unwrap();
	/// assert_eq!(settings.factory, "h");
	/// assert_eq!(settings.spread_helper, "React.__spread");
	/// assert_eq!(settings.source_kind, SourceKind::Script);
	/// ```
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(text)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Load and validate settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "loading transpile settings");
		let text = std::fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}

	/// Check that every callee is a dotted identifier path and the display
	/// name key is an identifier.
	pub fn validate(&self) -> Result<(), SettingsError> {
		for (key, value) in [("factory", &self.factory), ("spread_helper", &self.spread_helper)] {
			if !value.split('.').all(is_identifier) {
				return Err(SettingsError::Invalid(format!(
					"{key} must be a dotted identifier path, got {value:?}"
				)));
			}
		}
		for (key, value) in [
			("class_factory_object", &self.class_factory_object),
			("class_factory_method", &self.class_factory_method),
			("display_name_key", &self.display_name_key),
		] {
			if !is_identifier(value) {
				return Err(SettingsError::Invalid(format!(
					"{key} must be an identifier, got {value:?}"
				)));
			}
		}
		Ok(())
	}
}

/// Returns `true` if `name` is an ASCII JavaScript identifier.
///
/// # Examples
///
/// ```rust
/// use reinhardt_jsx_core::settings::is_identifier;
///
/// assert!(is_identifier("$scope"));
/// assert!(!is_identifier("data-id"));
/// assert!(!is_identifier(""));
/// ```
pub fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
