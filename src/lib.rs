//! # Reinhardt JSX
//!
//! Transpiles JavaScript sources that contain JSX-style markup into plain
//! JavaScript, replacing every element with nested `React.createElement`
//! calls.
//!
//! ## Crates
//!
//! - [`markup`] - lexer, parser and AST for a single markup fragment
//! - [`transpiler`] - fragment detection, code generation and the driver
//!
//! The `reinhardt-jsx` binary lives in the `reinhardt-jsx-cli` crate.
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_jsx::prelude::*;
//!
//! let js = transpile_source(r#"render(<Button kind="primary" onClick={go}>OK</Button>);"#).unwrap();
//! assert_eq!(
//!     js,
//!     r#"render(React.createElement(Button, {kind: "primary", onClick: go}, "OK"));"#
//! );
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use reinhardt_jsx::{TranspileSettings, Transpiler};
//!
//! let settings = TranspileSettings::new().with_factory("h");
//! let transpiler = Transpiler::new(settings).unwrap();
//! assert_eq!(transpiler.transpile_source("x = <p/>;").unwrap(), r#"x = h("p", null);"#);
//! ```

pub mod markup;
pub mod transpiler;

pub use reinhardt_jsx_core::{
	SettingsError, SourceKind, TranspileError, TranspileResult, TranspileSettings, Transpiler,
	transpile_file, transpile_source,
};
pub use reinhardt_jsx_markup::{MarkupError, MarkupErrorKind};

/// Commonly used types and functions.
pub mod prelude {
	pub use crate::{
		MarkupError, TranspileError, TranspileResult, TranspileSettings, Transpiler, transpile_file,
		transpile_source,
	};
}
