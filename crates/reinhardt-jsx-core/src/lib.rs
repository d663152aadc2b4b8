//! JSX-to-JavaScript transpiler core.
//!
//! Finds markup fragments in JavaScript source, replaces each one with an
//! equivalent tree of factory calls and names `React.createClass` literals
//! after the variable they are assigned to.
//!
//! ## Modules
//!
//! - [`host`] - host parser contract and its `oxc` implementation
//! - [`boundary`] - recognizes where a fragment starts from host diagnostics
//! - [`generator`] - element to call-expression lowering
//! - [`annotator`] - `displayName` injection
//! - [`driver`] - [`Transpiler`], tying the passes together
//! - [`settings`] - callee names and annotation switches
//!
//! ## Pipeline
//!
//! ```text
//! source -> host parse -> (fragment? -> markup parse -> generate -> splice)* -> annotate -> output
//! ```
//!
//! ## Example
//!
//! ```
//! use reinhardt_jsx_core::transpile_source;
//!
//! let output = transpile_source("var List = React.createClass({render: () => <ul>{items}</ul>});").unwrap();
//! assert_eq!(
//!     output,
//!     r#"var List = React.createClass({displayName: "List", render: () => React.createElement("ul", null, items)});"#
//! );
//! ```

pub mod annotator;
pub mod boundary;
pub mod driver;
pub mod emit;
pub mod error;
pub mod generator;
pub mod host;
pub mod settings;

pub use boundary::{BoundarySpan, is_markup_start};
pub use driver::{Transpiler, transpile_file, transpile_source};
pub use emit::Emitter;
pub use error::{TranspileError, TranspileResult, line_column};
pub use generator::quote;
pub use host::{HostDiagnostic, HostParse, HostParser, HostSyntax, OxcHostParser};
pub use settings::{SettingsError, SourceKind, TranspileSettings};
