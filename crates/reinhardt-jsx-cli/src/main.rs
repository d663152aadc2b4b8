//! Reinhardt JSX CLI
//!
//! Transpiles JavaScript sources containing JSX markup into plain JavaScript.
//!
//! ## Installation
//!
//! ```bash
//! cargo install reinhardt-jsx-cli
//! ```
//!
//! ## Usage
//!
//! ```bash
//! reinhardt-jsx app.jsx > app.js
//! reinhardt-jsx app.jsx -o app.js
//! cat app.jsx | reinhardt-jsx
//! reinhardt-jsx src/ --out-dir build/ --config jsx.toml
//! ```

mod files;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use colored::Colorize;
use reinhardt_jsx_core::{SettingsError, TranspileError, TranspileSettings, Transpiler};
use tracing_subscriber::EnvFilter;

use crate::files::{JSX_EXTENSION, collect_jsx_files, output_path};

#[derive(Parser)]
#[command(name = "reinhardt-jsx")]
#[command(about = "Transpile JSX markup in JavaScript sources into plain JavaScript", long_about = None)]
#[command(version)]
struct Cli {
	/// Input file or directory (reads stdin when omitted or `-`)
	#[arg(value_name = "PATH")]
	path: Option<PathBuf>,

	/// Write the output to FILE instead of stdout
	#[arg(short, long, value_name = "FILE", conflicts_with = "out_dir")]
	output: Option<PathBuf>,

	/// Write outputs for a directory input under DIR, mirroring its layout
	#[arg(long, value_name = "DIR")]
	out_dir: Option<PathBuf>,

	/// Settings file (TOML)
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Extension of the files written for a directory input
	#[arg(long, default_value = "js")]
	ext: String,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

/// Error type for CLI runs
#[derive(Debug, thiserror::Error)]
enum CliError {
	#[error(transparent)]
	Transpile(#[from] TranspileError),

	#[error(transparent)]
	Settings(#[from] SettingsError),

	#[error("{action} {}: {source}", path.display())]
	Io {
		action: &'static str,
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Path does not exist: {}", .0.display())]
	NotFound(PathBuf),

	#[error("{0}")]
	Usage(String),

	#[error("{0} file(s) failed to transpile")]
	Failed(usize),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	if let Err(e) = run(&cli) {
		eprintln!("Error: {}", e);
		process::exit(1);
	}
}

/// Logs go to stderr so that stdout carries only generated code.
fn init_tracing(verbosity: u8) {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
	let settings = match &cli.config {
		Some(path) => TranspileSettings::from_file(path)?,
		None => TranspileSettings::default(),
	};
	let transpiler = Transpiler::new(settings)?;

	match cli.path.as_deref() {
		Some(path) if path != Path::new("-") && !path.exists() => {
			Err(CliError::NotFound(path.to_path_buf()))
		}
		Some(path) if path.is_dir() => {
			if cli.output.is_some() {
				return Err(CliError::Usage(
					"--output cannot be used with a directory input; use --out-dir".to_string(),
				));
			}
			run_dir(&transpiler, path, cli.out_dir.as_deref(), &cli.ext)
		}
		_ if cli.out_dir.is_some() => Err(CliError::Usage(
			"--out-dir requires a directory input".to_string(),
		)),
		None => run_stdin(&transpiler, cli.output.as_deref()),
		Some(path) if path == Path::new("-") => run_stdin(&transpiler, cli.output.as_deref()),
		Some(path) => {
			let output = transpiler.transpile_file(path)?;
			write_output(cli.output.as_deref(), &output)
		}
	}
}

fn run_stdin(transpiler: &Transpiler, output: Option<&Path>) -> Result<(), CliError> {
	let mut source = String::new();
	io::stdin()
		.read_to_string(&mut source)
		.map_err(|source| CliError::Io {
			action: "Failed to read",
			path: PathBuf::from("<stdin>"),
			source,
		})?;
	let generated = transpiler.transpile_source(&source)?;
	write_output(output, &generated)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
	match output {
		Some(path) => std::fs::write(path, text).map_err(|source| CliError::Io {
			action: "Failed to write",
			path: path.to_path_buf(),
			source,
		}),
		None => io::stdout()
			.write_all(text.as_bytes())
			.map_err(|source| CliError::Io {
				action: "Failed to write",
				path: PathBuf::from("<stdout>"),
				source,
			}),
	}
}

fn run_dir(
	transpiler: &Transpiler,
	root: &Path,
	out_dir: Option<&Path>,
	ext: &str,
) -> Result<(), CliError> {
	if out_dir.is_none() && ext == JSX_EXTENSION {
		return Err(CliError::Usage(format!(
			"--ext {ext} would overwrite the inputs; pick another extension or use --out-dir"
		)));
	}
	let files = collect_jsx_files(root).map_err(|source| match source.kind() {
		io::ErrorKind::NotFound => CliError::NotFound(root.to_path_buf()),
		_ => CliError::Io {
			action: "Failed to read",
			path: root.to_path_buf(),
			source,
		},
	})?;
	tracing::info!(count = files.len(), root = %root.display(), "collected JSX files");
	if files.is_empty() {
		tracing::warn!(root = %root.display(), "no .jsx files found");
	}

	let total_files = files.len();
	let mut transpiled_count = 0;
	let mut error_count = 0;

	for (index, file_path) in files.iter().enumerate() {
		let progress = format!("[{}/{}]", index + 1, total_files);
		let target = output_path(root, file_path, out_dir, ext);

		match transpile_to(transpiler, file_path, &target) {
			Ok(()) => {
				println!(
					"{} {} {} -> {}",
					progress.bright_blue(),
					"Transpiled:".green(),
					file_path.display(),
					target.display()
				);
				transpiled_count += 1;
			}
			Err(e) => {
				// Color output: errors in red
				eprintln!(
					"{} {} {}: {}",
					progress.bright_blue(),
					"Error".red(),
					file_path.display(),
					e
				);
				error_count += 1;
			}
		}
	}

	println!();
	println!(
		"{}: {} transpiled, {} errors",
		"Summary".bright_cyan(),
		if transpiled_count > 0 {
			transpiled_count.to_string().green()
		} else {
			transpiled_count.to_string().dimmed()
		},
		if error_count > 0 {
			error_count.to_string().red()
		} else {
			error_count.to_string().dimmed()
		}
	);

	if error_count > 0 {
		return Err(CliError::Failed(error_count));
	}
	Ok(())
}

fn transpile_to(transpiler: &Transpiler, file: &Path, target: &Path) -> Result<(), CliError> {
	let output = transpiler.transpile_file(file)?;
	if let Some(parent) = target.parent() {
		std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
			action: "Failed to create",
			path: parent.to_path_buf(),
			source,
		})?;
	}
	std::fs::write(target, output).map_err(|source| CliError::Io {
		action: "Failed to write",
		path: target.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::fs;
	use tempfile::TempDir;

	#[rstest]
	fn test_cli_definition_is_valid() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}

	#[rstest]
	fn test_parse_args() {
		let cli = Cli::try_parse_from(["reinhardt-jsx", "src", "--out-dir", "build", "-vv"]).unwrap();
		assert_eq!(cli.path, Some(PathBuf::from("src")));
		assert_eq!(cli.out_dir, Some(PathBuf::from("build")));
		assert_eq!(cli.ext, "js");
		assert_eq!(cli.verbosity, 2);
	}

	#[rstest]
	fn test_output_conflicts_with_out_dir() {
		let result = Cli::try_parse_from(["reinhardt-jsx", "src", "-o", "a.js", "--out-dir", "b"]);
		assert!(result.is_err());
	}

	#[rstest]
	fn test_run_file_to_output() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("app.jsx");
		let output = dir.path().join("app.js");
		fs::write(&input, "render(<App/>);").unwrap();

		let cli = Cli::try_parse_from([
			"reinhardt-jsx",
			input.to_str().unwrap(),
			"-o",
			output.to_str().unwrap(),
		])
		.unwrap();
		run(&cli).unwrap();

		assert_eq!(
			fs::read_to_string(output).unwrap(),
			"render(React.createElement(App, null));"
		);
	}

	#[rstest]
	fn test_run_dir_mirrors_layout() {
		let src = TempDir::new().unwrap();
		let out = TempDir::new().unwrap();
		fs::create_dir_all(src.path().join("ui")).unwrap();
		fs::write(src.path().join("ui/button.jsx"), "x = <button/>;").unwrap();

		let transpiler = Transpiler::default();
		run_dir(&transpiler, src.path(), Some(out.path()), "js").unwrap();

		assert_eq!(
			fs::read_to_string(out.path().join("ui/button.js")).unwrap(),
			r#"x = React.createElement("button", null);"#
		);
	}

	#[rstest]
	fn test_run_dir_counts_failures() {
		let src = TempDir::new().unwrap();
		fs::write(src.path().join("good.jsx"), "x = <a/>;").unwrap();
		fs::write(src.path().join("bad.jsx"), "x = <a b=\"c>;").unwrap();

		let err = run_dir(&Transpiler::default(), src.path(), None, "js").unwrap_err();
		assert!(matches!(err, CliError::Failed(1)));
		assert!(src.path().join("good.js").exists());
		assert!(!src.path().join("bad.js").exists());
	}

	#[rstest]
	fn test_run_dir_refuses_to_overwrite_inputs() {
		let src = TempDir::new().unwrap();
		let err = run_dir(&Transpiler::default(), src.path(), None, "jsx").unwrap_err();
		assert!(matches!(err, CliError::Usage(_)));
	}

	#[rstest]
	#[case::file(&[][..])]
	#[case::directory(&["--out-dir", "build"][..])]
	fn test_missing_input_is_not_found(#[case] extra: &[&str]) {
		let dir = TempDir::new().unwrap();
		let missing = dir.path().join("missing");

		let mut args = vec!["reinhardt-jsx", missing.to_str().unwrap()];
		args.extend_from_slice(extra);
		let cli = Cli::try_parse_from(args).unwrap();

		let err = run(&cli).unwrap_err();
		assert!(matches!(&err, CliError::NotFound(path) if *path == missing), "{err:?}");
		assert!(err.to_string().starts_with("Path does not exist"));
	}

	#[rstest]
	fn test_run_dir_missing_root_is_not_found() {
		let dir = TempDir::new().unwrap();
		let missing = dir.path().join("gone");
		let err = run_dir(&Transpiler::default(), &missing, None, "js").unwrap_err();
		assert!(matches!(err, CliError::NotFound(_)), "{err:?}");
	}

	#[rstest]
	fn test_out_dir_requires_directory_input() {
		let dir = TempDir::new().unwrap();
		let input = dir.path().join("app.jsx");
		fs::write(&input, "1;").unwrap();

		let cli = Cli::try_parse_from([
			"reinhardt-jsx",
			input.to_str().unwrap(),
			"--out-dir",
			dir.path().to_str().unwrap(),
		])
		.unwrap();
		assert!(matches!(run(&cli), Err(CliError::Usage(_))));
	}

	#[rstest]
	fn test_bad_config_is_reported() {
		let dir = TempDir::new().unwrap();
		let config = dir.path().join("jsx.toml");
		fs::write(&config, "factory = 1").unwrap();
		let input = dir.path().join("app.jsx");
		fs::write(&input, "1;").unwrap();

		let cli = Cli::try_parse_from([
			"reinhardt-jsx",
			input.to_str().unwrap(),
			"--config",
			config.to_str().unwrap(),
		])
		.unwrap();
		assert!(matches!(run(&cli), Err(CliError::Settings(_))));
	}
}
