//! CLI entrypoint.

use std::error::Error;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::{self, Command as ProcessCommand, Stdio};

use autodoc::config::CONFIG_FILE;
use autodoc::registry::source::is_rustup_available;
use autodoc::{AutodocConfig, DocumentationGenerator, ObjectRegistry, Reference};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Args, Clone)]
struct ConfigArgs {
	/// Path to the configuration file.
	#[arg(short = 'c', long, default_value = CONFIG_FILE)]
	config: PathBuf,
}

#[derive(Args, Clone)]
struct GenerateArgs {
	#[command(flatten)]
	config: ConfigArgs,

	/// Output directory, overriding `destination` from the configuration.
	#[arg(short = 'd', long)]
	destination: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct RenderArgs {
	#[command(flatten)]
	config: ConfigArgs,

	/// Dotted references such as `mycrate.layers.Dense` or `mycrate::layers::Dense::call`.
	#[arg(value_name = "REFERENCE", required = true)]
	references: Vec<String>,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Generate every configured page into the destination directory.
	Generate(GenerateArgs),
	/// Print the rendered markdown of individual references.
	Render(RenderArgs),
	/// Resolve every configured reference and print the class alias table.
	Check(ConfigArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the autodoc CLI.
struct Cli {
	#[command(subcommand)]
	command: Command,

	/// Log debug output.
	#[arg(short = 'v', long, global = true, default_value_t = false)]
	verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	no_color: bool,
}

/// Ensure a nightly toolchain is available to produce rustdoc JSON.
fn check_nightly_toolchain() -> Result<(), String> {
	if is_rustup_available() {
		let output = ProcessCommand::new("rustup")
			.args(["run", "nightly", "rustc", "--version"])
			.stderr(Stdio::null())
			.output()
			.map_err(|e| format!("Failed to run rustup: {e}"))?;

		if !output.status.success() {
			return Err("autodoc requires the nightly toolchain to document manifests.\nRun: rustup toolchain install nightly".to_string());
		}
	} else {
		let output = ProcessCommand::new("rustc")
			.arg("--version")
			.output()
			.map_err(|e| {
				format!(
					"Failed to run rustc: {e}\nEnsure nightly Rust is installed and available in PATH."
				)
			})?;

		let version_str = String::from_utf8_lossy(&output.stdout);
		if !output.status.success() || !version_str.contains("nightly") {
			return Err(format!(
				"autodoc requires a nightly Rust toolchain to document manifests, but found: {}\nEnsure nightly Rust is installed and available in PATH.",
				version_str.trim()
			));
		}
	}

	Ok(())
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("autodoc=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autodoc=info"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn should_color_output(no_color: bool) -> bool {
	if no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stdout().is_terminal()
}

/// Load the configuration and every crate it names.
fn load(config_path: &Path) -> Result<(AutodocConfig, ObjectRegistry), Box<dyn Error>> {
	let config = AutodocConfig::load(config_path)?;
	let sources = config.crate_sources()?;
	if sources.is_empty() {
		return Err(format!("{} does not list any [[crates]]", config_path.display()).into());
	}
	if sources.iter().any(|source| source.needs_rustdoc()) {
		check_nightly_toolchain()?;
	}
	let registry = ObjectRegistry::load(&sources)?;
	Ok((config, registry))
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(e) = run(cli) {
		eprintln!("{e}");
		process::exit(1);
	}
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	match cli.command {
		Command::Generate(args) => {
			let (config, registry) = load(&args.config.config)?;
			let destination = args.destination.unwrap_or_else(|| config.destination());
			let generator = DocumentationGenerator::from_config(&config, registry)?;
			generator.generate(&destination)?;
			Ok(())
		}
		Command::Render(args) => {
			let (config, registry) = load(&args.config.config)?;
			let generator = DocumentationGenerator::from_config(&config, registry)?;
			let mut buffer = String::new();
			for reference in args.references {
				buffer.push_str(&generator.render(&Reference::from(reference))?);
			}
			print!("{buffer}");
			Ok(())
		}
		Command::Check(args) => {
			let (config, registry) = load(&args.config)?;
			let generator = DocumentationGenerator::from_config(&config, registry)?;
			let references: usize = generator.pages().values().map(Vec::len).sum();
			let mut aliases: Vec<_> = generator.class_aliases().iter().collect();
			aliases.sort();

			let color = should_color_output(cli.no_color);
			let width = aliases.iter().map(|(path, _)| path.len()).max().unwrap_or(0);
			let mut buffer = String::new();
			for (path, alias) in aliases {
				let padded = format!("{path:<width$}");
				if color {
					buffer.push_str(&format!("{}  {}\n", padded.dimmed(), alias.green()));
				} else {
					buffer.push_str(&format!("{padded}  {alias}\n"));
				}
			}
			print!("{buffer}");
			println!(
				"{} pages, {references} references resolved",
				generator.pages().len()
			);
			Ok(())
		}
	}
}
