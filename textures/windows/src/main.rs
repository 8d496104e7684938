use clap::Parser;

use std::{
	io,
	path::PathBuf,
	process::ExitCode
};

use tracing::{
	error,
	info
};

use tracing_subscriber::EnvFilter;

use icohdr_textures_windows::{
	convert_ico,
	header::HeaderFlags
};

/// Convert a 16-color ICO file into C headers
#[derive(Debug, Parser)]
#[command(name = "icohdr", version)]
struct Args {
	/// ICO file to convert
	input: PathBuf,

	/// Directory the headers are written to
	#[arg(short, long, default_value = ".")]
	out_dir: PathBuf,

	/// Declare the palette array const
	#[arg(long)]
	const_palette: bool,

	/// Wrap each header in an include guard
	#[arg(long)]
	include_guard: bool,

	/// Enable debug logging, honoring RUST_LOG
	#[arg(short, long)]
	verbose: bool,
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
	} else {
		EnvFilter::new("info")
	};

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.try_init();
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_logging(args.verbose);

	let mut flags = HeaderFlags::empty();
	flags.set(HeaderFlags::CONST_PALETTE, args.const_palette);
	flags.set(HeaderFlags::INCLUDE_GUARD, args.include_guard);

	match convert_ico(&args.input, &args.out_dir, flags) {
		Ok(paths) => {
			for path in paths.iter() {
				info!("Wrote {}", path.display());
			}
			ExitCode::SUCCESS
		},
		Err(e) => {
			error!("{}: {}", args.input.display(), e);
			ExitCode::FAILURE
		},
	}
}
