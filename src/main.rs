use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mailproof-pdf", version, about = "Render an approval email thread profile as a paginated, webmail-styled PDF capture")]
struct Args {
    /// Thread profile (JSON)
    input: PathBuf,

    /// Output PDF path (defaults to the input path with a .pdf extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the continuous on-screen view instead of the paged export
    #[arg(long)]
    preview: bool,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    let result = if args.preview {
        mailproof_pdf::preview_profile_to_pdf(&args.input, &output)
    } else {
        mailproof_pdf::export_profile_to_pdf(&args.input, &output)
    };

    match result {
        Ok(()) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
