use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nfe_pdf::{ConvertOptions, ExtractOptions, LogNotifier, Outcome, RenderOptions, Session};

/// Convert a Brazilian NFe invoice XML file to PDF
#[derive(Parser)]
#[command(name = "nfe-pdf", version, about)]
struct Cli {
    /// NFe XML file to convert
    input: PathBuf,

    /// Folder the PDF is written into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Name of the generated file inside the output folder
    #[arg(long, default_value = nfe_pdf::DEFAULT_OUTPUT_NAME)]
    file_name: String,

    /// Fail when the document has no infNFe element
    #[arg(long)]
    strict: bool,

    /// Document title stored in the PDF metadata
    #[arg(long)]
    title: Option<String>,

    /// Print the report lines to stdout instead of writing a PDF
    #[arg(long)]
    lines: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn print_lines(cli: &Cli, extract: &ExtractOptions) -> nfe_pdf::Result<()> {
    let doc = nfe_pdf::parse_with(&cli.input, extract)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in nfe_pdf::layout_lines(&doc) {
        let marker = if line.bold { "**" } else { "" };
        writeln!(out, "{marker}{}{marker}", line.text).map_err(nfe_pdf::Error::Render)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "nfe_pdf=info",
        1 => "nfe_pdf=debug",
        _ => "nfe_pdf=trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let extract = ExtractOptions {
        require_invoice: cli.strict,
    };

    if cli.lines {
        return match print_lines(&cli, &extract) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut render = RenderOptions::default();
    if cli.title.is_some() {
        render.title = cli.title.clone();
    }
    let opts = ConvertOptions {
        extract,
        render,
        file_name: Some(cli.file_name.clone()),
    };

    let session = Session::new()
        .select_input(&cli.input)
        .select_output_location(&cli.output_dir);

    // The notifier is the only place the outcome is reported.
    match session.convert_and_notify(&opts, &mut LogNotifier) {
        Outcome::Converted(_) => ExitCode::SUCCESS,
        Outcome::Failed(_) => ExitCode::FAILURE,
    }
}
