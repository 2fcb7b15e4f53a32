mod error;
mod fonts;
mod model;
mod nfe;
mod pdf;
mod session;

pub use error::{Error, Result};
pub use model::{Address, Fields, InvoiceDocument, LineItem, Party, PartyField, TAX_PLACEHOLDER};
pub use nfe::{ExtractOptions, parse, parse_bytes, parse_bytes_with, parse_str, parse_str_with, parse_with};
pub use pdf::{Line, RenderOptions, layout_lines, render, render_lines, render_to_path, render_to_writer};
pub use session::{LogNotifier, Notifier, Outcome, Session};

use std::path::Path;
use std::time::Instant;

/// File name the converter writes inside a chosen output folder.
pub const DEFAULT_OUTPUT_NAME: &str = "nota_fiscal.pdf";

#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    pub extract: ExtractOptions,
    pub render: RenderOptions,
    /// Overrides [`DEFAULT_OUTPUT_NAME`] when converting into a folder.
    pub file_name: Option<String>,
}

impl ConvertOptions {
    pub fn output_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME)
    }
}

fn convert_document(
    doc: &InvoiceDocument,
    output: &Path,
    opts: &ConvertOptions,
    t0: Instant,
) -> Result<()> {
    let t_parse = t0.elapsed();

    let bytes = pdf::render(doc, &opts.render)?;
    let t_render = t0.elapsed();

    pdf::write_atomically(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

pub fn convert_with(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<()> {
    let t0 = Instant::now();
    let doc = nfe::parse_with(input, &opts.extract)?;
    convert_document(&doc, output, opts, t0)
}

pub fn convert_nfe_to_pdf(input: &Path, output: &Path) -> Result<()> {
    convert_with(input, output, &ConvertOptions::default())
}

pub fn convert_nfe_bytes_to_pdf(input: &[u8], output: &Path) -> Result<()> {
    let t0 = Instant::now();
    let opts = ConvertOptions::default();
    let doc = nfe::parse_bytes_with(input, &opts.extract)?;
    convert_document(&doc, output, &opts, t0)
}
