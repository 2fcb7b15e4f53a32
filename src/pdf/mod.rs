mod layout;

use std::io::Write;
use std::path::Path;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{FontEntry, StandardFont, register_font, to_winansi_bytes};
use crate::model::InvoiceDocument;

pub use layout::{Line, layout_lines};
use layout::{lines_per_page, paginate};

const MM: f32 = 72.0 / 25.4;

/// Page geometry and typography of the report. All lengths are in points.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    /// Distance from the bottom edge at which a new page is started.
    pub break_margin: f32,
    /// Inner padding between the left margin and the text.
    pub cell_padding: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub title: Option<String>,
}

impl Default for RenderOptions {
    /// A4 portrait, 12pt Helvetica in 10 mm rows.
    fn default() -> Self {
        Self {
            page_width: 210.0 * MM,
            page_height: 297.0 * MM,
            margin_left: 10.0 * MM,
            margin_top: 10.0 * MM,
            break_margin: 20.0 * MM,
            cell_padding: 1.0 * MM,
            font_size: 12.0,
            line_height: 10.0 * MM,
            title: Some("Nota Fiscal".to_string()),
        }
    }
}

impl RenderOptions {
    /// Reject geometry that cannot produce a readable page.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidOptions(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("margin_left", self.margin_left),
            ("margin_top", self.margin_top),
            ("break_margin", self.break_margin),
            ("cell_padding", self.cell_padding),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidOptions(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.margin_top + self.break_margin >= self.page_height {
            return Err(Error::InvalidOptions(format!(
                "margins ({} + {}) leave no room on a {}pt page",
                self.margin_top, self.break_margin, self.page_height
            )));
        }
        Ok(())
    }
}

fn page_content(lines: &[Line], opts: &RenderOptions) -> Content {
    let mut content = Content::new();
    let x = opts.margin_left + opts.cell_padding;
    for (row, line) in lines.iter().enumerate() {
        if line.is_blank() {
            continue;
        }
        let font = if line.bold {
            StandardFont::Bold
        } else {
            StandardFont::Regular
        };
        // Text sits vertically centred in its row.
        let row_top = opts.margin_top + row as f32 * opts.line_height;
        let baseline_y =
            opts.page_height - (row_top + opts.line_height / 2.0 + 0.3 * opts.font_size);
        content
            .begin_text()
            .set_font(Name(font.pdf_name().as_bytes()), opts.font_size)
            .next_line(x, baseline_y)
            .show(Str(&to_winansi_bytes(&line.text)))
            .end_text();
    }
    content
}

/// Lay out lines onto pages and assemble the PDF bytes.
pub fn render_lines(lines: &[Line], opts: &RenderOptions) -> Result<Vec<u8>, Error> {
    opts.validate()?;
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let fonts: Vec<FontEntry> = StandardFont::ALL
        .into_iter()
        .map(|font| register_font(&mut pdf, font, &mut alloc))
        .collect();

    let per_page = lines_per_page(
        opts.page_height,
        opts.margin_top,
        opts.break_margin,
        opts.line_height,
    );
    let pages = paginate(lines, per_page);
    log::debug!(
        "Paginated {} lines into {} page(s), {per_page} lines per page",
        lines.len(),
        pages.len(),
    );

    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page_lines) in pages.iter().enumerate() {
        let raw = page_content(page_lines, opts).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, opts.page_width, opts.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for entry in &fonts {
            font_dict.pair(Name(entry.font.pdf_name().as_bytes()), entry.font_ref);
        }
    }

    if let Some(title) = &opts.title {
        let info_id = alloc();
        pdf.document_info(info_id)
            .title(TextStr(title.as_str()))
            .producer(TextStr(concat!("nfe-pdf ", env!("CARGO_PKG_VERSION"))));
    }

    let bytes = pdf.finish();
    log::debug!(
        "render_lines: {n} page(s), {} bytes in {:.1}ms",
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(bytes)
}

/// Render the invoice report to PDF bytes.
pub fn render(doc: &InvoiceDocument, opts: &RenderOptions) -> Result<Vec<u8>, Error> {
    render_lines(&layout_lines(doc), opts)
}

pub fn render_to_writer(
    doc: &InvoiceDocument,
    opts: &RenderOptions,
    mut sink: impl Write,
) -> Result<(), Error> {
    let bytes = render(doc, opts)?;
    sink.write_all(&bytes).map_err(Error::Render)?;
    sink.flush().map_err(Error::Render)
}

/// Render straight to `output`. The file only appears once it is complete:
/// bytes go to a temporary file beside the target, which is then renamed
/// over it. Nothing is left behind on failure.
pub fn render_to_path(
    doc: &InvoiceDocument,
    opts: &RenderOptions,
    output: &Path,
) -> Result<(), Error> {
    let bytes = render(doc, opts)?;
    write_atomically(output, &bytes)
}

pub(crate) fn write_atomically(output: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".nfe-pdf-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            Error::Render(std::io::Error::new(e.kind(), format!("{}: {}", e, dir.display())))
        })?;
    tmp.write_all(bytes).map_err(Error::Render)?;
    tmp.as_file().sync_all().map_err(Error::Render)?;
    tmp.persist(output).map_err(|e| Error::Render(e.error))?;
    Ok(())
}
