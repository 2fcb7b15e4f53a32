use crate::model::{Fields, InvoiceDocument, Party, PartyField};

/// One rendered text line. An empty `text` is a blank separator line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub bold: bool,
}

impl Line {
    fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }

    fn blank() -> Self {
        Self::normal(String::new())
    }

    fn field(key: &str, value: &str) -> Self {
        Self::normal(format!("{key}: {value}"))
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

fn push_fields(lines: &mut Vec<Line>, fields: &Fields<String>) {
    lines.extend(fields.iter().map(|(k, v)| Line::field(k, v)));
}

fn push_party(lines: &mut Vec<Line>, name: &str, party: &Party) {
    lines.push(Line::normal(format!("{}:", name.to_uppercase())));
    for (key, value) in party.iter() {
        match value {
            // Address entries are flattened into the section without a sub-header.
            PartyField::Address(address) => push_fields(lines, address),
            PartyField::Text(text) => lines.push(Line::field(key, text)),
        }
    }
    lines.push(Line::blank());
}

/// Serialize the document into the ordered line sequence of the report.
pub fn layout_lines(doc: &InvoiceDocument) -> Vec<Line> {
    let mut lines = Vec::new();

    for (name, party) in doc.parties() {
        push_party(&mut lines, name, party);
    }

    if !doc.items.is_empty() {
        lines.push(Line::normal("PRODUTOS:"));
        for (idx, item) in doc.items.iter().enumerate() {
            lines.push(Line::bold(format!("Produto {}", idx + 1)));
            push_fields(&mut lines, &item.product);
            lines.push(Line::normal("Imposto:"));
            push_fields(&mut lines, &item.taxes);
            lines.push(Line::blank());
        }
    }

    lines
}

/// Number of fixed-height lines that fit between the top margin and the
/// page-break trigger. Always at least one, so oversized lines still progress.
pub(super) fn lines_per_page(
    page_height: f32,
    margin_top: f32,
    break_margin: f32,
    line_height: f32,
) -> usize {
    if !(line_height.is_finite() && line_height > 0.0) {
        return 1;
    }
    let available = page_height - break_margin - margin_top;
    // `as` saturates: negative and NaN become 0.
    ((available / line_height).floor() as usize).max(1)
}

/// Split lines into pages. An empty report still yields one empty page.
pub(super) fn paginate(lines: &[Line], per_page: usize) -> Vec<&[Line]> {
    if lines.is_empty() {
        return vec![lines];
    }
    lines.chunks(per_page.max(1)).collect()
}
