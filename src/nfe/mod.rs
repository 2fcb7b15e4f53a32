use std::path::Path;

use crate::error::Error;
use crate::model::{Fields, InvoiceDocument, LineItem, Party, PartyField, TAX_PLACEHOLDER};

pub(crate) const NFE_NS: &str = "http://www.portalfiscal.inf.br/nfe";

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Fail with [`Error::MissingInvoice`] instead of returning an empty
    /// document when no `infNFe` element is present.
    pub require_invoice: bool,
}

fn element_children<'a>(
    node: roxmltree::Node<'a, 'a>,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> {
    node.children().filter(|n| n.is_element())
}

fn local_name<'a>(node: roxmltree::Node<'a, 'a>) -> &'a str {
    node.tag_name().name()
}

/// Character data of `node` up to its first child element. Text split by
/// comments or processing instructions is joined back together.
fn text_of(node: roxmltree::Node) -> String {
    node.children()
        .take_while(|n| !n.is_element())
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Local name → text for every element child of `node`.
fn text_fields(node: roxmltree::Node) -> Fields<String> {
    element_children(node)
        .map(|child| (local_name(child), text_of(child)))
        .collect()
}

fn is_address(name: &str) -> bool {
    matches!(name, "enderEmit" | "enderDest")
}

fn parse_party(section: roxmltree::Node) -> Party {
    let mut party = Party::new();
    for child in element_children(section) {
        let name = local_name(child);
        let value = if is_address(name) {
            PartyField::Address(text_fields(child))
        } else {
            PartyField::Text(text_of(child))
        };
        party.insert(name, value);
    }
    party
}

fn parse_line_item(det: roxmltree::Node) -> LineItem {
    let mut item = LineItem::default();
    for group in element_children(det) {
        match local_name(group) {
            "prod" => {
                for field in element_children(group) {
                    item.product.insert(local_name(field), text_of(field));
                }
            }
            "imposto" => {
                for tax in element_children(group) {
                    item.taxes.insert(local_name(tax), TAX_PLACEHOLDER.to_string());
                }
            }
            _ => {}
        }
    }
    item
}

fn is_invoice_info(node: &roxmltree::Node) -> bool {
    node.is_element()
        && node.tag_name().name() == "infNFe"
        && node.tag_name().namespace() == Some(NFE_NS)
}

fn extract(xml: &roxmltree::Document, opts: &ExtractOptions) -> Result<InvoiceDocument, Error> {
    let root = xml.root_element();
    let mut doc = InvoiceDocument::default();
    let mut found = 0usize;

    for inf in root.descendants().skip(1).filter(is_invoice_info) {
        found += 1;
        if let Some(id) = inf.attribute("Id") {
            log::debug!("Extracting infNFe {id}");
        }
        for section in element_children(inf) {
            match local_name(section) {
                "emit" => {
                    if doc.issuer.is_some() {
                        log::warn!("Repeated emit section replaces the previous one");
                    }
                    doc.issuer = Some(parse_party(section));
                }
                "dest" => {
                    if doc.recipient.is_some() {
                        log::warn!("Repeated dest section replaces the previous one");
                    }
                    doc.recipient = Some(parse_party(section));
                }
                "det" => doc.items.push(parse_line_item(section)),
                other => log::trace!("Ignoring infNFe child {other}"),
            }
        }
    }

    if found == 0 {
        if opts.require_invoice {
            return Err(Error::MissingInvoice);
        }
        log::warn!("No infNFe element found; producing an empty document");
    }

    log::debug!(
        "Extracted {found} infNFe element(s): emit={}, dest={}, items={}",
        doc.issuer.is_some(),
        doc.recipient.is_some(),
        doc.items.len(),
    );

    Ok(doc)
}

pub fn parse_str_with(xml_content: &str, opts: &ExtractOptions) -> Result<InvoiceDocument, Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    extract(&xml, opts)
}

pub fn parse_str(xml_content: &str) -> Result<InvoiceDocument, Error> {
    parse_str_with(xml_content, &ExtractOptions::default())
}

pub fn parse_bytes_with(input: &[u8], opts: &ExtractOptions) -> Result<InvoiceDocument, Error> {
    let xml_content = std::str::from_utf8(input)?;
    // A UTF-8 byte order mark is legal before the XML declaration.
    parse_str_with(xml_content.trim_start_matches('\u{feff}'), opts)
}

pub fn parse_bytes(input: &[u8]) -> Result<InvoiceDocument, Error> {
    parse_bytes_with(input, &ExtractOptions::default())
}

pub fn parse_with(path: &Path, opts: &ExtractOptions) -> Result<InvoiceDocument, Error> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::Input(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
    })?;
    parse_bytes_with(&bytes, opts)
}

pub fn parse(path: &Path) -> Result<InvoiceDocument, Error> {
    parse_with(path, &ExtractOptions::default())
}
