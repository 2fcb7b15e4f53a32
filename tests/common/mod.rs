#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).expect("read fixture")
}

/// Build a single-invoice NFe document from pre-rendered `det` elements.
pub fn invoice_with_dets(dets: &[String]) -> String {
    format!(
        r#"<NFe xmlns="http://www.portalfiscal.inf.br/nfe"><infNFe Id="NFe0">{}</infNFe></NFe>"#,
        dets.concat()
    )
}

pub fn det(product_name: &str) -> String {
    format!("<det><prod><xProd>{product_name}</xProd></prod><imposto><ICMS/></imposto></det>")
}

pub fn pdf_page_count(bytes: &[u8]) -> usize {
    let doc = lopdf::Document::load_mem(bytes).expect("generated PDF should load");
    doc.get_pages().len()
}

/// Decoded content stream of a 1-based page.
pub fn pdf_page_text(bytes: &[u8], page: u32) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("generated PDF should load");
    let page_id = doc.get_pages()[&page];
    let content = doc.get_page_content(page_id).expect("page content");
    String::from_utf8_lossy(&content).into_owned()
}

pub fn texts(lines: &[nfe_pdf::Line]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}
