mod common;

use std::fs;

use nfe_pdf::{ConvertOptions, Error, ExtractOptions, Notifier, Outcome, Session};

#[derive(Default)]
struct RecordingNotifier {
    seen: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, outcome: &Outcome) {
        self.seen.push(match outcome {
            Outcome::Converted(path) => format!("ok {}", path.display()),
            Outcome::Failed(e) => format!("err {e}"),
        });
    }
}

fn pdf_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn convert_writes_pdf_to_requested_path() {
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("scenario.pdf");

    nfe_pdf::convert_nfe_to_pdf(&common::fixture("scenario.xml"), &output).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert_eq!(common::pdf_page_count(&bytes), 1);
    // Only the finished file remains; no temporary leftovers.
    assert_eq!(pdf_files(out.path()), ["scenario.pdf"]);
}

#[test]
fn convert_bytes_matches_convert_path() {
    let out = tempfile::tempdir().unwrap();
    let from_path = out.path().join("a.pdf");
    let from_bytes = out.path().join("b.pdf");
    let xml = common::read_fixture("full_nfe.xml");

    nfe_pdf::convert_nfe_to_pdf(&common::fixture("full_nfe.xml"), &from_path).unwrap();
    nfe_pdf::convert_nfe_bytes_to_pdf(xml.as_bytes(), &from_bytes).unwrap();

    assert_eq!(fs::read(&from_path).unwrap(), fs::read(&from_bytes).unwrap());
}

#[test]
fn malformed_input_leaves_no_output() {
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("nota_fiscal.pdf");

    let err = nfe_pdf::convert_nfe_to_pdf(&common::fixture("malformed.xml"), &output).unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
    assert!(pdf_files(out.path()).is_empty());
}

#[test]
fn unwritable_destination_is_a_render_error() {
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("missing-dir").join("nota_fiscal.pdf");

    let err = nfe_pdf::convert_nfe_to_pdf(&common::fixture("scenario.xml"), &output).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "unexpected error: {err}");
    assert!(!output.exists());
}

#[test]
fn existing_output_is_replaced_atomically() {
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("nota_fiscal.pdf");
    fs::write(&output, b"stale").unwrap();

    nfe_pdf::convert_nfe_to_pdf(&common::fixture("scenario.xml"), &output).unwrap();

    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-"));
    assert_eq!(pdf_files(out.path()), ["nota_fiscal.pdf"]);
}

#[test]
fn session_converts_into_default_file_name() {
    let out = tempfile::tempdir().unwrap();
    let session = Session::new()
        .select_input(common::fixture("scenario.xml"))
        .select_output_location(out.path());

    let written = session.convert(&ConvertOptions::default()).unwrap();

    assert_eq!(written, out.path().join(nfe_pdf::DEFAULT_OUTPUT_NAME));
    assert!(written.exists());
}

#[test]
fn session_honours_custom_file_name_and_strict_mode() {
    let out = tempfile::tempdir().unwrap();
    let opts = ConvertOptions {
        extract: ExtractOptions {
            require_invoice: true,
        },
        file_name: Some("status.pdf".into()),
        ..ConvertOptions::default()
    };

    let ok = Session::new()
        .select_input(common::fixture("duplicate_items.xml"))
        .select_output_location(out.path())
        .convert(&opts)
        .unwrap();
    assert_eq!(ok.file_name().unwrap(), "status.pdf");

    let err = Session::new()
        .select_output_location(out.path())
        .select_input(common::fixture("no_infnfe.xml"))
        .convert(&opts)
        .unwrap_err();
    assert!(matches!(err, Error::MissingInvoice));
}

#[test]
fn notifier_sees_every_outcome() {
    let out = tempfile::tempdir().unwrap();
    let opts = ConvertOptions::default();
    let mut notifier = RecordingNotifier::default();

    let not_ready = Session::new().select_input(common::fixture("scenario.xml"));
    assert!(!not_ready.convert_and_notify(&opts, &mut notifier).is_success());

    let ready = not_ready.select_output_location(out.path());
    assert!(ready.convert_and_notify(&opts, &mut notifier).is_success());

    assert_eq!(notifier.seen.len(), 2);
    assert!(notifier.seen[0].starts_with("err select both"));
    assert!(notifier.seen[1].starts_with("ok ") && notifier.seen[1].ends_with("nota_fiscal.pdf"));
}
