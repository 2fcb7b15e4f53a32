use thiserror::Error;

/// Every failure the conversion pipeline can report.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not well-formed XML.
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The input bytes are not valid UTF-8, so they cannot be parsed as XML.
    #[error("invalid XML encoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// No `infNFe` element was found and the caller asked for a strict parse.
    #[error("no infNFe element found in the document")]
    MissingInvoice,

    /// The XML source could not be read.
    #[error("cannot read input: {0}")]
    Input(std::io::Error),

    /// The output sink could not be created or written.
    #[error("cannot write output: {0}")]
    Render(std::io::Error),

    /// Page geometry or typography that cannot be laid out.
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    /// `convert` was requested before both an input file and an output
    /// location were selected.
    #[error("select both an XML file and an output folder before converting")]
    NotReady,
}

pub type Result<T> = std::result::Result<T, Error>;
