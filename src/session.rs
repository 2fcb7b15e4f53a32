//! Selection state behind the "convert" command.
//!
//! A front end (CLI, test harness, GUI) feeds the user's picks into a
//! [`Session`] and asks it to convert once it is [`Session::Ready`]. The
//! outcome is handed to a [`Notifier`] for presentation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::{ConvertOptions, convert_with};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unselected,
    SourceChosen {
        input: PathBuf,
    },
    /// The output folder was picked before the XML file.
    OutputChosen {
        output_dir: PathBuf,
    },
    Ready {
        input: PathBuf,
        output_dir: PathBuf,
    },
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose (or replace) the XML file to convert.
    pub fn select_input(self, input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        match self {
            Session::Unselected | Session::SourceChosen { .. } => Session::SourceChosen { input },
            Session::OutputChosen { output_dir } | Session::Ready { output_dir, .. } => {
                Session::Ready { input, output_dir }
            }
        }
    }

    /// Choose (or replace) the folder the PDF is written into.
    pub fn select_output_location(self, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        match self {
            Session::Unselected | Session::OutputChosen { .. } => {
                Session::OutputChosen { output_dir }
            }
            Session::SourceChosen { input } | Session::Ready { input, .. } => {
                Session::Ready { input, output_dir }
            }
        }
    }

    pub fn input(&self) -> Option<&Path> {
        match self {
            Session::SourceChosen { input } | Session::Ready { input, .. } => Some(input.as_path()),
            _ => None,
        }
    }

    pub fn output_dir(&self) -> Option<&Path> {
        match self {
            Session::OutputChosen { output_dir } | Session::Ready { output_dir, .. } => {
                Some(output_dir.as_path())
            }
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Session::Ready { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Unselected => "unselected",
            Session::SourceChosen { .. } => "source chosen",
            Session::OutputChosen { .. } => "output chosen",
            Session::Ready { .. } => "ready",
        }
    }

    /// Convert the selected XML into `<output_dir>/<output name>`.
    /// Returns the path of the written PDF.
    pub fn convert(&self, opts: &ConvertOptions) -> Result<PathBuf> {
        let Session::Ready { input, output_dir } = self else {
            log::debug!("convert requested while {}", self.as_str());
            return Err(Error::NotReady);
        };
        let output = output_dir.join(opts.output_name());
        convert_with(input, &output, opts)?;
        Ok(output)
    }

    /// Run [`Session::convert`] and report the outcome through `notifier`.
    pub fn convert_and_notify(&self, opts: &ConvertOptions, notifier: &mut impl Notifier) -> Outcome {
        let outcome = match self.convert(opts) {
            Ok(path) => Outcome::Converted(path),
            Err(e) => Outcome::Failed(e),
        };
        notifier.notify(&outcome);
        outcome
    }
}

#[derive(Debug)]
pub enum Outcome {
    Converted(PathBuf),
    Failed(Error),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Converted(_))
    }
}

/// Presents a conversion outcome to the user.
pub trait Notifier {
    fn notify(&mut self, outcome: &Outcome);
}

/// Reports outcomes through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Converted(path) => {
                log::info!("Invoice converted to PDF: {}", path.display())
            }
            Outcome::Failed(e) => log::error!("Conversion failed: {e}"),
        }
    }
}
