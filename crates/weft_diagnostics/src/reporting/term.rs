//! Plain terminal back-end for emitting diagnostics.
//!
//! Rendering source snippets needs the source text, which lives with the driver;
//! this back-end prints the header, one line per label and the notes.

use crate::diagnostic::{Diagnostic, LabelStyle, Severity};
use anstyle::{AnsiColor, Style};
use indexmap::IndexMap;
use std::io::{self, Write};

/// Maps a file id to a printable file name.
pub trait FileNames {
    fn file_name(&self, id: usize) -> Option<&str>;
}

impl FileNames for [String] {
    fn file_name(&self, id: usize) -> Option<&str> {
        self.get(id).map(String::as_str)
    }
}

impl FileNames for Vec<String> {
    fn file_name(&self, id: usize) -> Option<&str> {
        self.as_slice().file_name(id)
    }
}

impl FileNames for IndexMap<usize, String> {
    fn file_name(&self, id: usize) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
pub struct DiagConfig {
    pub styles: Styles,
    /// Diagnostics below this severity are not printed.
    pub min_severity: Severity,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            styles: Styles::default(),
            min_severity: Severity::Help,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Styles {
    pub bug: Style,
    pub error: Style,
    pub warning: Style,
    pub note: Style,
    pub help: Style,
    pub location: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            bug: AnsiColor::Red.on_default().bold().underline(),
            error: AnsiColor::Red.on_default().bold(),
            warning: AnsiColor::Yellow.on_default().bold(),
            note: AnsiColor::Green.on_default().bold(),
            help: AnsiColor::Cyan.on_default().bold(),
            location: AnsiColor::Blue.on_default(),
        }
    }
}

impl Styles {
    fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Bug => self.bug,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Note => self.note,
            Severity::Help => self.help,
        }
    }
}

pub fn emit(
    writer: &mut dyn Write,
    config: &DiagConfig,
    files: &dyn FileNames,
    diagnostic: &Diagnostic<usize>,
) -> io::Result<()> {
    if diagnostic.severity < config.min_severity {
        return Ok(());
    }

    let style = config.styles.severity(diagnostic.severity);
    let loc = config.styles.location;
    match &diagnostic.code {
        Some(code) => writeln!(
            writer,
            "{style}{}[{code}]{style:#}: {}",
            diagnostic.severity.as_str(),
            diagnostic.message
        )?,
        None => writeln!(
            writer,
            "{style}{}{style:#}: {}",
            diagnostic.severity.as_str(),
            diagnostic.message
        )?,
    }

    for label in &diagnostic.labels {
        let file = files.file_name(label.file_id).unwrap_or("<unknown>");
        let marker = match label.style {
            LabelStyle::Primary | LabelStyle::Error => "^",
            LabelStyle::Warning => "~",
            LabelStyle::Note => "-",
        };
        write!(
            writer,
            "  {loc}-->{loc:#} {file}:{}..{}",
            label.range.start, label.range.end
        )?;
        if label.message.is_empty() {
            writeln!(writer)?;
        } else {
            writeln!(writer, " {marker} {}", label.message)?;
        }
    }

    for note in &diagnostic.notes {
        writeln!(writer, "  = note: {note}")?;
    }

    Ok(())
}

/// Emits to stderr, stripping colors when stderr is not a terminal.
pub fn emit_stderr(
    config: &DiagConfig,
    files: &dyn FileNames,
    diagnostic: &Diagnostic<usize>,
) -> io::Result<()> {
    let mut stderr = anstream::stderr().lock();
    emit(&mut stderr, config, files, diagnostic)
}
