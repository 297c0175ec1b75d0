//! Diagnostic sinks filled while a translation unit is being built.

use std::fmt;

use itertools::Itertools;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A 1-based position in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SrcLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SrcLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SrcLocation>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, location: Option<SrcLocation>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            location,
        }
    }

    pub fn warning(message: impl Into<String>, location: Option<SrcLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(location) = self.location {
            write!(f, " in line {}", location)?;
        }
        Ok(())
    }
}

/// Collects diagnostics without interrupting the producer.
///
/// Callers inspect [`ErrorReport::num_errors`] once parsing is done to decide
/// whether to go on.
#[derive(Clone, Debug, Default)]
pub struct ErrorReport {
    diagnostics: Vec<Diagnostic>,
    no_warn: bool,
}

impl ErrorReport {
    /// With `no_warn` set, warnings are dropped on arrival.
    pub fn new(no_warn: bool) -> Self {
        Self {
            diagnostics: Vec::new(),
            no_warn,
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        if self.no_warn && diagnostic.severity == Severity::Warning {
            return;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn add_error(&mut self, message: impl Into<String>, location: Option<SrcLocation>) {
        self.add_diagnostic(Diagnostic::error(message, location));
    }

    pub fn add_warning(&mut self, message: impl Into<String>, location: Option<SrcLocation>) {
        self.add_diagnostic(Diagnostic::warning(message, location));
    }

    pub fn num_errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn num_warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugReportSection {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// Free-form debugging output attached to a translation unit.
///
/// Disabled reports ignore new sections, so producers can add them
/// unconditionally.
#[derive(Clone, Debug, Default)]
pub struct DebugReport {
    enabled: bool,
    sections: Vec<DebugReportSection>,
}

impl DebugReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            sections: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn add_section(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) {
        if !self.enabled {
            return;
        }
        self.sections.push(DebugReportSection {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn sections(&self) -> &[DebugReportSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl fmt::Display for DebugReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .sections
            .iter()
            .map(|section| format!("== {} [{}] ==\n{}", section.title, section.id, section.body))
            .join("\n");
        write!(f, "{}", text)
    }
}
