//! Diagnostics produced by the checking engine.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Numeric code identifying the kind of violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u32")]
pub enum DiagnosticCode {
    /// A file imports a file of a forbidden layer.
    ForbiddenDependency,
    /// An exported interface has no implementing class.
    MissingImplementation,
    /// A file imports a platform built-in module.
    ImpureImport,
    /// Symbols depend on each other in a cycle.
    CircularDependency,
    /// A file has no counterpart in the co-located symbol.
    MissingCounterpart,
    /// A contract is malformed and was not evaluated.
    InvalidContract,
}

impl DiagnosticCode {
    /// Numeric value of the code.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        match self {
            Self::ForbiddenDependency => 70001,
            Self::MissingImplementation => 70002,
            Self::ImpureImport => 70003,
            Self::CircularDependency => 70004,
            Self::MissingCounterpart => 70005,
            Self::InvalidContract => 70099,
        }
    }

    /// Kebab-case name for terminal output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ForbiddenDependency => "forbidden-dependency",
            Self::MissingImplementation => "missing-implementation",
            Self::ImpureImport => "impure-import",
            Self::CircularDependency => "circular-dependency",
            Self::MissingCounterpart => "missing-counterpart",
            Self::InvalidContract => "invalid-contract",
        }
    }
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        code.as_u32()
    }
}

impl TryFrom<u32> for DiagnosticCode {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            70001 => Ok(Self::ForbiddenDependency),
            70002 => Ok(Self::MissingImplementation),
            70003 => Ok(Self::ImpureImport),
            70004 => Ok(Self::CircularDependency),
            70005 => Ok(Self::MissingCounterpart),
            70099 => Ok(Self::InvalidContract),
            other => Err(other),
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KS{}", self.as_u32())
    }
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What kind of violation this is.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: String,
    /// File the violation is reported at.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Label of the contract that produced this diagnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic at an explicit position.
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            file,
            line,
            column,
            contract: None,
        }
    }

    /// Creates a diagnostic at the start of `file`.
    #[must_use]
    pub fn at_file_start(code: DiagnosticCode, message: impl Into<String>, file: PathBuf) -> Self {
        Self::new(code, message, file, 1, 1)
    }

    /// Attaches the producing contract's label.
    #[must_use]
    pub fn with_contract(mut self, label: impl Into<String>) -> Self {
        self.contract = Some(label.into());
        self
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.code.name(),
            self.file.display(),
            self.line,
            self.column,
        );
        let _ = writeln!(output, "  error: {}", self.message);
        if let Some(contract) = &self.contract {
            let _ = writeln!(output, "  = contract: {contract}");
        }
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: error [{}] {}",
            self.file.display(),
            self.line,
            self.column,
            self.code,
            self.message
        )
    }
}

/// Outcome of one checking run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// Diagnostics in contract order, then discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of diagnostics.
    pub violations_found: usize,
    /// Number of contracts evaluated.
    pub contracts_checked: usize,
}

impl CheckReport {
    /// Returns true if any violation was found.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.violations_found > 0
    }

    /// Diagnostics carrying the given code.
    #[must_use]
    pub fn by_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    /// Formats diagnostics as a multi-line report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for d in &self.diagnostics {
            let _ = writeln!(report, "{}", d.format());
        }
        let _ = writeln!(
            report,
            "Found {} violation(s) in {} contract(s)",
            self.violations_found, self.contracts_checked
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_u32() {
        for n in [70001, 70002, 70003, 70004, 70005, 70099] {
            let code = DiagnosticCode::try_from(n).unwrap();
            assert_eq!(u32::from(code), n);
        }
        assert_eq!(DiagnosticCode::try_from(70006), Err(70006));
    }

    #[test]
    fn display_line() {
        let d = Diagnostic::new(
            DiagnosticCode::ForbiddenDependency,
            "Forbidden dependency: domain -> infrastructure",
            PathBuf::from("src/domain/service.ts"),
            3,
            1,
        );
        assert_eq!(
            d.to_string(),
            "src/domain/service.ts:3:1: error [KS70001] Forbidden dependency: domain -> infrastructure"
        );
    }

    #[test]
    fn format_includes_contract() {
        let d = Diagnostic::at_file_start(
            DiagnosticCode::MissingCounterpart,
            "form.ts has no counterpart",
            PathBuf::from("ui/form.ts"),
        )
        .with_contract("colocated(ui -> tests)");
        let text = d.format();
        assert!(text.starts_with("KS70005 missing-counterpart at ui/form.ts:1:1\n"));
        assert!(text.contains("  = contract: colocated(ui -> tests)\n"));
    }

    #[test]
    fn serializes_code_as_number() {
        let d = Diagnostic::new(
            DiagnosticCode::ImpureImport,
            "x",
            PathBuf::from("a.ts"),
            1,
            1,
        );
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["code"], 70003);
        assert!(json.get("contract").is_none());
    }
}
