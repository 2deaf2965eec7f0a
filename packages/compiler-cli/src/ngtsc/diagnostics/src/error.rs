use super::error_code::ErrorCode;
use super::util::ng_error_code;
use std::fmt;
use ts::{
    DiagnosticCategory, DiagnosticMessageChain, DiagnosticRelatedInformation,
    DiagnosticWithLocation, TextSpan,
};

/// The source position a diagnostic is attributed to. Diagnostics are
/// constructible from any (file, span) pair, without a live type-checking
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticNode {
    pub file_name: String,
    pub span: TextSpan,
}

impl DiagnosticNode {
    pub fn new(file_name: impl Into<String>, span: TextSpan) -> Self {
        DiagnosticNode {
            file_name: file_name.into(),
            span,
        }
    }
}

#[derive(Debug)]
pub struct FatalDiagnosticError {
    pub code: ErrorCode,
    pub node: DiagnosticNode,
    pub diagnostic_message: DiagnosticMessageChain,
    pub related_information: Option<Vec<DiagnosticRelatedInformation>>,
}

impl FatalDiagnosticError {
    pub fn new(
        code: ErrorCode,
        node: DiagnosticNode,
        diagnostic_message: impl Into<DiagnosticMessageChain>,
    ) -> Self {
        Self {
            code,
            node,
            diagnostic_message: diagnostic_message.into(),
            related_information: None,
        }
    }

    pub fn with_related_information(
        mut self,
        related: Vec<DiagnosticRelatedInformation>,
    ) -> Self {
        self.related_information = Some(related);
        self
    }

    pub fn to_diagnostic(&self) -> DiagnosticWithLocation {
        make_diagnostic(
            self.code,
            &self.node,
            self.diagnostic_message.clone(),
            self.related_information.clone(),
            DiagnosticCategory::Error,
        )
    }
}

impl fmt::Display for FatalDiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FatalDiagnosticError: Code: {:?}, Message: {}",
            self.code, self.diagnostic_message
        )
    }
}

impl std::error::Error for FatalDiagnosticError {}

pub fn make_diagnostic(
    code: ErrorCode,
    node: &DiagnosticNode,
    message_text: DiagnosticMessageChain,
    related_information: Option<Vec<DiagnosticRelatedInformation>>,
    category: DiagnosticCategory,
) -> DiagnosticWithLocation {
    DiagnosticWithLocation {
        category,
        code: ng_error_code(code),
        file: Some(node.file_name.clone()),
        start: node.span.start,
        length: node.span.length,
        message_text,
        related_information,
    }
}

pub fn make_related_information(
    node: &DiagnosticNode,
    message_text: String,
) -> DiagnosticRelatedInformation {
    DiagnosticRelatedInformation {
        category: DiagnosticCategory::Message,
        code: 0,
        file: Some(node.file_name.clone()),
        start: Some(node.span.start),
        length: Some(node.span.length),
        message_text,
    }
}
