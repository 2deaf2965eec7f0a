//! Stable string names for the extended template diagnostics. These are the
//! identifiers users reference in configuration to adjust a check's
//! severity.

use super::error_code::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtendedTemplateDiagnosticName {
    InvalidBananaInBox,
    TextAttributeNotBinding,
}

impl ExtendedTemplateDiagnosticName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtendedTemplateDiagnosticName::InvalidBananaInBox => "invalidBananaInBox",
            ExtendedTemplateDiagnosticName::TextAttributeNotBinding => "textAttributeNotBinding",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "invalidBananaInBox" => Some(ExtendedTemplateDiagnosticName::InvalidBananaInBox),
            "textAttributeNotBinding" => {
                Some(ExtendedTemplateDiagnosticName::TextAttributeNotBinding)
            }
            _ => None,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            ExtendedTemplateDiagnosticName::InvalidBananaInBox => ErrorCode::InvalidBananaInBox,
            ExtendedTemplateDiagnosticName::TextAttributeNotBinding => {
                ErrorCode::TextAttributeNotBinding
            }
        }
    }
}
