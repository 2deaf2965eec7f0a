pub mod src {
    pub mod docs;
    pub mod error;
    pub mod error_code;
    pub mod util;
}

#[cfg(test)]
mod test;

pub use src::docs::ExtendedTemplateDiagnosticName;
pub use src::error::{
    make_diagnostic, make_related_information, DiagnosticNode, FatalDiagnosticError,
};
pub use src::error_code::ErrorCode;
pub use src::util::{ng_error_code, replace_ts_with_ng_in_errors};
