/// Error types for message formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder was opened but its closing brace was never found
    UnbalancedBraces(String),
    /// A plural/select body did not follow the `key {sub-message}` shape
    MalformedPlaceholder(String),
    /// A plural or number argument was not numeric (caller contract violation)
    NotNumeric(String),
    /// Nested sub-messages exceeded the maximum recursion depth
    RecursionLimit(usize),
    /// A catalog or table file could not be read or parsed
    DataLoad(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnbalancedBraces(tpl) => {
                write!(f, "Unterminated placeholder in template: {}", tpl)
            }
            FormatError::MalformedPlaceholder(body) => {
                write!(f, "Malformed placeholder body: {}", body)
            }
            FormatError::NotNumeric(value) => {
                write!(f, "Expected a numeric argument, got: {}", value)
            }
            FormatError::RecursionLimit(depth) => {
                write!(f, "Sub-message nesting exceeded maximum depth {}", depth)
            }
            FormatError::DataLoad(msg) => write!(f, "Data load error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
