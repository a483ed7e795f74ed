use std::fmt;

/// The main error type for ASON loading, conversion, and document operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AsonError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for characters that cannot start any token.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidNumber {
        text: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    SetOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    ReplaceOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    AppendOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    DumpsOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    LoadsOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    GetItemOperation {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for faults inside a traversal, such as a tree nested past `MAX_DEPTH`.
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a `${name}` inside a key points at a value that has no text form.
    PlaceholderResolution {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl AsonError {
    pub fn code(&self) -> Option<u32> {
        match self {
            AsonError::SyntaxError { code, .. }
            | AsonError::InvalidToken { code, .. }
            | AsonError::UnexpectedEof { code, .. }
            | AsonError::UnclosedString { code, .. }
            | AsonError::UnexpectedCharacter { code, .. }
            | AsonError::InvalidNumber { code, .. }
            | AsonError::TypeError { code, .. }
            | AsonError::FileError { code, .. }
            | AsonError::RuntimeError { code, .. }
            | AsonError::SetOperation { code, .. }
            | AsonError::ReplaceOperation { code, .. }
            | AsonError::AppendOperation { code, .. }
            | AsonError::DumpsOperation { code, .. }
            | AsonError::LoadsOperation { code, .. }
            | AsonError::GetItemOperation { code, .. }
            | AsonError::PlaceholderResolution { code, .. } => *code,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            AsonError::SyntaxError { hint, .. }
            | AsonError::InvalidToken { hint, .. }
            | AsonError::UnexpectedEof { hint, .. }
            | AsonError::UnclosedString { hint, .. }
            | AsonError::UnexpectedCharacter { hint, .. }
            | AsonError::InvalidNumber { hint, .. }
            | AsonError::TypeError { hint, .. }
            | AsonError::FileError { hint, .. }
            | AsonError::RuntimeError { hint, .. }
            | AsonError::SetOperation { hint, .. }
            | AsonError::ReplaceOperation { hint, .. }
            | AsonError::AppendOperation { hint, .. }
            | AsonError::DumpsOperation { hint, .. }
            | AsonError::LoadsOperation { hint, .. }
            | AsonError::GetItemOperation { hint, .. }
            | AsonError::PlaceholderResolution { hint, .. } => hint.as_deref(),
        }
    }

    /// Line/column of lexer and parser errors, `None` for everything else.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            AsonError::SyntaxError { line, column, .. }
            | AsonError::InvalidToken { line, column, .. }
            | AsonError::UnexpectedEof { line, column, .. }
            | AsonError::UnclosedString { line, column, .. }
            | AsonError::UnexpectedCharacter { line, column, .. }
            | AsonError::InvalidNumber { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

fn suffix(hint: Option<&str>, code: Option<u32>) -> String {
    format!(
        "{}{}",
        hint.map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl AsonError {
    /// The error text without its hint and code.
    pub fn summary(&self) -> String {
        match self {
            AsonError::SyntaxError { message, line, column, .. } =>
                format!("Syntax Error at {}:{}: {}", line, column, message),
            AsonError::InvalidToken { token, line, column, .. } =>
                format!("Invalid Token '{}' at {}:{}", token, line, column),
            AsonError::UnexpectedEof { message, line, column, .. } =>
                format!("Unexpected EOF at {}:{}: {}", line, column, message),
            AsonError::UnclosedString { quote, line, column, .. } =>
                format!("Unclosed string starting with '{}' at {}:{}", quote, line, column),
            AsonError::UnexpectedCharacter { character, line, column, .. } =>
                format!("Unexpected character '{}' at {}:{}", character, line, column),
            AsonError::InvalidNumber { text, line, column, .. } =>
                format!("Invalid number '{}' at {}:{}", text, line, column),
            AsonError::TypeError { message, .. } => format!("Type Error: {}", message),
            AsonError::FileError { message, path, .. } => format!("File Error '{}': {}", path, message),
            AsonError::RuntimeError { message, .. } => format!("Runtime Error: {}", message),
            AsonError::SetOperation { message, .. }
            | AsonError::ReplaceOperation { message, .. }
            | AsonError::AppendOperation { message, .. }
            | AsonError::DumpsOperation { message, .. }
            | AsonError::LoadsOperation { message, .. }
            | AsonError::GetItemOperation { message, .. }
            | AsonError::PlaceholderResolution { message, .. } => message.clone(),
        }
    }
}

impl fmt::Display for AsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ASON] {}{}", self.summary(), suffix(self.hint(), self.code()))
    }
}

impl std::error::Error for AsonError {}
