//! Diagnostic message catalog.
//!
//! Every diagnostic the compiler can emit is a [`Message`] with a fixed format string and a default [`MessageLevel`].
//! Callers supply the formatting arguments as [`MessageArgs`]; the number of arguments must match the number of
//! placeholders in the format string.
//!
//! ## Notes
//! - Placeholders are `{}` (display) and `{:x}` (lowercase hexadecimal). `{{` and `}}` spell literal braces.
//! - Only [`Message::UnterminatedBlockComment`] defaults to a warning; everything else is an error.
//!
//! ## Examples
//! ```rust
//! use cero_core::lang::messages::{self, Message, MessageArgs};
//!
//! let text = messages::format_message(Message::InvalidCharacter, &MessageArgs::from(0x7u32));
//! assert_eq!(text, "invalid character `0x7`");
//! ```

use std::fmt;

/// A distinct diagnostic emitted by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    FileNotFound,
    CouldNotOpenFile,
    SourceFileTooLarge,
    InvalidCharacter,
    MissingClosingQuote,
    UnterminatedBlockComment,

    ExpectFunctionStructOrEnum,
    ExpectParenAfterFunctionName,
    ExpectParameterType,
    ExpectParameterName,
    ExpectParenAfterParameters,
    ExpectReturnType,
    ExpectBraceBeforeFunctionBody,
    ExpectExpression,
    ExpectSemicolon,
    ExpectClosingParenInCall,
    NestingTooDeep,
}

impl Message {
    /// Every message, in catalog order.
    pub const ALL: &'static [Message] = &[
        Message::FileNotFound,
        Message::CouldNotOpenFile,
        Message::SourceFileTooLarge,
        Message::InvalidCharacter,
        Message::MissingClosingQuote,
        Message::UnterminatedBlockComment,
        Message::ExpectFunctionStructOrEnum,
        Message::ExpectParenAfterFunctionName,
        Message::ExpectParameterType,
        Message::ExpectParameterName,
        Message::ExpectParenAfterParameters,
        Message::ExpectReturnType,
        Message::ExpectBraceBeforeFunctionBody,
        Message::ExpectExpression,
        Message::ExpectSemicolon,
        Message::ExpectClosingParenInCall,
        Message::NestingTooDeep,
    ];

    /// Format string used to render this message.
    pub const fn format_string(self) -> &'static str {
        match self {
            Message::FileNotFound => "file not found",
            Message::CouldNotOpenFile => "could not open file, system error: \"{}\"",
            Message::SourceFileTooLarge => "source file is too large, maximum allowed is {} bytes",
            Message::InvalidCharacter => "invalid character `0x{:x}`",
            Message::MissingClosingQuote => "missing closing quote",
            Message::UnterminatedBlockComment => "block comment must be closed with `*/`",
            Message::ExpectFunctionStructOrEnum => "expected function, struct or enum, but found {}",
            Message::ExpectParenAfterFunctionName => "expected `(` after function name, but found {}",
            Message::ExpectParameterType => "expected type for parameter, but found {}",
            Message::ExpectParameterName => "expected name for parameter, but found {}",
            Message::ExpectParenAfterParameters => "expected `)` after parameters, but found {}",
            Message::ExpectReturnType => "expected return type, but found {}",
            Message::ExpectBraceBeforeFunctionBody => "expected `{{` before function body, but found {}",
            Message::ExpectExpression => "expected expression, but found {}",
            Message::ExpectSemicolon => "expected a `;`, but found {}",
            Message::ExpectClosingParenInCall => "expected closing `)` in function call, but found {}",
            Message::NestingTooDeep => "blocks and expressions are nested too deeply, maximum allowed depth is {}",
        }
    }

    /// Level this message is emitted at unless a reporter overrides it.
    pub const fn default_level(self) -> MessageLevel {
        match self {
            Message::UnterminatedBlockComment => MessageLevel::Warning,
            _ => MessageLevel::Error,
        }
    }

    /// Number of arguments the format string consumes.
    pub fn placeholder_count(self) -> usize {
        count_placeholders(self.format_string())
    }
}

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageLevel {
    Error,
    Warning,
    Help,
    Note,
}

impl MessageLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
            MessageLevel::Help => "help",
            MessageLevel::Note => "note",
        }
    }
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// One formatting argument of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
    Str(String),
    Int(u64),
}

/// Ordered formatting arguments for a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageArgs {
    args: Vec<MessageArg>,
}

impl MessageArgs {
    pub fn new(args: Vec<MessageArg>) -> Self {
        Self { args }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageArg> {
        self.args.iter()
    }

    /// Whether there is exactly one argument per placeholder of `message`.
    pub fn valid_for(&self, message: Message) -> bool {
        self.args.len() == message.placeholder_count()
    }
}

impl From<MessageArg> for MessageArgs {
    fn from(arg: MessageArg) -> Self {
        Self { args: vec![arg] }
    }
}

impl From<&str> for MessageArgs {
    fn from(text: &str) -> Self {
        MessageArg::Str(text.to_string()).into()
    }
}

impl From<String> for MessageArgs {
    fn from(text: String) -> Self {
        MessageArg::Str(text).into()
    }
}

impl From<u32> for MessageArgs {
    fn from(value: u32) -> Self {
        MessageArg::Int(u64::from(value)).into()
    }
}

impl From<u64> for MessageArgs {
    fn from(value: u64) -> Self {
        MessageArg::Int(value).into()
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Count placeholders: a `{` opens one (a second `{` cancels it), and a `}` closes an open one.
fn count_placeholders(format: &str) -> usize {
    let mut open = false;
    let mut count = 0;
    for byte in format.bytes() {
        match byte {
            b'{' => open = !open,
            b'}' if open => {
                count += 1;
                open = false;
            }
            _ => {}
        }
    }
    count
}

/// Render `message` with `args` substituted for its placeholders.
///
/// Surplus placeholders render as nothing; callers are expected to check [`MessageArgs::valid_for`] first.
pub fn format_message(message: Message, args: &MessageArgs) -> String {
    let format = message.format_string();
    let mut out = String::with_capacity(format.len() + 16);
    let mut args = args.iter();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut format_spec = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    format_spec.push(c);
                }
                match (args.next(), format_spec.as_str()) {
                    (Some(MessageArg::Int(value)), ":x") => out.push_str(&format!("{value:x}")),
                    (Some(MessageArg::Int(value)), _) => out.push_str(&value.to_string()),
                    (Some(MessageArg::Str(text)), _) => out.push_str(text),
                    (None, _) => {}
                }
            }
            c => out.push(c),
        }
    }
    out
}
