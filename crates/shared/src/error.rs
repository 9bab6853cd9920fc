//! Startup errors.

/// Failure to resolve the surface a widget needs.
///
/// These are setup-time defects: they are reported once, before any event is
/// wired, and the bundle does not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The global object (window, document) is not available
    NoGlobal(&'static str),
    /// No element with this id exists
    MissingElement(String),
    /// The element exists but is not of the expected kind
    WrongElementType { id: String, expected: &'static str },
    /// A required script library was not loaded
    MissingLibrary(&'static str),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NoGlobal(name) => write!(f, "global `{}` is not available", name),
            SetupError::MissingElement(id) => write!(f, "required element #{} not found", id),
            SetupError::WrongElementType { id, expected } => {
                write!(f, "element #{} is not a {}", id, expected)
            }
            SetupError::MissingLibrary(name) => write!(f, "script library `{}` is not loaded", name),
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SetupError::MissingElement("chat-input".into()).to_string(),
            "required element #chat-input not found"
        );
        assert_eq!(
            SetupError::WrongElementType {
                id: "chat-input".into(),
                expected: "HTMLInputElement"
            }
            .to_string(),
            "element #chat-input is not a HTMLInputElement"
        );
        assert_eq!(
            SetupError::MissingLibrary("L").to_string(),
            "script library `L` is not loaded"
        );
    }
}
