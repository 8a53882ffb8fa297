use thiserror::Error;

/// Boxed error raised by an external rewrite pass.
pub type BoxedVisitorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ExprError {
    /// A constructor received an argument outside of its domain.
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A regular expression operand failed to compile.
    #[error("Failed to compile pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A visitor aborted the traversal. The visitor failure is forwarded untouched.
    #[error(transparent)]
    Visitor(BoxedVisitorError),
}

impl ExprError {
    /// Wrap any error produced inside a visitor hook.
    pub fn visitor<E>(error: E) -> Self
    where
        E: Into<BoxedVisitorError>,
    {
        ExprError::Visitor(error.into())
    }
}

pub type ExprResult<T> = Result<T, ExprError>;
