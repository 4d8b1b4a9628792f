#![forbid(unsafe_code)]

//! Errors raised while describing, reading and writing objects.

/// Access or invocation failure on a described object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// The object is neither of the declaring type nor derived from it.
    #[error("`{found}` is not a `{expected}`")]
    NotAnInstance {
        expected: &'static str,
        found: &'static str,
    },
    /// A value of the wrong concrete type was supplied.
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Wrong number of arguments.
    #[error("`{member}` takes {expected} argument(s), got {found}")]
    ArityMismatch {
        member: &'static str,
        expected: usize,
        found: usize,
    },
    /// An argument does not satisfy the declared parameter type.
    #[error("argument {index} of `{member}` expects `{expected}`, found `{found}`")]
    ArgumentMismatch {
        member: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// The field has no read accessor.
    #[error("field `{field}` is not readable")]
    NotReadable { field: &'static str },
    /// The field has no write accessor.
    #[error("field `{field}` is not writable")]
    NotWritable { field: &'static str },
    /// User code reported a failure.
    #[error("{0}")]
    Failed(String),
}

impl ReflectError {
    /// Failure reported by user code (accessor, constructor or initializer).
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Why a marked field could not be wired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WiringError {
    /// No value existed and the declared type has no no-argument constructor.
    #[error("`{type_name}` has no no-argument constructor")]
    NoDefaultConstructor { type_name: &'static str },
    /// The no-argument constructor failed.
    #[error("constructing `{type_name}` failed: {source}")]
    Construction {
        type_name: &'static str,
        source: ReflectError,
    },
    /// Writing the value back into the host failed.
    #[error("applying value failed: {0}")]
    Apply(#[source] ReflectError),
}
