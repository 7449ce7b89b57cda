/// Broad category of an [`AppError`].
///
/// Each kind maps to a fixed process exit code so scripts can tell a bad
/// upload apart from a bad flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid command-line values.
    Usage,
    /// Uploaded content could not be read as delimited tabular text.
    FileParse,
    /// Uploaded table lacks one of the required columns.
    MissingColumn,
    /// Least-squares solve produced no usable coefficients.
    Fit,
    /// Writing an export or driving the terminal failed.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage | ErrorKind::FileParse => 2,
            ErrorKind::MissingColumn => 3,
            ErrorKind::Fit => 4,
            ErrorKind::Io => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn file_parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileParse, message)
    }

    pub fn missing_column(column: &str) -> Self {
        Self::new(
            ErrorKind::MissingColumn,
            format!("Missing required column: `{column}`"),
        )
    }

    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fit, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
