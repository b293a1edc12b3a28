use thiserror::Error;

/// Errors produced while building kernels, validating configuration or rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Gaussian sigma must be strictly positive and finite.
    #[error("sigma must be > 0, got {0}")]
    InvalidSigma(f64),

    /// Kernel side length must be odd and non-zero.
    #[error("kernel size must be odd and non-zero, got {0}")]
    InvalidKernelSize(usize),

    /// A configuration field is outside its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The pixel buffer does not match the requested grid width.
    #[error("pixel buffer is {actual} columns wide, expected {expected}")]
    DimensionMismatch {
        /// Width requested by the configuration.
        expected: u32,
        /// Width of the supplied buffer.
        actual: u32,
    },

    /// Two fields that are combined cell by cell differ in size.
    #[error("field is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    FieldSizeMismatch {
        /// Width and height of the first field.
        expected: (usize, usize),
        /// Width and height of the second field.
        actual: (usize, usize),
    },

    /// An enum name could not be parsed.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant {
        /// Which setting was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
