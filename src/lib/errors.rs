//! Custom error types for snps operations.

use thiserror::Error;

/// Result type alias for snps operations
pub type Result<T> = std::result::Result<T, SnpsError>;

/// Error type for snps operations
#[derive(Error, Debug)]
pub enum SnpsError {
    /// The input stream is not FASTA, or a record in it cannot be parsed
    #[error("badly formatted input '{source_name}': {reason}")]
    Format {
        /// Name of the stream being read (file path or "stdin")
        source_name: String,
        /// Explanation of the problem
        reason: String,
    },

    /// A query sequence is not the same length as the reference
    #[error(
        "Sequence '{id}' has length {actual} but the reference has length {expected}; \
         all sequences must be aligned to the reference"
    )]
    LengthMismatch {
        /// Identifier of the offending query
        id: String,
        /// Reference length
        expected: usize,
        /// Query length
        actual: usize,
    },

    /// A change string (e.g. `G6C`) could not be parsed
    #[error("Malformed change '{change}': expected <ref><position><alt>")]
    MalformedChange {
        /// The offending string
        change: String,
    },

    /// The reference stream held no records
    #[error("Reference '{source_name}' contains no sequences")]
    EmptyReference {
        /// Name of the reference stream
        source_name: String,
    },

    /// The reference stream held more than one record
    #[error("Reference '{source_name}' contains {count} sequences, expected exactly one")]
    MultipleReferences {
        /// Name of the reference stream
        source_name: String,
        /// Number of records found
        count: usize,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Invalid reporting threshold
    #[error("Invalid threshold: {value} (must be between 0 and 1)")]
    InvalidThreshold {
        /// The invalid threshold value
        value: f64,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "Reference FASTA")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}
