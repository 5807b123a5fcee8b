//! Opening input and output streams from command-line paths.
//!
//! `-` (and the usual device names) select stdin or stdout; anything else is a file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Buffer size for file readers.
const READ_BUFFER_SIZE: usize = 1 << 20;

/// Check if a path refers to stdin.
///
/// ```
/// use snps_lib::io::is_stdin_path;
///
/// assert!(is_stdin_path("-"));
/// assert!(is_stdin_path("/dev/stdin"));
/// assert!(!is_stdin_path("queries.fa"));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "stdin" || path_str == "/dev/stdin"
}

/// Check if a path refers to stdout.
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "stdout" || path_str == "/dev/stdout"
}

/// Name used for a path in log and error messages.
pub fn display_name<P: AsRef<Path>>(path: P) -> String {
    if is_stdin_path(&path) { "stdin".to_string() } else { path.as_ref().display().to_string() }
}

/// Open a path for buffered reading, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();
    if is_stdin_path(path) {
        return Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
}

/// Create a path for writing, or stdout for `-`.
///
/// The returned writer is unbuffered; output writers add their own buffering.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write + Send>> {
    let path = path.as_ref();
    if is_stdout_path(path) {
        return Ok(Box::new(io::stdout()));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(Box::new(file))
}
