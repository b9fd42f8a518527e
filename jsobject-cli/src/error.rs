use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;

/// A failure of the CLI itself, as opposed to a problem found in its input.
#[derive(Debug)]
pub enum CliError {
  Read { path: Option<PathBuf>, source: io::Error },
  Config { path: PathBuf, source: serde_json::Error },
  Json { flag: &'static str, source: serde_json::Error },
}

impl CliError {
  pub const EXIT_CODE: u8 = 2;
}

impl Display for CliError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CliError::Read {
        path: Some(path),
        source,
      } => write!(f, "failed to read {}: {}", path.display(), source),
      CliError::Read { path: None, source } => write!(f, "failed to read stdin: {}", source),
      CliError::Config { path, source } => {
        write!(f, "invalid config {}: {}", path.display(), source)
      }
      CliError::Json { flag, source } => write!(f, "invalid JSON for --{}: {}", flag, source),
    }
  }
}

impl Error for CliError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      CliError::Read { source, .. } => Some(source),
      CliError::Config { source, .. } | CliError::Json { source, .. } => Some(source),
    }
  }
}
