//! Reads a program file from disk and turns it into a memory image.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::bytecode::parse_program_text;
use crate::error::LoadError;
use crate::memory::{Byte, MEMORY_SIZE};

/// Reads and parses the program at `path`. The image is checked against memory capacity here so
/// that an oversized program is rejected before a machine is built for it.
pub fn load_program(path: &Path) -> Result<Vec<Byte>, LoadError> {
  let text =
    fs::read_to_string(path).map_err(|source| LoadError::ProgramNotFound {
      path: path.to_path_buf(),
      source
    })?;

  let image = parse_program_text(&text)?;
  if image.len() > MEMORY_SIZE {
    return Err(LoadError::ProgramTooLarge {
      length   : image.len(),
      capacity : MEMORY_SIZE
    });
  }

  debug!(path = %path.display(), bytes = image.len(), "loaded program");
  Ok(image)
}
