//! Writes an execution result to a target path.

use crate::{
    error::Result,
    types::{ExecutionResult, Output},
};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write `result` to `path`.
///
/// - nothing: no-op
/// - text naming an existing path: that file is moved to `path`
/// - any other text: written verbatim
/// - a document: serialized by the model itself
pub fn write(result: &ExecutionResult, path: &Path) -> Result<()> {
    let Some(output) = result else {
        debug!("no output to write");
        return Ok(());
    };

    match output {
        Output::Text(text) => {
            let source = Path::new(text);
            if source.exists() {
                debug!("moving {} to {}", source.display(), path.display());
                move_file(source, path)
            } else {
                debug!("writing {} bytes of text to {}", text.len(), path.display());
                fs::write(path, text)?;
                Ok(())
            }
        }
        Output::Document(model) => {
            debug!("writing model to {}", path.display());
            model.write(path)
        }
    }
}

/// Rename, or copy and remove when the rename crosses filesystems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)?;
    Ok(())
}
