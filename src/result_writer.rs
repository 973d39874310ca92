use crate::error::{ConvertError, ConvertResult};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;
use tracing::debug;

/// Write the statement to `output`, replacing any existing file.
///
/// The text goes to a temp file next to the target which is then renamed
/// over it, so a failed write leaves the previous file in place. An existing
/// file keeps its permissions; a new one gets the usual `0o666` minus umask.
pub fn write_statement(output: &Path, sql: &str) -> ConvertResult<()> {
    let to_write_error = |source: io::Error| ConvertError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = fs::metadata(output).ok().map(|meta| meta.permissions());

    let mut builder = Builder::new();
    builder.prefix(".videos2sql-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(to_write_error)?;
    tmp.write_all(sql.as_bytes()).map_err(to_write_error)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(to_write_error)?;
    }
    tmp.as_file().sync_all().map_err(to_write_error)?;
    tmp.persist(output).map_err(|e| to_write_error(e.error))?;

    debug!(path = %output.display(), bytes = sql.len(), "wrote statement");
    Ok(())
}
