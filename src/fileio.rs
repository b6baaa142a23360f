//! File I/O shared by the CLI commands: line-ending detection and
//! atomic output writes.

use std::io::{self, Write};
use std::path::Path;

/// Pick the line-ending convention for rewritten output.
///
/// Prefers whatever the input already uses; a file with no newline at all
/// gets the platform default.
pub fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else if content.contains('\n') {
        "\n"
    } else if cfg!(windows) {
        "\r\n"
    } else {
        "\n"
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
///
/// File writes go through a tempfile in the same directory, fsync and
/// rename, so a crash never leaves a half-written output file.
pub fn write_output(path: Option<&Path>, content: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => atomic_write(path, content),
        None => io::stdout().write_all(content),
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
