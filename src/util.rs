// util.rs

use std::fmt::Display;
use std::io::{self, Write};

/// Writes one line, treating a closed reader as success.
pub fn writeln_ignore_broken_pipe<W: Write + ?Sized, S: Display>(w: &mut W, s: S) -> io::Result<()> {
    match writeln!(w, "{}", s).and_then(|_| w.flush()) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
