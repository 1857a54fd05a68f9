//! Commits reducer output to gnuplot-compatible text files.
//!
//! The five diagram files are plain tab-separated ASCII, written to the
//! working directory and overwritten if present. Block framing (one blank
//! line per temporal frequency) is the reducers' responsibility; this
//! module only owns file creation and the final flush.
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Global frequency spectrum, two columns, no blocks.
pub const FREQUENCY_SPECTRUM: &str = "frequencyspectrum";
/// Radial dispersion diagram.
pub const DISPERSION: &str = "dispersion";
/// Directional dispersion along x.
pub const DISPERSION_X: &str = "dispersionx";
/// Directional dispersion along y.
pub const DISPERSION_Y: &str = "dispersiony";
/// Directional dispersion along z.
pub const DISPERSION_Z: &str = "dispersionz";

/// Buffered writer for one diagram file.
///
/// Created with the target truncated, committed with an explicit flush so
/// write failures surface as errors instead of being swallowed on drop.
pub struct DiagramWriter {
    writer: BufWriter<File>,
}

impl DiagramWriter {
    /// Creates (or truncates) the diagram file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(DiagramWriter {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    /// Flushes and closes the diagram.
    pub fn commit(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Write for DiagramWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
