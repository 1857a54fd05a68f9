//! Error type shared across the crate.
use thiserror::Error;

/// Everything that can go wrong while loading frames or writing diagrams.
///
/// All variants are fatal: the pipeline is a one-shot batch computation
/// with no retry or partial-output path.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O failure while reading frames or writing diagrams.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame file could not be read; wraps the cause with its path.
    #[error("{}: {source}", path.display())]
    File {
        /// Path of the offending frame dump.
        path: std::path::PathBuf,
        /// What went wrong while reading it.
        source: Box<Error>,
    },

    /// The input does not start with the frame-dump magic bytes.
    #[error("not a frame dump (bad magic)")]
    BadMagic,

    /// The header describes a payload whose byte size overflows; the
    /// frame is rejected before any allocation is attempted.
    #[error("frame header describes an oversized payload (mesh {mesh_size:?}, {ncomp} components)")]
    OversizedPayload {
        /// Mesh size read from the header.
        mesh_size: [usize; 3],
        /// Component count read from the header.
        ncomp: usize,
    },

    /// Stored checksum does not match the one computed over the frame.
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// CRC-32 read from the dump trailer.
        stored: u32,
        /// CRC-32 computed over header and payload.
        computed: u32,
    },

    /// A frame's mesh size differs from the one fixed by the first frame.
    #[error("frame {index}: mesh size {found:?} does not match first frame {expected:?}")]
    MeshMismatch {
        /// Zero-based position of the offending frame in the sequence.
        index: usize,
        /// Mesh size of the first frame.
        expected: [usize; 3],
        /// Mesh size of the offending frame.
        found: [usize; 3],
    },

    /// Fewer than two frames; the temporal window is undefined.
    #[error("need at least 2 frames, got {0}")]
    TooFewFrames(usize),

    /// A frame carries no tensor components.
    #[error("frame {0} has no tensor components")]
    NoComponents(usize),

    /// The last frame's timestamp is not positive, so frequencies in
    /// physical units cannot be formed.
    #[error("total time span is not positive ({0})")]
    ZeroTimeSpan(f64),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
