//! # magspec: dispersion relations from micromagnetic frame dumps
//!
//! Extracts dispersion relations -- field power as a function of temporal
//! frequency and spatial wavevector -- from a time-ordered sequence of 3D
//! scalar-field snapshots. The pipeline is strictly linear:
//!
//! 1. [`series::assemble`] packs the frames into a real 4D array
//!    (time, x, y, z) and derives the run geometry from the first frame.
//! 2. [`series::apply_window`] tapers the time axis with a Hann window.
//! 3. [`spectrum::transform`] performs the forward real-to-complex Fourier
//!    transform over all four axes.
//! 4. [`spectrum::remove_dc`] zeroes the zero-temporal-frequency slice.
//! 5. The [`reduce`] functions project the spectrum into a global
//!    frequency spectrum and four dispersion diagrams, written as
//!    gnuplot-compatible multi-block text.
//!
//! ## Example
//! ```
//! use magspec::{assemble, apply_window, frequency_spectrum, remove_dc, transform, Frame};
//! use ndarray::Array3;
//!
//! // Four 2x2x2 frames, 1 ps apart.
//! let frames: Vec<magspec::Result<Frame>> = (0..4)
//!     .map(|t| {
//!         let field = Array3::from_elem((2, 2, 2), (t as f32 * 0.8).sin());
//!         Ok(Frame::new(
//!             [2, 2, 2],
//!             [3e-9, 3e-9, 3e-9],
//!             (t + 1) as f64 * 1e-12,
//!             vec![field],
//!         ))
//!     })
//!     .collect();
//!
//! let mut series = assemble(frames).unwrap();
//! apply_window(&mut series);
//! let mut spectrum = transform(series);
//! remove_dc(&mut spectrum);
//!
//! let mut diagram = Vec::new();
//! frequency_spectrum(&spectrum, &mut diagram).unwrap();
//! let records = diagram.iter().filter(|&&b| b == b'\n').count();
//! assert_eq!(records, 3); // f = 1, 2, 3
//! ```
#![warn(missing_docs)]

pub mod error;
pub mod fft;
pub mod frame;
pub mod output;
pub mod reduce;
pub mod series;
pub mod spectrum;

pub use error::{Error, Result};
pub use frame::{CrcMode, Frame};
pub use reduce::{dispersion_directional, dispersion_radial, frequency_spectrum, SpatialAxis};
pub use series::{apply_window, assemble, Geometry, TimeSeries};
pub use spectrum::{remove_dc, transform, Spectrum};
