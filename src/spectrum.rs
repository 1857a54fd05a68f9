//! 4D forward transform of the time series and DC suppression.
#[cfg(not(feature = "parallel"))]
use crate::fft::{ndfft, ndfft_r2c};
#[cfg(feature = "parallel")]
use crate::fft::{ndfft_par as ndfft, ndfft_r2c_par as ndfft_r2c};
use crate::fft::{Complex, FftHandler, R2cFftHandler, Zero};
use crate::series::{Geometry, TimeSeries};
use ndarray::{Array4, Axis};

/// The transformed series: complex power spectrum of shape
/// `(frames, nx, ny, nz/2 + 1)` plus the geometry of the run.
///
/// The halved z extent comes from the real-to-complex backend
/// ([`R2cFftHandler::complex_len`]); x, y and time keep their full
/// complex extents. Read-only once the reducers start.
#[derive(Debug)]
pub struct Spectrum {
    /// Complex spectral samples, frequency-major.
    pub data: Array4<Complex<f32>>,
    /// Geometry shared with the reducers.
    pub geometry: Geometry,
}

/// Forward real-to-complex Fourier transform over all four axes.
///
/// The innermost (z) axis is transformed real-to-complex, the remaining
/// axes complex-to-complex, so only z is stored halved. Unnormalized
/// forward convention. One blocking call from the pipeline's point of
/// view; with the `parallel` feature the lanes fan out over rayon.
#[must_use]
pub fn transform(series: TimeSeries) -> Spectrum {
    let (nt, nx, ny, nz) = series.data.dim();

    let handler_z = R2cFftHandler::<f32>::new(nz);
    let mz = handler_z.complex_len();
    let mut a = Array4::zeros((nt, nx, ny, mz));
    ndfft_r2c(&series.data, &mut a, &handler_z, 3);
    drop(series.data);

    let mut b = Array4::zeros((nt, nx, ny, mz));
    ndfft(&a, &mut b, &FftHandler::new(ny), 2);
    ndfft(&b, &mut a, &FftHandler::new(nx), 1);
    ndfft(&a, &mut b, &FftHandler::new(nt), 0);

    Spectrum {
        data: b,
        geometry: series.geometry,
    }
}

/// Zeroes the zero-temporal-frequency slice.
///
/// The DC bin carries the field's time average and windowing artifacts,
/// not a dispersion feature; left in place it would dominate every
/// reduction.
pub fn remove_dc(spectrum: &mut Spectrum) {
    spectrum
        .data
        .index_axis_mut(Axis(0), 0)
        .fill(Complex::zero());
}
