//! Axis-wise Fourier transforms over ndarray arrays.
//!
//! Handler structs hold the transform plans; the free functions apply a
//! handler to every lane of an *n*-dimensional array along one axis.
//! Complex-to-complex transforms are planned with `RustFFT`, the
//! real-to-complex transform with `realfft`, which also answers the
//! output-size query for the halved axis (see [`R2cFftHandler::complex_len`]).
//!
//! Transforms along the innermost axis are the cheapest; lanes along other
//! axes are copied into a temporary before processing.
//!
//! Only the forward direction is provided: the spectral pipeline never
//! returns to the time domain.
use ndarray::{Array1, ArrayBase, Dimension, RemoveAxis, Zip};
use ndarray::{Data, DataMut};
use realfft::{RealFftPlanner, RealToComplex};
pub use rustfft::num_complex::Complex;
pub use rustfft::num_traits::Zero;
pub use rustfft::FftNum;
use rustfft::FftPlanner;
use std::sync::Arc;

/// Applies a handler lane-by-lane along `axis` (serial).
macro_rules! create_transform {
    (
        $(#[$meta:meta])* $i: ident, $a: ty, $b: ty, $h: ty, $p: ident
    ) => {
        $(#[$meta])*
        pub fn $i<R, S, T, D>(
            input: &ArrayBase<R, D>,
            output: &mut ArrayBase<S, D>,
            handler: &$h,
            axis: usize,
        ) where
            T: FftNum,
            R: Data<Elem = $a>,
            S: Data<Elem = $b> + DataMut,
            D: Dimension + RemoveAxis,
        {
            let outer_axis = input.ndim() - 1;
            if axis == outer_axis {
                Zip::from(input.rows())
                    .and(output.rows_mut())
                    .for_each(|x, mut y| {
                        handler.$p(x.as_slice().unwrap(), y.as_slice_mut().unwrap());
                    });
            } else {
                let n = output.shape()[axis];
                let mut input = input.view();
                input.swap_axes(outer_axis, axis);
                output.swap_axes(outer_axis, axis);
                let mut outvec = Array1::zeros(n);
                Zip::from(input.rows())
                    .and(output.rows_mut())
                    .for_each(|x, mut y| {
                        handler.$p(&x.to_vec(), outvec.as_slice_mut().unwrap());
                        y.assign(&outvec);
                    });
                output.swap_axes(outer_axis, axis);
            }
        }
    };
}

/// Similar to `create_transform`, but lanes are processed in parallel.
#[cfg(feature = "parallel")]
macro_rules! create_transform_par {
    ($(#[$meta:meta])* $i: ident, $a: ty, $b: ty, $h: ty, $p: ident) => {
        $(#[$meta])*
        pub fn $i<R, S, T, D>(
            input: &ArrayBase<R, D>,
            output: &mut ArrayBase<S, D>,
            handler: &$h,
            axis: usize,
        ) where
            T: FftNum,
            R: Data<Elem = $a>,
            S: Data<Elem = $b> + DataMut,
            D: Dimension + RemoveAxis,
        {
            let outer_axis = input.ndim() - 1;
            if axis == outer_axis {
                Zip::from(input.rows())
                    .and(output.rows_mut())
                    .par_for_each(|x, mut y| {
                        handler.$p(x.as_slice().unwrap(), y.as_slice_mut().unwrap());
                    });
            } else {
                let n = output.shape()[axis];
                let mut input = input.view();
                input.swap_axes(outer_axis, axis);
                output.swap_axes(outer_axis, axis);
                Zip::from(input.rows())
                    .and(output.rows_mut())
                    .par_for_each(|x, mut y| {
                        let mut outvec = Array1::zeros(n);
                        handler.$p(&x.to_vec(), outvec.as_slice_mut().unwrap());
                        y.assign(&outvec);
                    });
                output.swap_axes(outer_axis, axis);
            }
        }
    };
}

/// Forward complex-to-complex Fourier transform along one axis.
///
/// Unnormalized: no scaling is applied to the output.
///
/// The accompanying functions are [`ndfft`] (serial) and [`ndfft_par`]
/// (parallel).
///
/// # Example
/// ```
/// use magspec::fft::{ndfft, Complex, FftHandler};
/// use ndarray::Array2;
///
/// let (nx, ny) = (6, 4);
/// let mut data = Array2::<Complex<f64>>::zeros((nx, ny));
/// let mut vhat = Array2::<Complex<f64>>::zeros((nx, ny));
/// for (i, v) in data.iter_mut().enumerate() {
///     v.re = i as f64;
/// }
/// let handler = FftHandler::<f64>::new(ny);
/// ndfft(&data, &mut vhat, &handler, 1);
/// ```
pub struct FftHandler<T> {
    n: usize,
    plan: Arc<dyn rustfft::Fft<T>>,
}

impl<T: FftNum> FftHandler<T> {
    /// Plans a forward transform for lanes of length `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::<T>::new();
        let plan = planner.plan_fft_forward(n);
        FftHandler::<T> { n, plan }
    }

    fn fft_lane(&self, data: &[Complex<T>], out: &mut [Complex<T>]) {
        Self::assert_size(self.n, data.len());
        Self::assert_size(self.n, out.len());
        out.copy_from_slice(data);
        self.plan.process(out);
    }

    fn assert_size(n: usize, size: usize) {
        assert!(n == size, "Size mismatch in fft, got {} expected {}", size, n);
    }
}

/// Forward real-to-complex Fourier transform along one axis.
///
/// Lanes of real length *n* produce complex lanes of length *n/2 + 1*
/// (the conjugate-symmetric upper half is not stored). The output extent
/// must be obtained from [`R2cFftHandler::complex_len`], not recomputed
/// by the caller.
///
/// The accompanying functions are [`ndfft_r2c`] (serial) and
/// [`ndfft_r2c_par`] (parallel).
///
/// # Example
/// ```
/// use magspec::fft::{ndfft_r2c, Complex, R2cFftHandler};
/// use ndarray::Array2;
///
/// let (nx, ny) = (6, 4);
/// let mut data = Array2::<f64>::zeros((nx, ny));
/// for (i, v) in data.iter_mut().enumerate() {
///     *v = i as f64;
/// }
/// let handler = R2cFftHandler::<f64>::new(ny);
/// let mut vhat = Array2::<Complex<f64>>::zeros((nx, handler.complex_len()));
/// ndfft_r2c(&data, &mut vhat, &handler, 1);
/// ```
pub struct R2cFftHandler<T> {
    n: usize,
    m: usize,
    plan: Arc<dyn RealToComplex<T>>,
}

impl<T: FftNum> R2cFftHandler<T> {
    /// Plans a forward real-to-complex transform for lanes of length `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let mut planner = RealFftPlanner::<T>::new();
        let plan = planner.plan_fft_forward(n);
        let m = plan.complex_len();
        R2cFftHandler::<T> { n, m, plan }
    }

    /// Complex output length for one lane, as reported by the backend.
    #[must_use]
    pub fn complex_len(&self) -> usize {
        self.m
    }

    fn rfft_lane(&self, data: &[T], out: &mut [Complex<T>]) {
        Self::assert_size(self.n, data.len());
        Self::assert_size(self.m, out.len());
        // realfft scribbles over its input, so each lane works on a copy.
        let mut buffer = data.to_vec();
        self.plan
            .process(&mut buffer, out)
            .expect("r2c lane lengths verified above");
    }

    fn assert_size(n: usize, size: usize) {
        assert!(n == size, "Size mismatch in fft, got {} expected {}", size, n);
    }
}

create_transform!(
    /// Complex-to-complex Fourier transform (serial).
    ///
    /// Further infos: see [`FftHandler`]
    ndfft,
    Complex<T>,
    Complex<T>,
    FftHandler<T>,
    fft_lane
);

create_transform!(
    /// Real-to-complex Fourier transform (serial).
    ///
    /// Further infos: see [`R2cFftHandler`]
    ndfft_r2c,
    T,
    Complex<T>,
    R2cFftHandler<T>,
    rfft_lane
);

#[cfg(feature = "parallel")]
create_transform_par!(
    /// Complex-to-complex Fourier transform (parallel).
    ///
    /// Further infos: see [`ndfft`]
    ndfft_par,
    Complex<T>,
    Complex<T>,
    FftHandler<T>,
    fft_lane
);

#[cfg(feature = "parallel")]
create_transform_par!(
    /// Real-to-complex Fourier transform (parallel).
    ///
    /// Further infos: see [`ndfft_r2c`]
    ndfft_r2c_par,
    T,
    Complex<T>,
    R2cFftHandler<T>,
    rfft_lane
);
