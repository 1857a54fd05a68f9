//! Assembles frames into the 4D time series and applies the temporal window.
use crate::error::{Error, Result};
use crate::frame::Frame;
use ndarray::{Array4, Axis};

/// Immutable run geometry, fixed by the first frame and the frame count.
///
/// Produced once during [`assemble`] and passed by reference into the
/// reducers; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Number of cells along x, y, z.
    pub mesh_size: [usize; 3],
    /// Physical cell size along x, y, z.
    pub cell_step: [f64; 3],
    /// Number of frames in the series.
    pub frames: usize,
    /// Timestamp of the last frame; the elapsed span for a time-uniform
    /// series starting at zero.
    pub total_time: f64,
}

impl Geometry {
    /// Physical extent of the simulation box along `axis`.
    #[must_use]
    pub fn domain_extent(&self, axis: usize) -> f64 {
        self.cell_step[axis] * self.mesh_size[axis] as f64
    }
}

/// The assembled time series: one real 4D array of shape
/// `(frames, nx, ny, nz)` plus its geometry.
#[derive(Debug)]
pub struct TimeSeries {
    /// Field samples, frame-major.
    pub data: Array4<f32>,
    /// Geometry shared with every later stage.
    pub geometry: Geometry,
}

/// Packs an ordered frame sequence into a [`TimeSeries`].
///
/// The first frame fixes the mesh geometry; every later frame must match
/// it exactly. Only the first component tensor of each frame is kept.
///
/// # Errors
/// Fails on the first unreadable frame, on a mesh-size mismatch, if the
/// sequence holds fewer than two frames (the temporal window needs
/// `N >= 2`), if a frame has no components, or if the last timestamp is
/// not positive.
pub fn assemble<I>(frames: I) -> Result<TimeSeries>
where
    I: IntoIterator<Item = Result<Frame>>,
    I::IntoIter: ExactSizeIterator,
{
    let frames = frames.into_iter();
    let n = frames.len();
    if n < 2 {
        return Err(Error::TooFewFrames(n));
    }
    log::info!("loading {} frames...", n);

    let mut data: Option<Array4<f32>> = None;
    let mut mesh_size = [0usize; 3];
    let mut cell_step = [0f64; 3];
    let mut total_time = 0.0;

    for (t, frame) in frames.enumerate() {
        let frame = frame?;
        if t == 0 {
            mesh_size = frame.mesh_size;
            cell_step = frame.mesh_step;
            log::info!("mesh size is {:?}", mesh_size);
            data = Some(Array4::zeros((n, mesh_size[0], mesh_size[1], mesh_size[2])));
        } else if frame.mesh_size != mesh_size {
            return Err(Error::MeshMismatch {
                index: t,
                expected: mesh_size,
                found: frame.mesh_size,
            });
        }
        let scalar = frame.components().first().ok_or(Error::NoComponents(t))?;
        data.as_mut()
            .expect("allocated on first frame")
            .index_axis_mut(Axis(0), t)
            .assign(scalar);
        total_time = frame.time;
    }

    if total_time <= 0.0 {
        return Err(Error::ZeroTimeSpan(total_time));
    }
    log::info!("data loaded");

    Ok(TimeSeries {
        data: data.expect("n >= 2 frames seen"),
        geometry: Geometry {
            mesh_size,
            cell_step,
            frames: n,
            total_time,
        },
    })
}

/// Hann coefficient for sample `n` of a window of length `len`.
///
/// `hann(0, len)` and `hann(len - 1, len)` are zero, the midpoint is one.
/// `len` must be at least 2.
#[must_use]
pub fn hann(n: usize, len: usize) -> f32 {
    let phase = 2.0 * std::f64::consts::PI * n as f64 / (len - 1) as f64;
    (0.5 * (1.0 - phase.cos())) as f32
}

/// Tapers the series in time to suppress spectral leakage.
///
/// Every spatial sample of temporal slice `n` is scaled by `hann(n, N)`.
pub fn apply_window(series: &mut TimeSeries) {
    let n = series.geometry.frames;
    for (t, mut slab) in series.data.outer_iter_mut().enumerate() {
        let w = hann(t, n);
        slab.mapv_inplace(|v| v * w);
    }
}
