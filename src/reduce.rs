//! Reduces the 4D spectrum into the plotted diagrams.
//!
//! Each reducer walks the transformed buffer read-only and emits
//! tab-separated records through an [`io::Write`] sink. Power is
//! accumulated in f64 even though the spectral samples are f32.
//!
//! Directional and radial reducers report only temporal frequencies in
//! `[1, N/2)`: the upper half mirrors the conjugate symmetry of the
//! real-valued input and carries no extra information. The global
//! frequency spectrum keeps the full `[1, N)` range.
use crate::error::Result;
use crate::spectrum::Spectrum;
use ndarray::Axis;
use std::io::Write;

/// A spatial axis of the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialAxis {
    /// First mesh axis.
    X,
    /// Second mesh axis.
    Y,
    /// Third mesh axis.
    Z,
}

impl SpatialAxis {
    /// Index of this axis within a spatial (x, y, z) triple.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            SpatialAxis::X => 0,
            SpatialAxis::Y => 1,
            SpatialAxis::Z => 2,
        }
    }
}

/// Global frequency spectrum: total spatial power per temporal frequency.
///
/// One record per frequency index `f` in `[1, N)`:
/// `frequency TAB power`, with `frequency = f / total_time`. No blocks.
pub fn frequency_spectrum<W: Write>(spectrum: &Spectrum, out: &mut W) -> Result<()> {
    let n = spectrum.geometry.frames;
    for f in 1..n {
        let power: f64 = spectrum
            .data
            .index_axis(Axis(0), f)
            .iter()
            .map(|c| f64::from(c.norm_sqr()))
            .sum();
        writeln!(out, "{}\t{}", frequency(spectrum, f), power)?;
    }
    Ok(())
}

/// Directional dispersion along one spatial axis.
///
/// For each temporal frequency `f` in `[1, N/2)` and each spectral index
/// `i` along `axis`, sums power over the other two spatial axes and
/// emits `frequency TAB wavevector TAB power` with
/// `wavevector = i / domain_extent(axis)`. Records of one frequency form
/// a block; a blank line terminates each block.
pub fn dispersion_directional<W: Write>(
    spectrum: &Spectrum,
    axis: SpatialAxis,
    out: &mut W,
) -> Result<()> {
    let n = spectrum.geometry.frames;
    let extent = spectrum.geometry.domain_extent(axis.index());
    for f in 1..n / 2 {
        let k = spectrum.data.index_axis(Axis(0), f);
        let freq = frequency(spectrum, f);
        let lane = Axis(axis.index());
        for i in 0..k.len_of(lane) {
            let power: f64 = k
                .index_axis(lane, i)
                .iter()
                .map(|c| f64::from(c.norm_sqr()))
                .sum();
            writeln!(out, "{}\t{}\t{}", freq, i as f64 / extent, power)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Radial dispersion: power binned by index-space distance from the
/// spectral origin.
///
/// Same frequency range and block framing as [`dispersion_directional`].
/// Every sample at spatial index `(x, y, z)` lands in bin
/// `round(sqrt(x^2 + y^2 + z^2))`; all bins are emitted, empty ones
/// included. The wavevector column scales every bin by the x extent,
/// which is exact only when all three cell sizes agree; a known
/// limitation for non-cubic cells.
pub fn dispersion_radial<W: Write>(spectrum: &Spectrum, out: &mut W) -> Result<()> {
    let n = spectrum.geometry.frames;
    let extent = spectrum.geometry.domain_extent(SpatialAxis::X.index());
    let (_, kx, ky, kz) = spectrum.data.dim();
    let bins = radial_bin(kx - 1, ky - 1, kz - 1) + 1;

    for f in 1..n / 2 {
        let k = spectrum.data.index_axis(Axis(0), f);
        let freq = frequency(spectrum, f);
        let mut power = vec![0.0f64; bins];
        for ((x, y, z), c) in k.indexed_iter() {
            power[radial_bin(x, y, z)] += f64::from(c.norm_sqr());
        }
        for (i, p) in power.iter().enumerate() {
            writeln!(out, "{}\t{}\t{}", freq, i as f64 / extent, p)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn frequency(spectrum: &Spectrum, f: usize) -> f64 {
    f as f64 / spectrum.geometry.total_time
}

fn radial_bin(x: usize, y: usize, z: usize) -> usize {
    (((x * x + y * y + z * z) as f64).sqrt()).round() as usize
}
