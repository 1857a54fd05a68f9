//! End-to-end pipeline tests: frames in, diagram text out.
use magspec::{
    apply_window, assemble, dispersion_directional, dispersion_radial, frequency_spectrum,
    remove_dc, transform, CrcMode, Frame, SpatialAxis, Spectrum,
};
use ndarray::Array3;

/// Builds `n` frames on `mesh`, 1 ps apart, sampling `field(t, x, y, z)`.
fn make_frames<F>(
    n: usize,
    mesh: [usize; 3],
    step: [f64; 3],
    field: F,
) -> Vec<magspec::Result<Frame>>
where
    F: Fn(usize, usize, usize, usize) -> f32,
{
    (0..n)
        .map(|t| {
            let tensor =
                Array3::from_shape_fn((mesh[0], mesh[1], mesh[2]), |(x, y, z)| field(t, x, y, z));
            Ok(Frame::new(mesh, step, (t + 1) as f64 * 1e-12, vec![tensor]))
        })
        .collect()
}

fn records(text: &str) -> Vec<Vec<f64>> {
    text.lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.split('\t').map(|v| v.parse().unwrap()).collect())
        .collect()
}

fn blank_lines(text: &str) -> usize {
    text.lines().filter(|l| l.is_empty()).count()
}

fn reduce_to_string<F>(spectrum: &Spectrum, reducer: F) -> String
where
    F: FnOnce(&Spectrum, &mut Vec<u8>) -> magspec::Result<()>,
{
    let mut buf = Vec::new();
    reducer(spectrum, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// A field constant in time and space puts all energy in the DC bin;
/// once that bin is suppressed, every emitted power is numerically zero.
#[test]
fn constant_field_yields_silent_diagrams() {
    let frames = make_frames(4, [2, 2, 2], [1e-9; 3], |_, _, _, _| 3.5);
    let mut spectrum = transform(assemble(frames).unwrap());
    remove_dc(&mut spectrum);

    let global = reduce_to_string(&spectrum, |s, o| frequency_spectrum(s, o));
    for r in records(&global) {
        assert!(r[1].abs() < 1e-2, "residual power {}", r[1]);
    }
    for axis in [SpatialAxis::X, SpatialAxis::Y, SpatialAxis::Z] {
        let text = reduce_to_string(&spectrum, |s, o| dispersion_directional(s, axis, o));
        for r in records(&text) {
            assert!(r[2].abs() < 1e-2);
        }
    }
    let radial = reduce_to_string(&spectrum, |s, o| dispersion_radial(s, o));
    for r in records(&radial) {
        assert!(r[2].abs() < 1e-2);
    }
}

/// A single temporal sinusoid with uniform spatial phase shows up as an
/// isolated frequency peak concentrated at wavevector zero.
#[test]
fn single_mode_peaks_at_its_frequency() {
    let (n, f0) = (8, 2usize);
    let frames = make_frames(n, [4, 4, 4], [1e-9; 3], |t, _, _, _| {
        (2.0 * std::f32::consts::PI * f0 as f32 * t as f32 / 8.0).sin()
    });
    let mut spectrum = transform(assemble(frames).unwrap());
    remove_dc(&mut spectrum);
    let total_time = spectrum.geometry.total_time;

    let global = records(&reduce_to_string(&spectrum, |s, o| frequency_spectrum(s, o)));
    assert_eq!(global.len(), n - 1);
    let peak: f64 = global
        .iter()
        .map(|r| r[1])
        .fold(0.0, f64::max);
    assert!(peak > 1.0);
    for r in &global {
        // The peak sits at f0 and at its conjugate mirror n - f0.
        let f = (r[0] * total_time).round() as usize;
        if f == f0 || f == n - f0 {
            assert!((r[1] - peak).abs() < 1e-3 * peak, "f {} power {}", f, r[1]);
        } else {
            assert!(r[1] < 1e-3 * peak, "f {} power {}", f, r[1]);
        }
    }

    for axis in [SpatialAxis::X, SpatialAxis::Y, SpatialAxis::Z] {
        let text = reduce_to_string(&spectrum, |s, o| dispersion_directional(s, axis, o));
        for r in records(&text) {
            let f = (r[0] * total_time).round() as usize;
            if f == f0 && r[1] == 0.0 {
                assert!((r[2] - peak).abs() < 1e-3 * peak);
            } else {
                assert!(r[2] < 1e-3 * peak);
            }
        }
    }
}

/// Dispersion diagrams contain exactly N/2 - 1 blank-line-terminated
/// blocks, and the global spectrum N - 1 plain records.
#[test]
fn diagram_framing_matches_frame_count() {
    for n in [4usize, 8, 9] {
        let frames = make_frames(n, [2, 3, 4], [1e-9; 3], |t, x, y, z| {
            ((t + x + 2 * y + 3 * z) as f32).cos()
        });
        let mut series = assemble(frames).unwrap();
        apply_window(&mut series);
        let mut spectrum = transform(series);
        remove_dc(&mut spectrum);

        let global = reduce_to_string(&spectrum, |s, o| frequency_spectrum(s, o));
        assert_eq!(records(&global).len(), n - 1);
        assert_eq!(blank_lines(&global), 0);

        for axis in [SpatialAxis::X, SpatialAxis::Y, SpatialAxis::Z] {
            let text = reduce_to_string(&spectrum, |s, o| dispersion_directional(s, axis, o));
            assert_eq!(blank_lines(&text), n / 2 - 1, "axis {:?}, n {}", axis, n);
        }
        let radial = reduce_to_string(&spectrum, |s, o| dispersion_radial(s, o));
        assert_eq!(blank_lines(&radial), n / 2 - 1);
    }
}

/// The directional wavevector column is the spectral index over the
/// physical domain extent of that axis; the radial column reuses the x
/// extent for every bin.
#[test]
fn wavevector_columns_scale_by_domain_extent() {
    let n = 6;
    let step = [1e-9, 2e-9, 4e-9];
    let mesh = [4, 4, 4];
    let frames = make_frames(n, mesh, step, |t, x, _, _| ((t * 5 + x) as f32).sin());
    let mut series = assemble(frames).unwrap();
    apply_window(&mut series);
    let mut spectrum = transform(series);
    remove_dc(&mut spectrum);

    for axis in [SpatialAxis::X, SpatialAxis::Y, SpatialAxis::Z] {
        let extent = spectrum.geometry.domain_extent(axis.index());
        let text = reduce_to_string(&spectrum, |s, o| dispersion_directional(s, axis, o));
        let recs = records(&text);
        let first_freq = recs[0][0];
        for (i, r) in recs.iter().take_while(|r| r[0] == first_freq).enumerate() {
            assert_eq!(r[1], i as f64 / extent);
        }
    }

    let extent_x = spectrum.geometry.domain_extent(0);
    let radial = reduce_to_string(&spectrum, |s, o| dispersion_radial(s, o));
    let first = &records(&radial)[1];
    assert_eq!(first[1], 1.0 / extent_x);
}

/// Frames survive the trip through dump files on disk, checksum and all.
#[test]
fn pipeline_runs_from_dump_files() {
    let dir = std::env::temp_dir().join(format!("magspec-pipeline-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let n = 4;
    let frames = make_frames(n, [2, 2, 2], [1e-9; 3], |t, x, y, z| {
        (t + x + y + z) as f32
    });
    let mut paths = Vec::new();
    for (t, frame) in frames.into_iter().enumerate() {
        let path = dir.join(format!("m{:06}.dump", t));
        frame.unwrap().to_file(&path).unwrap();
        paths.push(path);
    }

    let series = assemble(paths.iter().map(|p| Frame::from_file(p, CrcMode::Verify))).unwrap();
    assert_eq!(series.data.shape(), [n, 2, 2, 2]);
    assert_eq!(series.data[[3, 1, 1, 1]], 6.0);

    let missing = dir.join("missing.dump");
    let err = Frame::from_file(&missing, CrcMode::Verify).unwrap_err();
    assert!(err.to_string().contains("missing.dump"));

    std::fs::remove_dir_all(&dir).unwrap();
}
