//! Command-line driver: frame dumps in, five spectral diagrams out.
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use magspec::output::{self, DiagramWriter};
use magspec::reduce::{dispersion_directional, dispersion_radial, frequency_spectrum, SpatialAxis};
use magspec::series::{apply_window, assemble};
use magspec::spectrum::{remove_dc, transform};
use magspec::{CrcMode, Frame};

/// Extract dispersion relations from micromagnetic frame dumps.
///
/// Input files are consumed in the order given; the command-line order is
/// the time order. Diagrams are written to the working directory,
/// overwriting existing files.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Frame dump files, one per time step, in time order
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Do not verify frame checksums
    #[arg(long)]
    skip_crc: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
    let args = Args::parse();
    let mode = if args.skip_crc {
        CrcMode::Skip
    } else {
        CrcMode::Verify
    };

    let mut series = assemble(args.frames.iter().map(|path| Frame::from_file(path, mode)))?;
    log::info!("windowing...");
    apply_window(&mut series);
    log::info!("FFT...");
    let mut spectrum = transform(series);
    remove_dc(&mut spectrum);

    write_diagram(output::FREQUENCY_SPECTRUM, |out| {
        frequency_spectrum(&spectrum, out)
    })?;
    write_diagram(output::DISPERSION_X, |out| {
        dispersion_directional(&spectrum, SpatialAxis::X, out)
    })?;
    write_diagram(output::DISPERSION_Y, |out| {
        dispersion_directional(&spectrum, SpatialAxis::Y, out)
    })?;
    write_diagram(output::DISPERSION_Z, |out| {
        dispersion_directional(&spectrum, SpatialAxis::Z, out)
    })?;
    write_diagram(output::DISPERSION, |out| dispersion_radial(&spectrum, out))?;

    Ok(())
}

fn write_diagram<F>(name: &str, emit: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut DiagramWriter) -> magspec::Result<()>,
{
    log::info!("{name}");
    let run = || -> magspec::Result<()> {
        let mut out = DiagramWriter::create(name)?;
        emit(&mut out)?;
        out.commit()
    };
    run().with_context(|| format!("writing {name}"))
}
