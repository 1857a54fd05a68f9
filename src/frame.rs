//! Frame data model and the binary frame-dump format.
//!
//! A frame is one snapshot of the simulation: mesh geometry, a timestamp
//! and one or more scalar component tensors on that mesh. On disk a frame
//! is a little-endian record:
//!
//! ```text
//! magic      8 bytes   "#magspec"
//! mesh size  3 x u64
//! mesh step  3 x f64   physical length per cell
//! time       f64       simulation timestamp
//! ncomp      u32       number of component tensors
//! payload    ncomp * nx*ny*nz x f32, component-major, z fastest
//! crc        u32       CRC-32 over header and payload
//! ```
//!
//! Checksum verification is optional so that partially written dumps can
//! still be inspected; the analysis pipeline verifies by default.
use crate::error::{Error, Result};
use ndarray::Array3;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic bytes opening every frame dump.
pub const MAGIC: &[u8; 8] = b"#magspec";

const HEADER_LEN: usize = 3 * 8 + 3 * 8 + 8 + 4;

/// Whether to verify the CRC-32 trailer when reading a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcMode {
    /// Verify the trailer and fail on mismatch.
    Verify,
    /// Read the trailer but ignore it.
    Skip,
}

/// One snapshot of the simulated field.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Number of cells along x, y, z.
    pub mesh_size: [usize; 3],
    /// Physical cell size along x, y, z.
    pub mesh_step: [f64; 3],
    /// Simulation time of this snapshot.
    pub time: f64,
    components: Vec<Array3<f32>>,
}

impl Frame {
    /// Builds a frame from its parts.
    ///
    /// # Panics
    /// Panics if a component's shape does not match `mesh_size`.
    #[must_use]
    pub fn new(
        mesh_size: [usize; 3],
        mesh_step: [f64; 3],
        time: f64,
        components: Vec<Array3<f32>>,
    ) -> Self {
        for c in &components {
            assert!(
                c.shape() == mesh_size.as_slice(),
                "component shape {:?} does not match mesh size {:?}",
                c.shape(),
                mesh_size
            );
        }
        Frame {
            mesh_size,
            mesh_step,
            time,
            components,
        }
    }

    /// All component tensors of this frame.
    #[must_use]
    pub fn components(&self) -> &[Array3<f32>] {
        &self.components
    }

    /// Reads one frame from `input`, verifying the checksum per `mode`.
    pub fn read<R: Read>(input: &mut R, mode: CrcMode) -> Result<Self> {
        let mut magic = [0u8; 8];
        input.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(Error::BadMagic);
        }

        let mut header = [0u8; HEADER_LEN];
        input.read_exact(&mut header)?;
        let mesh_size = [
            u64_at(&header, 0) as usize,
            u64_at(&header, 8) as usize,
            u64_at(&header, 16) as usize,
        ];
        let mesh_step = [f64_at(&header, 24), f64_at(&header, 32), f64_at(&header, 40)];
        let time = f64_at(&header, 48);
        let ncomp = u32_at(&header, 56) as usize;

        let cells = mesh_size[0]
            .checked_mul(mesh_size[1])
            .and_then(|c| c.checked_mul(mesh_size[2]))
            .ok_or(Error::OversizedPayload { mesh_size, ncomp })?;
        let payload_len = cells
            .checked_mul(ncomp)
            .and_then(|c| c.checked_mul(4))
            .ok_or(Error::OversizedPayload { mesh_size, ncomp })?;
        let mut payload = vec![0u8; payload_len];
        input.read_exact(&mut payload)?;

        let mut trailer = [0u8; 4];
        input.read_exact(&mut trailer)?;
        if mode == CrcMode::Verify {
            let stored = u32::from_le_bytes(trailer);
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(&header);
            hasher.update(&payload);
            let computed = hasher.finalize();
            if stored != computed {
                return Err(Error::ChecksumMismatch { stored, computed });
            }
        }

        let mut components = Vec::with_capacity(ncomp);
        for chunk in payload.chunks_exact(cells * 4) {
            let values: Vec<f32> = chunk
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes(b.try_into().expect("chunked to width 4")))
                .collect();
            let tensor = Array3::from_shape_vec((mesh_size[0], mesh_size[1], mesh_size[2]), values)
                .expect("payload length matches mesh size");
            components.push(tensor);
        }

        Ok(Frame {
            mesh_size,
            mesh_step,
            time,
            components,
        })
    }

    /// Writes this frame, including the CRC-32 trailer.
    pub fn write<W: Write>(&self, output: &mut W) -> Result<()> {
        let mut header = Vec::with_capacity(HEADER_LEN);
        for s in self.mesh_size {
            header.extend_from_slice(&(s as u64).to_le_bytes());
        }
        for s in self.mesh_step {
            header.extend_from_slice(&s.to_le_bytes());
        }
        header.extend_from_slice(&self.time.to_le_bytes());
        header.extend_from_slice(&(self.components.len() as u32).to_le_bytes());

        let cells = self.mesh_size[0] * self.mesh_size[1] * self.mesh_size[2];
        let mut payload = Vec::with_capacity(self.components.len() * cells * 4);
        for c in &self.components {
            for v in c.iter() {
                payload.extend_from_slice(&v.to_le_bytes());
            }
        }

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&header);
        hasher.update(&payload);
        let crc = hasher.finalize();

        output.write_all(MAGIC)?;
        output.write_all(&header)?;
        output.write_all(&payload)?;
        output.write_all(&crc.to_le_bytes())?;
        Ok(())
    }

    /// Reads the frame stored in `path`.
    ///
    /// Errors carry the path of the offending file.
    pub fn from_file<P: AsRef<Path>>(path: P, mode: CrcMode) -> Result<Self> {
        let path = path.as_ref();
        let read = || -> Result<Self> {
            let mut reader = BufReader::new(File::open(path)?);
            Frame::read(&mut reader, mode)
        };
        read().map_err(|source| Error::File {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Writes this frame to `path`, overwriting any existing file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn u64_at(buf: &[u8], at: usize) -> u64 {
    u64::from_le_bytes(buf[at..at + 8].try_into().expect("fixed-width field"))
}

fn u32_at(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(buf[at..at + 4].try_into().expect("fixed-width field"))
}

fn f64_at(buf: &[u8], at: usize) -> f64 {
    f64::from_le_bytes(buf[at..at + 8].try_into().expect("fixed-width field"))
}
