// SPDX-License-Identifier: GPL-3.0-only

//! 3D color lookup tables
//!
//! LUT files are raw arrays of little-endian RGBA `f32` entries (16 bytes
//! each), laid out with red varying fastest, then green, then blue. The cube
//! edge length is derived from the entry count. [`LutCube::as_bytes`] exposes
//! the entries in native byte order for upload to a GPU buffer.
//!
//! The CPU sampler here is the reference path used for offline grading.

use crate::constants::storage;
use crate::errors::LutError;
use bytemuck::{Pod, Zeroable};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Names of the bundled color grading LUTs, in presentation order
pub const LUT_CATALOG: [&str; 64] = [
    "Arabica",
    "Ava",
    "Azrael",
    "BlueArchitecture",
    "BlueHour",
    "Bourbon",
    "Byers",
    "Chemical",
    "Clayton",
    "Clouseau",
    "Cobi",
    "ColdChrome",
    "Contrail",
    "CrispAutumn",
    "Cubicle",
    "DarkAndSomber",
    "Django",
    "Domingo",
    "Faded",
    "FastFilm",
    "Folger",
    "Fusion",
    "GoingForAWalk",
    "GoodMorning",
    "HardBoost",
    "Hyla",
    "Korben",
    "KToneVintage",
    "Lenox",
    "LongBeachMorning",
    "Lucky",
    "LushGreen",
    "MagicHour",
    "McKinnon",
    "Milo",
    "MoodyBlue",
    "MoodyStock",
    "Nah",
    "NaturalBoost",
    "Neon",
    "OnceUponATime",
    "OrangeAndBlue",
    "Paladin1875",
    "Pasadena",
    "Passing",
    "Pitaya",
    "Reeve",
    "Remy",
    "Serenity",
    "SmoothSailing",
    "SoftBlackAndWhite",
    "Sprocket",
    "Teigen",
    "Trent",
    "Tweed",
    "Undeniable",
    "Undeniable 2",
    "UrbanCowboy",
    "Vireo",
    "Waves",
    "WellSee",
    "YouCanDoIt",
    "Zed",
    "Zeke",
];

/// Check if a LUT name is part of the bundled catalog
pub fn is_catalog_lut(name: &str) -> bool {
    LUT_CATALOG.contains(&name)
}

/// Path of a catalog LUT inside `dir`
pub fn lut_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, storage::LUT_FILE_EXTENSION))
}

/// One RGBA entry of a LUT cube
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LutEntry {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

const ENTRY_SIZE: usize = std::mem::size_of::<LutEntry>();

/// A cubic color lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct LutCube {
    edge: usize,
    entries: Vec<LutEntry>,
}

impl LutCube {
    /// Parse a LUT from raw bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, LutError> {
        if data.is_empty() {
            return Err(LutError::Empty);
        }
        if data.len() % 4 != 0 {
            return Err(LutError::Misaligned(data.len()));
        }

        let edge = cube_edge(data.len() / ENTRY_SIZE);
        if edge == 0 || edge * edge * edge * ENTRY_SIZE != data.len() {
            return Err(LutError::SizeMismatch {
                len: data.len(),
                edge,
            });
        }

        let entries: Vec<LutEntry> = data.chunks_exact(ENTRY_SIZE).map(read_entry).collect();
        debug!(edge, entries = entries.len(), "Parsed LUT cube");
        Ok(Self { edge, entries })
    }

    /// Load a LUT file from disk
    pub fn load(path: &Path) -> Result<Self, LutError> {
        let data = std::fs::read(path)?;
        let cube = Self::from_bytes(&data)?;
        info!(path = %path.display(), edge = cube.edge, "Loaded LUT");
        Ok(cube)
    }

    /// Load a catalog LUT by name from `dir`
    pub fn load_named(dir: &Path, name: &str) -> Result<Self, LutError> {
        if !is_catalog_lut(name) {
            return Err(LutError::UnknownLut(name.to_string()));
        }
        Self::load(&lut_path(dir, name))
    }

    /// Identity cube with the given edge length (at least 2)
    pub fn identity(edge: usize) -> Self {
        let edge = edge.max(2);
        let scale = (edge - 1) as f32;
        let mut entries = Vec::with_capacity(edge * edge * edge);
        for b in 0..edge {
            for g in 0..edge {
                for r in 0..edge {
                    entries.push(LutEntry {
                        r: r as f32 / scale,
                        g: g as f32 / scale,
                        b: b as f32 / scale,
                        a: 1.0,
                    });
                }
            }
        }
        Self { edge, entries }
    }

    /// The neutral 2x2x2 cube used when no LUT is selected
    pub fn neutral() -> Self {
        Self::identity(2)
    }

    pub fn edge(&self) -> usize {
        self.edge
    }

    pub fn entries(&self) -> &[LutEntry] {
        &self.entries
    }

    /// Raw bytes in native byte order for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }

    fn entry(&self, r: usize, g: usize, b: usize) -> LutEntry {
        self.entries[r + g * self.edge + b * self.edge * self.edge]
    }

    /// Look up a color with trilinear interpolation
    ///
    /// Input components are clamped to `[0, 1]`.
    pub fn sample(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.edge == 1 {
            let e = self.entries[0];
            return [e.r, e.g, e.b];
        }

        let max_index = (self.edge - 1) as f32;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut frac = [0f32; 3];
        for i in 0..3 {
            let pos = rgb[i].clamp(0.0, 1.0) * max_index;
            let base = pos.floor();
            lo[i] = base as usize;
            hi[i] = (lo[i] + 1).min(self.edge - 1);
            frac[i] = pos - base;
        }

        let lerp = |a: LutEntry, b: LutEntry, t: f32| LutEntry {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        };

        let c00 = lerp(self.entry(lo[0], lo[1], lo[2]), self.entry(hi[0], lo[1], lo[2]), frac[0]);
        let c10 = lerp(self.entry(lo[0], hi[1], lo[2]), self.entry(hi[0], hi[1], lo[2]), frac[0]);
        let c01 = lerp(self.entry(lo[0], lo[1], hi[2]), self.entry(hi[0], lo[1], hi[2]), frac[0]);
        let c11 = lerp(self.entry(lo[0], hi[1], hi[2]), self.entry(hi[0], hi[1], hi[2]), frac[0]);
        let c0 = lerp(c00, c10, frac[1]);
        let c1 = lerp(c01, c11, frac[1]);
        let c = lerp(c0, c1, frac[2]);

        [c.r, c.g, c.b]
    }
}

fn read_entry(chunk: &[u8]) -> LutEntry {
    let channel = |i: usize| {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&chunk[i * 4..i * 4 + 4]);
        f32::from_le_bytes(bytes)
    };
    LutEntry {
        r: channel(0),
        g: channel(1),
        b: channel(2),
        a: channel(3),
    }
}

/// Edge length of a cube holding `entries` entries, truncated
fn cube_edge(entries: usize) -> usize {
    let mut edge = (entries as f64).cbrt() as usize;
    // cbrt may land just below an exact cube
    while (edge + 1).pow(3) <= entries {
        edge += 1;
    }
    edge
}

/// Apply a LUT to every pixel of an RGBA image in place (alpha is kept)
pub fn grade_image(image: &mut RgbaImage, lut: &LutCube) {
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let graded = lut.sample([
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ]);
        for (channel, value) in pixel.0.iter_mut().zip(graded) {
            *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
}

/// Grade an image file with a LUT file and write the result
pub fn grade_file(lut_file: &Path, input: &Path, output: &Path) -> Result<(), LutError> {
    let lut = LutCube::load(lut_file)?;
    let mut image = image::open(input)?.to_rgba8();
    grade_image(&mut image, &lut);
    image.save(output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        "Graded image"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_bytes(entries: &[LutEntry]) -> Vec<u8> {
        entries
            .iter()
            .flat_map(|e| [e.r, e.g, e.b, e.a])
            .flat_map(f32::to_le_bytes)
            .collect()
    }

    #[test]
    fn test_catalog_has_64_unique_names() {
        let mut names = LUT_CATALOG.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 64);
        assert!(is_catalog_lut("Undeniable 2"));
        assert!(!is_catalog_lut("undeniable"));
    }

    #[test]
    fn test_neutral_matches_identity_layout() {
        let neutral = LutCube::neutral();
        assert_eq!(neutral.edge(), 2);
        let expected = [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (0.0, 1.0, 1.0),
            (1.0, 1.0, 1.0),
        ];
        for (entry, (r, g, b)) in neutral.entries().iter().zip(expected) {
            assert_eq!((entry.r, entry.g, entry.b, entry.a), (r, g, b, 1.0));
        }
    }

    #[test]
    fn test_from_bytes_round_trips_layout() {
        let identity = LutCube::identity(4);
        let parsed = LutCube::from_bytes(&cube_bytes(identity.entries())).unwrap();
        assert_eq!(parsed, identity);
        assert_eq!(parsed.edge(), 4);
        assert_eq!(identity.as_bytes().len(), 64 * 16);
    }

    #[test]
    fn test_from_bytes_is_little_endian() {
        // 0.5 = 0x3F000000, 1.0 = 0x3F800000
        let half = [0x00, 0x00, 0x00, 0x3f];
        let one = [0x00, 0x00, 0x80, 0x3f];
        let mut data = Vec::new();
        for _ in 0..8 {
            data.extend_from_slice(&half);
            data.extend_from_slice(&[0u8; 4]);
            data.extend_from_slice(&one);
            data.extend_from_slice(&one);
        }

        let lut = LutCube::from_bytes(&data).unwrap();
        assert_eq!(lut.edge(), 2);
        assert_eq!(
            lut.entries()[0],
            LutEntry {
                r: 0.5,
                g: 0.0,
                b: 1.0,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_from_bytes_rejects_bad_lengths() {
        assert_eq!(LutCube::from_bytes(&[]), Err(LutError::Empty));
        assert_eq!(LutCube::from_bytes(&[0u8; 18]), Err(LutError::Misaligned(18)));
        // 9 entries is not a cube
        let data = cube_bytes(&[LutEntry::zeroed(); 9]);
        assert_eq!(
            LutCube::from_bytes(&data),
            Err(LutError::SizeMismatch { len: 144, edge: 2 })
        );
    }

    #[test]
    fn test_cube_edge_truncates() {
        assert_eq!(cube_edge(8), 2);
        assert_eq!(cube_edge(26), 2);
        assert_eq!(cube_edge(27), 3);
        assert_eq!(cube_edge(35937), 33);
        assert_eq!(cube_edge(64 * 64 * 64), 64);
    }

    #[test]
    fn test_identity_sample_is_passthrough() {
        let lut = LutCube::identity(17);
        for rgb in [[0.0, 0.0, 0.0], [0.25, 0.5, 0.75], [1.0, 1.0, 1.0], [0.33, 0.9, 0.1]] {
            let out = lut.sample(rgb);
            for i in 0..3 {
                assert!((out[i] - rgb[i]).abs() < 1e-5, "{:?} -> {:?}", rgb, out);
            }
        }
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let lut = LutCube::neutral();
        assert_eq!(lut.sample([-1.0, 2.0, 0.5]), [0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_sample_interpolates_inverted_cube() {
        let mut entries = LutCube::neutral().entries().to_vec();
        for e in &mut entries {
            e.r = 1.0 - e.r;
            e.g = 1.0 - e.g;
            e.b = 1.0 - e.b;
        }
        let lut = LutCube::from_bytes(&cube_bytes(&entries)).unwrap();
        let out = lut.sample([0.25, 0.5, 1.0]);
        assert!((out[0] - 0.75).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!(out[2].abs() < 1e-6);
    }

    #[test]
    fn test_grade_image_keeps_alpha() {
        let mut image = RgbaImage::from_pixel(2, 2, image::Rgba([10, 128, 250, 77]));
        grade_image(&mut image, &LutCube::identity(33));
        for pixel in image.pixels() {
            assert_eq!(pixel.0, [10, 128, 250, 77]);
        }
    }

    #[test]
    fn test_load_named_rejects_unknown() {
        let err = LutCube::load_named(Path::new("/nonexistent"), "NotALut").unwrap_err();
        assert_eq!(err, LutError::UnknownLut("NotALut".to_string()));
    }
}
