//! Mock dataset generator
//!
//! Produces a small `identity/image` tree of synthetic face pictures for
//! exercising the exporter without downloading a real dataset. Output is
//! deterministic for a given seed.

use crate::error::{ExportError, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// People generated when no list is configured
pub const DEFAULT_PEOPLE: [&str; 8] = [
    "Zhang_San",
    "Li_Si",
    "Wang_Wu",
    "Zhao_Liu",
    "Qian_Qi",
    "Sun_Ba",
    "Zhou_Jiu",
    "Wu_Shi",
];

pub const DEFAULT_SEED: u64 = 0x5EED_F00D;

const README_FILE_NAME: &str = "README.txt";
const MIN_SIDE: u32 = 64;

const SKIN: Rgb<u8> = Rgb([255, 224, 189]);
const EYE: Rgb<u8> = Rgb([0, 0, 0]);
const NOSE: Rgb<u8> = Rgb([165, 42, 42]);
const MOUTH: Rgb<u8> = Rgb([255, 0, 0]);
const LABEL: Rgb<u8> = Rgb([0, 0, 255]);

/// Settings for one generated tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDatasetConfig {
    pub root: PathBuf,
    pub people: Vec<String>,
    /// Fewest photos per person (default: 3)
    pub min_photos: usize,
    /// Most photos per person (default: 5)
    pub max_photos: usize,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    /// Stamp `<name>_<k>` in the top-left corner
    pub label: bool,
}

impl MockDatasetConfig {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            people: DEFAULT_PEOPLE.iter().map(|name| (*name).to_string()).collect(),
            min_photos: 3,
            max_photos: 5,
            width: 250,
            height: 250,
            seed: DEFAULT_SEED,
            label: true,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_people<I, S>(mut self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.people = people.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_photo_range(mut self, min_photos: usize, max_photos: usize) -> Self {
        self.min_photos = min_photos;
        self.max_photos = max_photos;
        self
    }

    /// Validate the generator settings
    ///
    /// # Errors
    /// - Empty people list, empty names or names containing path separators
    /// - `min_photos` greater than `max_photos`
    /// - Pictures smaller than 64x64
    pub fn validate(&self) -> Result<()> {
        if self.people.is_empty() {
            return Err(ExportError::invalid_config("mock dataset needs at least one person"));
        }
        for name in &self.people {
            if name.trim().is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ExportError::invalid_config(format!(
                    "invalid mock person name: {name:?}"
                )));
            }
        }
        if self.min_photos > self.max_photos {
            return Err(ExportError::invalid_config(format!(
                "min_photos ({}) exceeds max_photos ({})",
                self.min_photos, self.max_photos
            )));
        }
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(ExportError::invalid_config(format!(
                "mock pictures must be at least {MIN_SIDE}x{MIN_SIDE}"
            )));
        }
        Ok(())
    }
}

/// One generated person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPerson {
    pub name: String,
    pub photos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDatasetSummary {
    pub root: PathBuf,
    pub people: Vec<MockPerson>,
    pub total_photos: usize,
    pub readme_path: PathBuf,
}

pub struct MockDataset {
    config: MockDatasetConfig,
}

impl MockDataset {
    #[must_use]
    pub fn new(config: MockDatasetConfig) -> Self {
        Self { config }
    }

    /// Write the tree below the configured root
    ///
    /// Existing files with the same names are overwritten.
    ///
    /// # Errors
    /// Returns [`ExportError::InvalidConfig`] for bad settings,
    /// [`ExportError::Io`] when directories cannot be created and
    /// [`ExportError::Image`] when a picture cannot be encoded.
    pub fn generate(&self) -> Result<MockDatasetSummary> {
        let config = &self.config;
        config.validate()?;
        let span = tracing::info_span!("generate_mock", root = %config.root.display());
        let _guard = span.enter();

        fs::create_dir_all(&config.root)
            .map_err(|e| ExportError::file_io_error("create mock dataset root", &config.root, &e))?;

        let mut rng = XorShift64::new(config.seed);
        let mut people = Vec::with_capacity(config.people.len());
        for name in &config.people {
            let person_dir = config.root.join(name);
            fs::create_dir_all(&person_dir)
                .map_err(|e| ExportError::file_io_error("create person directory", &person_dir, &e))?;

            let photos = rng.next_in_range(config.min_photos, config.max_photos);
            for k in 1..=photos {
                let stem = format!("{name}_{k}");
                let picture = self.render(&mut rng, &stem);
                let path = person_dir.join(format!("{stem}.jpg"));
                picture.save_with_format(&path, ImageFormat::Jpeg)?;
                tracing::debug!(path = %path.display(), "Wrote mock picture");
            }
            tracing::info!(person = %name, photos, "Generated mock person");
            people.push(MockPerson {
                name: name.clone(),
                photos,
            });
        }

        let total_photos = people.iter().map(|p| p.photos).sum();
        let readme_path = config.root.join(README_FILE_NAME);
        fs::write(&readme_path, readme_text(&people, total_photos))
            .map_err(|e| ExportError::file_io_error("write mock README", &readme_path, &e))?;

        tracing::info!(
            people = people.len(),
            total_photos,
            "Mock dataset created"
        );
        Ok(MockDatasetSummary {
            root: config.root.clone(),
            people,
            total_photos,
            readme_path,
        })
    }

    fn render(&self, rng: &mut XorShift64, label: &str) -> RgbImage {
        let (w, h) = (self.config.width, self.config.height);
        let background = Rgb([rng.next_channel(), rng.next_channel(), rng.next_channel()]);
        let mut picture = RgbImage::from_pixel(w, h, background);

        let fx = |f: f32| (f * w as f32) as i64;
        let fy = |f: f32| (f * h as f32) as i64;

        fill_ellipse(&mut picture, (fx(0.2), fy(0.2)), (fx(0.8), fy(0.8)), SKIN);
        fill_ellipse(&mut picture, (fx(0.32), fy(0.4)), (fx(0.4), fy(0.48)), EYE);
        fill_ellipse(&mut picture, (fx(0.6), fy(0.4)), (fx(0.68), fy(0.48)), EYE);
        for dx in 0..2 {
            for y in fy(0.52)..=fy(0.64) {
                plot(&mut picture, fx(0.5) + dx, y, NOSE);
            }
        }
        lower_arc(&mut picture, (fx(0.36), fy(0.64)), (fx(0.64), fy(0.72)), MOUTH);

        if self.config.label {
            if let Err(e) = draw_label(&mut picture, 10, 10, label, LABEL) {
                tracing::debug!(label, error = %e, "Label overlay skipped");
            }
        }
        picture
    }
}

fn readme_text(people: &[MockPerson], total_photos: usize) -> String {
    let mut text = String::from("Mock face dataset\n=================\n\n");
    text.push_str(&format!(
        "Synthetic faces for exercising the importer, {} people:\n\n",
        people.len()
    ));
    for person in people {
        text.push_str(&format!("- {} ({} photos)\n", person.name, person.photos));
    }
    text.push_str(&format!("\n{total_photos} photos in total.\n\n"));
    text.push_str("These pictures are simplified drawings, not real faces.\n");
    text
}

/// Deterministic xorshift64 generator
#[derive(Debug, Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // zero is a fixed point
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        let span = (high - low) as u64 + 1;
        low + (self.next_u64() % span) as usize
    }

    fn next_channel(&mut self) -> u8 {
        self.next_in_range(200, 255) as u8
    }
}

fn plot(picture: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < picture.width() && y < picture.height() {
        picture.put_pixel(x, y, color);
    }
}

fn fill_ellipse(picture: &mut RgbImage, top_left: (i64, i64), bottom_right: (i64, i64), color: Rgb<u8>) {
    let cx = (top_left.0 + bottom_right.0) as f32 / 2.0;
    let cy = (top_left.1 + bottom_right.1) as f32 / 2.0;
    let rx = ((bottom_right.0 - top_left.0) as f32 / 2.0).max(0.5);
    let ry = ((bottom_right.1 - top_left.1) as f32 / 2.0).max(0.5);

    for y in top_left.1..=bottom_right.1 {
        for x in top_left.0..=bottom_right.0 {
            let nx = (x as f32 - cx) / rx;
            let ny = (y as f32 - cy) / ry;
            if nx * nx + ny * ny <= 1.0 {
                plot(picture, x, y, color);
            }
        }
    }
}

/// Two-pixel-wide arc along the lower half of the bounding ellipse
fn lower_arc(picture: &mut RgbImage, top_left: (i64, i64), bottom_right: (i64, i64), color: Rgb<u8>) {
    let cx = (top_left.0 + bottom_right.0) as f32 / 2.0;
    let cy = (top_left.1 + bottom_right.1) as f32 / 2.0;
    let rx = (bottom_right.0 - top_left.0) as f32 / 2.0;
    let ry = (bottom_right.1 - top_left.1) as f32 / 2.0;

    for step in 0..=360 {
        let angle = (step as f32 / 2.0).to_radians();
        let x = (cx + rx * angle.cos()).round() as i64;
        let y = (cy + ry * angle.sin()).round() as i64;
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            plot(picture, x + dx, y + dy, color);
        }
    }
}

/// Label overlay failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("no bitmap glyph for {0:?}")]
    UnsupportedGlyph(char),
}

const GLYPH_WIDTH: i64 = 5;
const GLYPH_ADVANCE: i64 = 6;

/// Draw `text` with the built-in 5x7 font, top-left corner at (`x`, `y`)
///
/// The whole label is checked before any pixel changes, so a failure leaves
/// the picture untouched. Pixels outside the picture are clipped.
///
/// # Errors
/// [`OverlayError::UnsupportedGlyph`] for characters outside `A-Z`, `a-z`,
/// `0-9`, `_`, `-` and space.
pub fn draw_label(
    picture: &mut RgbImage,
    x: i64,
    y: i64,
    text: &str,
    color: Rgb<u8>,
) -> std::result::Result<(), OverlayError> {
    let glyphs = text
        .chars()
        .map(|c| glyph(c).ok_or(OverlayError::UnsupportedGlyph(c)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (index, rows) in glyphs.iter().enumerate() {
        let origin_x = x + index as i64 * GLYPH_ADVANCE;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x10 >> column) != 0 {
                    plot(picture, origin_x + column, y + row as i64, color);
                }
            }
        }
    }
    Ok(())
}

fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use image::GenericImageView;
    use tempfile::tempdir;

    fn small_config(root: &Path) -> MockDatasetConfig {
        MockDatasetConfig::new(root).with_people(["Ann_Lee", "Bo_Chen", "Cy_Park"])
    }

    #[test]
    fn photo_counts_stay_in_range() {
        let dir = tempdir().unwrap();
        let summary = MockDataset::new(small_config(dir.path())).generate().unwrap();

        assert_eq!(summary.people.len(), 3);
        for person in &summary.people {
            assert!((3..=5).contains(&person.photos), "{person:?}");
            let on_disk = fs::read_dir(dir.path().join(&person.name)).unwrap().count();
            assert_eq!(on_disk, person.photos);
        }
        assert_eq!(
            summary.total_photos,
            summary.people.iter().map(|p| p.photos).sum::<usize>()
        );
        assert!(summary.readme_path.is_file());
    }

    #[test]
    fn same_seed_same_tree() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let a = MockDataset::new(small_config(first.path()).with_seed(42)).generate().unwrap();
        let b = MockDataset::new(small_config(second.path()).with_seed(42)).generate().unwrap();

        assert_eq!(a.people, b.people);
        let picture = Path::new("Ann_Lee").join("Ann_Lee_1.jpg");
        assert_eq!(
            fs::read(first.path().join(&picture)).unwrap(),
            fs::read(second.path().join(&picture)).unwrap()
        );
    }

    #[test]
    fn generated_tree_scans_back() {
        let dir = tempdir().unwrap();
        let summary = MockDataset::new(small_config(dir.path())).generate().unwrap();

        let scanned = scan(dir.path()).unwrap();

        let names: Vec<&str> = scanned.iter().map(|p| p.directory_name()).collect();
        assert_eq!(names, vec!["Ann_Lee", "Bo_Chen", "Cy_Park"]);
        for (entry, person) in scanned.iter().zip(&summary.people) {
            assert_eq!(entry.image_count(), person.photos);
        }
    }

    #[test]
    fn pictures_have_configured_size() {
        let dir = tempdir().unwrap();
        let config = small_config(dir.path()).with_photo_range(1, 1);
        MockDataset::new(config).generate().unwrap();

        let picture = image::open(dir.path().join("Bo_Chen").join("Bo_Chen_1.jpg")).unwrap();
        assert_eq!(picture.dimensions(), (250, 250));
    }

    #[test]
    fn non_ascii_names_generate_unlabeled() {
        let dir = tempdir().unwrap();
        let config = MockDatasetConfig::new(dir.path())
            .with_people(["张三"])
            .with_photo_range(2, 2);

        let summary = MockDataset::new(config).generate().unwrap();

        assert_eq!(summary.total_photos, 2);
        assert!(dir.path().join("张三").join("张三_2.jpg").is_file());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let dir = tempdir().unwrap();
        let reversed = small_config(dir.path()).with_photo_range(5, 3);
        assert!(matches!(
            MockDataset::new(reversed).generate(),
            Err(ExportError::InvalidConfig(_))
        ));
        let traversal = MockDatasetConfig::new(dir.path()).with_people(["../escape"]);
        assert!(traversal.validate().is_err());
        let nobody = MockDatasetConfig::new(dir.path()).with_people(Vec::<String>::new());
        assert!(nobody.validate().is_err());
    }

    #[test]
    fn label_draws_supported_text() {
        let mut picture = RgbImage::from_pixel(80, 20, Rgb([255, 255, 255]));
        draw_label(&mut picture, 1, 1, "Li_Si_3", LABEL).unwrap();
        assert!(picture.pixels().any(|p| *p == LABEL));
    }

    #[test]
    fn label_rejects_unknown_glyph_without_drawing() {
        let mut picture = RgbImage::from_pixel(80, 20, Rgb([255, 255, 255]));
        let result = draw_label(&mut picture, 1, 1, "A张", LABEL);

        assert_eq!(result, Err(OverlayError::UnsupportedGlyph('张')));
        assert!(picture.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn xorshift_range_is_inclusive() {
        let mut rng = XorShift64::new(0);
        let draws: Vec<usize> = (0..200).map(|_| rng.next_in_range(3, 5)).collect();
        assert!(draws.iter().all(|d| (3..=5).contains(d)));
        assert!(draws.contains(&3) && draws.contains(&5));
    }
}
