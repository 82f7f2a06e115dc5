use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;
use crate::error::{Result, RouletteError};

// --- Helper: List Image Paths ---
// Every regular file directly inside `dir`, in the order the filesystem yields
// them. Decoding is left to the loader, so nothing is filtered by extension.
pub fn list_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_error = |source| RouletteError::ReadDir { path: dir.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        Err(RouletteError::NoImages(dir.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// EXIF orientation tag of a JPEG container, `1` (upright) when absent.
pub fn exif_orientation(file_bytes: &[u8]) -> u16 {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("No usable EXIF data: {}", e);
            return 1;
        }
    };

    match exif.get_field(Tag::Orientation, In::PRIMARY).map(|field| &field.value) {
        Some(Value::Short(values)) => values.first().copied().unwrap_or(1),
        _ => 1,
    }
}

fn extension_of(path: &Path) -> String {
    path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase()
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .map_err(|source| RouletteError::ReadImage { path: image_path.to_path_buf(), source })?;

    let extension = extension_of(image_path);
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let decode_error = |reason: String| RouletteError::DecodeImage { path: image_path.to_path_buf(), reason };

    // raylib picks its decoder from the extension hint
    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| decode_error(e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are shown as stored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        1 => {}
        other => warn!("Ignoring EXIF orientation {} for {:?}", other, image_path),
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| decode_error(e.to_string()))?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_lists_top_level_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"not really a png").unwrap();
        fs::write(dir.path().join("b.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"anything goes").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.png"), b"").unwrap();

        let names: HashSet<String> = list_image_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, HashSet::from(["a.png".into(), "b.jpg".into(), "notes.txt".into()]));
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("only_a_dir")).unwrap();
        assert!(matches!(list_image_paths(dir.path()), Err(RouletteError::NoImages(_))));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("images");
        let err = list_image_paths(&missing).unwrap_err();
        assert!(matches!(err, RouletteError::ReadDir { .. }));
        assert!(err.to_string().contains("images"));
    }

    // SOI, one APP1 Exif segment with a big-endian IFD0 holding only Orientation, EOI
    fn jpeg_with_orientation(orientation: u16) -> Vec<u8> {
        let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
        tiff.extend_from_slice(&[0x00, 0x01]);
        tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0x00, 0x00]);
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(&payload);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    #[test]
    fn test_reads_orientation_from_exif() {
        assert_eq!(exif_orientation(&jpeg_with_orientation(6)), 6);
        assert_eq!(exif_orientation(&jpeg_with_orientation(3)), 3);
        assert_eq!(exif_orientation(&jpeg_with_orientation(8)), 8);
        assert_eq!(exif_orientation(&jpeg_with_orientation(1)), 1);
    }

    #[test]
    fn test_orientation_defaults_to_upright() {
        assert_eq!(exif_orientation(b""), 1);
        assert_eq!(exif_orientation(b"\x89PNG\r\n\x1a\n"), 1);
        assert_eq!(exif_orientation(&[0xFF, 0xD8, 0xFF, 0xD9]), 1);
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension_of(Path::new("photo.JPG")), "jpg");
        assert_eq!(extension_of(Path::new("README")), "");
    }
}
