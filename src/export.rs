use anyhow::Context as _;
use image::{GrayImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::edges::EdgeAlgorithm;

/// Suggested name for a saved edge map, e.g. `canny_edges.png`.
pub fn download_file_name(algorithm: EdgeAlgorithm) -> String {
    format!("{}_edges.png", algorithm.file_stem())
}

/// Encode an edge map as a single-channel 8-bit PNG.
pub fn encode_png(edges: &GrayImage) -> anyhow::Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    edges
        .write_to(&mut out, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Failed to encode {}x{} edge map as PNG",
                edges.width(),
                edges.height()
            )
        })?;
    Ok(out.into_inner())
}

pub fn save_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

/// Expand a gray edge map into opaque RGBA, the layout clipboards expect.
pub fn gray_to_rgba(edges: &GrayImage) -> Vec<u8> {
    edges
        .as_raw()
        .iter()
        .flat_map(|&v| [v, v, v, u8::MAX])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn file_names_follow_algorithm() {
        assert_eq!(download_file_name(EdgeAlgorithm::Canny), "canny_edges.png");
        assert_eq!(download_file_name(EdgeAlgorithm::Sobel), "sobel_edges.png");
        assert_eq!(
            download_file_name(EdgeAlgorithm::Laplacian),
            "laplacian_edges.png"
        );
    }

    #[test]
    fn png_is_single_channel_and_lossless() {
        let edges = GrayImage::from_fn(7, 3, |x, y| Luma([if (x + y) % 2 == 0 { 255 } else { 0 }]));
        let bytes = encode_png(&edges).expect("encode");
        assert_eq!(image::guess_format(&bytes).expect("format"), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.to_luma8(), edges);
    }

    #[test]
    fn save_error_names_the_path() {
        let dir = std::env::temp_dir().join("edgevision-missing-dir-for-test");
        let path = dir.join("nested").join("out.png");
        let err = save_bytes(&path, b"x").expect_err("parent does not exist");
        assert!(format!("{err:#}").contains("out.png"));
    }

    #[test]
    fn save_round_trips_bytes() {
        let path = std::env::temp_dir().join(format!("edgevision-save-{}.png", std::process::id()));
        save_bytes(&path, b"edge bytes").expect("write");
        assert_eq!(std::fs::read(&path).expect("read back"), b"edge bytes");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rgba_expansion_is_opaque_gray() {
        let edges = GrayImage::from_raw(2, 1, vec![0, 255]).expect("buffer");
        assert_eq!(gray_to_rgba(&edges), vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }
}
