use image::{GrayImage, RgbImage};

// BT.601 luma weights scaled by 2^14.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Convert an RGB grid to 8-bit luma.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let luma: Vec<u8> = image
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            let y = (u32::from(r) * R_WEIGHT
                + u32::from(g) * G_WEIGHT
                + u32::from(b) * B_WEIGHT
                + (1 << (SHIFT - 1)))
                >> SHIFT;
            u8::try_from(y).unwrap_or(u8::MAX)
        })
        .collect();
    GrayImage::from_raw(width, height, luma).unwrap_or_else(|| GrayImage::new(width, height))
}

/// Widen a luma image into an `f32` plane.
pub fn to_plane(image: &GrayImage) -> Vec<f32> {
    image.as_raw().iter().copied().map(f32::from).collect()
}

pub fn plane_size(image: &GrayImage) -> [usize; 2] {
    let (w, h) = image.dimensions();
    [w as usize, h as usize]
}

/// Absolute value, rounded half to even and saturated into a byte.
pub fn saturate_abs(value: f32) -> u8 {
    let v = value.abs().round_ties_even();
    if v.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        v.min(f32::from(u8::MAX)) as u8
    }
}

/// Round half to even and clamp into `0..=255`.
pub fn saturate(value: f32) -> u8 {
    let v = value.round_ties_even();
    if v.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        v.clamp(0.0, f32::from(u8::MAX)) as u8
    }
}

/// Map a signed filter response to a displayable byte image via `|v|`.
pub fn convert_scale_abs(plane: &[f32], width: u32, height: u32) -> GrayImage {
    let bytes: Vec<u8> = plane.iter().copied().map(saturate_abs).collect();
    GrayImage::from_raw(width, height, bytes).unwrap_or_else(|| GrayImage::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn gray_pixels_stay_unchanged() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([128, 128, 128]));
        img.put_pixel(2, 0, Rgb([255, 255, 255]));
        assert_eq!(to_grayscale(&img).as_raw(), &vec![0, 128, 255]);
    }

    #[test]
    fn primaries_use_bt601_weights() {
        let mut img = RgbImage::new(4, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));
        img.put_pixel(3, 0, Rgb([10, 200, 30]));
        assert_eq!(to_grayscale(&img).as_raw(), &vec![76, 150, 29, 124]);
    }

    #[test]
    fn saturate_abs_rounds_half_to_even() {
        assert_eq!(saturate_abs(-2.5), 2);
        assert_eq!(saturate_abs(3.5), 4);
        assert_eq!(saturate_abs(-1000.0), 255);
        assert_eq!(saturate_abs(f32::NAN), 0);
    }

    #[test]
    fn convert_scale_abs_keeps_dimensions() {
        let out = convert_scale_abs(&[-1.0, 2.0, -300.0, 0.4, 7.6, -0.6], 3, 2);
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.as_raw(), &vec![1, 2, 255, 0, 8, 1]);
    }
}
