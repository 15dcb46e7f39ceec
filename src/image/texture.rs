use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::{GrayImage, RgbImage};

pub fn rgb_to_color_image(image: &RgbImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgb(size, image.as_raw())
}

pub fn gray_to_color_image(image: &GrayImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_gray(size, image.as_raw())
}

/// GPU texture mirroring either the uploaded image or the latest edge map.
pub struct ImageTexture {
    pub size: [usize; 2],
    pub texture: TextureHandle,
}

impl ImageTexture {
    fn upload(ctx: &Context, name: &str, pixels: ColorImage) -> Self {
        let size = pixels.size;
        let texture = ctx.load_texture(name, pixels, TextureOptions::LINEAR);
        Self { size, texture }
    }

    pub fn from_rgb(ctx: &Context, name: &str, image: &RgbImage) -> Self {
        Self::upload(ctx, name, rgb_to_color_image(image))
    }

    pub fn from_gray(ctx: &Context, name: &str, image: &GrayImage) -> Self {
        Self::upload(ctx, name, gray_to_color_image(image))
    }

    /// Swap in a new edge map, reusing the texture slot.
    pub fn replace_gray(&mut self, image: &GrayImage) {
        let pixels = gray_to_color_image(image);
        self.size = pixels.size;
        self.texture.set(pixels, TextureOptions::LINEAR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;
    use image::{Luma, Rgb};

    #[test]
    fn rgb_pixels_keep_order() {
        let img = RgbImage::from_fn(2, 1, |x, _| Rgb([if x == 0 { 255 } else { 0 }, 0, 9]));
        let color = rgb_to_color_image(&img);
        assert_eq!(color.size, [2, 1]);
        assert_eq!(color.pixels[0], Color32::from_rgb(255, 0, 9));
        assert_eq!(color.pixels[1], Color32::from_rgb(0, 0, 9));
    }

    #[test]
    fn gray_maps_to_equal_channels() {
        let img = GrayImage::from_pixel(3, 2, Luma([200]));
        let color = gray_to_color_image(&img);
        assert_eq!(color.size, [3, 2]);
        assert!(color.pixels.iter().all(|c| *c == Color32::from_gray(200)));
    }

    #[test]
    fn replacing_edge_map_updates_size() {
        let ctx = Context::default();
        let mut tex = ImageTexture::from_gray(&ctx, "edges", &GrayImage::new(4, 4));
        assert_eq!(tex.size, [4, 4]);
        tex.replace_gray(&GrayImage::new(6, 2));
        assert_eq!(tex.size, [6, 2]);
        assert_eq!(tex.texture.size(), [6, 2]);
    }
}
