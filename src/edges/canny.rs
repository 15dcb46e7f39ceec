use image::GrayImage;

use super::convolve::{Border, for_each_row, separable_filter};
use super::gray::{plane_size, saturate, to_plane};
use super::kernels::gaussian_kernel;
use super::params::KernelSize;
use super::sobel::sobel_response;

/// `tan(22.5°)` in Q15.
const TAN_22_5_Q15: i64 = 13_573;

/// Gaussian smoothing with an odd aperture and explicit sigma (0 = derive from size).
pub fn gaussian_blur(gray: &GrayImage, size: KernelSize, sigma: f32) -> GrayImage {
    let kernel = gaussian_kernel(size, sigma);
    let blurred = separable_filter(
        &to_plane(gray),
        plane_size(gray),
        &kernel,
        &kernel,
        Border::Reflect101,
    );
    let bytes: Vec<u8> = blurred.into_iter().map(saturate).collect();
    GrayImage::from_raw(gray.width(), gray.height(), bytes)
        .unwrap_or_else(|| GrayImage::new(gray.width(), gray.height()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeClass {
    Suppressed,
    Weak,
    Strong,
}

struct Gradients {
    size: [usize; 2],
    gx: Vec<i32>,
    gy: Vec<i32>,
    magnitude: Vec<i32>,
}

impl Gradients {
    fn compute(gray: &GrayImage) -> Self {
        let to_int = |plane: Vec<f32>| -> Vec<i32> {
            #[allow(clippy::cast_possible_truncation)]
            plane.into_iter().map(|v| v.round() as i32).collect()
        };
        let gx = to_int(sobel_response(gray, 1, 0, KernelSize::Three, Border::Replicate));
        let gy = to_int(sobel_response(gray, 0, 1, KernelSize::Three, Border::Replicate));
        let magnitude = gx.iter().zip(&gy).map(|(a, b)| a.abs() + b.abs()).collect();
        Self {
            size: plane_size(gray),
            gx,
            gy,
            magnitude,
        }
    }

    /// Magnitude with zero outside the image.
    fn magnitude_at(&self, x: usize, y: usize, dx: isize, dy: isize) -> i32 {
        let [width, height] = self.size;
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            return 0;
        };
        if nx >= width || ny >= height {
            return 0;
        }
        self.magnitude[ny * width + nx]
    }

    /// Non-maximum suppression along the gradient direction, quantized to 45° sectors.
    fn is_local_max(&self, x: usize, y: usize) -> bool {
        let idx = y * self.size[0] + x;
        let m = self.magnitude[idx];
        let xs = self.gx[idx];
        let ys = self.gy[idx];
        let ax = i64::from(xs.abs());
        let ay = i64::from(ys.abs()) << 15;

        let tg22x = ax * TAN_22_5_Q15;
        if ay < tg22x {
            return m > self.magnitude_at(x, y, -1, 0) && m >= self.magnitude_at(x, y, 1, 0);
        }
        let tg67x = tg22x + (ax << 16);
        if ay > tg67x {
            return m > self.magnitude_at(x, y, 0, -1) && m >= self.magnitude_at(x, y, 0, 1);
        }
        let s: isize = if (xs < 0) == (ys < 0) { 1 } else { -1 };
        m > self.magnitude_at(x, y, -s, -1) && m > self.magnitude_at(x, y, s, 1)
    }
}

/// Canny edge detector on an already smoothed image.
///
/// Uses a 3x3 Sobel gradient with L1 magnitude. Thresholds are swapped when
/// `lower > upper`. The output holds only 0 and 255.
pub fn canny(gray: &GrayImage, lower: u8, upper: u8) -> GrayImage {
    let (low, high) = if lower > upper {
        (i32::from(upper), i32::from(lower))
    } else {
        (i32::from(lower), i32::from(upper))
    };
    let (width_u32, height_u32) = gray.dimensions();
    let gradients = Gradients::compute(gray);
    let [width, height] = gradients.size;
    if width == 0 || height == 0 {
        return GrayImage::new(width_u32, height_u32);
    }

    let mut classes = vec![EdgeClass::Suppressed; width * height];
    for_each_row(&mut classes, width, |y, row| {
        for (x, class) in row.iter_mut().enumerate() {
            let m = gradients.magnitude[y * width + x];
            if m <= low || !gradients.is_local_max(x, y) {
                continue;
            }
            *class = if m > high {
                EdgeClass::Strong
            } else {
                EdgeClass::Weak
            };
        }
    });

    let mut stack: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| (*c == EdgeClass::Strong).then_some(idx))
        .collect();
    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % width, idx / width);
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let n = ny * width + nx;
                if classes[n] == EdgeClass::Weak {
                    classes[n] = EdgeClass::Strong;
                    stack.push(n);
                }
            }
        }
    }

    let bytes: Vec<u8> = classes
        .into_iter()
        .map(|c| if c == EdgeClass::Strong { 255 } else { 0 })
        .collect();
    GrayImage::from_raw(width_u32, height_u32, bytes)
        .unwrap_or_else(|| GrayImage::new(width_u32, height_u32))
}
