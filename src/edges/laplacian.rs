use image::GrayImage;

use super::convolve::{Border, filter_3x3};
use super::gray::{convert_scale_abs, plane_size, to_plane};
use super::params::KernelSize;
use super::sobel::sobel_response;

const LAPLACIAN_4: [[f32; 3]; 3] = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];
const LAPLACIAN_3: [[f32; 3]; 3] = [[2.0, 0.0, 2.0], [0.0, -8.0, 0.0], [2.0, 0.0, 2.0]];

/// Second-derivative edge response rescaled to bytes via `|v|`.
///
/// Apertures 1 and 3 use fixed 3x3 kernels; larger apertures add the separable
/// second derivatives along x and y.
pub fn laplacian(gray: &GrayImage, size: KernelSize) -> GrayImage {
    let response = match size {
        KernelSize::One | KernelSize::Three => {
            let kernel = if size == KernelSize::One {
                &LAPLACIAN_4
            } else {
                &LAPLACIAN_3
            };
            filter_3x3(&to_plane(gray), plane_size(gray), kernel, Border::Reflect101)
        }
        KernelSize::Five | KernelSize::Seven => {
            let d2x = sobel_response(gray, 2, 0, size, Border::Reflect101);
            let d2y = sobel_response(gray, 0, 2, size, Border::Reflect101);
            d2x.iter().zip(&d2y).map(|(a, b)| a + b).collect()
        }
    };
    convert_scale_abs(&response, gray.width(), gray.height())
}
