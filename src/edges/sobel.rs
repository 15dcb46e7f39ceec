use image::GrayImage;

use super::convolve::{Border, separable_filter};
use super::gray::{convert_scale_abs, plane_size, to_plane};
use super::kernels::derivative_kernel;
use super::params::{KernelSize, SobelDirection};

/// Raw Sobel response for the given derivative orders.
pub(super) fn sobel_response(
    gray: &GrayImage,
    dx: usize,
    dy: usize,
    size: KernelSize,
    border: Border,
) -> Vec<f32> {
    let kx = derivative_kernel(dx, size);
    let ky = derivative_kernel(dy, size);
    separable_filter(&to_plane(gray), plane_size(gray), &kx, &ky, border)
}

/// Directional Sobel gradient rescaled to bytes via `|v|`.
///
/// [`SobelDirection::Both`] takes the mixed derivative in one pass. It responds
/// to corners and diagonal structure, not to the union of the X and Y edges.
pub fn sobel(gray: &GrayImage, size: KernelSize, direction: SobelDirection) -> GrayImage {
    let (dx, dy) = direction.orders();
    let response = sobel_response(gray, dx, dy, size, Border::Reflect101);
    convert_scale_abs(&response, gray.width(), gray.height())
}
