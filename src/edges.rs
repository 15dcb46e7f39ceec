//! Edge detection filters: grayscale conversion, kernels, and the three detectors.

mod canny;
mod convolve;
mod gray;
mod kernels;
mod laplacian;
mod params;
mod sobel;

#[cfg(test)]
mod tests;

pub use params::{EdgeAlgorithm, EdgeSettings, KernelSize, SIGMA_MAX, SobelDirection};

#[cfg(test)]
use params::{CannyParams, LaplacianParams, SobelParams};

use canny::{canny, gaussian_blur};
use gray::to_grayscale;
use image::{GrayImage, RgbImage};
use laplacian::laplacian;
use sobel::sobel;

/// Run the selected detector on an RGB image.
///
/// The result always has the input's dimensions. Settings are sanitized first,
/// so out-of-range values from config files fall back to their defaults.
pub fn detect_edges(image: &RgbImage, settings: &EdgeSettings) -> GrayImage {
    let settings = settings.sanitized();
    let gray = to_grayscale(image);
    match settings.algorithm {
        EdgeAlgorithm::Canny => {
            let p = settings.canny;
            let blurred = gaussian_blur(&gray, p.kernel, p.sigma);
            canny(&blurred, p.lower, p.upper)
        }
        EdgeAlgorithm::Sobel => sobel(&gray, settings.sobel.kernel, settings.sobel.direction),
        EdgeAlgorithm::Laplacian => laplacian(&gray, settings.laplacian.kernel),
    }
}
