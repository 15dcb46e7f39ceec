use super::params::KernelSize;

/// 1-D derivative kernel of the given order.
///
/// Order 0 yields binomial smoothing weights (`[1, 2, 1]`, `[1, 4, 6, 4, 1]`, ...);
/// each extra order replaces one smoothing pass by a finite difference.
/// An aperture of 1 is widened to 3 so first and second derivatives stay defined.
pub fn derivative_kernel(order: usize, size: KernelSize) -> Vec<f32> {
    let ksize = size.get().max(3);
    debug_assert!(order < ksize);
    let mut coeffs = vec![0_i32; ksize + 1];
    coeffs[0] = 1;

    for _ in 0..(ksize - order - 1) {
        let mut prev = coeffs[0];
        for j in 1..=ksize {
            let next = coeffs[j] + coeffs[j - 1];
            coeffs[j - 1] = prev;
            prev = next;
        }
    }

    for _ in 0..order {
        let mut prev = -coeffs[0];
        for j in 1..=ksize {
            let next = coeffs[j - 1] - coeffs[j];
            coeffs[j - 1] = prev;
            prev = next;
        }
    }

    coeffs.truncate(ksize);
    #[allow(clippy::cast_precision_loss)]
    coeffs.into_iter().map(|c| c as f32).collect()
}

/// Normalized 1-D Gaussian.
///
/// A sigma of zero (or less) selects the binomial tables, which is what the
/// size-derived sigma rounds to for apertures up to 7.
pub fn gaussian_kernel(size: KernelSize, sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return match size {
            KernelSize::One => vec![1.0],
            KernelSize::Three => vec![0.25, 0.5, 0.25],
            KernelSize::Five => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
            KernelSize::Seven => vec![
                0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25,
            ],
        };
    }

    let radius = i32::try_from(size.radius()).unwrap_or(0);
    let sigma = f64::from(sigma);
    let scale = -0.5 / (sigma * sigma);
    let raw: Vec<f64> = (-radius..=radius)
        .map(|offset| {
            let x = f64::from(offset);
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    #[allow(clippy::cast_possible_truncation)]
    raw.into_iter().map(|v| (v / sum) as f32).collect()
}
