use super::*;
use image::{GrayImage, Luma, Rgb, RgbImage};
use proptest::prelude::*;

/// 4x4 gradient with a cross term so the mixed derivative is non-zero.
fn gradient_4x4() -> GrayImage {
    GrayImage::from_fn(4, 4, |x, y| {
        let v = x * y * 8 + x * 12 + y * 3;
        Luma([u8::try_from(v).expect("fits in u8")])
    })
}

fn rows(image: &GrayImage) -> Vec<Vec<u8>> {
    image
        .as_raw()
        .chunks(image.width() as usize)
        .map(<[u8]>::to_vec)
        .collect()
}

fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

#[test]
fn sobel_x_on_gradient() {
    let out = sobel(&gradient_4x4(), KernelSize::Three, SobelDirection::X);
    assert_eq!(
        rows(&out),
        vec![
            vec![0, 128, 128, 0],
            vec![0, 160, 160, 0],
            vec![0, 224, 224, 0],
            vec![0, 255, 255, 0],
        ]
    );
}

#[test]
fn sobel_y_on_gradient() {
    let out = sobel(&gradient_4x4(), KernelSize::Three, SobelDirection::Y);
    assert_eq!(
        rows(&out),
        vec![
            vec![0, 0, 0, 0],
            vec![56, 88, 152, 184],
            vec![56, 88, 152, 184],
            vec![0, 0, 0, 0],
        ]
    );
}

#[test]
fn sobel_both_is_mixed_derivative() {
    let img = gradient_4x4();
    let out = sobel(&img, KernelSize::Three, SobelDirection::Both);
    assert_eq!(
        rows(&out),
        vec![
            vec![0, 0, 0, 0],
            vec![0, 32, 32, 0],
            vec![0, 32, 32, 0],
            vec![0, 0, 0, 0],
        ]
    );

    let x = sobel(&img, KernelSize::Three, SobelDirection::X);
    let y = sobel(&img, KernelSize::Three, SobelDirection::Y);
    let summed: Vec<u8> = x
        .as_raw()
        .iter()
        .zip(y.as_raw())
        .map(|(a, b)| a.saturating_add(*b))
        .collect();
    assert_ne!(out.as_raw(), &summed);
}

#[test]
fn laplacian_small_apertures_on_gradient() {
    let img = gradient_4x4();
    assert_eq!(
        rows(&laplacian(&img, KernelSize::One)),
        vec![
            vec![30, 22, 38, 30],
            vec![40, 0, 0, 40],
            vec![56, 0, 0, 56],
            vec![66, 22, 38, 126],
        ]
    );
    assert_eq!(
        rows(&laplacian(&img, KernelSize::Three)),
        vec![
            vec![184, 88, 152, 56],
            vec![160, 0, 0, 160],
            vec![224, 0, 0, 224],
            vec![200, 88, 152, 255],
        ]
    );
}

#[test]
fn laplacian_of_flat_image_is_zero() {
    let flat = GrayImage::from_pixel(9, 7, Luma([77]));
    for size in KernelSize::LAPLACIAN_CHOICES {
        assert!(laplacian(&flat, size).pixels().all(|p| p[0] == 0), "{size:?}");
    }
}

#[test]
fn detect_edges_dispatches_on_algorithm() {
    let rgb = gray_to_rgb(&gradient_4x4());
    let mut settings = EdgeSettings::default();
    settings.algorithm = EdgeAlgorithm::Sobel;
    settings.sobel.direction = SobelDirection::Y;
    assert_eq!(
        detect_edges(&rgb, &settings),
        sobel(&gradient_4x4(), KernelSize::Three, SobelDirection::Y)
    );

    settings.algorithm = EdgeAlgorithm::Laplacian;
    settings.laplacian.kernel = KernelSize::Three;
    assert_eq!(
        detect_edges(&rgb, &settings),
        laplacian(&gradient_4x4(), KernelSize::Three)
    );
}

#[test]
fn canny_pipeline_finds_square_outline() {
    let rgb = RgbImage::from_fn(16, 16, |x, y| {
        if (4..12).contains(&x) && (4..12).contains(&y) {
            Rgb([240, 240, 240])
        } else {
            Rgb([10, 10, 10])
        }
    });
    let out = detect_edges(&rgb, &EdgeSettings::default());
    assert!(out.pixels().any(|p| p[0] == 255));
    // Far from the square nothing fires.
    assert_eq!(out.get_pixel(0, 0)[0], 0);
    assert_eq!(out.get_pixel(8, 8)[0], 0);
}

#[test]
fn single_pixel_image_is_supported() {
    let rgb = RgbImage::from_pixel(1, 1, Rgb([10, 20, 30]));
    for algorithm in EdgeAlgorithm::ALL {
        let settings = EdgeSettings {
            algorithm,
            ..EdgeSettings::default()
        };
        let out = detect_edges(&rgb, &settings);
        assert_eq!(out.dimensions(), (1, 1));
    }
}

const SMOOTH_5: [i64; 5] = [1, 4, 6, 4, 1];
const SMOOTH_7: [i64; 7] = [1, 6, 15, 20, 15, 6, 1];
const FIRST_5: [i64; 5] = [-1, -2, 0, 2, 1];
const FIRST_7: [i64; 7] = [-1, -4, -5, 0, 5, 4, 1];
const SECOND_5: [i64; 5] = [1, 0, -2, 0, 1];
const SECOND_7: [i64; 7] = [1, 2, -1, -4, -1, 2, 1];

fn reflect_101(pos: i64, len: i64) -> i64 {
    if len == 1 {
        return 0;
    }
    let mut p = pos;
    loop {
        if p < 0 {
            p = -p;
        } else if p >= len {
            p = 2 * len - 2 - p;
        } else {
            return p;
        }
    }
}

/// Direct 2-D correlation with the outer product `ky * kx`, no separability.
fn correlate_2d(gray: &GrayImage, kx: &[i64], ky: &[i64]) -> Vec<i64> {
    let (w, h) = (i64::from(gray.width()), i64::from(gray.height()));
    let (rx, ry) = (kx.len() as i64 / 2, ky.len() as i64 / 2);
    let mut out = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0_i64;
            for (j, &wy) in ky.iter().enumerate() {
                let sy = reflect_101(y + j as i64 - ry, h);
                for (i, &wx) in kx.iter().enumerate() {
                    let sx = reflect_101(x + i as i64 - rx, w);
                    let v = gray.get_pixel(sx as u32, sy as u32)[0];
                    acc += wy * wx * i64::from(v);
                }
            }
            out.push(acc);
        }
    }
    out
}

fn abs_to_bytes(values: &[i64], gray: &GrayImage) -> GrayImage {
    let bytes = values
        .iter()
        .map(|v| u8::try_from(v.unsigned_abs().min(255)).expect("clamped"))
        .collect();
    GrayImage::from_raw(gray.width(), gray.height(), bytes).expect("buffer matches size")
}

fn textured(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let v = (x * x * 7 + y * 13 + x * y * 5 + (x ^ y) * 3) % 256;
        Luma([u8::try_from(v).expect("below 256")])
    })
}

fn large_kernels(size: KernelSize) -> (&'static [i64], &'static [i64], &'static [i64]) {
    match size {
        KernelSize::Five => (&SMOOTH_5, &FIRST_5, &SECOND_5),
        KernelSize::Seven => (&SMOOTH_7, &FIRST_7, &SECOND_7),
        _ => unreachable!("only apertures 5 and 7 are checked here"),
    }
}

fn check_large_apertures(gray: &GrayImage) {
    for size in [KernelSize::Five, KernelSize::Seven] {
        let (smooth, first, second) = large_kernels(size);

        let expected_x = abs_to_bytes(&correlate_2d(gray, first, smooth), gray);
        let expected_y = abs_to_bytes(&correlate_2d(gray, smooth, first), gray);
        let expected_xy = abs_to_bytes(&correlate_2d(gray, first, first), gray);
        assert_eq!(sobel(gray, size, SobelDirection::X), expected_x, "sobel x {size:?}");
        assert_eq!(sobel(gray, size, SobelDirection::Y), expected_y, "sobel y {size:?}");
        assert_eq!(sobel(gray, size, SobelDirection::Both), expected_xy, "sobel xy {size:?}");

        let d2x = correlate_2d(gray, second, smooth);
        let d2y = correlate_2d(gray, smooth, second);
        let sum: Vec<i64> = d2x.iter().zip(&d2y).map(|(a, b)| a + b).collect();
        assert_eq!(laplacian(gray, size), abs_to_bytes(&sum, gray), "laplacian {size:?}");
    }
}

#[test]
fn large_apertures_match_direct_correlation() {
    check_large_apertures(&textured(23, 17));
}

#[test]
fn large_apertures_match_direct_correlation_on_parallel_path() {
    // 600x600 is above the row-parallel threshold.
    check_large_apertures(&textured(600, 600));
}

fn embedded_features(size: u32) -> RgbImage {
    RgbImage::from_fn(size, size, |x, y| {
        if (8..56).contains(&x) && (8..56).contains(&y) {
            let v = u8::try_from((x * x + 3 * y * y + x * y) % 251).expect("below 251");
            Rgb([v, v / 2, 255 - v])
        } else {
            Rgb([40, 40, 40])
        }
    })
}

#[test]
fn parallel_rows_match_sequential_rows() {
    let small = embedded_features(64);
    let large = embedded_features(600);
    let mut variants = Vec::new();
    for sigma in [0.0, 1.4] {
        let mut s = EdgeSettings::default();
        s.canny.kernel = KernelSize::Seven;
        s.canny.sigma = sigma;
        s.canny.lower = 30;
        s.canny.upper = 90;
        variants.push(s);
    }
    for size in KernelSize::SMOOTHING_CHOICES {
        for direction in SobelDirection::ALL {
            let mut s = EdgeSettings::default();
            s.algorithm = EdgeAlgorithm::Sobel;
            s.sobel = SobelParams { kernel: size, direction };
            variants.push(s);
        }
    }
    for size in KernelSize::LAPLACIAN_CHOICES {
        let mut s = EdgeSettings::default();
        s.algorithm = EdgeAlgorithm::Laplacian;
        s.laplacian.kernel = size;
        variants.push(s);
    }

    for settings in variants {
        // The small image stays below the threshold, the large one goes parallel.
        let expected = detect_edges(&small, &settings);
        let out = detect_edges(&large, &settings);
        let corner = image::imageops::crop_imm(&out, 0, 0, 64, 64).to_image();
        assert_eq!(corner, expected, "{}", settings.describe());
        let rest_is_flat = out
            .enumerate_pixels()
            .filter(|(x, y, _)| *x >= 64 || *y >= 64)
            .all(|(_, _, p)| p[0] == 0);
        assert!(rest_is_flat, "{}", settings.describe());
    }
}

fn arb_settings() -> impl Strategy<Value = EdgeSettings> {
    let kernel = prop::sample::select(KernelSize::SMOOTHING_CHOICES.to_vec());
    let lap_kernel = prop::sample::select(KernelSize::LAPLACIAN_CHOICES.to_vec());
    let direction = prop::sample::select(SobelDirection::ALL.to_vec());
    let algorithm = prop::sample::select(EdgeAlgorithm::ALL.to_vec());
    (
        algorithm,
        any::<u8>(),
        any::<u8>(),
        kernel.clone(),
        0u8..=30,
        kernel,
        direction,
        lap_kernel,
    )
        .prop_map(
            |(algorithm, lower, upper, canny_kernel, sigma_tenths, sobel_kernel, direction, lap)| {
                EdgeSettings {
                    algorithm,
                    canny: CannyParams {
                        lower,
                        upper,
                        kernel: canny_kernel,
                        sigma: f32::from(sigma_tenths) / 10.0,
                    },
                    sobel: SobelParams {
                        kernel: sobel_kernel,
                        direction,
                    },
                    laplacian: LaplacianParams { kernel: lap },
                }
            },
        )
}

fn arb_image() -> impl Strategy<Value = RgbImage> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), (w * h * 3) as usize)
            .prop_map(move |data| RgbImage::from_raw(w, h, data).expect("buffer matches size"))
    })
}

proptest! {
    #[test]
    fn output_dimensions_match_input(image in arb_image(), settings in arb_settings()) {
        let out = detect_edges(&image, &settings);
        prop_assert_eq!(out.dimensions(), image.dimensions());
    }

    #[test]
    fn canny_output_is_binary(image in arb_image(), settings in arb_settings()) {
        let settings = EdgeSettings { algorithm: EdgeAlgorithm::Canny, ..settings };
        let out = detect_edges(&image, &settings);
        prop_assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn recomputation_is_deterministic(image in arb_image(), settings in arb_settings()) {
        let first = detect_edges(&image, &settings);
        let second = detect_edges(&image, &settings);
        prop_assert_eq!(first.as_raw(), second.as_raw());
    }
}
