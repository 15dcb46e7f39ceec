use serde::Deserialize;

/// The three detectors offered in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeAlgorithm {
    #[default]
    Canny,
    Sobel,
    Laplacian,
}

impl EdgeAlgorithm {
    pub const ALL: [Self; 3] = [Self::Canny, Self::Sobel, Self::Laplacian];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Canny => "Canny",
            Self::Sobel => "Sobel",
            Self::Laplacian => "Laplacian",
        }
    }

    /// Lowercase stem used for exported file names.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Canny => "canny",
            Self::Sobel => "sobel",
            Self::Laplacian => "laplacian",
        }
    }
}

/// Odd filter aperture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum KernelSize {
    One,
    Three,
    Five,
    Seven,
}

impl KernelSize {
    /// Apertures accepted by the Gaussian blur and the Sobel operator.
    pub const SMOOTHING_CHOICES: [Self; 3] = [Self::Three, Self::Five, Self::Seven];
    /// Apertures accepted by the Laplacian (size 1 selects the 4-neighbour kernel).
    pub const LAPLACIAN_CHOICES: [Self; 4] = [Self::One, Self::Three, Self::Five, Self::Seven];

    pub const fn get(self) -> usize {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
            Self::Seven => 7,
        }
    }

    pub const fn radius(self) -> usize {
        self.get() / 2
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Three => "3",
            Self::Five => "5",
            Self::Seven => "7",
        }
    }

    fn restricted_to(self, choices: &[Self], fallback: Self) -> Self {
        if choices.contains(&self) {
            self
        } else {
            fallback
        }
    }
}

impl TryFrom<u8> for KernelSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            7 => Ok(Self::Seven),
            other => Err(format!("kernel size must be 1, 3, 5 or 7 (got {other})")),
        }
    }
}

/// Which derivative the Sobel operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SobelDirection {
    /// First derivative along x.
    #[default]
    X,
    /// First derivative along y.
    Y,
    /// Mixed derivative: first order in x and in y within one kernel.
    Both,
}

impl SobelDirection {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Both];

    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Both => "Both",
        }
    }

    /// Derivative orders `(dx, dy)`.
    pub const fn orders(self) -> (usize, usize) {
        match self {
            Self::X => (1, 0),
            Self::Y => (0, 1),
            Self::Both => (1, 1),
        }
    }
}

pub const SIGMA_MAX: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub lower: u8,
    pub upper: u8,
    pub kernel: KernelSize,
    pub sigma: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            lower: 50,
            upper: 150,
            kernel: KernelSize::Three,
            sigma: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SobelParams {
    pub kernel: KernelSize,
    pub direction: SobelDirection,
}

impl Default for SobelParams {
    fn default() -> Self {
        Self {
            kernel: KernelSize::Three,
            direction: SobelDirection::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LaplacianParams {
    pub kernel: KernelSize,
}

impl Default for LaplacianParams {
    fn default() -> Self {
        Self {
            kernel: KernelSize::One,
        }
    }
}

/// Selected algorithm plus the parameters of every algorithm.
///
/// Switching the algorithm keeps the other records, so flipping back and forth
/// restores the previous slider positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EdgeSettings {
    pub algorithm: EdgeAlgorithm,
    pub canny: CannyParams,
    pub sobel: SobelParams,
    pub laplacian: LaplacianParams,
}

impl EdgeSettings {
    /// Clamp values into the ranges the side panel offers.
    pub fn sanitized(self) -> Self {
        let canny_default = CannyParams::default();
        let sigma = if self.canny.sigma.is_finite() {
            self.canny.sigma.clamp(0.0, SIGMA_MAX)
        } else {
            canny_default.sigma
        };
        Self {
            algorithm: self.algorithm,
            canny: CannyParams {
                lower: self.canny.lower,
                upper: self.canny.upper,
                kernel: self
                    .canny
                    .kernel
                    .restricted_to(&KernelSize::SMOOTHING_CHOICES, canny_default.kernel),
                sigma,
            },
            sobel: SobelParams {
                kernel: self
                    .sobel
                    .kernel
                    .restricted_to(&KernelSize::SMOOTHING_CHOICES, KernelSize::Three),
                direction: self.sobel.direction,
            },
            laplacian: LaplacianParams {
                kernel: self
                    .laplacian
                    .kernel
                    .restricted_to(&KernelSize::LAPLACIAN_CHOICES, KernelSize::One),
            },
        }
    }

    /// One-line summary for the status bar.
    pub fn describe(&self) -> String {
        match self.algorithm {
            EdgeAlgorithm::Canny => format!(
                "Canny: thresholds {}/{}, kernel {}, sigma {:.1}",
                self.canny.lower,
                self.canny.upper,
                self.canny.kernel.get(),
                self.canny.sigma
            ),
            EdgeAlgorithm::Sobel => format!(
                "Sobel: kernel {}, direction {}",
                self.sobel.kernel.get(),
                self.sobel.direction.label()
            ),
            EdgeAlgorithm::Laplacian => {
                format!("Laplacian: kernel {}", self.laplacian.kernel.get())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_side_panel() {
        let settings = EdgeSettings::default();
        assert_eq!(settings.algorithm, EdgeAlgorithm::Canny);
        assert_eq!(settings.canny.lower, 50);
        assert_eq!(settings.canny.upper, 150);
        assert_eq!(settings.canny.kernel, KernelSize::Three);
        assert!((settings.canny.sigma - 1.0).abs() < f32::EPSILON);
        assert_eq!(settings.sobel.direction, SobelDirection::X);
        assert_eq!(settings.laplacian.kernel, KernelSize::One);
    }

    #[test]
    fn sanitize_restricts_kernels_and_sigma() {
        let mut settings = EdgeSettings::default();
        settings.canny.kernel = KernelSize::One;
        settings.canny.sigma = 9.0;
        settings.sobel.kernel = KernelSize::One;
        let clean = settings.sanitized();
        assert_eq!(clean.canny.kernel, KernelSize::Three);
        assert!((clean.canny.sigma - SIGMA_MAX).abs() < f32::EPSILON);
        assert_eq!(clean.sobel.kernel, KernelSize::Three);

        settings.canny.sigma = f32::NAN;
        assert!((settings.sanitized().canny.sigma - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn kernel_size_rejects_even_values() {
        assert_eq!(KernelSize::try_from(5_u8), Ok(KernelSize::Five));
        assert!(KernelSize::try_from(4_u8).is_err());
        assert!(KernelSize::try_from(9_u8).is_err());
    }

    #[test]
    fn file_stems_are_lowercase_labels() {
        for algo in EdgeAlgorithm::ALL {
            assert_eq!(algo.file_stem(), algo.label().to_lowercase());
        }
    }
}
