use rayon::prelude::*;

/// Minimum pixel count before rows are filtered in parallel.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

/// How samples outside the image are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Mirror without repeating the edge sample: `gfedcb|abcdefgh|gfedcba`.
    Reflect101,
    /// Repeat the edge sample: `aaaaaa|abcdefgh|hhhhhhh`.
    Replicate,
}

impl Border {
    pub fn index(self, pos: isize, len: usize) -> usize {
        let Ok(len_i) = isize::try_from(len) else {
            return 0;
        };
        if len_i <= 1 {
            return 0;
        }
        let idx = match self {
            Self::Replicate => pos.clamp(0, len_i - 1),
            Self::Reflect101 => {
                let mut p = pos;
                while p < 0 || p >= len_i {
                    if p < 0 {
                        p = -p;
                    }
                    if p >= len_i {
                        p = 2 * len_i - 2 - p;
                    }
                }
                p
            }
        };
        usize::try_from(idx).unwrap_or(0)
    }
}

fn offset(center: usize, tap: usize, radius: usize) -> isize {
    let c = isize::try_from(center).unwrap_or(isize::MAX);
    let t = isize::try_from(tap).unwrap_or(0);
    let r = isize::try_from(radius).unwrap_or(0);
    c + t - r
}

/// Fill `out` row by row, in parallel for large images.
pub fn for_each_row<T>(out: &mut [T], width: usize, f: impl Fn(usize, &mut [T]) + Sync + Send)
where
    T: Send,
{
    if width == 0 {
        return;
    }
    if out.len() >= PARALLEL_PIXEL_THRESHOLD {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in out.chunks_mut(width).enumerate() {
            f(y, row);
        }
    }
}

/// Correlate a single-channel plane with `kx` along rows, then `ky` along columns.
pub fn separable_filter(
    src: &[f32],
    size: [usize; 2],
    kx: &[f32],
    ky: &[f32],
    border: Border,
) -> Vec<f32> {
    let [width, height] = size;
    debug_assert_eq!(src.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let rx = kx.len() / 2;
    let ry = ky.len() / 2;

    let mut horiz = vec![0.0_f32; width * height];
    for_each_row(&mut horiz, width, |y, row| {
        let src_row = &src[y * width..(y + 1) * width];
        for (x, cell) in row.iter_mut().enumerate() {
            let mut acc = 0.0_f32;
            for (i, &k) in kx.iter().enumerate() {
                acc += k * src_row[border.index(offset(x, i, rx), width)];
            }
            *cell = acc;
        }
    });

    let mut out = vec![0.0_f32; width * height];
    for_each_row(&mut out, width, |y, row| {
        let rows: Vec<usize> = (0..ky.len())
            .map(|j| border.index(offset(y, j, ry), height) * width)
            .collect();
        for (x, cell) in row.iter_mut().enumerate() {
            let mut acc = 0.0_f32;
            for (&k, &row_start) in ky.iter().zip(&rows) {
                acc += k * horiz[row_start + x];
            }
            *cell = acc;
        }
    });
    out
}

/// Correlate a single-channel plane with a dense 3x3 kernel.
pub fn filter_3x3(
    src: &[f32],
    size: [usize; 2],
    kernel: &[[f32; 3]; 3],
    border: Border,
) -> Vec<f32> {
    let [width, height] = size;
    debug_assert_eq!(src.len(), width * height);
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut out = vec![0.0_f32; width * height];
    for_each_row(&mut out, width, |y, row| {
        let rows = [
            border.index(offset(y, 0, 1), height) * width,
            y * width,
            border.index(offset(y, 2, 1), height) * width,
        ];
        for (x, cell) in row.iter_mut().enumerate() {
            let cols = [
                border.index(offset(x, 0, 1), width),
                x,
                border.index(offset(x, 2, 1), width),
            ];
            let mut acc = 0.0_f32;
            for (krow, &row_start) in kernel.iter().zip(&rows) {
                for (&k, &col) in krow.iter().zip(&cols) {
                    acc += k * src[row_start + col];
                }
            }
            *cell = acc;
        }
    });
    out
}
