pub fn safe_usize_to_f32(value: usize) -> f32 {
    let clamped = value.min(u32::MAX as usize);
    let as_u32 = u32::try_from(clamped).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        as_u32 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_small_values_exactly() {
        assert!((safe_usize_to_f32(1920) - 1920.0).abs() < f32::EPSILON);
    }

    #[test]
    fn saturates_above_u32() {
        let huge = usize::MAX;
        assert!(safe_usize_to_f32(huge) >= 4.0e9);
    }
}
