/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_sample_std() {
        let v = [100.0, 100.0, 100.0, 100.0, 500.0];
        assert_eq!(mean(&v), Some(180.0));
        let std = sample_std(&v).unwrap();
        assert!((std - 178.885).abs() < 1e-3, "std = {std}");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[42.0]), None);
        assert_eq!(sample_std(&[3.0, 3.0]), Some(0.0));
        assert_eq!(min(&[]), None);
        assert_eq!(min(&[4.0, 2.0, 9.0]), Some(2.0));
    }
}
