//! Easing for the chart transition

use std::f64::consts::PI;

/// Cosine ease-in-out on [0, 1]
///
/// Monotonic, with `ease_in_out(0) == 0` and `ease_in_out(1) == 1`. Inputs
/// outside the unit interval are clamped.
pub fn ease_in_out(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    0.5 * (1.0 - (p * PI).cos())
}

/// Linear progress of `frame` through a run of `total_frames`
pub fn progress(frame: u32, total_frames: u32) -> f64 {
    if total_frames == 0 {
        return 1.0;
    }
    (f64::from(frame) / f64::from(total_frames)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert!(ease_in_out(progress(0, 30)).abs() < 1e-9);
        assert!((ease_in_out(progress(30, 30)) - 1.0).abs() < 1e-9);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic() {
        let values: Vec<f64> = (0..=30).map(|f| ease_in_out(progress(f, 30))).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(progress(45, 30), 1.0);
        assert_eq!(ease_in_out(-2.0), 0.0);
        assert_eq!(progress(3, 0), 1.0);
    }
}
