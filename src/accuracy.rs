//! Conversions between hit results and accuracy.

/// Accuracy between `0.0` and `1.0` for the given hit results.
///
/// Returns `0.0` if there are no hits at all.
///
/// ```
/// let acc = oppai_pp::accuracy(98, 1, 0, 1);
///
/// assert!((acc - 0.98333).abs() < 1e-5);
/// ```
pub fn accuracy(n300: u32, n100: u32, n50: u32, misses: u32) -> f64 {
    accuracy_signed(
        i64::from(n300),
        i64::from(n100),
        i64::from(n50),
        i64::from(misses),
    )
}

/// Same as [`accuracy`] but allows the 300 count to be reduced below zero,
/// which happens when score v1 accuracy discounts sliders and spinners.
pub(crate) fn accuracy_signed(n300: i64, n100: i64, n50: i64, misses: i64) -> f64 {
    let total_hits = n300 + n100 + n50 + misses;

    if total_hits <= 0 {
        return 0.0;
    }

    let points = 50 * n50 + 100 * n100 + 300 * n300;

    points as f64 / (300 * total_hits) as f64
}

/// Distribute `n_objects - misses` hits into `(n300, n100, n50)` so that
/// the resulting accuracy is as close as possible to `acc_percent`.
///
/// The accuracy is clamped to what is achievable with the given misses.
/// 50s are only used if the accuracy cannot be reached through 300s and
/// 100s alone. The returned counts always add up to `n_objects` together
/// with the (clamped) misses.
///
/// ```
/// let (n300, n100, n50) = oppai_pp::round_to_hit_counts(95.0, 100, 1);
///
/// assert_eq!(n300 + n100 + n50 + 1, 100);
/// assert_eq!(n50, 0);
/// ```
pub fn round_to_hit_counts(acc_percent: f64, n_objects: u32, misses: u32) -> (u32, u32, u32) {
    let misses = misses.min(n_objects);
    let max300 = n_objects - misses;

    let max_acc = accuracy(max300, 0, 0, misses) * 100.0;
    let acc = acc_percent.clamp(0.0, max_acc) / 100.0;

    let n = f64::from(n_objects);
    let hits = f64::from(max300);

    let n100 = (1.5 * ((1.0 - acc) * n - f64::from(misses))).round_ties_even();

    let (n100, n50) = if n100 > hits {
        // too low for 100s only, trade them for 50s
        let n100 = (6.0 * acc * n - hits).round_ties_even().clamp(0.0, hits) as u32;

        (n100, max300 - n100)
    } else {
        (n100.max(0.0) as u32, 0)
    };

    (max300 - n100 - n50, n100, n50)
}
