//! Local-maximum search with a minimum spacing between retained peaks.

/// Indices of local maxima in `signal`.
///
/// A sample counts when it is strictly greater than both neighbours. A flat run
/// whose flanks are both lower counts once, at its middle sample (the left of
/// the two middles for even-length runs). The first and last samples are never
/// peaks.
pub fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if signal.len() < 3 {
        return peaks;
    }

    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

/// Find peaks in `signal` that are at least `distance` samples apart.
///
/// Candidates are visited from highest to lowest; each retained peak removes
/// every remaining candidate closer than `distance`. Equal heights are resolved
/// in favour of the later index. The result is in ascending index order.
///
/// A `distance` of 0 or 1 keeps every local maximum.
pub fn find_peaks(signal: &[f64], distance: usize) -> Vec<usize> {
    let peaks = local_maxima(signal);
    if distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    // stable ascending sort, so equal heights keep index order and the later wins
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| signal[peaks[a]].total_cmp(&signal[peaks[b]]));

    let mut keep = vec![true; peaks.len()];
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }

        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }

        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(peak, kept)| kept.then_some(peak))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_maxima() {
        let signal = [0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0];
        assert_eq!(local_maxima(&signal), vec![1, 3, 5]);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        assert_eq!(local_maxima(&[5.0, 1.0, 5.0]), Vec::<usize>::new());
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
        assert!(local_maxima(&[]).is_empty());
    }

    #[test]
    fn test_plateau_counts_once_at_middle() {
        let odd = [0.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(local_maxima(&odd), vec![2]);

        let even = [0.0, 1.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(local_maxima(&even), vec![2]);
    }

    #[test]
    fn test_rising_plateau_is_not_a_peak() {
        let signal = [0.0, 1.0, 1.0, 2.0, 0.0];
        assert_eq!(local_maxima(&signal), vec![3]);
    }

    #[test]
    fn test_plateau_running_into_the_end_is_not_a_peak() {
        let signal = [0.0, 1.0, 1.0, 1.0];
        assert!(local_maxima(&signal).is_empty());
    }

    #[test]
    fn test_distance_keeps_highest() {
        let signal = [0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0];
        assert_eq!(find_peaks(&signal, 3), vec![3]);
        assert_eq!(find_peaks(&signal, 2), vec![1, 3, 5]);
    }

    #[test]
    fn test_peaks_exactly_distance_apart_are_both_kept() {
        let mut signal = vec![0.0; 20];
        signal[5] = 1.0;
        signal[15] = 1.0;
        assert_eq!(find_peaks(&signal, 10), vec![5, 15]);
        assert_eq!(find_peaks(&signal, 11), vec![15]);
    }

    #[test]
    fn test_removed_peak_does_not_suppress_others() {
        // 10 suppresses 7, and 7 no longer blocks 4
        let mut signal = vec![0.0; 15];
        signal[4] = 1.0;
        signal[7] = 2.0;
        signal[10] = 3.0;
        assert_eq!(find_peaks(&signal, 4), vec![4, 10]);
    }

    #[test]
    fn test_small_distance_keeps_everything() {
        let signal = [0.0, 1.0, 0.0, 1.0, 0.0];
        assert_eq!(find_peaks(&signal, 0), vec![1, 3]);
        assert_eq!(find_peaks(&signal, 1), vec![1, 3]);
    }

    #[test]
    fn test_result_is_ascending_and_spaced() {
        let signal: Vec<f64> = (0..2000).map(|i| ((i as f64) * 0.37).sin() * (1.0 + (i % 7) as f64)).collect();
        let peaks = find_peaks(&signal, 50);
        assert!(!peaks.is_empty());
        for pair in peaks.windows(2) {
            assert!(pair[1] - pair[0] >= 50);
        }
    }
}
