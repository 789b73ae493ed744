//! Enumerating factor subsets for combination sweeps.

use itertools::Itertools;

/// Every `k`-element combination of `names`, in lexicographic index order.
///
/// Returns an empty list when `k` is zero or larger than `names.len()`.
pub fn factor_subsets<S: AsRef<str>>(names: &[S], k: usize) -> Vec<Vec<String>> {
    if k == 0 || k > names.len() {
        return Vec::new();
    }
    names
        .iter()
        .map(|n| n.as_ref().to_string())
        .combinations(k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORS: [&str; 7] = ["pb", "pe", "roe", "roa", "eps", "gm", "om"];

    #[test]
    fn test_five_of_seven() {
        let subsets = factor_subsets(&FACTORS, 5);
        assert_eq!(subsets.len(), 21);
        assert_eq!(subsets[0], vec!["pb", "pe", "roe", "roa", "eps"]);
        assert_eq!(subsets[20], vec!["roe", "roa", "eps", "gm", "om"]);
        assert!(subsets.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(factor_subsets(&FACTORS, 0).is_empty());
        assert!(factor_subsets(&FACTORS, 8).is_empty());
        assert_eq!(factor_subsets(&FACTORS, 7).len(), 1);
    }
}
