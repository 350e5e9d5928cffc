//! Deterministic extremum selection.
//!
//! `Iterator::max_by` keeps the last of equal elements; report rules need the first,
//! so ties always resolve to the earliest candidate in source order.

/// First element with the greatest key.
pub fn first_max_by_key<T, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    pick(items, &mut key, |candidate, best| candidate > best)
}

/// First element with the smallest key.
pub fn first_min_by_key<T, I, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    pick(items, &mut key, |candidate, best| candidate < best)
}

fn pick<T, I, F>(items: I, key: &mut F, better: fn(f64, f64) -> bool) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let k = key(&item);
        match &best {
            Some((_, best_key)) if !better(k, *best_key) => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_resolve_to_first() {
        let items = vec![("a", 5.0), ("b", 9.0), ("c", 9.0), ("d", 1.0), ("e", 1.0)];
        assert_eq!(first_max_by_key(items.iter(), |x| x.1).unwrap().0, "b");
        assert_eq!(first_min_by_key(items.iter(), |x| x.1).unwrap().0, "d");
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<f64> = Vec::new();
        assert!(first_max_by_key(items, |x| *x).is_none());
    }
}
