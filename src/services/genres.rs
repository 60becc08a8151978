use crate::models::{CatalogMatch, GenreId, GenreSignal};

/// A genre qualifies for discovery once any single input movie carries it,
/// making the qualifying set the union of the inputs' genre sets.
pub const GENRE_INCLUSION_THRESHOLD: u32 = 1;

/// Combines the genre sets of all resolved titles into one signal
///
/// Flattens every match's genre list and counts occurrences. Order of the
/// input matches does not affect the result.
pub fn aggregate(matches: &[CatalogMatch]) -> GenreSignal {
    let mut signal = GenreSignal::default();
    for catalog_match in matches {
        for &genre in &catalog_match.genre_ids {
            signal.observe(genre);
        }
    }
    signal
}

/// Genres that qualify for the discovery query, ascending by id
pub fn qualifying_genres(signal: &GenreSignal) -> Vec<GenreId> {
    signal.qualifying_genres(GENRE_INCLUSION_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_match(id: u64, genre_ids: Vec<GenreId>) -> CatalogMatch {
        CatalogMatch { id, genre_ids }
    }

    #[test]
    fn test_overlapping_sets_are_counted() {
        let matches = vec![catalog_match(1, vec![1, 2]), catalog_match(2, vec![2, 3])];

        let signal = aggregate(&matches);

        assert_eq!(signal.count(1), 1);
        assert_eq!(signal.count(2), 2);
        assert_eq!(signal.count(3), 1);
        assert_eq!(qualifying_genres(&signal), vec![1, 2, 3]);
    }

    #[test]
    fn test_aggregation_is_commutative() {
        let forward = vec![
            catalog_match(1, vec![28, 878]),
            catalog_match(2, vec![878, 12]),
            catalog_match(3, vec![35]),
        ];
        let reversed: Vec<CatalogMatch> = forward.iter().rev().cloned().collect();

        assert_eq!(aggregate(&forward), aggregate(&reversed));
        assert_eq!(
            qualifying_genres(&aggregate(&forward)),
            qualifying_genres(&aggregate(&reversed))
        );
    }

    #[test]
    fn test_no_matches_yields_empty_signal() {
        let signal = aggregate(&[]);
        assert!(signal.is_empty());
        assert!(qualifying_genres(&signal).is_empty());
    }

    #[test]
    fn test_matches_without_genres_yield_empty_signal() {
        let matches = vec![catalog_match(1, vec![]), catalog_match(2, vec![])];
        assert!(aggregate(&matches).is_empty());
    }

    #[test]
    fn test_duplicate_genres_within_one_match_count_twice() {
        // Upstream genre lists should not repeat ids, but counting stays
        // well-defined if one does.
        let matches = vec![catalog_match(1, vec![28, 28])];
        assert_eq!(aggregate(&matches).count(28), 2);
    }
}
