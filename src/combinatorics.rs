//! Post-processing helpers for clique lists. None of these are needed to
//! read CFinder output.

use std::collections::BTreeMap;

use itertools::Itertools;
use rayon::prelude::*;

/// Every subset of size `1..limit` of every clique, each sorted.
pub fn generate_clique_combinations<'a, T>(
    cliques: &'a [Vec<T>],
    limit: usize,
) -> impl Iterator<Item = Vec<T>> + 'a
where
    T: Ord + Clone + 'a,
{
    cliques.iter().flat_map(move |clique| {
        let mut sorted = clique.clone();
        sorted.sort();
        (1..limit)
            .flat_map(move |size| sorted.clone().into_iter().combinations(size))
            .collect::<Vec<_>>()
    })
}

/// All combinations of `indices` with `1..limit` elements.
pub fn clique_unions(indices: &[usize], limit: usize) -> Vec<Vec<usize>> {
    (1..limit)
        .flat_map(|size| indices.iter().copied().combinations(size))
        .collect()
}

/// Maps each vertex to the indices of the cliques containing it.
pub fn reverse_index_cliques<T>(cliques: &[Vec<T>]) -> BTreeMap<T, Vec<usize>>
where
    T: Ord + Clone,
{
    let mut index: BTreeMap<T, Vec<usize>> = BTreeMap::new();
    for (i, clique) in cliques.iter().enumerate() {
        for vertex in clique {
            index.entry(vertex.clone()).or_default().push(i);
        }
    }
    index
}

/// True when `needle` appears in `haystack` in order, not necessarily contiguously.
pub fn is_subset<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    if haystack.len() < needle.len() {
        return false;
    }
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

/// Drops every list that is an ordered subset of another list.
pub fn filter_subsets<T>(lists: &[Vec<T>]) -> Vec<Vec<T>>
where
    T: PartialEq + Clone + Sync + Send,
{
    lists
        .par_iter()
        .enumerate()
        .filter(|(i, needle)| {
            !lists
                .iter()
                .enumerate()
                .any(|(j, haystack)| *i != j && is_subset(needle, haystack))
        })
        .map(|(_, list)| list.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_are_sorted_and_bounded() {
        let cliques = vec![vec![3, 1, 2]];
        let combos: Vec<Vec<i32>> = generate_clique_combinations(&cliques, 3).collect();
        assert_eq!(
            combos,
            vec![
                vec![1],
                vec![2],
                vec![3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn unions_exclude_limit_size() {
        let unions = clique_unions(&[0, 1, 2], 3);
        assert_eq!(unions.len(), 3 + 3);
        assert!(unions.iter().all(|u| u.len() < 3));
    }

    #[test]
    fn reverse_index_lists_cliques_per_vertex() {
        let cliques = vec![vec!["a", "b", "c"], vec!["a", "d", "e"]];
        let index = reverse_index_cliques(&cliques);
        assert_eq!(index["a"], vec![0, 1]);
        assert_eq!(index["d"], vec![1]);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn ordered_subset() {
        assert!(is_subset(&[1, 3], &[1, 2, 3]));
        assert!(!is_subset(&[3, 1], &[1, 2, 3]));
        assert!(!is_subset(&[1, 2, 3, 4], &[1, 2, 3]));
        assert!(is_subset::<i32>(&[], &[1]));
    }

    #[test]
    fn subsets_are_filtered_out() {
        let lists = vec![vec![1, 2], vec![1, 2, 3], vec![4], vec![2, 3]];
        assert_eq!(filter_subsets(&lists), vec![vec![1, 2, 3], vec![4]]);
    }
}
