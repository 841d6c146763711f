// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Returns every permutation of `0..n`, in lexicographic order.
pub fn index_permutations(n: usize) -> Vec<Vec<usize>> {
    let mut current: Vec<usize> = (0..n).collect();
    let mut out = vec![current.clone()];

    // Narayana's next-permutation.
    loop {
        let Some(i) = (1..current.len()).rev().find(|&i| current[i - 1] < current[i]) else {
            return out;
        };
        let pivot = i - 1;
        let Some(j) = (pivot + 1..current.len())
            .rev()
            .find(|&j| current[j] > current[pivot])
        else {
            return out;
        };

        current.swap(pivot, j);
        current[i..].reverse();
        out.push(current.clone());
    }
}

/// Moves `items` out in the order given by `permutation`.
///
/// # Panics
///
/// Panics if `permutation` is not a permutation of `0..items.len()`.
pub fn apply_permutation<T>(items: Vec<T>, permutation: &[usize]) -> Vec<T> {
    assert_eq!(items.len(), permutation.len(), "permutation length mismatch");

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();

    permutation
        .iter()
        .map(|&index| slots[index].take().expect("index used twice"))
        .collect()
}
