//! Helpers for closed tours: length, permutation check, and the greedy
//! nearest-neighbor construction used to bootstrap the colony.

use crate::distance::DistanceTable;

/// Total length of the closed tour, including the edge from the last
/// location back to the first.
pub fn tour_length(tour: &[usize], table: &DistanceTable) -> f64 {
    let n = tour.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|k| table.distance(tour[k], tour[(k + 1) % n]))
        .sum()
}

/// Checks that `tour` visits each of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Greedy tour from `start`: always move to the closest unvisited location.
/// Ties go to the lowest index.
///
/// Returns the tour and its closed length.
pub fn nearest_neighbor_tour(table: &DistanceTable, start: usize) -> (Vec<usize>, f64) {
    let n = table.size();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    visited[start] = true;
    tour.push(start);

    let mut last = start;
    let mut length = 0.0;
    for _ in 1..n {
        let mut nearest = None;
        let mut nearest_dist = f64::MAX;
        for (city, _) in visited.iter().enumerate().filter(|(_, v)| !**v) {
            let d = table.distance(last, city);
            if d < nearest_dist {
                nearest = Some(city);
                nearest_dist = d;
            }
        }
        // Unreachable with n >= 1 unvisited left, but keep the tour valid.
        let Some(next) = nearest.or_else(|| visited.iter().position(|v| !v)) else {
            break;
        };
        visited[next] = true;
        tour.push(next);
        length += table.distance(last, next);
        last = next;
    }
    length += table.distance(last, start);
    (tour, length)
}
