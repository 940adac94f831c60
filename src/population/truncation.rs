use crate::solution::Solution;

/// Secondary ranking used to shrink a non-dominated set down to a capacity.
///
/// Implementations receive members that are already mutually non-dominated, so only
/// a diversity/density criterion remains to choose between them.
pub trait TruncationPolicy<S> {
    /// Removes members until at most `capacity` remain.
    fn truncate(&self, members: &mut Vec<S>, capacity: usize);
}

/// Keeps the least crowded members (largest crowding distance first).
///
/// Members are reordered by descending crowding distance; equal distances keep their
/// relative order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrowdingDistance;

impl<S: Solution> TruncationPolicy<S> for CrowdingDistance {
    fn truncate(&self, members: &mut Vec<S>, capacity: usize) {
        if members.len() <= capacity {
            return;
        }

        let objectives: Vec<&[f64]> = members.iter().map(|m| m.objectives()).collect();
        let distances = crowding_distance(&objectives);

        let mut ranked: Vec<(f64, S)> = distances.into_iter().zip(members.drain(..)).collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(capacity);

        members.extend(ranked.into_iter().map(|(_, member)| member));
    }
}

/// Crowding distance of each objective vector within the set.
///
/// Boundary points of every objective get `f64::INFINITY`; interior points accumulate
/// the normalized gap between their neighbours. Objectives with zero range contribute
/// nothing.
pub fn crowding_distance(objectives: &[&[f64]]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}
