//! Collapse overlapping near-duplicate detections into one box per widget.
//!
//! Template matching against a noisy render yields several peaks around
//! each real on-screen widget. Greedy overlap grouping removes the
//! duplicates without needing a match-count threshold.

use crate::geometry::{mean_box, RatioBox};

/// Assign each box to the first existing group whose representative it
/// overlaps, else start a new group; each group collapses to the
/// coordinate-wise mean of its members. The output is order-independent as
/// a multiset: permuting the input reorders groups but not their contents.
pub fn group_boxes(boxes: &[RatioBox]) -> Vec<RatioBox> {
    let mut groups: Vec<Vec<RatioBox>> = Vec::new();

    for &bbox in boxes {
        match groups
            .iter_mut()
            .find(|group| group[0].overlaps(&bbox))
        {
            Some(group) => group.push(bbox),
            None => groups.push(vec![bbox]),
        }
    }

    groups.iter().map(|group| mean_box(group)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rb(x1: f32, y1: f32, x2: f32, y2: f32) -> RatioBox {
        RatioBox { x1, y1, x2, y2 }
    }

    #[test]
    fn overlapping_pair_and_singleton_make_two_groups() {
        let boxes = [
            rb(0.0, 0.0, 0.10, 0.10),
            rb(0.01, 0.01, 0.11, 0.11),
            rb(0.50, 0.50, 0.60, 0.60),
        ];

        let groups = group_boxes(&boxes);
        assert_eq!(groups.len(), 2);

        let pair = groups
            .iter()
            .find(|g| g.x1 < 0.1)
            .expect("averaged pair group");
        assert!((pair.x1 - 0.005).abs() < 1e-6);
        assert!((pair.x2 - 0.105).abs() < 1e-6);

        let single = groups.iter().find(|g| g.x1 > 0.4).expect("singleton group");
        assert_eq!(*single, rb(0.50, 0.50, 0.60, 0.60));
    }

    #[test]
    fn grouping_is_order_independent() {
        let boxes = [
            rb(0.0, 0.0, 0.10, 0.10),
            rb(0.01, 0.01, 0.11, 0.11),
            rb(0.50, 0.50, 0.60, 0.60),
        ];
        let permuted = [boxes[2], boxes[0], boxes[1]];

        let mut a = group_boxes(&boxes);
        let mut b = group_boxes(&permuted);
        let key = |g: &RatioBox| (g.x1 * 1e6) as i64;
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_boxes(&[]).is_empty());
    }

    #[test]
    fn chain_joins_through_first_member_only() {
        // The second box overlaps the first (the representative); the third
        // overlaps the second but not the first, so it opens a new group.
        let boxes = [
            rb(0.00, 0.0, 0.10, 0.1),
            rb(0.08, 0.0, 0.18, 0.1),
            rb(0.15, 0.0, 0.25, 0.1),
        ];
        let groups = group_boxes(&boxes);
        assert_eq!(groups.len(), 2);
    }
}
