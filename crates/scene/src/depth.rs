use catalog::ContentPoint;
use foundation::math::stable_total_cmp_f64;

use crate::projection::ViewState;

/// Rotated depth of a content point under `view`.
///
/// Uses the exact rotation the projector uses, so sort order and projected
/// depth always agree.
pub fn rotated_depth(point: &ContentPoint, view: &ViewState) -> f64 {
    view.rotation.rotated_depth(point.position.unit_to_signed())
}

/// Orders points back-to-front (ascending rotated depth) for painter's-algorithm drawing.
///
/// Ordering contract:
/// - Farthest (most negative depth) first.
/// - Equal depths keep their input order (stable sort).
pub fn sort_by_depth<'a>(points: &'a [ContentPoint], view: &ViewState) -> Vec<&'a ContentPoint> {
    sort_refs_by_depth(points.iter(), view)
}

/// Same as [`sort_by_depth`] for an already filtered subset.
pub fn sort_refs_by_depth<'a, I>(points: I, view: &ViewState) -> Vec<&'a ContentPoint>
where
    I: IntoIterator<Item = &'a ContentPoint>,
{
    let mut keyed: Vec<(f64, &'a ContentPoint)> = points
        .into_iter()
        .map(|p| (rotated_depth(p, view), p))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| stable_total_cmp_f64(*a, *b));
    keyed.into_iter().map(|(_, p)| p).collect()
}
