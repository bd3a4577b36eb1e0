use catalog::{ContentId, ContentPoint};
use foundation::math::{Vec2, stable_total_cmp_f64};

use crate::projection::{Projector, ViewState};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Hit radius in pixels at perspective scale 1.
    pub base_radius: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self { base_radius: 8.0 }
    }
}

/// Screen-space hit testing against projected content points.
///
/// Ordering contract:
/// - Only front-facing points (rotated depth `> 0`) are hittable.
/// - A point is hit when the cursor is within `base_radius * scale` of its
///   projected position (inclusive).
/// - If several points are hit, the first one in input order wins. This is
///   not depth order; callers that want nearest-wins should order candidates
///   with [`sort_by_screen_distance`] first.
pub fn hit_test<'a>(
    screen: Vec2,
    contents: &'a [ContentPoint],
    view: &ViewState,
    center: Vec2,
    radius: f64,
    projector: &Projector,
    opts: PickOptions,
) -> Option<&'a ContentId> {
    hit_test_refs(screen, contents.iter(), view, center, radius, projector, opts)
}

/// Same as [`hit_test`] for an already filtered or reordered subset.
pub fn hit_test_refs<'a, I>(
    screen: Vec2,
    contents: I,
    view: &ViewState,
    center: Vec2,
    radius: f64,
    projector: &Projector,
    opts: PickOptions,
) -> Option<&'a ContentId>
where
    I: IntoIterator<Item = &'a ContentPoint>,
{
    if !screen.is_finite() {
        return None;
    }

    contents.into_iter().find_map(|point| {
        let t = projector.project(point, view, center, radius);
        if !t.is_front_facing() {
            return None;
        }
        let hit_radius = opts.base_radius * t.scale;
        (t.screen.distance(screen) <= hit_radius).then_some(&point.id)
    })
}

/// Orders `contents` by projected distance to `screen`, nearest first.
///
/// Equal distances keep input order.
pub fn sort_by_screen_distance<'a>(
    screen: Vec2,
    contents: &'a [ContentPoint],
    view: &ViewState,
    center: Vec2,
    radius: f64,
    projector: &Projector,
) -> Vec<&'a ContentPoint> {
    let mut keyed: Vec<(f64, &'a ContentPoint)> = contents
        .iter()
        .map(|p| {
            let t = projector.project(p, view, center, radius);
            (t.screen.distance(screen), p)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| stable_total_cmp_f64(*a, *b));
    keyed.into_iter().map(|(_, p)| p).collect()
}
