use catalog::ContentPoint;

use crate::depth::sort_refs_by_depth;
use crate::projection::{Projector, Transformed2D, ViewState};
use crate::viewport::Viewport;

/// One point of a render pass, ready for a drawing backend.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderedPoint<'a> {
    pub point: &'a ContentPoint,
    pub projected: Transformed2D,
}

/// Sorts `points` back-to-front and projects each one.
///
/// The result is in painter's order: draw it front to back of the slice and
/// nearer points overlap farther ones.
pub fn render_pass<'a, I>(
    points: I,
    view: &ViewState,
    viewport: &Viewport,
    projector: &Projector,
) -> Vec<RenderedPoint<'a>>
where
    I: IntoIterator<Item = &'a ContentPoint>,
{
    let (center, radius) = projector.frame(viewport, view);
    sort_refs_by_depth(points, view)
        .into_iter()
        .map(|point| RenderedPoint {
            point,
            projected: projector.project(point, view, center, radius),
        })
        .collect()
}
