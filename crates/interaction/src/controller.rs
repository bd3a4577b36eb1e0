//! Drag-to-rotate, wheel-to-zoom view controller.
//!
//! The controller owns the [`ViewState`] consumed by the projector. It is a
//! two-state machine (`Idle`, `Dragging`):
//! - pointer down enters `Dragging` and records the down position
//! - pointer move while dragging rotates by `-delta * sensitivity`, measured
//!   from the previous move (incremental, not from the down position)
//! - pointer up (any state) returns to `Idle`; if the pointer travelled no
//!   further than `click_slop_px` since going down, the release is a click
//!   and is hit-tested against the supplied content
//! - wheel changes zoom by one step per event, clamped, in any state
//!
//! There is no inertia: rotation stops the moment dragging stops.

use catalog::{ContentId, ContentPoint};
use foundation::math::{Vec2, YawPitch, sign_or_zero};
use scene::{PickOptions, Projector, ViewState, Viewport, hit_test_refs};
use tracing::{debug, trace};

use crate::error::InputError;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Radians of rotation per pixel of drag.
    pub sensitivity: f64,
    /// Zoom change per wheel event.
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Total pointer travel (pixels) below which a press/release is a click.
    pub click_slop_px: f64,
    pub pick: PickOptions,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            zoom_step: 0.1,
            min_zoom: 0.5,
            max_zoom: 2.0,
            click_slop_px: 3.0,
            pick: PickOptions::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        down: Vec2,
        last: Vec2,
        /// Accumulated pointer path length since `down`.
        travel: f64,
    },
}

#[derive(Debug, Clone)]
pub struct ViewInteractionController {
    config: ControllerConfig,
    projector: Projector,
    viewport: Viewport,
    view: ViewState,
    state: DragState,
}

impl ViewInteractionController {
    pub fn new(config: ControllerConfig, projector: Projector, viewport: Viewport) -> Self {
        Self {
            config,
            projector,
            viewport,
            view: ViewState::default(),
            state: DragState::Idle,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen center and radius for the current view and viewport.
    pub fn frame(&self) -> (Vec2, f64) {
        self.projector.frame(&self.viewport, &self.view)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), InputError> {
        if !viewport.is_valid() {
            return Err(InputError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn pointer_down(&mut self, pos: Vec2) -> Result<(), InputError> {
        check_pointer(pos)?;
        self.state = DragState::Dragging {
            down: pos,
            last: pos,
            travel: 0.0,
        };
        trace!(x = pos.x, y = pos.y, "drag start");
        Ok(())
    }

    /// Returns `true` if the rotation changed.
    pub fn pointer_move(&mut self, pos: Vec2) -> Result<bool, InputError> {
        check_pointer(pos)?;
        let DragState::Dragging { down, last, travel } = self.state else {
            return Ok(false);
        };

        let delta = pos - last;
        // Inverted so the content follows the pointer.
        let rotation = YawPitch::new(
            self.view.rotation.x - delta.y * self.config.sensitivity,
            self.view.rotation.y - delta.x * self.config.sensitivity,
        );
        if !rotation.is_finite() {
            return Err(InputError::NonFinitePointer { x: pos.x, y: pos.y });
        }

        self.view.rotation = rotation;
        self.state = DragState::Dragging {
            down,
            last: pos,
            travel: travel + delta.length(),
        };
        Ok(delta != Vec2::ZERO)
    }

    /// Ends any drag. If the press was a click, hit-tests `contents` and
    /// returns the selected id.
    pub fn pointer_up<'a, I>(
        &mut self,
        pos: Vec2,
        contents: I,
    ) -> Result<Option<&'a ContentId>, InputError>
    where
        I: IntoIterator<Item = &'a ContentPoint>,
    {
        let previous = std::mem::take(&mut self.state);
        check_pointer(pos)?;

        let DragState::Dragging { last, travel, .. } = previous else {
            return Ok(None);
        };
        let travel = travel + (pos - last).length();
        if travel > self.config.click_slop_px {
            trace!(travel, "drag end");
            return Ok(None);
        }
        Ok(self.click(pos, contents))
    }

    /// Abandons a drag without producing a click (pointer left the surface).
    pub fn pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }

    /// Returns the new zoom.
    pub fn wheel(&mut self, delta_y: f64) -> Result<f64, InputError> {
        if !delta_y.is_finite() {
            return Err(InputError::NonFiniteWheel { delta_y });
        }
        let step = sign_or_zero(-delta_y) * self.config.zoom_step;
        self.view.zoom = (self.view.zoom + step).clamp(self.config.min_zoom, self.config.max_zoom);
        Ok(self.view.zoom)
    }

    /// Hit-tests `contents` at `pos` under the current view.
    pub fn click<'a, I>(&self, pos: Vec2, contents: I) -> Option<&'a ContentId>
    where
        I: IntoIterator<Item = &'a ContentPoint>,
    {
        let (center, radius) = self.frame();
        let hit = hit_test_refs(
            pos,
            contents,
            &self.view,
            center,
            radius,
            &self.projector,
            self.config.pick,
        );
        debug!(x = pos.x, y = pos.y, hit = ?hit, "click");
        hit
    }

    /// Back to `{rotation: {0, 0}, zoom: 1}`, idle.
    pub fn reset(&mut self) {
        self.view = ViewState::default();
        self.state = DragState::Idle;
    }
}

fn check_pointer(pos: Vec2) -> Result<(), InputError> {
    if pos.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFinitePointer { x: pos.x, y: pos.y })
    }
}
