//! Single-owner explorer session.
//!
//! A [`Session`] owns every piece of mutable state: the view controller, the
//! weight engine and its gesture tracker, the cached visible set and the
//! filter's random source. Hosts feed it timestamped [`Input`]s through
//! [`Session::dispatch`] and pull painter-ordered points from
//! [`Session::render`]. Because everything goes through `&mut self`, render
//! and input can never observe a half-applied transition.

use std::collections::BTreeMap;

use catalog::{Catalog, Category, ContentId, ContentPoint};
use foundation::math::Vec2;
use foundation::time::Time;
use interaction::{InputError, ViewInteractionController};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{Event, EventBus, EventKind, Frame};
use scene::{FilterPolicy, Projector, RenderedPoint, ViewState, Viewport, render_pass, select_visible_indices};
use serde::Serialize;
use tracing::{debug, info, warn};
use weights::{CategoryProbabilities, CategoryWeightEngine, GestureTracker, WeightGesture};

use crate::config::ExplorerConfig;
use crate::script::{Input, Script};

type SelectCallback = Box<dyn FnMut(&ContentId)>;

pub struct Session {
    catalog: Catalog,
    controller: ViewInteractionController,
    weights: CategoryWeightEngine,
    gestures: GestureTracker,
    policy: FilterPolicy,
    rng: StdRng,
    /// Indices into `catalog` of the current filter pass.
    visible: Vec<usize>,
    events: EventBus,
    frame: Frame,
    selections: Vec<ContentId>,
    on_select: Option<SelectCallback>,
}

/// Serializable summary of a session's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub zoom: f64,
    pub dragging: bool,
    pub weights: BTreeMap<Category, f64>,
    pub visible: usize,
    pub selections: Vec<ContentId>,
}

impl Session {
    pub fn new(catalog: Catalog, config: &ExplorerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            catalog,
            controller: ViewInteractionController::new(
                config.controller_config(),
                Projector::new(config.projection_config()),
                config.viewport(),
            ),
            weights: CategoryWeightEngine::with_hold_config(
                config.default_category,
                config.hold_config(),
            ),
            gestures: GestureTracker::new(config.gesture_timing()),
            policy: config.filter_policy(),
            rng,
            visible: Vec::new(),
            events: EventBus::new(),
            frame: Frame::first(Time::default()),
            selections: Vec::new(),
            on_select: None,
        };
        session.refilter();
        session
    }

    /// Called with the id of every content point selected by a click.
    pub fn set_on_select<F>(&mut self, callback: F)
    where
        F: FnMut(&ContentId) + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn replace_catalog(&mut self, catalog: Catalog) {
        info!(points = catalog.len(), "catalog replaced");
        self.catalog = catalog;
        self.refilter();
    }

    pub fn view(&self) -> ViewState {
        self.controller.view()
    }

    pub fn controller(&self) -> &ViewInteractionController {
        &self.controller
    }

    pub fn weights(&self) -> &CategoryProbabilities {
        self.weights.probabilities()
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FilterPolicy) {
        self.policy = policy;
        self.refilter();
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Points of the current filter pass, in catalog order.
    pub fn visible(&self) -> impl Iterator<Item = &ContentPoint> + '_ {
        let points = self.catalog.points();
        self.visible.iter().map(move |&i| &points[i])
    }

    pub fn selections(&self) -> &[ContentId] {
        &self.selections
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Applies one host input at `now`.
    ///
    /// Any hold increments that fell due before `now` are applied first.
    /// Returns the selected content id when the input completed a click on a
    /// visible point. Rejected input leaves the state unchanged.
    pub fn dispatch(&mut self, input: Input, now: Time) -> Result<Option<ContentId>, InputError> {
        let result = if now.is_finite() {
            self.begin_frame(now);
            self.handle(input, self.frame.time)
        } else {
            Err(InputError::NonFiniteTime { seconds: now.0 })
        };
        if let Err(e) = &result {
            warn!(error = %e, ?input, "input rejected");
            self.events.emit(self.frame, EventKind::Reject, e.to_string());
        }
        result
    }

    /// Advances live holds without any other input. A non-finite `now` is
    /// ignored.
    pub fn tick(&mut self, now: Time) {
        self.begin_frame(now);
    }

    /// Painter-ordered projection of the visible set at `now`.
    ///
    /// A non-finite `now` renders the current state without advancing holds.
    pub fn render(&mut self, now: Time) -> Vec<RenderedPoint<'_>> {
        self.begin_frame(now);
        let points = self.catalog.points();
        render_pass(
            self.visible.iter().map(|&i| &points[i]),
            &self.controller.view(),
            &self.controller.viewport(),
            self.controller.projector(),
        )
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), InputError> {
        self.controller.set_viewport(Viewport::new(width, height))
    }

    /// Recomputes the visible set. Under the sampling policy this is a fresh
    /// draw, so membership can change even when the weights did not.
    pub fn refilter(&mut self) {
        self.visible = select_visible_indices(
            self.catalog.points(),
            self.weights.probabilities(),
            self.policy,
            &mut self.rng,
        );
        self.events.emit(
            self.frame,
            EventKind::Filter,
            format!("{} of {} visible", self.visible.len(), self.catalog.len()),
        );
    }

    /// Back to the initial view and weight vector. The catalog and the
    /// selection history are kept.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.gestures.reset();
        self.weights.reset();
        self.events.emit(self.frame, EventKind::Reset, "");
        self.refilter();
    }

    /// Replays `script` and returns the ids selected along the way.
    pub fn replay(&mut self, script: &Script) -> Vec<ContentId> {
        let mut selected = Vec::new();
        for step in script.steps() {
            if let Ok(Some(id)) = self.dispatch(step.input, step.time()) {
                selected.push(id);
            }
        }
        selected
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let view = self.controller.view();
        let weights = self.weights.probabilities();
        SessionSnapshot {
            rotation_x: view.rotation.x,
            rotation_y: view.rotation.y,
            zoom: view.zoom,
            dragging: self.controller.is_dragging(),
            weights: Category::ALL.iter().map(|&c| (c, weights.get(c))).collect(),
            visible: self.visible.len(),
            selections: self.selections.clone(),
        }
    }

    fn begin_frame(&mut self, now: Time) {
        if !now.is_finite() {
            warn!(now = now.0, "non-finite frame time ignored");
            return;
        }
        self.frame = self.frame.next(now);
        let holds = self.gestures.tick(self.frame.time);
        if holds.is_empty() {
            return;
        }
        for gesture in holds {
            self.weights.apply(gesture);
        }
        self.events.emit(
            self.frame,
            EventKind::Weights,
            self.weights.probabilities().to_string(),
        );
        self.refilter();
    }

    fn handle(&mut self, input: Input, now: Time) -> Result<Option<ContentId>, InputError> {
        match input {
            Input::PointerDown { x, y } => self.controller.pointer_down(Vec2::new(x, y))?,
            Input::PointerMove { x, y } => {
                self.controller.pointer_move(Vec2::new(x, y))?;
            }
            Input::PointerUp { x, y } => return self.pointer_up(Vec2::new(x, y)),
            Input::PointerLeave => {
                self.controller.pointer_leave();
                self.gestures.cancel();
            }
            Input::Wheel { delta_y } => {
                let zoom = self.controller.wheel(delta_y)?;
                debug!(zoom, "zoom");
            }
            Input::CategoryPress { category } => self.gestures.press(category, now),
            Input::CategoryRelease => {
                if let Some(gesture) = self.gestures.release(now) {
                    self.apply_gesture(gesture);
                }
            }
            Input::CategoryCancel => self.gestures.cancel(),
            Input::Tick => {}
            Input::Resize { width, height } => self.resize(width, height)?,
            Input::Reset => self.reset(),
        }
        Ok(None)
    }

    fn pointer_up(&mut self, pos: Vec2) -> Result<Option<ContentId>, InputError> {
        // Only drawn points are clickable.
        let points = self.catalog.points();
        let candidates = self.visible.iter().map(|&i| &points[i]);
        let Some(id) = self.controller.pointer_up(pos, candidates)?.cloned() else {
            return Ok(None);
        };

        info!(id = %id, "content selected");
        self.events.emit(self.frame, EventKind::Select, id.as_str());
        self.selections.push(id.clone());
        if let Some(callback) = self.on_select.as_mut() {
            callback(&id);
        }
        Ok(Some(id))
    }

    fn apply_gesture(&mut self, gesture: WeightGesture) {
        self.weights.apply(gesture);
        self.events.emit(
            self.frame,
            EventKind::Weights,
            format!("{gesture:?}: {}", self.weights.probabilities()),
        );
        self.refilter();
    }
}
