//! Per-tick orchestration: cast, diff, lay out, select, apply.

use crate::appearance::{AppearanceState, AppearanceUpdater};
use crate::config::PointerConfig;
use crate::error::PointerError;
use crate::hit_state::{ColorDecision, HitState, HitStateTracker, HitTransition};
use crate::raycast::{CustomRaycast, RayCastResult, RaycastEngine};
use crate::selection::{
    DroneLookup, LineLookup, SelectionOutputs, SelectionResolver, SelectionTrigger, WaypointLines,
};
use crate::visuals::{CursorSource, PointerVisuals, VisualHandle};
use glam::Vec3;
use pointercast_core::{Pose, SimTick};
use pointercast_physics::PhysicsQuery;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// Supplies the emitter pose each tick.
pub trait OriginProvider {
    /// Pose of the emitting transform right now.
    fn pose(&self) -> Pose;
}

impl OriginProvider for Pose {
    fn pose(&self) -> Pose {
        *self
    }
}

/// Policy hook applied to the computed beam length.
pub type LengthOverride = Box<dyn Fn(f32) -> f32>;

/// Whether the pointer is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerState {
    /// Visuals hidden; no raycasts.
    Inactive,
    /// Casting and drawing every tick.
    Active,
}

/// Collaborators sampled for one tick.
pub struct TickInputs<'a> {
    /// Default physics provider.
    pub world: &'a dyn PhysicsQuery,
    /// Emitter pose source.
    pub origin: &'a dyn OriginProvider,
    /// Secondary trigger used for drone selection.
    pub trigger: &'a dyn SelectionTrigger,
    /// Drone select actions.
    pub drones: &'a mut dyn DroneLookup,
}

/// Everything a tick produced, as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickOutput {
    /// Tick the output belongs to.
    pub tick: SimTick,
    /// Beam length after clamping and the override hook.
    pub tracer_length: f32,
    /// Raw ray result.
    pub result: RayCastResult,
    /// Enter/exit and colour decision.
    pub transition: HitTransition,
    /// Transforms applied to the visuals.
    pub appearance: AppearanceState,
    /// Ground/line/drone outcomes.
    pub selection: SelectionOutputs,
    /// The interactor proxy was snapped back onto the cursor.
    pub interactor_moved: bool,
}

/// Straight laser pointer renderer.
///
/// Owns the hit state and the visual handles; the host calls [`Self::tick`]
/// once per frame.
pub struct PointerRenderer<V: VisualHandle> {
    config: PointerConfig,
    visuals: PointerVisuals<V>,
    engine: RaycastEngine,
    hit_state: HitStateTracker,
    appearance: AppearanceUpdater,
    selection: SelectionResolver,
    lines: Box<dyn LineLookup>,
    length_override: LengthOverride,
    pointer_active: bool,
    state: PointerState,
    tick: SimTick,
}

impl<V: VisualHandle> PointerRenderer<V> {
    /// Build a pointer around `visuals`.
    ///
    /// A primitive cursor is sized from the config; a custom cursor keeps its
    /// authored scale. Either way that scale becomes the fixed rescale base.
    /// Both elements start hidden.
    pub fn new(config: PointerConfig, mut visuals: PointerVisuals<V>) -> Self {
        if visuals.cursor_source == CursorSource::Primitive {
            visuals.cursor.set_local_scale(config.default_cursor_scale());
        }
        let cursor_base_scale = visuals.cursor.local_scale();
        visuals.tracer.set_visible(false);
        visuals.cursor.set_visible(false);

        debug!(
            max_length = config.max_length,
            ?cursor_base_scale,
            "pointer renderer created"
        );

        let appearance = AppearanceUpdater::new(&config, cursor_base_scale);
        Self {
            config,
            visuals,
            engine: RaycastEngine::new(),
            hit_state: HitStateTracker::new(),
            appearance,
            selection: SelectionResolver::new(),
            lines: Box::new(WaypointLines::new()),
            length_override: Box::new(|length| length),
            pointer_active: false,
            state: PointerState::Inactive,
            tick: SimTick::ZERO,
        }
    }

    /// Use `lines` to resolve struck line colliders.
    pub fn with_line_lookup(mut self, lines: impl LineLookup + 'static) -> Self {
        self.lines = Box::new(lines);
        self
    }

    /// Replace the default physics provider.
    pub fn with_custom_raycast(mut self, custom: CustomRaycast) -> Self {
        self.engine = RaycastEngine::with_custom(custom);
        self
    }

    /// Adjust the computed beam length before layout.
    pub fn with_length_override(mut self, hook: impl Fn(f32) -> f32 + 'static) -> Self {
        self.length_override = Box::new(hook);
        self
    }

    /// Settings in use.
    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    /// Visual handles, as last applied.
    pub fn visuals(&self) -> &PointerVisuals<V> {
        &self.visuals
    }

    /// Current/previous hit bookkeeping.
    pub fn hit_state(&self) -> &HitState {
        self.hit_state.state()
    }

    /// Orchestration state after the last tick.
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Next tick to be processed.
    pub fn current_tick(&self) -> SimTick {
        self.tick
    }

    /// Turn the pointer on or off; takes effect on the next tick.
    pub fn set_active(&mut self, active: bool) {
        self.pointer_active = active;
    }

    /// Flip waypoint placement mode; returns the new mode.
    pub fn toggle_waypoint_mode(&mut self) -> bool {
        self.selection.toggle_waypoint_mode()
    }

    /// Whether the beam rested on ground at the last active tick.
    pub fn is_over_ground(&self) -> bool {
        self.selection.is_over_ground()
    }

    /// Whether a waypoint can be placed at [`Self::ground_point`].
    pub fn is_setting_waypoint(&self) -> bool {
        self.selection.is_setting_waypoint()
    }

    /// Last known ground contact.
    pub fn ground_point(&self) -> Vec3 {
        self.selection.ground_point()
    }

    /// Run one frame.
    ///
    /// Returns `Ok(None)` while inactive. The hit state is not reset on
    /// deactivation, so the first tick after reactivation diffs against the
    /// last active tick.
    ///
    /// A selection error leaves the tick uncommitted: the hit state, the tick
    /// counter and the visuals keep their values from the last good tick, so
    /// a retry reports the same enter/exit.
    pub fn tick(&mut self, inputs: TickInputs<'_>) -> Result<Option<TickOutput>, PointerError> {
        let tick = self.tick;

        if !(self.pointer_active || self.config.is_forced_visible()) {
            if self.state == PointerState::Active {
                self.visuals.tracer.set_visible(false);
                self.visuals.cursor.set_visible(false);
                self.state = PointerState::Inactive;
                debug!(tick = tick.0, "pointer hidden");
            }
            self.tick = tick.advance(1);
            return Ok(None);
        }
        if self.state == PointerState::Inactive {
            self.state = PointerState::Active;
            debug!(tick = tick.0, "pointer shown");
        }

        let origin = inputs.origin.pose().normalized();
        let result = self.engine.cast(
            inputs.world,
            &origin,
            self.config.max_length,
            self.config.layers_to_ignore,
        );

        let transition = self.hit_state.update(&result);

        let tracer_length = self.tracer_length(&result);
        let appearance = self
            .appearance
            .update(tracer_length, &origin, self.hit_state.state());
        trace!(tick = tick.0, tracer_length, ?appearance, "appearance");

        let selection = match self.selection.resolve(
            &result,
            inputs.trigger,
            self.lines.as_ref(),
            inputs.drones,
        ) {
            Ok(selection) => selection,
            Err(err) => {
                self.hit_state.discard_tick();
                warn!(tick = tick.0, error = %err, "pointer tick discarded");
                return Err(err);
            }
        };

        self.hit_state.end_tick();
        self.tick = tick.advance(1);
        if let Some(exited) = transition.exited.and_then(|hit| hit.collider) {
            info!(tick = tick.0, collider = %exited, "pointer exit");
        }
        if let Some(entered) = transition.entered.and_then(|hit| hit.collider) {
            info!(tick = tick.0, collider = %entered, "pointer enter");
        }

        self.apply(&origin, &appearance, transition.color);
        let interactor_moved = self.update_interactor(&origin, tracer_length, &appearance);

        debug!(
            tick = tick.0,
            hit = result.hit,
            tracer_length,
            color = ?transition.color,
            "pointer tick"
        );

        Ok(Some(TickOutput {
            tick,
            tracer_length,
            result,
            transition,
            appearance,
            selection,
            interactor_moved,
        }))
    }

    fn tracer_length(&self, result: &RayCastResult) -> f32 {
        let max_length = self.config.max_length;
        let length = if result.hit && result.distance < max_length {
            result.distance
        } else {
            max_length
        };
        (self.length_override)(length)
    }

    fn apply(&mut self, origin: &Pose, appearance: &AppearanceState, color: ColorDecision) {
        let visuals = &mut self.visuals;
        visuals.container.set_world_pose(origin);

        visuals.tracer.set_local_scale(appearance.tracer_scale);
        visuals
            .tracer
            .set_local_position(appearance.tracer_local_position);
        visuals.cursor.set_local_scale(appearance.cursor_scale);
        visuals
            .cursor
            .set_local_position(appearance.cursor_local_position);
        if let Some(forward) = appearance.cursor_forward {
            visuals.cursor.set_forward(forward);
        }

        let color = match color {
            ColorDecision::Valid => self.config.valid_color,
            ColorDecision::Invalid => self.config.invalid_color,
        };
        visuals.tracer.set_material_color(color);
        visuals.cursor.set_material_color(color);

        visuals
            .tracer
            .set_visible(self.config.tracer_visibility.resolve(self.pointer_active));
        visuals
            .cursor
            .set_visible(self.config.cursor_visibility.resolve(self.pointer_active));
    }

    /// Snap the interactor proxy onto the cursor tip.
    fn update_interactor(
        &mut self,
        origin: &Pose,
        tracer_length: f32,
        appearance: &AppearanceState,
    ) -> bool {
        let Some(interactor) = self.visuals.interactor.as_mut() else {
            return false;
        };
        interactor.set_local_scale(appearance.interactor_scale);

        let cursor_position = origin.point_at(tracer_length);
        if interactor.world_position().distance(cursor_position) > 0.0 {
            interactor.set_world_position(cursor_position);
            return true;
        }
        false
    }
}
