//! Turns raw pointer and keyboard input into canvas edits.
//!
//! The controller receives ground-plane hit points (already converted to world
//! coordinates by the host) together with explicit timestamps, so every gesture
//! can be replayed deterministically in tests.

use std::time::Instant;

use log::debug;

use super::keyboard::{HeldKeys, PanKey};
use super::mode::{InteractionMode, ShapeKind};
use super::store::{LineId, ObjectId, ObjectStore};
use super::{distance, WorldPoint};
use crate::config::CanvasConfig;

/// Press recorded in placement mode, waiting to be confirmed as a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingClick {
    pub anchor: WorldPoint,
    pub pressed_at: Instant,
}

/// What a pointer event changed, so the host can sync only that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    ObjectPlaced(ObjectId),
    LineStarted(LineId),
    LineExtended(LineId),
    LineFinished(LineId),
    ClickDiscarded,
}

#[derive(Debug)]
pub struct InteractionController {
    store: ObjectStore,
    pending_click: Option<PendingClick>,
    held_keys: HeldKeys,
    config: CanvasConfig,
}

impl InteractionController {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            store: ObjectStore::new(config.clamp_thickness(config.default_line_thickness)),
            pending_click: None,
            held_keys: HeldKeys::default(),
            config,
        }
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn mode(&self) -> InteractionMode {
        self.store.mode()
    }

    pub fn pending_click(&self) -> Option<PendingClick> {
        self.pending_click
    }

    /// Whether the orbit camera should react to drags right now.
    pub fn orbit_enabled(&self) -> bool {
        self.store.mode().allows_orbit()
    }

    pub fn is_capturing(&self) -> bool {
        self.store.active_line().is_some()
    }

    /// Switches mode, sealing any open capture and dropping a pending click.
    ///
    /// Returns the line that was sealed, if one was open.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Option<LineId> {
        let sealed = self.store.end_active_line();
        self.pending_click = None;
        if self.store.mode() != mode {
            debug!("canvas mode {:?} -> {:?}", self.store.mode(), mode);
        }
        self.store.set_mode(mode);
        sealed
    }

    /// Toolbar shape button: selects `kind`, or returns to idle if it was selected.
    pub fn toggle_shape(&mut self, kind: ShapeKind) -> Option<LineId> {
        if self.store.mode() == InteractionMode::Placing(kind) {
            self.set_mode(InteractionMode::Idle)
        } else {
            self.set_mode(InteractionMode::Placing(kind))
        }
    }

    /// Toolbar draw button.
    pub fn toggle_drawing(&mut self) -> Option<LineId> {
        if self.store.mode().is_drawing() {
            self.set_mode(InteractionMode::Idle)
        } else {
            self.set_mode(InteractionMode::Drawing)
        }
    }

    pub fn clear_all(&mut self) {
        self.pending_click = None;
        self.store.clear_all();
        debug!("canvas cleared");
    }

    /// Sets the slider thickness used by the next line, clamped to the slider range.
    pub fn set_line_thickness(&mut self, thickness: u8) {
        let thickness = self.config.clamp_thickness(thickness);
        self.store.set_line_thickness(thickness);
    }

    pub fn on_pointer_down(&mut self, point: WorldPoint, timestamp: Instant) -> Option<CanvasEvent> {
        match self.store.mode() {
            InteractionMode::Drawing => {
                let thickness = f32::from(self.store.line_thickness());
                let id = self.store.begin_line(point, thickness);
                debug!("{} started at {:?}", id, point);
                Some(CanvasEvent::LineStarted(id))
            }
            InteractionMode::Placing(_) => {
                self.pending_click = Some(PendingClick {
                    anchor: point,
                    pressed_at: timestamp,
                });
                None
            }
            InteractionMode::Idle => None,
        }
    }

    pub fn on_pointer_move(&mut self, point: WorldPoint) -> Option<CanvasEvent> {
        if self.store.active_line().is_some() {
            return self
                .store
                .append_point_to_active_line(point)
                .map(CanvasEvent::LineExtended);
        }

        let pending = self.pending_click?;
        if distance(pending.anchor, point) > self.config.click_move_threshold {
            self.pending_click = None;
            debug!("pending click dropped: pointer moved");
            return Some(CanvasEvent::ClickDiscarded);
        }
        None
    }

    pub fn on_pointer_up(&mut self, point: WorldPoint, timestamp: Instant) -> Option<CanvasEvent> {
        if let Some(id) = self.store.end_active_line() {
            debug!(
                "{} finished with {} points",
                id,
                self.store.line(id).map_or(0, |line| line.points().len())
            );
            return Some(CanvasEvent::LineFinished(id));
        }

        let pending = self.pending_click.take()?;
        let kind = self.store.mode().placing()?;

        let moved = distance(pending.anchor, point);
        let held = timestamp.saturating_duration_since(pending.pressed_at);
        if moved <= self.config.click_move_threshold && held <= self.config.click_max_duration {
            let id = self.store.place_object(point, kind);
            debug!("{} placed {} at {:?}", id, kind, point);
            Some(CanvasEvent::ObjectPlaced(id))
        } else {
            debug!("click discarded: moved {:.3}, held {:?}", moved, held);
            Some(CanvasEvent::ClickDiscarded)
        }
    }

    /// The pointer left the ground plane or the window.
    pub fn on_pointer_leave(&mut self) -> Option<CanvasEvent> {
        if let Some(id) = self.store.end_active_line() {
            debug!("{} finished on pointer leave", id);
            return Some(CanvasEvent::LineFinished(id));
        }
        self.pending_click
            .take()
            .map(|_| CanvasEvent::ClickDiscarded)
    }

    pub fn key_down(&mut self, key: PanKey) {
        self.held_keys.press(key);
    }

    pub fn key_up(&mut self, key: PanKey) {
        self.held_keys.release(key);
    }

    /// Forgets held keys, e.g. when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.held_keys.clear();
    }

    /// Camera translation for a frame that lasted `elapsed_seconds`.
    pub fn pan_tick(&self, elapsed_seconds: f32) -> WorldPoint {
        self.held_keys.pan_delta(self.config.pan_speed, elapsed_seconds)
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::time::Duration;

    fn placing(kind: ShapeKind) -> InteractionController {
        let mut controller = InteractionController::default();
        controller.set_mode(InteractionMode::Placing(kind));
        controller
    }

    #[test]
    fn clean_click_places_one_object() {
        let mut controller = placing(ShapeKind::Cube);
        let t0 = Instant::now();
        let point = [2.0, 0.0, 3.0];

        assert_eq!(controller.on_pointer_down(point, t0), None);
        let event = controller.on_pointer_up(point, t0 + Duration::from_millis(100));

        let objects = controller.store().objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].kind, ShapeKind::Cube);
        assert_eq!(objects[0].position, point);
        assert_eq!(event, Some(CanvasEvent::ObjectPlaced(objects[0].id)));
    }

    #[test]
    fn small_jitter_still_places_at_release_point() {
        let mut controller = placing(ShapeKind::Sphere);
        let t0 = Instant::now();

        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        controller.on_pointer_move([0.05, 0.0, 0.0]);
        controller.on_pointer_up([0.05, 0.0, 0.0], t0 + Duration::from_millis(50));

        assert_eq!(controller.store().objects()[0].position, [0.05, 0.0, 0.0]);
    }

    #[test]
    fn drag_during_placement_places_nothing() {
        let mut controller = placing(ShapeKind::Torus);
        let t0 = Instant::now();

        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        assert_eq!(
            controller.on_pointer_move([1.0, 0.0, 0.0]),
            Some(CanvasEvent::ClickDiscarded)
        );
        assert_eq!(controller.pending_click(), None);
        assert_eq!(
            controller.on_pointer_up([0.0, 0.0, 0.0], t0 + Duration::from_millis(10)),
            None
        );
        assert!(controller.store().objects().is_empty());
    }

    #[test]
    fn release_far_from_anchor_places_nothing() {
        let mut controller = placing(ShapeKind::Star);
        let t0 = Instant::now();

        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        let event = controller.on_pointer_up([0.0, 0.0, 0.5], t0 + Duration::from_millis(10));

        assert_eq!(event, Some(CanvasEvent::ClickDiscarded));
        assert!(controller.store().objects().is_empty());
    }

    #[test]
    fn slow_press_places_nothing() {
        let mut controller = placing(ShapeKind::Triangle);
        let t0 = Instant::now();

        controller.on_pointer_down([1.0, 0.0, 1.0], t0);
        controller.on_pointer_up([1.0, 0.0, 1.0], t0 + Duration::from_millis(301));
        assert!(controller.store().objects().is_empty());

        controller.on_pointer_down([1.0, 0.0, 1.0], t0);
        controller.on_pointer_up([1.0, 0.0, 1.0], t0 + Duration::from_millis(300));
        assert_eq!(controller.store().objects().len(), 1);
    }

    #[test]
    fn randomised_clicks_follow_the_heuristic() {
        let mut rng = rand::rng();
        let mut controller = placing(ShapeKind::Cube);
        let mut expected = 0;
        let t0 = Instant::now();

        for _ in 0..500 {
            let anchor = [
                rng.random_range(-50.0..50.0),
                0.0,
                rng.random_range(-50.0..50.0),
            ];
            let offset: f32 = rng.random_range(0.0..0.2);
            let millis: u64 = rng.random_range(0..600);
            let release = [anchor[0] + offset, 0.0, anchor[2]];

            controller.on_pointer_down(anchor, t0);
            controller.on_pointer_up(release, t0 + Duration::from_millis(millis));

            if distance(anchor, release) <= 0.1 && millis <= 300 {
                expected += 1;
            }
            assert_eq!(controller.store().objects().len(), expected);
        }
    }

    #[test]
    fn draw_gesture_keeps_every_point() {
        let mut controller = InteractionController::default();
        controller.set_mode(InteractionMode::Drawing);
        let t0 = Instant::now();

        let started = controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        let Some(CanvasEvent::LineStarted(id)) = started else {
            panic!("expected a line to start, got {started:?}");
        };

        for i in 1..=7 {
            let event = controller.on_pointer_move([i as f32, 0.0, 0.0]);
            assert_eq!(event, Some(CanvasEvent::LineExtended(id)));
        }
        assert_eq!(
            controller.on_pointer_up([7.0, 0.0, 0.0], t0),
            Some(CanvasEvent::LineFinished(id))
        );

        let line = controller.store().line(id).unwrap();
        assert_eq!(line.points().len(), 8);
        assert_eq!(line.thickness, 2.0);
        assert!(line.is_sealed());
    }

    #[test]
    fn new_lines_use_the_current_thickness() {
        let mut controller = InteractionController::default();
        controller.set_mode(InteractionMode::Drawing);
        controller.set_line_thickness(4);
        controller.on_pointer_down([0.0, 0.0, 0.0], Instant::now());

        assert_eq!(controller.store().lines()[0].thickness, 4.0);

        controller.set_line_thickness(42);
        assert_eq!(controller.store().line_thickness(), 5);
    }

    #[test]
    fn switching_mode_mid_capture_seals_the_line() {
        let mut controller = InteractionController::default();
        controller.set_mode(InteractionMode::Drawing);
        let t0 = Instant::now();

        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        controller.on_pointer_move([1.0, 0.0, 0.0]);
        let sealed = controller.set_mode(InteractionMode::Placing(ShapeKind::Cube));

        assert!(sealed.is_some());
        assert!(!controller.is_capturing());
        assert_eq!(controller.on_pointer_move([2.0, 0.0, 0.0]), None);

        let line = &controller.store().lines()[0];
        assert_eq!(line.points(), &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        assert!(line.is_sealed());
    }

    #[test]
    fn mode_switch_drops_pending_click() {
        let mut controller = placing(ShapeKind::Cube);
        let t0 = Instant::now();

        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        controller.set_mode(InteractionMode::Placing(ShapeKind::Sphere));
        controller.on_pointer_up([0.0, 0.0, 0.0], t0);

        assert!(controller.store().objects().is_empty());
    }

    #[test]
    fn pointer_up_without_down_is_a_no_op() {
        for mode in [
            InteractionMode::Idle,
            InteractionMode::Drawing,
            InteractionMode::Placing(ShapeKind::Cube),
        ] {
            let mut controller = InteractionController::default();
            controller.set_mode(mode);
            assert_eq!(controller.on_pointer_up([0.0, 0.0, 0.0], Instant::now()), None);
            assert!(controller.store().is_empty());
        }
    }

    #[test]
    fn idle_pointer_down_does_nothing() {
        let mut controller = InteractionController::default();
        assert_eq!(controller.on_pointer_down([0.0, 0.0, 0.0], Instant::now()), None);
        assert_eq!(controller.pending_click(), None);
    }

    #[test]
    fn leaving_ends_capture() {
        let mut controller = InteractionController::default();
        controller.set_mode(InteractionMode::Drawing);
        controller.on_pointer_down([0.0, 0.0, 0.0], Instant::now());

        assert!(matches!(
            controller.on_pointer_leave(),
            Some(CanvasEvent::LineFinished(_))
        ));
        assert!(!controller.is_capturing());
        assert_eq!(controller.on_pointer_leave(), None);
    }

    #[test]
    fn leaving_discards_pending_click() {
        let mut controller = placing(ShapeKind::Cube);
        let t0 = Instant::now();
        controller.on_pointer_down([0.0, 0.0, 0.0], t0);

        assert_eq!(controller.on_pointer_leave(), Some(CanvasEvent::ClickDiscarded));
        controller.on_pointer_up([0.0, 0.0, 0.0], t0);
        assert!(controller.store().objects().is_empty());
    }

    #[test]
    fn toggles_mirror_the_toolbar() {
        let mut controller = InteractionController::default();

        controller.toggle_shape(ShapeKind::Cube);
        assert_eq!(controller.mode(), InteractionMode::Placing(ShapeKind::Cube));
        controller.toggle_drawing();
        assert_eq!(controller.mode(), InteractionMode::Drawing);
        assert!(!controller.orbit_enabled());
        controller.toggle_shape(ShapeKind::Star);
        assert_eq!(controller.mode(), InteractionMode::Placing(ShapeKind::Star));
        assert!(controller.orbit_enabled());
        controller.toggle_shape(ShapeKind::Star);
        assert_eq!(controller.mode(), InteractionMode::Idle);
        controller.toggle_drawing();
        controller.toggle_drawing();
        assert_eq!(controller.mode(), InteractionMode::Idle);
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut controller = placing(ShapeKind::Cube);
        let t0 = Instant::now();
        controller.on_pointer_down([0.0, 0.0, 0.0], t0);
        controller.on_pointer_up([0.0, 0.0, 0.0], t0);
        controller.set_mode(InteractionMode::Drawing);
        controller.on_pointer_down([0.0, 0.0, 0.0], t0);

        controller.clear_all();

        assert!(controller.store().is_empty());
        assert_eq!(controller.mode(), InteractionMode::Idle);
        assert!(controller.orbit_enabled());
        assert!(!controller.is_capturing());
    }

    #[test]
    fn arrow_up_and_right_pan_diagonally() {
        let mut controller = InteractionController::default();
        controller.key_down(PanKey::Up);
        controller.key_down(PanKey::Right);

        let dt = 0.016;
        let delta = controller.pan_tick(dt);
        assert!((delta[0] - 20.0 * dt).abs() < 1e-6);
        assert!((delta[1] - 20.0 * dt).abs() < 1e-6);
        assert_eq!(delta[2], 0.0);

        controller.key_up(PanKey::Up);
        controller.key_up(PanKey::Right);
        assert_eq!(controller.pan_tick(dt), [0.0, 0.0, 0.0]);
    }
}
