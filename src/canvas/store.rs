//! Append-only storage for everything the user has put on the canvas.
//!
//! The store is the single source of truth the renderer mirrors: placed shapes,
//! drawn lines, the current interaction mode and the line currently being
//! captured. Lines are sealed once their capture ends and can no longer change.

use std::fmt;

use super::mode::{InteractionMode, ShapeKind};
use super::WorldPoint;

/// Identifier of a placed shape, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Identifier of a drawn line, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub kind: ShapeKind,
    pub position: WorldPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLine {
    pub id: LineId,
    points: Vec<WorldPoint>,
    pub thickness: f32,
    sealed: bool,
}

impl DrawnLine {
    /// Points in drawing order. Never empty.
    pub fn points(&self) -> &[WorldPoint] {
        &self.points
    }

    /// A line needs two points before it can be swept into a tube.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Whether capture has ended for this line.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

#[derive(Debug)]
pub struct ObjectStore {
    objects: Vec<PlacedObject>,
    lines: Vec<DrawnLine>,
    mode: InteractionMode,
    active_line: Option<LineId>,
    line_thickness: u8,
    next_id: u64,
}

impl ObjectStore {
    pub fn new(line_thickness: u8) -> Self {
        Self {
            objects: Vec::new(),
            lines: Vec::new(),
            mode: InteractionMode::Idle,
            active_line: None,
            line_thickness,
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn lines(&self) -> &[DrawnLine] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&DrawnLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// The line currently being captured, if any.
    pub fn active_line(&self) -> Option<LineId> {
        self.active_line
    }

    /// Slider thickness used for lines started from now on.
    pub fn line_thickness(&self) -> u8 {
        self.line_thickness
    }

    pub(crate) fn set_line_thickness(&mut self, thickness: u8) {
        self.line_thickness = thickness;
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.lines.is_empty()
    }

    /// Appends a new shape. Existing entries are never touched.
    pub fn place_object(&mut self, position: WorldPoint, kind: ShapeKind) -> ObjectId {
        let id = ObjectId(self.next_id());
        self.objects.push(PlacedObject { id, kind, position });
        id
    }

    /// Starts a new line at `point` and makes it the active capture.
    ///
    /// A capture still open at this point is sealed first.
    pub fn begin_line(&mut self, point: WorldPoint, thickness: f32) -> LineId {
        self.end_active_line();

        let id = LineId(self.next_id());
        self.lines.push(DrawnLine {
            id,
            points: vec![point],
            thickness,
            sealed: false,
        });
        self.active_line = Some(id);
        id
    }

    /// Extends the line under capture. Does nothing when no capture is active.
    pub fn append_point_to_active_line(&mut self, point: WorldPoint) -> Option<LineId> {
        let id = self.active_line?;
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == id && !line.sealed)?;
        line.points.push(point);
        Some(id)
    }

    /// Seals the line under capture and clears the capture handle.
    pub fn end_active_line(&mut self) -> Option<LineId> {
        let id = self.active_line.take()?;
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.sealed = true;
        }
        Some(id)
    }

    /// Drops every shape and line and returns to idle. Ids are not reused.
    pub fn clear_all(&mut self) {
        self.objects.clear();
        self.lines.clear();
        self.active_line = None;
        self.mode = InteractionMode::Idle;
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new(crate::config::CanvasConfig::default().default_line_thickness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn placing_appends_without_touching_existing_entries() {
        let mut store = ObjectStore::default();
        let first = store.place_object([1.0, 0.0, 2.0], ShapeKind::Cube);
        let second = store.place_object([1.0, 0.0, 2.0], ShapeKind::Cube);

        assert_ne!(first, second);
        assert_eq!(store.objects().len(), 2);
        assert_eq!(store.objects()[0].id, first);
        assert_eq!(store.objects()[0].position, [1.0, 0.0, 2.0]);
    }

    #[test]
    fn append_without_capture_is_a_no_op() {
        let mut store = ObjectStore::default();
        assert_eq!(store.append_point_to_active_line([0.0, 0.0, 0.0]), None);
        assert!(store.lines().is_empty());
    }

    #[test]
    fn sealed_lines_stop_growing() {
        let mut store = ObjectStore::default();
        let id = store.begin_line([0.0, 0.0, 0.0], 2.0);
        store.append_point_to_active_line([1.0, 0.0, 0.0]);
        assert_eq!(store.end_active_line(), Some(id));

        assert_eq!(store.append_point_to_active_line([2.0, 0.0, 0.0]), None);
        let line = store.line(id).unwrap();
        assert_eq!(line.points().len(), 2);
        assert!(line.is_sealed());
        assert!(line.is_renderable());
    }

    #[test]
    fn beginning_a_line_seals_the_previous_capture() {
        let mut store = ObjectStore::default();
        let first = store.begin_line([0.0, 0.0, 0.0], 1.0);
        let second = store.begin_line([5.0, 0.0, 0.0], 1.0);

        assert!(store.line(first).unwrap().is_sealed());
        assert_eq!(store.active_line(), Some(second));
        assert!(!store.line(second).unwrap().is_renderable());
    }

    #[test]
    fn clear_all_is_idempotent_and_resets_mode() {
        let mut store = ObjectStore::default();
        store.set_mode(InteractionMode::Drawing);
        store.place_object([0.0, 0.0, 0.0], ShapeKind::Torus);
        store.begin_line([0.0, 0.0, 0.0], 3.0);

        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.mode(), InteractionMode::Idle);
        assert_eq!(store.active_line(), None);

        store.clear_all();
        assert!(store.is_empty());
    }

    #[test]
    fn ids_stay_unique_across_clears() {
        let mut store = ObjectStore::default();
        let mut seen = HashSet::new();

        for _ in 0..3 {
            for _ in 0..10 {
                let id = store.place_object([0.0, 0.0, 0.0], ShapeKind::Sphere);
                assert!(seen.insert(id.to_string()));
                let line = store.begin_line([0.0, 0.0, 0.0], 2.0);
                assert!(seen.insert(line.to_string()));
            }
            store.clear_all();
        }
    }

    #[test]
    fn ids_display_with_their_kind_prefix() {
        let mut store = ObjectStore::default();
        let object = store.place_object([0.0, 0.0, 0.0], ShapeKind::Cube);
        let line = store.begin_line([0.0, 0.0, 0.0], 2.0);
        assert_eq!(object.to_string(), "obj-1");
        assert_eq!(line.to_string(), "line-2");
    }
}
