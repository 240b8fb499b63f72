//! Arrow-key camera panning.

use winit::keyboard::KeyCode;

use super::WorldPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanKey {
    Up,
    Down,
    Left,
    Right,
}

impl PanKey {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowUp => Some(PanKey::Up),
            KeyCode::ArrowDown => Some(PanKey::Down),
            KeyCode::ArrowLeft => Some(PanKey::Left),
            KeyCode::ArrowRight => Some(PanKey::Right),
            _ => None,
        }
    }

    fn direction(self) -> WorldPoint {
        match self {
            PanKey::Up => [0.0, 1.0, 0.0],
            PanKey::Down => [0.0, -1.0, 0.0],
            PanKey::Left => [-1.0, 0.0, 0.0],
            PanKey::Right => [1.0, 0.0, 0.0],
        }
    }

    fn bit(self) -> u8 {
        match self {
            PanKey::Up => 1,
            PanKey::Down => 1 << 1,
            PanKey::Left => 1 << 2,
            PanKey::Right => 1 << 3,
        }
    }
}

/// Set of arrow keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, key: PanKey) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: PanKey) {
        self.0 &= !key.bit();
    }

    pub fn is_held(&self, key: PanKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Translation for one frame: every held key contributes `speed * dt`
    /// along its axis, so opposite keys cancel and diagonals add.
    pub fn pan_delta(&self, speed: f32, dt: f32) -> WorldPoint {
        let step = speed * dt;
        let mut delta = [0.0; 3];
        for key in [PanKey::Up, PanKey::Down, PanKey::Left, PanKey::Right] {
            if self.is_held(key) {
                let dir = key.direction();
                for axis in 0..3 {
                    delta[axis] += dir[axis] * step;
                }
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_keys_add() {
        let mut keys = HeldKeys::default();
        keys.press(PanKey::Up);
        keys.press(PanKey::Right);
        let delta = keys.pan_delta(20.0, 0.5);
        assert_eq!(delta, [10.0, 10.0, 0.0]);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = HeldKeys::default();
        keys.press(PanKey::Left);
        keys.press(PanKey::Right);
        assert_eq!(keys.pan_delta(20.0, 1.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn released_keys_stop_contributing() {
        let mut keys = HeldKeys::default();
        keys.press(PanKey::Down);
        keys.release(PanKey::Down);
        assert!(keys.is_empty());
        assert_eq!(keys.pan_delta(20.0, 1.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn only_arrow_keys_map_to_pan_keys() {
        assert_eq!(PanKey::from_key_code(KeyCode::ArrowUp), Some(PanKey::Up));
        assert_eq!(PanKey::from_key_code(KeyCode::KeyW), None);
    }
}
