//! The bounded area agents are placed in.

use crate::{PdError, PdResult, Point, Rect, SimRng};

/// Half-side of every agent's bounding square (the drawn turtle is 48×48).
pub const AGENT_HALF_SIZE: f32 = 24.0;

/// Side length of the reference arena.
pub const DEFAULT_ARENA_SIZE: f32 = 500.0;

/// Most agents the reference arena accepts.  Random sequential placement of
/// 48-unit squares stalls well before the geometric packing limit, so the
/// ceiling is an observed value rather than a closed-form one.
pub const DEFAULT_CAPACITY: usize = 50;

/// Fixed-size placement area.
///
/// Agent centers are sampled inside the arena inset by the agent half-size on
/// every side, so every agent's bound stays within `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub width:     f32,
    pub height:    f32,
    pub half_size: f32,
    /// Agent count above which initialization is refused outright.
    pub capacity:  usize,
}

impl Arena {
    /// A square arena of side `size` with the standard agent footprint.
    ///
    /// Capacity scales with area relative to the reference arena:
    /// `floor(50 × (size / 500)²)`, and never below one: any arena that
    /// [`Arena::new`] accepts fits at least one agent.
    pub fn square(size: f32) -> PdResult<Self> {
        let scale = size / DEFAULT_ARENA_SIZE;
        let capacity = (DEFAULT_CAPACITY as f32 * scale * scale).floor().max(1.0) as usize;
        Self::new(size, size, AGENT_HALF_SIZE, capacity)
    }

    /// Fully specified arena.  Fails if a single agent cannot fit.
    pub fn new(width: f32, height: f32, half_size: f32, capacity: usize) -> PdResult<Self> {
        if !(half_size.is_finite() && half_size > 0.0) {
            return Err(PdError::InvalidParameter(format!(
                "agent half-size must be positive, got {half_size}"
            )));
        }
        let min = 2.0 * half_size;
        if !(width.is_finite() && height.is_finite() && width > min && height > min) {
            return Err(PdError::InvalidParameter(format!(
                "arena {width}×{height} cannot hold a {min}-unit agent"
            )));
        }
        Ok(Self { width, height, half_size, capacity })
    }

    /// Sample a center uniformly from the inset region.
    pub fn sample_center(&self, rng: &mut SimRng) -> Point {
        let h = self.half_size;
        let x = rng.gen_range(h..self.width - h);
        let y = rng.gen_range(h..self.height - h);
        Point::new(x, y)
    }

    /// Bounding square of an agent centered on `center`.
    #[inline]
    pub fn bound_at(&self, center: Point) -> Rect {
        Rect::centered(center, self.half_size)
    }

    /// `true` if `rect` lies entirely inside the arena (edges inclusive).
    pub fn contains(&self, rect: Rect) -> bool {
        rect.left >= 0.0 && rect.top >= 0.0 && rect.right <= self.width && rect.bottom <= self.height
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width:     DEFAULT_ARENA_SIZE,
            height:    DEFAULT_ARENA_SIZE,
            half_size: AGENT_HALF_SIZE,
            capacity:  DEFAULT_CAPACITY,
        }
    }
}
