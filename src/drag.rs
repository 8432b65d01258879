//! Pointer-driven repositioning of the chat surface.
//!
//! A small `Idle -> Dragging -> Idle` machine. Each pointer move while
//! dragging shifts the surface by the pointer's delta since the previous
//! event. The surface starts docked at a fixed origin and becomes floating on
//! the first move.

/// A position in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// How the surface is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Pinned at its default spot.
    Docked,
    /// Moved by the user; top-left corner at the given point.
    Floating(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Dragging { last: Point },
}

/// Drag tracker for one surface.
#[derive(Debug, Clone)]
pub struct Draggable {
    docked_at: Point,
    anchor: Anchor,
    phase: Phase,
}

impl Draggable {
    /// A docked surface whose top-left corner sits at `docked_at`.
    pub fn new(docked_at: Point) -> Self {
        Self {
            docked_at,
            anchor: Anchor::Docked,
            phase: Phase::Idle,
        }
    }

    /// Current placement.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Top-left corner, docked or not.
    pub fn position(&self) -> Point {
        match self.anchor {
            Anchor::Docked => self.docked_at,
            Anchor::Floating(at) => at,
        }
    }

    /// True between pointer-down and pointer-up.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Pointer pressed on the drag handle.
    pub fn pointer_down(&mut self, at: Point) {
        self.phase = Phase::Dragging { last: at };
    }

    /// Pointer moved. Returns the new position while dragging, `None` when
    /// idle.
    pub fn pointer_move(&mut self, at: Point) -> Option<Point> {
        let Phase::Dragging { last } = self.phase else {
            return None;
        };
        let moved = self
            .position()
            .offset(at.x.saturating_sub(last.x), at.y.saturating_sub(last.y));
        self.anchor = Anchor::Floating(moved);
        self.phase = Phase::Dragging { last: at };
        Some(moved)
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.phase = Phase::Idle;
    }
}
