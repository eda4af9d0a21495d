use Direction::*;

/// One grid position in board coordinates. Coordinates are unbounded until
/// the board wraps them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, velocity: Velocity) -> Self {
        Cell { x: self.x + velocity.dx, y: self.y + velocity.dy }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn velocity(self) -> Velocity {
        match self {
            Up => Velocity { dx: 0, dy: -1 },
            Down => Velocity { dx: 0, dy: 1 },
            Left => Velocity { dx: -1, dy: 0 },
            Right => Velocity { dx: 1, dy: 0 },
        }
    }
}

/// Per-tick displacement of the head. Each component is -1, 0 or 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const STILL: Velocity = Velocity { dx: 0, dy: 0 };

    /// True when turning to `direction` would send the snake straight back
    /// along the axis it is currently travelling on.
    pub fn reverses(self, direction: Direction) -> bool {
        match direction {
            Up => self.dy == 1,
            Down => self.dy == -1,
            Left => self.dx == 1,
            Right => self.dx == -1,
        }
    }

    pub fn is_still(self) -> bool {
        self == Velocity::STILL
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::STILL
    }
}

/// A head plus body segments. `body[0]` trails right behind the head and
/// the last element is the tail; growth appends to the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    head: Cell,
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        Snake { head, body: vec![] }
    }

    pub fn with_body(head: Cell, body: Vec<Cell>) -> Self {
        Snake { head, body }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn grow_at(&mut self, cell: Cell) {
        self.body.push(cell);
    }

    /// Every segment takes the place of the one in front of it, the first
    /// segment takes the old head cell, then the head moves by `velocity`.
    pub fn slither(&mut self, velocity: Velocity) {
        for i in (0..self.body.len()).rev() {
            self.body[i] = if i == 0 { self.head } else { self.body[i - 1] };
        }

        self.head = self.head.offset(velocity);
    }

    pub fn bites_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    pub(crate) fn place_head(&mut self, cell: Cell) {
        self.head = cell;
    }
}
