//! The grid world: terrain, static obstacles and moving obstacles
//!
//! The grid is passive. Planners only read it through `is_traversable` and
//! `movement_cost`; all mutation happens between planning calls.

use ahash::AHashSet;

use crate::core::error::{CourierError, Result};
use crate::core::types::{Cell, Tick};
use crate::world::obstacle::MovingObstacle;
use crate::world::terrain::{CellType, GroundType};

#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    default_ground: GroundType,
    /// Row-major, `width * height` entries
    terrain: Vec<GroundType>,
    static_obstacles: AHashSet<Cell>,
    moving_obstacles: Vec<MovingObstacle>,
    elapsed_ticks: Tick,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Grid {
    /// Create a grid covered in asphalt with no obstacles
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_default_ground(width, height, GroundType::Asphalt)
    }

    /// Create a grid covered in `ground` with no obstacles
    pub fn with_default_ground(width: u32, height: u32, ground: GroundType) -> Self {
        Self {
            width,
            height,
            default_ground: ground,
            terrain: vec![ground; width as usize * height as usize],
            static_obstacles: AHashSet::new(),
            moving_obstacles: Vec::new(),
            elapsed_ticks: 0,
        }
    }

    /// Discard everything and start over with an empty grid of the given size
    pub fn reset(&mut self, width: u32, height: u32) {
        tracing::debug!("Resetting grid to {}x{}", width, height);
        *self = Self::with_default_ground(width, height, self.default_ground);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn default_ground(&self) -> GroundType {
        self.default_ground
    }

    /// Number of `advance_time` calls since creation or the last reset
    pub fn elapsed_ticks(&self) -> Tick {
        self.elapsed_ticks
    }

    /// Check if a cell lies within `[0, width) x [0, height)`
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Fail with `OutOfBounds` unless the cell is inside the grid
    pub fn check_bounds(&self, cell: Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(CourierError::OutOfBounds {
                x: cell.x,
                y: cell.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index(&self, cell: Cell) -> Result<usize> {
        self.check_bounds(cell)?;
        Ok(cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Can `cell` be entered at `time_step`?
    ///
    /// Moving obstacles are checked at their *predicted* position for the
    /// given step, not their current one.
    pub fn is_traversable(&self, cell: Cell, time_step: Tick) -> bool {
        self.in_bounds(cell) && !self.cell_type(cell, time_step).blocks_movement()
    }

    /// Cost of entering `cell`
    pub fn movement_cost(&self, cell: Cell) -> Result<u32> {
        Ok(self.ground_at(cell)?.movement_cost())
    }

    pub fn ground_at(&self, cell: Cell) -> Result<GroundType> {
        let idx = self.index(cell)?;
        Ok(self.terrain[idx])
    }

    /// Ground types of row `y`, left to right; empty if `y` is out of range
    pub fn terrain_row(&self, y: u32) -> &[GroundType] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.terrain[start..start + self.width as usize]
    }

    /// Overwrite the ground type of a single cell
    pub fn set_terrain(&mut self, cell: Cell, ground: GroundType) -> Result<()> {
        let idx = self.index(cell)?;
        self.terrain[idx] = ground;
        Ok(())
    }

    /// Permanently block a cell. Adding the same cell twice is a no-op.
    pub fn add_static_obstacle(&mut self, cell: Cell) -> Result<()> {
        self.check_bounds(cell)?;
        self.static_obstacles.insert(cell);
        Ok(())
    }

    pub fn is_static_obstacle(&self, cell: Cell) -> bool {
        self.static_obstacles.contains(&cell)
    }

    /// All static obstacles in row-major order
    pub fn static_obstacles(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.static_obstacles.iter().copied().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    /// Register a moving obstacle; every waypoint must lie inside the grid
    pub fn add_moving_obstacle(&mut self, obstacle: MovingObstacle) -> Result<()> {
        for &waypoint in obstacle.path() {
            self.check_bounds(waypoint)?;
        }
        self.moving_obstacles.push(obstacle);
        Ok(())
    }

    pub fn moving_obstacles(&self) -> &[MovingObstacle] {
        &self.moving_obstacles
    }

    /// Is any moving obstacle predicted to occupy `cell` at `time_step`?
    pub fn has_moving_obstacle_at(&self, cell: Cell, time_step: Tick) -> bool {
        self.moving_obstacles
            .iter()
            .any(|o| o.predict_position(time_step) == cell)
    }

    /// Advance every moving obstacle by one tick
    pub fn advance_time(&mut self) {
        for obstacle in &mut self.moving_obstacles {
            obstacle.advance_one_tick();
        }
        self.elapsed_ticks += 1;
    }

    /// Classify a cell at `time_step` (obstacles only; agents and cargo are
    /// overlaid by the caller)
    pub fn cell_type(&self, cell: Cell, time_step: Tick) -> CellType {
        if self.is_static_obstacle(cell) {
            CellType::Obstacle
        } else if self.has_moving_obstacle_at(cell, time_step) {
            CellType::MovingObstacle
        } else {
            CellType::Empty
        }
    }

    /// Terrain cost of walking `path`, excluding the starting cell
    pub fn path_cost(&self, path: &[Cell]) -> Result<u32> {
        path.iter()
            .skip(1)
            .map(|&cell| self.movement_cost(cell))
            .sum()
    }

    /// ASCII snapshot at `time_step`, one row per line
    ///
    /// `markers` are drawn over the terrain, after obstacles; the last marker
    /// for a cell wins.
    pub fn render(&self, time_step: Tick, markers: &[(Cell, CellType)]) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                let marker = markers
                    .iter()
                    .rev()
                    .find(|(c, _)| *c == cell)
                    .map(|(_, kind)| *kind);
                let kind = marker.unwrap_or_else(|| self.cell_type(cell, time_step));
                let glyph = kind
                    .glyph()
                    .unwrap_or_else(|| self.terrain[y as usize * self.width as usize + x as usize].glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
