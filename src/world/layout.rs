//! Plain-text grid layout files
//!
//! ```text
//! <width> <height>
//! <N>                                   static obstacle count
//! <x> <y>                               N lines
//! <c0> <c1> ... <c(width-1)>            height lines of terrain costs
//! <M>                                   moving obstacle count
//! <x> <y> <len> <x0> <y0> ... <pace>    M lines
//! ```
//!
//! Parsing is strict: every error names the 1-based line it was found on.

use std::fmt;
use std::path::Path;

use crate::core::error::{CourierError, Result};
use crate::core::types::Cell;
use crate::world::grid::Grid;
use crate::world::obstacle::MovingObstacle;
use crate::world::terrain::GroundType;

/// Definition of a moving obstacle as written in a layout file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleSpec {
    pub start: Cell,
    pub path: Vec<Cell>,
    pub pace: u32,
}

/// Parsed contents of a layout file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
    pub obstacles: Vec<Cell>,
    /// Row-major, `height` rows of `width` entries
    pub terrain: Vec<Vec<GroundType>>,
    pub moving_obstacles: Vec<ObstacleSpec>,
}

/// Walks the lines of a layout file, remembering line numbers for errors
struct LineReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// Next line and its 1-based number
    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        let line_no = self.pos + 1;
        let line = self.lines.get(self.pos).copied().ok_or_else(|| {
            CourierError::malformed(line_no, format!("unexpected end of file, expected {}", expected))
        })?;
        self.pos += 1;
        Ok((line_no, line))
    }

    /// Lines not yet consumed; bounds every count read from the file
    fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    /// Error on anything but blank lines after the last record
    fn finish(&self) -> Result<()> {
        for (offset, line) in self.lines[self.pos..].iter().enumerate() {
            if !line.trim().is_empty() {
                return Err(CourierError::malformed(
                    self.pos + offset + 1,
                    "unexpected content after the last moving obstacle",
                ));
            }
        }
        Ok(())
    }
}

fn parse_ints(line_no: usize, line: &str) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                CourierError::malformed(line_no, format!("'{}' is not an integer", token))
            })
        })
        .collect()
}

fn parse_exact(line_no: usize, line: &str, count: usize, what: &str) -> Result<Vec<i64>> {
    let values = parse_ints(line_no, line)?;
    if values.len() != count {
        return Err(CourierError::malformed(
            line_no,
            format!("expected {} ({} values), found {} values", what, count, values.len()),
        ));
    }
    Ok(values)
}

fn to_count(line_no: usize, value: i64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| CourierError::malformed(line_no, format!("{} must be non-negative, got {}", what, value)))
}

impl GridLayout {
    /// Parse the text of a layout file
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = LineReader::new(text);

        let (line_no, line) = reader.next_line("grid dimensions")?;
        let dims = parse_exact(line_no, line, 2, "width and height")?;
        let to_dim = |v: i64| {
            u32::try_from(v).map_err(|_| {
                CourierError::malformed(line_no, format!("dimension {} is out of range", v))
            })
        };
        let (width, height) = (to_dim(dims[0])?, to_dim(dims[1])?);

        let in_bounds = |line_no: usize, x: i64, y: i64| -> Result<Cell> {
            if x >= 0 && y >= 0 && x < width as i64 && y < height as i64 {
                Ok(Cell::new(x as i32, y as i32))
            } else {
                Err(CourierError::malformed(
                    line_no,
                    format!("cell ({}, {}) is outside the {}x{} grid", x, y, width, height),
                ))
            }
        };

        let (line_no, line) = reader.next_line("static obstacle count")?;
        let count = parse_exact(line_no, line, 1, "static obstacle count")?[0];
        let count = to_count(line_no, count, "static obstacle count")?;
        let mut obstacles = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            let (line_no, line) = reader.next_line("static obstacle coordinates")?;
            let xy = parse_exact(line_no, line, 2, "obstacle coordinates")?;
            obstacles.push(in_bounds(line_no, xy[0], xy[1])?);
        }

        let mut terrain = Vec::with_capacity((height as usize).min(reader.remaining()));
        for _ in 0..height {
            let (line_no, line) = reader.next_line("a terrain row")?;
            let costs = parse_exact(line_no, line, width as usize, "a terrain row")?;
            let row = costs
                .into_iter()
                .map(|cost| {
                    u32::try_from(cost)
                        .ok()
                        .and_then(GroundType::from_cost)
                        .ok_or_else(|| {
                            CourierError::malformed(line_no, format!("unknown terrain cost {}", cost))
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            terrain.push(row);
        }

        let (line_no, line) = reader.next_line("moving obstacle count")?;
        let count = parse_exact(line_no, line, 1, "moving obstacle count")?[0];
        let count = to_count(line_no, count, "moving obstacle count")?;
        let mut moving_obstacles = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            let (line_no, line) = reader.next_line("a moving obstacle definition")?;
            let values = parse_ints(line_no, line)?;
            if values.len() < 3 {
                return Err(CourierError::malformed(
                    line_no,
                    "moving obstacle needs at least x, y and path length",
                ));
            }
            let path_len = to_count(line_no, values[2], "path length")?;
            if path_len == 0 {
                return Err(CourierError::malformed(line_no, "moving obstacle path is empty"));
            }
            let expected = path_len.checked_mul(2).and_then(|n| n.checked_add(4));
            if expected != Some(values.len()) {
                return Err(CourierError::malformed(
                    line_no,
                    format!(
                        "path length {} needs {} values, found {}",
                        path_len,
                        expected.map_or_else(|| "too many".to_string(), |n| n.to_string()),
                        values.len()
                    ),
                ));
            }

            let start = in_bounds(line_no, values[0], values[1])?;
            let path = values[3..3 + 2 * path_len]
                .chunks(2)
                .map(|xy| in_bounds(line_no, xy[0], xy[1]))
                .collect::<Result<Vec<_>>>()?;
            let pace = values[values.len() - 1];
            let pace = u32::try_from(pace)
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| CourierError::malformed(line_no, format!("invalid pace {}", pace)))?;

            moving_obstacles.push(ObstacleSpec { start, path, pace });
        }

        reader.finish()?;

        Ok(Self {
            width,
            height,
            obstacles,
            terrain,
            moving_obstacles,
        })
    }

    /// Capture the current state of a grid
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            obstacles: grid.static_obstacles(),
            terrain: (0..grid.height())
                .map(|y| grid.terrain_row(y).to_vec())
                .collect(),
            moving_obstacles: grid
                .moving_obstacles()
                .iter()
                .map(|o| ObstacleSpec {
                    start: o.start(),
                    path: o.path().to_vec(),
                    pace: o.pace(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.width, self.height)?;

        writeln!(f, "{}", self.obstacles.len())?;
        for cell in &self.obstacles {
            writeln!(f, "{} {}", cell.x, cell.y)?;
        }

        for row in &self.terrain {
            let costs: Vec<String> = row.iter().map(|g| g.movement_cost().to_string()).collect();
            writeln!(f, "{}", costs.join(" "))?;
        }

        writeln!(f, "{}", self.moving_obstacles.len())?;
        for spec in &self.moving_obstacles {
            write!(f, "{} {} {}", spec.start.x, spec.start.y, spec.path.len())?;
            for cell in &spec.path {
                write!(f, " {} {}", cell.x, cell.y)?;
            }
            writeln!(f, " {}", spec.pace)?;
        }

        Ok(())
    }
}

impl Grid {
    /// Build a fresh grid from a parsed layout
    pub fn from_layout(layout: &GridLayout) -> Result<Self> {
        let mut grid = Grid::default();
        grid.apply_layout(layout)?;
        Ok(grid)
    }

    /// Replace this grid's contents with `layout`, keeping the default ground
    pub fn apply_layout(&mut self, layout: &GridLayout) -> Result<()> {
        self.reset(layout.width, layout.height);

        for &cell in &layout.obstacles {
            self.add_static_obstacle(cell)?;
        }

        for (y, row) in layout.terrain.iter().enumerate() {
            for (x, &ground) in row.iter().enumerate() {
                self.set_terrain(Cell::new(x as i32, y as i32), ground)?;
            }
        }

        for spec in &layout.moving_obstacles {
            let obstacle = MovingObstacle::new(spec.start, spec.path.clone(), spec.pace)?;
            self.add_moving_obstacle(obstacle)?;
        }

        Ok(())
    }

    /// Parse layout text and load it into this grid
    ///
    /// The grid is left untouched if the text is malformed.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let layout = GridLayout::parse(text)?;
        self.apply_layout(&layout)
    }

    /// Load a layout file from disk into this grid
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.load_from_str(&text)?;
        tracing::info!(
            "Loaded {}x{} grid from {:?} ({} obstacles, {} moving)",
            self.width(),
            self.height(),
            path,
            self.static_obstacles().len(),
            self.moving_obstacles().len()
        );
        Ok(())
    }

    /// Serialize this grid in the layout text format
    pub fn to_layout_string(&self) -> String {
        GridLayout::from_grid(self).to_string()
    }

    /// Write this grid to a layout file on disk
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_layout_string())?;
        Ok(())
    }
}
