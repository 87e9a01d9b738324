use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::board::SIDE;

pub const CHART_HEIGHT: u16 = 12;

pub struct WatchLayout {
	pub status: Rect,
	pub board: Rect,
	pub players: Rect,
	pub game_log: Rect,
	pub reasoning: Rect,
	pub chart: Rect,
	pub help: Rect,
}

impl WatchLayout {
	pub fn compute(area: Rect, num_players: usize) -> Self {
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(3),
				Constraint::Min(12),
				Constraint::Length(CHART_HEIGHT),
				Constraint::Length(1),
			])
			.split(area);

		let main = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(rows[1]);

		// Two lines per card plus borders, capped so the logs keep some room.
		let players_height = (num_players.max(1) as u16 * 2 + 2).min(main[1].height / 2);
		let right = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(players_height),
				Constraint::Percentage(40),
				Constraint::Min(3),
			])
			.split(main[1]);

		Self {
			status: rows[0],
			board: main[0],
			players: right[0],
			game_log: right[1],
			reasoning: right[2],
			chart: rows[2],
			help: rows[3],
		}
	}
}

// Geometry of the 11x11 board grid inside a bordered area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGrid {
	pub origin_x: u16,
	pub origin_y: u16,
	pub cell_width: u16,
	pub cell_height: u16,
}

impl BoardGrid {
	pub fn fit(inner: Rect) -> Self {
		let side = SIDE as u16;
		let cell_width = (inner.width / side).max(1);
		let cell_height = (inner.height / side).max(1);
		let used_w = cell_width * side;
		let used_h = cell_height * side;
		Self {
			origin_x: inner.x + inner.width.saturating_sub(used_w) / 2,
			origin_y: inner.y + inner.height.saturating_sub(used_h) / 2,
			cell_width,
			cell_height,
		}
	}

	pub fn cell(&self, col: u8, row: u8) -> Rect {
		Rect::new(
			self.origin_x + col as u16 * self.cell_width,
			self.origin_y + row as u16 * self.cell_height,
			self.cell_width,
			self.cell_height,
		)
	}

	// The open area inside the ring of cells.
	pub fn center(&self) -> Rect {
		let side = SIDE as u16 - 2;
		Rect::new(
			self.origin_x + self.cell_width,
			self.origin_y + self.cell_height,
			self.cell_width * side,
			self.cell_height * side,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layout_fills_area() {
		let area = Rect::new(0, 0, 160, 60);
		let layout = WatchLayout::compute(area, 4);
		assert_eq!(layout.status.height, 3);
		assert_eq!(layout.chart.height, CHART_HEIGHT);
		assert_eq!(layout.help.y, 59);
		assert_eq!(layout.players.height, 10);
		assert_eq!(layout.board.x, 0);
		assert_eq!(layout.players.x, layout.board.width);
	}

	#[test]
	fn test_board_grid_cells() {
		let grid = BoardGrid::fit(Rect::new(1, 1, 66, 33));
		assert_eq!(grid.cell_width, 6);
		assert_eq!(grid.cell_height, 3);
		assert_eq!(grid.cell(0, 0), Rect::new(1, 1, 6, 3));
		assert_eq!(grid.cell(10, 10), Rect::new(61, 31, 6, 3));
		assert_eq!(grid.center(), Rect::new(7, 4, 54, 27));
	}

	#[test]
	fn test_board_grid_tiny_area() {
		let grid = BoardGrid::fit(Rect::new(0, 0, 5, 5));
		assert_eq!(grid.cell_width, 1);
		assert_eq!(grid.cell_height, 1);
	}
}
