use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Rect},
	style::{Modifier, Style},
	symbols,
	text::{Line, Span},
	widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};

use crate::board::{self, SIDE};
use crate::state::history::History;
use crate::state::store::GameSnapshot;
use crate::theme::Theme;
use crate::tui::layout::BoardGrid;
use crate::view::{self, PlayerCard, ReasoningLine};

// 28 ownable spaces: 22 streets, 4 railroads, 2 utilities.
pub const MAX_PROPERTIES: f64 = 28.0;

const MIN_CELL_WIDTH: u16 = 3;

fn truncate(text: &str, width: usize) -> String {
	if text.chars().count() <= width {
		text.to_string()
	} else if width == 0 {
		String::new()
	} else {
		let mut out: String = text.chars().take(width - 1).collect();
		out.push('…');
		out
	}
}

pub struct BoardWidget<'a> {
	snapshot: &'a GameSnapshot,
	theme: &'a Theme,
	banner: &'a str,
}

impl<'a> BoardWidget<'a> {
	pub fn new(snapshot: &'a GameSnapshot, theme: &'a Theme) -> Self {
		Self { snapshot, theme, banner: view::status_banner(snapshot) }
	}

	fn render_space(&self, position: u8, area: Rect, buf: &mut Buffer) {
		let Some(space) = board::space(position) else {
			return;
		};
		let players = &self.snapshot.players;
		let width = area.width as usize;

		let label_style = match (board::owner_of(position, players), space.group()) {
			(Some(owner), _) => Style::default().fg(self.theme.player(owner)).add_modifier(Modifier::BOLD),
			(None, Some(group)) => Style::default().fg(self.theme.group(group)),
			(None, None) => Style::default().fg(self.theme.unowned()),
		};
		buf.set_string(area.x, area.y, truncate(&space.abbreviation(), width), label_style);

		let tokens: Vec<Span> = board::occupants(position, players)
			.into_iter()
			.take(width)
			.map(|i| Span::styled("●", Style::default().fg(self.theme.player(i))))
			.collect();
		if tokens.is_empty() {
			return;
		}
		// Tokens share the label row when the cell is a single line tall.
		let (y, x) = if area.height > 1 {
			(area.y + 1, area.x)
		} else {
			let label_len = space.abbreviation().chars().count().min(width) as u16;
			(area.y, area.x + label_len.min(area.width.saturating_sub(tokens.len() as u16)))
		};
		buf.set_line(x, y, &Line::from(tokens), area.width);
	}
}

impl Widget for BoardWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(self.theme.board_border()))
			.title(" Board ");
		let inner = block.inner(area);
		block.render(area, buf);

		let side = SIDE as u16;
		if inner.width < side * MIN_CELL_WIDTH || inner.height < side {
			Paragraph::new("Enlarge the terminal to see the board")
				.style(Style::default().fg(self.theme.unowned()))
				.render(inner, buf);
			return;
		}

		let grid = BoardGrid::fit(inner);
		for (position, (col, row)) in board::ring() {
			self.render_space(position, grid.cell(col, row), buf);
		}

		let center = grid.center();
		let mut lines = vec![
			Line::styled("MONOPOLY", Style::default().add_modifier(Modifier::BOLD)),
			Line::styled(self.banner, Style::default().fg(self.theme.game_status(self.snapshot.is_running))),
		];
		if let Some(last) = self.snapshot.game_log.last() {
			lines.push(Line::raw(""));
			lines.push(Line::raw(last.as_str()));
		}
		let text_y = center.y + center.height.saturating_sub(lines.len() as u16) / 2;
		let text_area = Rect::new(center.x, text_y, center.width, center.height.min(lines.len() as u16 + 1));
		Paragraph::new(lines)
			.alignment(Alignment::Center)
			.wrap(Wrap { trim: true })
			.render(text_area, buf);
	}
}

pub struct PlayersWidget<'a> {
	cards: &'a [PlayerCard],
	theme: &'a Theme,
}

impl<'a> PlayersWidget<'a> {
	pub fn new(cards: &'a [PlayerCard], theme: &'a Theme) -> Self {
		Self { cards, theme }
	}
}

impl Widget for PlayersWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(self.theme.players_border()))
			.title(" Players ");
		let inner = block.inner(area);
		block.render(area, buf);

		if self.cards.is_empty() {
			Paragraph::new("Waiting for players...").render(inner, buf);
			return;
		}

		let width = inner.width as usize;
		let mut lines = Vec::with_capacity(self.cards.len() * 2);
		for card in self.cards {
			let color = self.theme.player(card.index);
			lines.push(Line::from(vec![
				Span::styled("● ", Style::default().fg(color)),
				Span::styled(card.name.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
				Span::raw("  "),
				Span::styled(card.money.clone(), Style::default().fg(self.theme.money(card.cash))),
				Span::raw(format!("  @ {}", card.space)),
			]));
			let owned = if card.properties.is_empty() {
				"  no properties".to_string()
			} else {
				format!("  {} owned: {}", card.properties.len(), card.properties.join(", "))
			};
			lines.push(Line::styled(truncate(&owned, width), Style::default().fg(self.theme.unowned())));
		}
		Paragraph::new(lines).render(inner, buf);
	}
}

pub struct GameLogWidget<'a> {
	entries: &'a [String],
	theme: &'a Theme,
}

impl<'a> GameLogWidget<'a> {
	pub fn new(entries: &'a [String], theme: &'a Theme) -> Self {
		Self { entries, theme }
	}
}

impl Widget for GameLogWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(self.theme.log_border()))
			.title(" Game Log ");
		let inner = block.inner(area);
		block.render(area, buf);

		let max_lines = inner.height as usize;
		let start = self.entries.len().saturating_sub(max_lines);
		let width = inner.width as usize;
		let lines: Vec<Line> = self.entries[start..]
			.iter()
			.map(|entry| Line::raw(truncate(entry, width)))
			.collect();
		Paragraph::new(lines).render(inner, buf);
	}
}

pub struct ReasoningWidget<'a> {
	lines: &'a [ReasoningLine],
	theme: &'a Theme,
}

impl<'a> ReasoningWidget<'a> {
	pub fn new(lines: &'a [ReasoningLine], theme: &'a Theme) -> Self {
		Self { lines, theme }
	}
}

impl Widget for ReasoningWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let block = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(self.theme.reasoning_border()))
			.title(" AI Reasoning ");
		let inner = block.inner(area);
		block.render(area, buf);

		let max_lines = inner.height as usize;
		let start = self.lines.len().saturating_sub(max_lines);
		let width = inner.width as usize;
		let lines: Vec<Line> = self.lines[start..]
			.iter()
			.map(|line| {
				let text = truncate(&line.text, width);
				match self.theme.line(line.kind) {
					Some(color) => Line::styled(text, Style::default().fg(color)),
					None => Line::raw(text),
				}
			})
			.collect();
		Paragraph::new(lines).render(inner, buf);
	}
}

pub struct HistoryChart<'a> {
	history: &'a History,
	theme: &'a Theme,
}

impl<'a> HistoryChart<'a> {
	pub fn new(history: &'a History, theme: &'a Theme) -> Self {
		Self { history, theme }
	}

	pub fn x_bounds(&self) -> [f64; 2] {
		let (first, last) = self.history.visible_rounds();
		if first == last {
			[first as f64, first as f64 + 1.0]
		} else {
			[first as f64, last as f64]
		}
	}
}

impl Widget for HistoryChart<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let names: Vec<String> = self
			.history
			.last()
			.map(|r| r.players.iter().map(|p| p.name.clone()).collect())
			.unwrap_or_default();
		let series: Vec<Vec<(f64, f64)>> = (0..names.len()).map(|i| self.history.series(i)).collect();

		let datasets: Vec<Dataset> = names
			.iter()
			.zip(series.iter())
			.enumerate()
			.map(|(i, (name, data))| {
				Dataset::default()
					.name(name.clone())
					.marker(symbols::Marker::Braille)
					.graph_type(GraphType::Line)
					.style(Style::default().fg(self.theme.player(i)))
					.data(data)
			})
			.collect();

		let [x_min, x_max] = self.x_bounds();
		let x_labels = vec![
			Span::raw(format!("{}", x_min as u32)),
			Span::raw(format!("{}", x_max as u32)),
		];
		let y_labels = vec![Span::raw("0"), Span::raw("14"), Span::raw("28")];

		let chart = Chart::new(datasets)
			.block(
				Block::default()
					.borders(Borders::ALL)
					.border_style(Style::default().fg(self.theme.chart_border()))
					.title(format!(" {} ", view::chart_title(self.history))),
			)
			.x_axis(
				Axis::default()
					.title("Round")
					.style(Style::default().fg(self.theme.unowned()))
					.bounds([x_min, x_max])
					.labels(x_labels),
			)
			.y_axis(
				Axis::default()
					.title("Properties")
					.style(Style::default().fg(self.theme.unowned()))
					.bounds([0.0, MAX_PROPERTIES])
					.labels(y_labels),
			);
		chart.render(area, buf);
	}
}
