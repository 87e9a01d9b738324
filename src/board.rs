use crate::net::protocol::Player;

pub const BOARD_SIZE: u8 = 40;
pub const SIDE: u8 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorGroup {
	Brown,
	LightBlue,
	Pink,
	Orange,
	Red,
	Yellow,
	Green,
	DarkBlue,
}

impl ColorGroup {
	pub const ALL: [ColorGroup; 8] = [
		ColorGroup::Brown,
		ColorGroup::LightBlue,
		ColorGroup::Pink,
		ColorGroup::Orange,
		ColorGroup::Red,
		ColorGroup::Yellow,
		ColorGroup::Green,
		ColorGroup::DarkBlue,
	];

	pub fn key(&self) -> &'static str {
		match self {
			ColorGroup::Brown => "brown",
			ColorGroup::LightBlue => "light_blue",
			ColorGroup::Pink => "pink",
			ColorGroup::Orange => "orange",
			ColorGroup::Red => "red",
			ColorGroup::Yellow => "yellow",
			ColorGroup::Green => "green",
			ColorGroup::DarkBlue => "dark_blue",
		}
	}

	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|g| g.key().eq_ignore_ascii_case(key))
	}

	pub fn set_size(&self) -> usize {
		match self {
			ColorGroup::Brown | ColorGroup::DarkBlue => 2,
			_ => 3,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
	Go,
	Property { group: ColorGroup, price: u32 },
	Railroad,
	Utility,
	Tax { amount: u32 },
	Chance,
	CommunityChest,
	Jail,
	FreeParking,
	GoToJail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Space {
	pub position: u8,
	pub name: &'static str,
	pub kind: SpaceKind,
}

impl Space {
	pub fn price(&self) -> Option<u32> {
		match self.kind {
			SpaceKind::Property { price, .. } => Some(price),
			SpaceKind::Railroad => Some(200),
			SpaceKind::Utility => Some(150),
			_ => None,
		}
	}

	pub fn group(&self) -> Option<ColorGroup> {
		match self.kind {
			SpaceKind::Property { group, .. } => Some(group),
			_ => None,
		}
	}

	pub fn is_corner(&self) -> bool {
		self.position % 10 == 0
	}

	// Short label for a board cell.
	pub fn abbreviation(&self) -> String {
		match self.kind {
			SpaceKind::Go => "GO".to_string(),
			SpaceKind::Jail => "JAIL".to_string(),
			SpaceKind::FreeParking => "FREE".to_string(),
			SpaceKind::GoToJail => "G2J".to_string(),
			SpaceKind::Chance => "?".to_string(),
			SpaceKind::CommunityChest => "CC".to_string(),
			SpaceKind::Tax { .. } => "TAX".to_string(),
			SpaceKind::Railroad => "RR".to_string(),
			SpaceKind::Utility => "UT".to_string(),
			SpaceKind::Property { .. } => self
				.name
				.split_whitespace()
				.filter_map(|w| w.chars().next())
				.filter(|c| c.is_alphabetic())
				.take(3)
				.collect(),
		}
	}
}

const fn prop(position: u8, name: &'static str, group: ColorGroup, price: u32) -> Space {
	Space { position, name, kind: SpaceKind::Property { group, price } }
}

const fn other(position: u8, name: &'static str, kind: SpaceKind) -> Space {
	Space { position, name, kind }
}

use ColorGroup::*;

static SPACES: [Space; BOARD_SIZE as usize] = [
	other(0, "GO", SpaceKind::Go),
	prop(1, "Mediterranean Avenue", Brown, 60),
	other(2, "Community Chest", SpaceKind::CommunityChest),
	prop(3, "Baltic Avenue", Brown, 60),
	other(4, "Income Tax", SpaceKind::Tax { amount: 200 }),
	other(5, "Reading Railroad", SpaceKind::Railroad),
	prop(6, "Oriental Avenue", LightBlue, 100),
	other(7, "Chance", SpaceKind::Chance),
	prop(8, "Vermont Avenue", LightBlue, 100),
	prop(9, "Connecticut Avenue", LightBlue, 120),
	other(10, "Jail", SpaceKind::Jail),
	prop(11, "St. Charles Place", Pink, 140),
	other(12, "Electric Company", SpaceKind::Utility),
	prop(13, "States Avenue", Pink, 140),
	prop(14, "Virginia Avenue", Pink, 160),
	other(15, "Pennsylvania Railroad", SpaceKind::Railroad),
	prop(16, "St. James Place", Orange, 180),
	other(17, "Community Chest", SpaceKind::CommunityChest),
	prop(18, "Tennessee Avenue", Orange, 180),
	prop(19, "New York Avenue", Orange, 200),
	other(20, "Free Parking", SpaceKind::FreeParking),
	prop(21, "Kentucky Avenue", Red, 220),
	other(22, "Chance", SpaceKind::Chance),
	prop(23, "Indiana Avenue", Red, 220),
	prop(24, "Illinois Avenue", Red, 240),
	other(25, "B&O Railroad", SpaceKind::Railroad),
	prop(26, "Atlantic Avenue", Yellow, 260),
	prop(27, "Ventnor Avenue", Yellow, 260),
	other(28, "Water Works", SpaceKind::Utility),
	prop(29, "Marvin Gardens", Yellow, 280),
	other(30, "Go To Jail", SpaceKind::GoToJail),
	prop(31, "Pacific Avenue", Green, 300),
	prop(32, "North Carolina Avenue", Green, 300),
	other(33, "Community Chest", SpaceKind::CommunityChest),
	prop(34, "Pennsylvania Avenue", Green, 320),
	other(35, "Short Line", SpaceKind::Railroad),
	other(36, "Chance", SpaceKind::Chance),
	prop(37, "Park Place", DarkBlue, 350),
	other(38, "Luxury Tax", SpaceKind::Tax { amount: 100 }),
	prop(39, "Boardwalk", DarkBlue, 400),
];

pub fn space(position: u8) -> Option<&'static Space> {
	SPACES.get(position as usize)
}

pub fn spaces() -> &'static [Space] {
	&SPACES
}

pub fn owner_of(position: u8, players: &[Player]) -> Option<usize> {
	players.iter().position(|p| p.owns(position))
}

pub fn occupants(position: u8, players: &[Player]) -> Vec<usize> {
	players
		.iter()
		.enumerate()
		.filter(|(_, p)| p.position == position)
		.map(|(i, _)| i)
		.collect()
}

// Grid cell (column, row) of a position on an 11x11 board with GO in the
// bottom-right corner and play running clockwise from the player's view.
pub fn cell(position: u8) -> Option<(u8, u8)> {
	let last = SIDE - 1;
	match position {
		0..=10 => Some((last - position, last)),
		11..=19 => Some((0, last - (position - 10))),
		20..=30 => Some((position - 20, 0)),
		31..=39 => Some((last, position - 30)),
		_ => None,
	}
}

pub fn ring() -> Vec<(u8, (u8, u8))> {
	(0..BOARD_SIZE)
		.filter_map(|p| cell(p).map(|c| (p, c)))
		.collect()
}
