//! Visual theming for the board canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Card fill colors, assigned per node `type`.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
	/// Used for nodes with an empty type.
	pub untyped: Color,
}

impl NodePalette {
	/// Muted slate blues and teals.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(180, 136, 100), // Tan
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(170, 130, 95),  // Sienna
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(125, 145, 140), // Sage
			],
			untyped: Color::rgb(88, 96, 110),
		}
	}

	/// Stable color for a node type. Equal types always share a color.
	pub fn for_kind(&self, kind: &str) -> Color {
		if kind.is_empty() || self.colors.is_empty() {
			return self.untyped;
		}
		// FNV-1a keeps the mapping stable across sessions.
		let hash = kind.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
			(h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
		});
		self.colors[(hash % self.colors.len() as u64) as usize]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Secondary color for the radial gradient
	pub color_secondary: Color,
	pub use_gradient: bool,
	/// Dot grid color; fully transparent disables the grid.
	pub grid_color: Color,
	/// Dot spacing in model units.
	pub grid_spacing: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub selected_color: Color,
	pub label_color: Color,
	/// Fill behind edge labels so they stay readable over strokes.
	pub label_background: Color,
}

/// Card visual style.
#[derive(Clone, Debug)]
pub struct CardStyle {
	pub use_gradient: bool,
	pub border_color: Color,
	pub label_color: Color,
	pub kind_color: Color,
	/// Ring around the selected card.
	pub selected_ring: Color,
	/// Ring around the chosen link source.
	pub link_source_ring: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub card: CardStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Dark slate board (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				grid_color: Color::rgba(255, 255, 255, 0.06),
				grid_spacing: 24.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.7),
				selected_color: Color::rgb(255, 196, 87),
				label_color: Color::rgba(230, 236, 243, 0.95),
				label_background: Color::rgba(22, 27, 34, 0.85),
			},
			card: CardStyle {
				use_gradient: true,
				border_color: Color::rgba(255, 255, 255, 0.12),
				label_color: Color::rgb(245, 247, 250),
				kind_color: Color::rgba(245, 247, 250, 0.7),
				selected_ring: Color::rgb(255, 196, 87),
				link_source_ring: Color::rgb(102, 217, 160),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Light paper theme
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(246, 244, 239),
				color_secondary: Color::rgb(252, 251, 248),
				use_gradient: false,
				grid_color: Color::rgba(0, 0, 0, 0.08),
				grid_spacing: 24.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(70, 80, 95, 0.7),
				selected_color: Color::rgb(214, 120, 0),
				label_color: Color::rgb(40, 44, 52),
				label_background: Color::rgba(246, 244, 239, 0.9),
			},
			card: CardStyle {
				use_gradient: false,
				border_color: Color::rgba(0, 0, 0, 0.15),
				label_color: Color::rgb(255, 255, 255),
				kind_color: Color::rgba(255, 255, 255, 0.8),
				selected_ring: Color::rgb(214, 120, 0),
				link_source_ring: Color::rgb(30, 150, 90),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Looks a theme up by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"paper" => Self::paper(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
