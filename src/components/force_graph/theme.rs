//! Colours and sizes for the cosmic look.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour at a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let mix = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: mix(self.r),
			g: mix(self.g),
			b: mix(self.b),
			a: self.a,
		}
	}

	/// CSS form: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Community colours, indexed by `group` modulo the palette length.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Palette entries; repeats are intentional.
	pub colors: Vec<Color>,
	/// Used for nodes without a community.
	pub ungrouped: Color,
}

impl NodePalette {
	/// Cyan, purple, blue, violet, pink, teal, indigo, then the first five again.
	pub fn cosmic() -> Self {
		let cyan = Color::rgb(0x06, 0xb6, 0xd4);
		let purple = Color::rgb(0xa8, 0x55, 0xf7);
		let blue = Color::rgb(0x3b, 0x82, 0xf6);
		let violet = Color::rgb(0x8b, 0x5c, 0xf6);
		let pink = Color::rgb(0xec, 0x48, 0x99);
		Self {
			colors: vec![
				cyan,
				purple,
				blue,
				violet,
				pink,
				Color::rgb(0x14, 0xb8, 0xa6), // teal
				Color::rgb(0x63, 0x66, 0xf1), // indigo
				cyan,
				purple,
				blue,
				violet,
				pink,
			],
			ungrouped: Color::rgb(0x94, 0xa3, 0xb8),
		}
	}

	/// Colour for a community id. Negative ids wrap like positive ones.
	pub fn for_group(&self, group: Option<i64>) -> Color {
		match group {
			Some(g) if !self.colors.is_empty() => {
				self.colors[g.rem_euclid(self.colors.len() as i64) as usize]
			}
			_ => self.ungrouped,
		}
	}
}

/// Link appearance.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line and arrowhead colour.
	pub color: Color,
	/// Line width in screen pixels.
	pub width: f64,
	/// Arrowhead length in world units.
	pub arrow_length: f64,
}

/// Node appearance.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Radius in world units of a node with `val` 1.
	pub radius: f64,
	/// Extra pick radius around each node, in screen pixels.
	pub hit_slop: f64,
	/// Whether nodes get a lit-sphere gradient.
	pub use_gradient: bool,
	/// Hover ring colour.
	pub ring_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Link style.
	pub edge: EdgeStyle,
	/// Node style.
	pub node: NodeStyle,
	/// Community colours.
	pub palette: NodePalette,
}

impl Theme {
	/// Deep-space background with cyan links.
	pub fn cosmic() -> Self {
		Self {
			background: Color::rgb(0x00, 0x08, 0x14),
			edge: EdgeStyle {
				color: Color::rgba(6, 182, 212, 0.25),
				width: 1.5,
				arrow_length: 5.0,
			},
			node: NodeStyle {
				radius: 4.0,
				hit_slop: 4.0,
				use_gradient: true,
				ring_color: Color::rgba(255, 255, 255, 0.8),
			},
			palette: NodePalette::cosmic(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::cosmic()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_wraps_at_twelve() {
		let palette = NodePalette::cosmic();
		assert_eq!(palette.colors.len(), 12);
		assert_eq!(palette.for_group(Some(0)), palette.for_group(Some(12)));
		assert_eq!(palette.for_group(Some(7)), palette.for_group(Some(0)));
		assert_ne!(palette.for_group(Some(5)), palette.for_group(Some(0)));
	}

	#[test]
	fn negative_and_missing_groups() {
		let palette = NodePalette::cosmic();
		assert_eq!(palette.for_group(Some(-1)), palette.colors[11]);
		assert_eq!(palette.for_group(None), palette.ungrouped);
	}

	#[test]
	fn css_forms() {
		assert_eq!(Color::rgb(0, 8, 20).to_css(), "#000814");
		assert_eq!(Color::rgba(6, 182, 212, 0.25).to_css(), "rgba(6, 182, 212, 0.25)");
		assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::rgb(255, 255, 255));
	}
}
