//! Seat colors: hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) and SVG color names.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::svg::RenderError;

/// 8-bit sRGB color with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    /// Lowercase `#rrggbbaa` form.
    pub fn hexcode(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// A color as written into the SVG `style` attribute.
///
/// Hex colors are normalized to `#rrggbbaa`. Names must be CSS3 color
/// names (`red`, `transparent`, `rebeccapurple`) and are written lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Parsed hex color.
    Rgba(Color),
    /// Lowercase CSS3 color name.
    Named(String),
}

impl Default for Paint {
    fn default() -> Self {
        Self::Rgba(Color::black())
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Rgba(color)
    }
}

impl Paint {
    /// Parse a hex color (leading `#` optional) or a color name.
    ///
    /// Anything else, including unknown names, is rejected with
    /// [`RenderError::InvalidColor`].
    pub fn parse(s: &str) -> Result<Self, RenderError> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if let Some(color) = parse_hex(hex) {
            return Ok(Self::Rgba(color));
        }
        if !s.starts_with('#')
            && let Some((name, _)) = lookup_named(s)
        {
            return Ok(Self::Named(name.to_string()));
        }
        Err(RenderError::InvalidColor(s.to_string()))
    }
}

impl Paint {
    /// RGBA value of the paint. `None` for a name outside the CSS3 table.
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Rgba(color) => Some(*color),
            Self::Named(name) => lookup_named(name).map(|(_, color)| color),
        }
    }
}

impl FromStr for Paint {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba(color) => f.write_str(&color.hexcode()),
            Self::Named(name) => f.write_str(name),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let bytes = hex.as_bytes();
    match hex.len() {
        3 => Some(Color::from_rgb(
            expand_nibble(bytes[0])?,
            expand_nibble(bytes[1])?,
            expand_nibble(bytes[2])?,
        )),
        4 => Some(Color::from_rgba(
            expand_nibble(bytes[0])?,
            expand_nibble(bytes[1])?,
            expand_nibble(bytes[2])?,
            expand_nibble(bytes[3])?,
        )),
        6 => Some(Color::from_rgb(
            parse_byte(&bytes[0..2])?,
            parse_byte(&bytes[2..4])?,
            parse_byte(&bytes[4..6])?,
        )),
        8 => Some(Color::from_rgba(
            parse_byte(&bytes[0..2])?,
            parse_byte(&bytes[2..4])?,
            parse_byte(&bytes[4..6])?,
            parse_byte(&bytes[6..8])?,
        )),
        _ => None,
    }
}

/// 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(pair: &[u8]) -> Option<u8> {
    Some(hex_val(pair[0])? << 4 | hex_val(pair[1])?)
}

/// Case-insensitive lookup in [`CSS3_COLORS`].
fn lookup_named(name: &str) -> Option<(&'static str, Color)> {
    // Longest CSS3 name is 20 bytes.
    let mut buf = [0u8; 24];
    let bytes = name.as_bytes();
    if bytes.len() > buf.len() {
        return None;
    }
    for (dst, &b) in buf.iter_mut().zip(bytes) {
        *dst = b.to_ascii_lowercase();
    }
    let lower = core::str::from_utf8(&buf[..bytes.len()]).ok()?;

    CSS3_COLORS
        .binary_search_by_key(&lower, |&(n, _)| n)
        .ok()
        .map(|idx| CSS3_COLORS[idx])
}

/// CSS3 color names, sorted for binary search.
const CSS3_COLORS: &[(&str, Color)] = &[
    ("aliceblue", Color::from_rgb(240, 248, 255)),
    ("antiquewhite", Color::from_rgb(250, 235, 215)),
    ("aqua", Color::from_rgb(0, 255, 255)),
    ("aquamarine", Color::from_rgb(127, 255, 212)),
    ("azure", Color::from_rgb(240, 255, 255)),
    ("beige", Color::from_rgb(245, 245, 220)),
    ("bisque", Color::from_rgb(255, 228, 196)),
    ("black", Color::from_rgb(0, 0, 0)),
    ("blanchedalmond", Color::from_rgb(255, 235, 205)),
    ("blue", Color::from_rgb(0, 0, 255)),
    ("blueviolet", Color::from_rgb(138, 43, 226)),
    ("brown", Color::from_rgb(165, 42, 42)),
    ("burlywood", Color::from_rgb(222, 184, 135)),
    ("cadetblue", Color::from_rgb(95, 158, 160)),
    ("chartreuse", Color::from_rgb(127, 255, 0)),
    ("chocolate", Color::from_rgb(210, 105, 30)),
    ("coral", Color::from_rgb(255, 127, 80)),
    ("cornflowerblue", Color::from_rgb(100, 149, 237)),
    ("cornsilk", Color::from_rgb(255, 248, 220)),
    ("crimson", Color::from_rgb(220, 20, 60)),
    ("cyan", Color::from_rgb(0, 255, 255)),
    ("darkblue", Color::from_rgb(0, 0, 139)),
    ("darkcyan", Color::from_rgb(0, 139, 139)),
    ("darkgoldenrod", Color::from_rgb(184, 134, 11)),
    ("darkgray", Color::from_rgb(169, 169, 169)),
    ("darkgreen", Color::from_rgb(0, 100, 0)),
    ("darkgrey", Color::from_rgb(169, 169, 169)),
    ("darkkhaki", Color::from_rgb(189, 183, 107)),
    ("darkmagenta", Color::from_rgb(139, 0, 139)),
    ("darkolivegreen", Color::from_rgb(85, 107, 47)),
    ("darkorange", Color::from_rgb(255, 140, 0)),
    ("darkorchid", Color::from_rgb(153, 50, 204)),
    ("darkred", Color::from_rgb(139, 0, 0)),
    ("darksalmon", Color::from_rgb(233, 150, 122)),
    ("darkseagreen", Color::from_rgb(143, 188, 139)),
    ("darkslateblue", Color::from_rgb(72, 61, 139)),
    ("darkslategray", Color::from_rgb(47, 79, 79)),
    ("darkslategrey", Color::from_rgb(47, 79, 79)),
    ("darkturquoise", Color::from_rgb(0, 206, 209)),
    ("darkviolet", Color::from_rgb(148, 0, 211)),
    ("deeppink", Color::from_rgb(255, 20, 147)),
    ("deepskyblue", Color::from_rgb(0, 191, 255)),
    ("dimgray", Color::from_rgb(105, 105, 105)),
    ("dimgrey", Color::from_rgb(105, 105, 105)),
    ("dodgerblue", Color::from_rgb(30, 144, 255)),
    ("firebrick", Color::from_rgb(178, 34, 34)),
    ("floralwhite", Color::from_rgb(255, 250, 240)),
    ("forestgreen", Color::from_rgb(34, 139, 34)),
    ("fuchsia", Color::from_rgb(255, 0, 255)),
    ("gainsboro", Color::from_rgb(220, 220, 220)),
    ("ghostwhite", Color::from_rgb(248, 248, 255)),
    ("gold", Color::from_rgb(255, 215, 0)),
    ("goldenrod", Color::from_rgb(218, 165, 32)),
    ("gray", Color::from_rgb(128, 128, 128)),
    ("green", Color::from_rgb(0, 128, 0)),
    ("greenyellow", Color::from_rgb(173, 255, 47)),
    ("grey", Color::from_rgb(128, 128, 128)),
    ("honeydew", Color::from_rgb(240, 255, 240)),
    ("hotpink", Color::from_rgb(255, 105, 180)),
    ("indianred", Color::from_rgb(205, 92, 92)),
    ("indigo", Color::from_rgb(75, 0, 130)),
    ("ivory", Color::from_rgb(255, 255, 240)),
    ("khaki", Color::from_rgb(240, 230, 140)),
    ("lavender", Color::from_rgb(230, 230, 250)),
    ("lavenderblush", Color::from_rgb(255, 240, 245)),
    ("lawngreen", Color::from_rgb(124, 252, 0)),
    ("lemonchiffon", Color::from_rgb(255, 250, 205)),
    ("lightblue", Color::from_rgb(173, 216, 230)),
    ("lightcoral", Color::from_rgb(240, 128, 128)),
    ("lightcyan", Color::from_rgb(224, 255, 255)),
    ("lightgoldenrodyellow", Color::from_rgb(250, 250, 210)),
    ("lightgray", Color::from_rgb(211, 211, 211)),
    ("lightgreen", Color::from_rgb(144, 238, 144)),
    ("lightgrey", Color::from_rgb(211, 211, 211)),
    ("lightpink", Color::from_rgb(255, 182, 193)),
    ("lightsalmon", Color::from_rgb(255, 160, 122)),
    ("lightseagreen", Color::from_rgb(32, 178, 170)),
    ("lightskyblue", Color::from_rgb(135, 206, 250)),
    ("lightslategray", Color::from_rgb(119, 136, 153)),
    ("lightslategrey", Color::from_rgb(119, 136, 153)),
    ("lightsteelblue", Color::from_rgb(176, 196, 222)),
    ("lightyellow", Color::from_rgb(255, 255, 224)),
    ("lime", Color::from_rgb(0, 255, 0)),
    ("limegreen", Color::from_rgb(50, 205, 50)),
    ("linen", Color::from_rgb(250, 240, 230)),
    ("magenta", Color::from_rgb(255, 0, 255)),
    ("maroon", Color::from_rgb(128, 0, 0)),
    ("mediumaquamarine", Color::from_rgb(102, 205, 170)),
    ("mediumblue", Color::from_rgb(0, 0, 205)),
    ("mediumorchid", Color::from_rgb(186, 85, 211)),
    ("mediumpurple", Color::from_rgb(147, 112, 219)),
    ("mediumseagreen", Color::from_rgb(60, 179, 113)),
    ("mediumslateblue", Color::from_rgb(123, 104, 238)),
    ("mediumspringgreen", Color::from_rgb(0, 250, 154)),
    ("mediumturquoise", Color::from_rgb(72, 209, 204)),
    ("mediumvioletred", Color::from_rgb(199, 21, 133)),
    ("midnightblue", Color::from_rgb(25, 25, 112)),
    ("mintcream", Color::from_rgb(245, 255, 250)),
    ("mistyrose", Color::from_rgb(255, 228, 225)),
    ("moccasin", Color::from_rgb(255, 228, 181)),
    ("navajowhite", Color::from_rgb(255, 222, 173)),
    ("navy", Color::from_rgb(0, 0, 128)),
    ("oldlace", Color::from_rgb(253, 245, 230)),
    ("olive", Color::from_rgb(128, 128, 0)),
    ("olivedrab", Color::from_rgb(107, 142, 35)),
    ("orange", Color::from_rgb(255, 165, 0)),
    ("orangered", Color::from_rgb(255, 69, 0)),
    ("orchid", Color::from_rgb(218, 112, 214)),
    ("palegoldenrod", Color::from_rgb(238, 232, 170)),
    ("palegreen", Color::from_rgb(152, 251, 152)),
    ("paleturquoise", Color::from_rgb(175, 238, 238)),
    ("palevioletred", Color::from_rgb(219, 112, 147)),
    ("papayawhip", Color::from_rgb(255, 239, 213)),
    ("peachpuff", Color::from_rgb(255, 218, 185)),
    ("peru", Color::from_rgb(205, 133, 63)),
    ("pink", Color::from_rgb(255, 192, 203)),
    ("plum", Color::from_rgb(221, 160, 221)),
    ("powderblue", Color::from_rgb(176, 224, 230)),
    ("purple", Color::from_rgb(128, 0, 128)),
    ("rebeccapurple", Color::from_rgb(102, 51, 153)),
    ("red", Color::from_rgb(255, 0, 0)),
    ("rosybrown", Color::from_rgb(188, 143, 143)),
    ("royalblue", Color::from_rgb(65, 105, 225)),
    ("saddlebrown", Color::from_rgb(139, 69, 19)),
    ("salmon", Color::from_rgb(250, 128, 114)),
    ("sandybrown", Color::from_rgb(244, 164, 96)),
    ("seagreen", Color::from_rgb(46, 139, 87)),
    ("seashell", Color::from_rgb(255, 245, 238)),
    ("sienna", Color::from_rgb(160, 82, 45)),
    ("silver", Color::from_rgb(192, 192, 192)),
    ("skyblue", Color::from_rgb(135, 206, 235)),
    ("slateblue", Color::from_rgb(106, 90, 205)),
    ("slategray", Color::from_rgb(112, 128, 144)),
    ("slategrey", Color::from_rgb(112, 128, 144)),
    ("snow", Color::from_rgb(255, 250, 250)),
    ("springgreen", Color::from_rgb(0, 255, 127)),
    ("steelblue", Color::from_rgb(70, 130, 180)),
    ("tan", Color::from_rgb(210, 180, 140)),
    ("teal", Color::from_rgb(0, 128, 128)),
    ("thistle", Color::from_rgb(216, 191, 216)),
    ("tomato", Color::from_rgb(255, 99, 71)),
    ("transparent", Color::from_rgba(0, 0, 0, 0)),
    ("turquoise", Color::from_rgb(64, 224, 208)),
    ("violet", Color::from_rgb(238, 130, 238)),
    ("wheat", Color::from_rgb(245, 222, 179)),
    ("white", Color::from_rgb(255, 255, 255)),
    ("whitesmoke", Color::from_rgb(245, 245, 245)),
    ("yellow", Color::from_rgb(255, 255, 0)),
    ("yellowgreen", Color::from_rgb(154, 205, 50)),
];
