use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use doc2odt::common::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// assert_eq!(red.to_odf(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

/// Word's sixteen-entry `ico` palette; index 0 means "auto".
const ICO_PALETTE: [(u8, u8, u8); 17] = [
    (0x00, 0x00, 0x00),
    (0x00, 0x00, 0x00),
    (0x00, 0x00, 0xFF),
    (0x00, 0xFF, 0xFF),
    (0x00, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0xFF, 0x00, 0x00),
    (0xFF, 0xFF, 0x00),
    (0xFF, 0xFF, 0xFF),
    (0x00, 0x00, 0x80),
    (0x00, 0x80, 0x80),
    (0x00, 0x80, 0x00),
    (0x80, 0x00, 0x80),
    (0x80, 0x00, 0x00),
    (0x80, 0x80, 0x00),
    (0x80, 0x80, 0x80),
    (0xC0, 0xC0, 0xC0),
];

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a Word `ico` palette index. Returns `None` for "auto" and
    /// out-of-range indices.
    pub fn from_ico(ico: u8) -> Option<Self> {
        if ico == 0 {
            return None;
        }
        ICO_PALETTE
            .get(ico as usize)
            .map(|&(r, g, b)| Self::new(r, g, b))
    }

    /// Decode a COLORREF (`0x00BBGGRR`). The high byte `0xFF` marks "auto".
    pub fn from_colorref(value: u32) -> Option<Self> {
        if value >> 24 == 0xFF {
            return None;
        }
        Some(Self::new(
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        ))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// ODF color syntax (`#rrggbb`, lowercase).
    pub fn to_odf(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
