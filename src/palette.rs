#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a packed `0xRRGGBB` literal.
    pub const fn hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

pub const BACKGROUND: Rgb = Rgb::hex(0x1a1a2e);
pub const STEM: Rgb = Rgb::hex(0x558b2f);

/// Petal colours, outermost layer first.
pub const PETALS: [Rgb; 6] = [
    Rgb::hex(0x4a0e2e), // deep burgundy
    Rgb::hex(0x881d5a),
    Rgb::hex(0xc2185b),
    Rgb::hex(0xe91e63),
    Rgb::hex(0xf06292),
    Rgb::hex(0xffc1e3), // soft pink
];

pub const LAYER_COUNT: usize = PETALS.len();
