//! Celebratory particle bursts. Fire-and-forget: the core only says *that* a
//! burst should happen and with what parameters; the adapter draws it.

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BRAND_PURPLE: Rgb = Rgb(0x5b, 0x06, 0xbe);
pub const BRAND_AMBER: Rgb = Rgb(0xfb, 0xb3, 0x50);
pub const BRAND_GREEN: Rgb = Rgb(0x00, 0xbf, 0x63);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub particle_count: u16,
    /// Cone angle in degrees.
    pub spread: u16,
    pub colors: Vec<Rgb>,
}

impl Burst {
    /// The burst fired when a checklist task is completed.
    pub fn task_completed() -> Self {
        Self {
            particle_count: 100,
            spread: 70,
            colors: vec![BRAND_PURPLE, BRAND_AMBER, BRAND_GREEN],
        }
    }
}
