/// A growing hyphal tip in the chamber.
#[derive(Clone, Copy, Debug)]
pub struct Filament {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    pub life: f32,
    pub width: f32,
}

impl Filament {
    /// Remaining life as a fraction of a full seed, used as stroke alpha.
    pub fn vitality(&self) -> f32 {
        (self.life / 100.0).max(0.0)
    }
}
