/// Manual stand-in for a motion sensor on hosts that have none.
/// While enabled, the values are pushed into the orientation feed every frame.
#[derive(Default)]
pub struct TiltState {
    pub enabled: bool,
    /// Radians.
    pub pitch: f64,
    /// Radians.
    pub roll: f64,
}
