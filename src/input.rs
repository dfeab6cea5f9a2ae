/// Per-tick input snapshot produced by the host's input layer. Held
/// keys are level-triggered; gesture fields are edge-triggered and
/// consumed by the tick that sees them.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Space: jump when walking, rise when flying.
    pub ascend: bool,
    /// Shift: sink when flying.
    pub descend: bool,
    /// Mouse delta, pixels.
    pub look_dx: f32,
    pub look_dy: f32,
    /// Toggle between walking and free-fly.
    pub toggle_fly: bool,
    /// Edit gestures.
    pub place: bool,
    pub break_block: bool,
    pub clone_color: bool,
}
