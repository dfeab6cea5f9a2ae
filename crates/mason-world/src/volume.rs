use crate::types::Rgb;

/// Map payload shape: nested cells addressed `[x][z][y]`. An absent
/// leaf is an empty cell; zero doubles as empty because the wire
/// format treats falsy entries as air.
pub type Volume = Vec<Vec<Vec<Option<Rgb>>>>;

/// Dimensions of a volume, or `None` when any dimension is zero
/// (which callers treat as a no-op load).
pub fn dims(volume: &Volume) -> Option<(usize, usize, usize)> {
    let width = volume.len();
    let depth = volume.first()?.len();
    let height = volume.first()?.first()?.len();
    if width == 0 || depth == 0 || height == 0 {
        None
    } else {
        Some((width, depth, height))
    }
}

#[inline]
pub fn leaf_color(leaf: Option<Rgb>) -> Option<Rgb> {
    leaf.filter(|c| c.0 != 0)
}
