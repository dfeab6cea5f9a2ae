use crate::face::{Face, FaceSet};
use crate::types::{Block, Rgb};
use crate::volume::{self, Volume};

/// Layer palette used by offline generation, bottom to top.
const FLOOR_COLORS: [u32; 5] = [0x28_0e_02, 0x3a_13_01, 0x42_16_02, 0x51_1a_01, 0x32_93_33];

/// Dense, fixed-size block volume. Cells are addressed `(x, y, z)`
/// with `0 <= x < width`, `0 <= z < depth`, `0 <= y < height`; the
/// grid owns every block it contains.
///
/// Out-of-bounds lookups return `None` rather than erroring: absence
/// is the normal "no block / world edge" signal, both for visibility
/// and for movement resolution.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    width: usize,
    depth: usize,
    height: usize,
    cells: Vec<Option<Block>>,
    dirty: Vec<(i32, i32, i32)>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: usize, depth: usize, height: usize) -> Self {
        Self {
            width,
            depth,
            height,
            cells: vec![None; width * depth * height],
            dirty: Vec::new(),
        }
    }

    /// Flat slab world: up to five colored layers from the bottom.
    pub fn generate(width: usize, depth: usize, height: usize) -> Self {
        let mut grid = Self::with_size(width, depth, height);
        let layers = height.min(FLOOR_COLORS.len());
        for x in 0..width as i32 {
            for z in 0..depth as i32 {
                for y in 0..layers as i32 {
                    let color = Rgb::new(FLOOR_COLORS[y as usize]);
                    let idx = grid.idx(x as usize, y as usize, z as usize);
                    grid.cells[idx] = Some(Block::new(x, y, z, color));
                }
            }
        }
        grid.refresh_all();
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.depth + z) * self.width + x
    }

    #[inline]
    pub fn within_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && (x as usize) < self.width
            && z >= 0
            && (z as usize) < self.depth
            && y >= 0
            && (y as usize) < self.height
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Block> {
        if !self.within_bounds(x, y, z) {
            return None;
        }
        self.cells[self.idx(x as usize, y as usize, z as usize)].as_ref()
    }

    /// Neighbor lookup: translate one step through `face`, then get.
    #[inline]
    pub fn get_toward(&self, x: i32, y: i32, z: i32, face: Face) -> Option<&Block> {
        let (nx, ny, nz) = face.translate(x, y, z);
        self.get(nx, ny, nz)
    }

    /// Applies one of the four legal cell transitions, resolving the
    /// target exactly like [`Grid::get_toward`] when `face` is given:
    ///
    /// - occupied + no color: remove, then recompute the six
    ///   neighbors' visible faces (removal may expose them);
    /// - occupied + color: recolor in place (opacity unchanged, so no
    ///   visibility work);
    /// - empty in-bounds + color: place, compute the new block's
    ///   faces, then recompute the six neighbors' (placement may hide
    ///   theirs);
    /// - anything else: silent no-op.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, face: Option<Face>, color: Option<Rgb>) {
        let (tx, ty, tz) = match face {
            Some(f) => f.translate(x, y, z),
            None => (x, y, z),
        };

        match (self.get(tx, ty, tz).is_some(), color) {
            (true, None) => self.remove(tx, ty, tz),
            (true, Some(c)) => self.recolor(tx, ty, tz, c),
            (false, Some(c)) if self.within_bounds(tx, ty, tz) => self.place(tx, ty, tz, c),
            _ => {}
        }
    }

    fn remove(&mut self, x: i32, y: i32, z: i32) {
        let idx = self.idx(x as usize, y as usize, z as usize);
        self.cells[idx] = None;
        self.mark_dirty(x, y, z);
        for f in Face::ALL {
            let (nx, ny, nz) = f.translate(x, y, z);
            self.refresh_faces(nx, ny, nz);
        }
    }

    fn recolor(&mut self, x: i32, y: i32, z: i32, color: Rgb) {
        let idx = self.idx(x as usize, y as usize, z as usize);
        if let Some(block) = self.cells[idx].as_mut() {
            block.color = color;
        }
        self.mark_dirty(x, y, z);
    }

    fn place(&mut self, x: i32, y: i32, z: i32, color: Rgb) {
        let idx = self.idx(x as usize, y as usize, z as usize);
        self.cells[idx] = Some(Block::new(x, y, z, color));
        self.refresh_faces(x, y, z);
        self.mark_dirty(x, y, z);
        for f in Face::ALL {
            let (nx, ny, nz) = f.translate(x, y, z);
            self.refresh_faces(nx, ny, nz);
        }
    }

    /// Face visibility as a pure function of current occupancy: a
    /// face is hidden iff the neighbor through it exists and is
    /// opaque. No history, so a clean recompute is always correct.
    pub fn visible_faces(&self, x: i32, y: i32, z: i32) -> FaceSet {
        let mut set = FaceSet::EMPTY;
        for f in Face::ALL {
            match self.get_toward(x, y, z, f) {
                Some(n) if n.opaque => {}
                _ => set.insert(f),
            }
        }
        set
    }

    fn refresh_faces(&mut self, x: i32, y: i32, z: i32) {
        if self.get(x, y, z).is_none() {
            return;
        }
        let faces = self.visible_faces(x, y, z);
        let idx = self.idx(x as usize, y as usize, z as usize);
        let changed = match self.cells[idx].as_mut() {
            Some(block) if block.faces != faces => {
                block.faces = faces;
                true
            }
            _ => false,
        };
        if changed {
            self.mark_dirty(x, y, z);
        }
    }

    fn refresh_all(&mut self) {
        let occupied: Vec<(i32, i32, i32)> =
            self.blocks().map(|b| (b.x, b.y, b.z)).collect();
        for (x, y, z) in occupied {
            self.refresh_faces(x, y, z);
        }
    }

    /// Replaces the grid contents from a map payload. An empty
    /// dimension leaves the grid untouched. Visibility is computed
    /// exactly once per block after the whole volume is placed; any
    /// order works since a block's faces depend only on its placed
    /// neighbors.
    pub fn load(&mut self, volume: &Volume) {
        let Some((width, depth, height)) = volume::dims(volume) else {
            return;
        };

        *self = Self::with_size(width, depth, height);
        for (x, plane) in volume.iter().enumerate() {
            for (z, column) in plane.iter().enumerate().take(depth) {
                for (y, leaf) in column.iter().enumerate().take(height) {
                    if let Some(color) = volume::leaf_color(*leaf) {
                        let idx = self.idx(x, y, z);
                        self.cells[idx] =
                            Some(Block::new(x as i32, y as i32, z as i32, color));
                    }
                }
            }
        }
        self.refresh_all();
        let occupied: Vec<(i32, i32, i32)> =
            self.blocks().map(|b| (b.x, b.y, b.z)).collect();
        for (x, y, z) in occupied {
            self.mark_dirty(x, y, z);
        }
    }

    /// Serializes back to the nested map shape; non-empty cells keep
    /// their colors (round trip with [`Grid::load`]).
    pub fn snapshot(&self) -> Volume {
        let mut volume = vec![vec![vec![None; self.height]; self.depth]; self.width];
        for block in self.blocks() {
            volume[block.x as usize][block.z as usize][block.y as usize] = Some(block.color);
        }
        volume
    }

    pub fn set_selected(&mut self, x: i32, y: i32, z: i32, selected: bool) {
        if !self.within_bounds(x, y, z) {
            return;
        }
        let idx = self.idx(x as usize, y as usize, z as usize);
        let changed = match self.cells[idx].as_mut() {
            Some(block) if block.selected != selected => {
                block.selected = selected;
                true
            }
            _ => false,
        };
        if changed {
            self.mark_dirty(x, y, z);
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    #[inline]
    fn mark_dirty(&mut self, x: i32, y: i32, z: i32) {
        self.dirty.push((x, y, z));
    }

    /// Cells whose renderable state changed since the last drain, in
    /// first-touch order. The rendering collaborator re-queries
    /// visibility for each and owns the face handles itself.
    pub fn take_dirty(&mut self) -> Vec<(i32, i32, i32)> {
        let mut seen = Vec::new();
        for cell in self.dirty.drain(..) {
            if !seen.contains(&cell) {
                seen.push(cell);
            }
        }
        seen
    }
}
