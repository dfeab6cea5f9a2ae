use mason_world::{Face, FaceSet, Grid, Rgb, Volume};

const RED: Rgb = Rgb(0xff_00_00);
const BLUE: Rgb = Rgb(0x00_00_ff);

fn filled_volume(w: usize, d: usize, h: usize, color: Rgb) -> Volume {
    vec![vec![vec![Some(color); h]; d]; w]
}

#[test]
fn place_get_remove_round_trip() {
    let mut grid = Grid::with_size(4, 4, 4);
    grid.set_block(1, 2, 3, None, Some(RED));
    let block = grid.get(1, 2, 3).expect("placed block");
    assert_eq!(block.color, RED);
    assert_eq!((block.x, block.y, block.z), (1, 2, 3));
    assert!(block.opaque && block.collides);

    grid.set_block(1, 2, 3, None, None);
    assert!(grid.get(1, 2, 3).is_none());
}

#[test]
fn out_of_bounds_is_absent_not_an_error() {
    let grid = Grid::with_size(2, 2, 2);
    assert!(grid.get(-1, 0, 0).is_none());
    assert!(grid.get(0, 2, 0).is_none());
    assert!(grid.get(0, 0, 5).is_none());
    assert!(!grid.within_bounds(2, 0, 0));
    assert!(grid.within_bounds(1, 1, 1));
}

#[test]
fn illegal_transitions_are_silent_noops() {
    let mut grid = Grid::with_size(2, 2, 2);
    // remove on an empty cell
    grid.set_block(0, 0, 0, None, None);
    assert!(grid.get(0, 0, 0).is_none());
    // place out of bounds
    grid.set_block(5, 5, 5, None, Some(RED));
    assert_eq!(grid.blocks().count(), 0);
    // place through a face that lands outside
    grid.set_block(1, 0, 0, Some(Face::XPos), Some(RED));
    assert_eq!(grid.blocks().count(), 0);
}

#[test]
fn recolor_in_place_keeps_faces() {
    let mut grid = Grid::with_size(3, 3, 3);
    grid.set_block(1, 1, 1, None, Some(RED));
    let faces_before = grid.get(1, 1, 1).unwrap().faces;
    grid.set_block(1, 1, 1, None, Some(BLUE));
    let block = grid.get(1, 1, 1).unwrap();
    assert_eq!(block.color, BLUE);
    assert_eq!(block.faces, faces_before);
}

#[test]
fn face_translated_set_block_places_on_neighbor_cell() {
    let mut grid = Grid::with_size(3, 3, 3);
    grid.set_block(1, 1, 1, None, Some(RED));
    grid.set_block(1, 1, 1, Some(Face::YPos), Some(BLUE));
    assert_eq!(grid.get(1, 2, 1).unwrap().color, BLUE);
}

#[test]
fn lone_block_shows_all_six_faces() {
    let mut grid = Grid::with_size(3, 3, 3);
    grid.set_block(1, 1, 1, None, Some(RED));
    assert_eq!(grid.get(1, 1, 1).unwrap().faces, FaceSet::ALL);
}

#[test]
fn adjacent_placement_hides_exactly_the_shared_faces() {
    for face in Face::ALL {
        let mut grid = Grid::with_size(5, 5, 5);
        grid.set_block(2, 2, 2, None, Some(RED));
        let (nx, ny, nz) = face.translate(2, 2, 2);
        grid.set_block(nx, ny, nz, None, Some(BLUE));

        let center = grid.get(2, 2, 2).unwrap();
        let neighbor = grid.get(nx, ny, nz).unwrap();
        assert!(!center.faces.contains(face), "{face:?}");
        assert_eq!(center.faces.len(), 5, "{face:?}");
        assert!(!neighbor.faces.contains(face.opposite()), "{face:?}");
        assert_eq!(neighbor.faces.len(), 5, "{face:?}");

        // removal restores the hidden face on the survivor
        grid.set_block(nx, ny, nz, None, None);
        assert_eq!(grid.get(2, 2, 2).unwrap().faces, FaceSet::ALL, "{face:?}");
    }
}

#[test]
fn visibility_recompute_is_idempotent() {
    let mut grid = Grid::with_size(3, 3, 3);
    grid.set_block(1, 1, 1, None, Some(RED));
    grid.set_block(1, 2, 1, None, Some(BLUE));
    let first = grid.visible_faces(1, 1, 1);
    let second = grid.visible_faces(1, 1, 1);
    assert_eq!(first, second);
    assert_eq!(grid.get(1, 1, 1).unwrap().faces, first);
}

#[test]
fn enclosed_block_has_no_visible_faces() {
    let mut grid = Grid::new();
    grid.load(&filled_volume(3, 3, 3, RED));
    assert_eq!(grid.get(1, 1, 1).unwrap().faces, FaceSet::EMPTY);
    // corner block: three faces at the world edge stay visible
    assert_eq!(grid.get(0, 0, 0).unwrap().faces.len(), 3);
}

#[test]
fn load_snapshot_round_trip_preserves_colors() {
    let mut volume = filled_volume(4, 3, 2, RED);
    volume[2][1][0] = Some(BLUE);
    volume[0][0][1] = None;
    volume[3][2][1] = None;

    let mut grid = Grid::new();
    grid.load(&volume);
    assert_eq!(grid.snapshot(), volume);
}

#[test]
fn load_with_empty_dimension_is_a_noop() {
    let mut grid = Grid::with_size(2, 2, 2);
    grid.set_block(0, 0, 0, None, Some(RED));

    grid.load(&Vec::new());
    grid.load(&vec![Vec::new()]);
    grid.load(&vec![vec![Vec::new()]]);
    assert_eq!((grid.width(), grid.depth(), grid.height()), (2, 2, 2));
    assert_eq!(grid.get(0, 0, 0).unwrap().color, RED);
}

#[test]
fn zero_leaf_means_empty() {
    let mut volume = filled_volume(2, 2, 2, RED);
    volume[0][0][0] = Some(Rgb(0));
    let mut grid = Grid::new();
    grid.load(&volume);
    assert!(grid.get(0, 0, 0).is_none());
}

#[test]
fn generate_builds_layered_floor() {
    let grid = Grid::generate(4, 4, 8);
    for y in 0..5 {
        assert!(grid.get(2, y, 2).is_some(), "layer {y}");
    }
    assert!(grid.get(2, 5, 2).is_none());
    // layers get distinct palette colors
    assert_ne!(grid.get(2, 0, 2).unwrap().color, grid.get(2, 4, 2).unwrap().color);

    let short = Grid::generate(2, 2, 3);
    assert!(short.get(0, 2, 0).is_some());
    assert_eq!(short.height(), 3);
}

#[test]
fn mutations_mark_touched_cells_dirty() {
    let mut grid = Grid::with_size(3, 3, 3);
    grid.set_block(1, 1, 1, None, Some(RED));
    let dirty = grid.take_dirty();
    assert!(dirty.contains(&(1, 1, 1)));
    assert!(grid.take_dirty().is_empty());

    // neighbor placement dirties both cells (shared faces changed)
    grid.set_block(1, 2, 1, None, Some(BLUE));
    let dirty = grid.take_dirty();
    assert!(dirty.contains(&(1, 2, 1)));
    assert!(dirty.contains(&(1, 1, 1)));
}

#[test]
fn volume_decodes_from_wire_json() {
    let volume: Volume = serde_json::from_str("[[[null, 16711680], [0, 255]]]").unwrap();
    assert_eq!(volume[0][0][1], Some(Rgb(0xff_00_00)));
    let mut grid = Grid::new();
    grid.load(&volume);
    assert_eq!((grid.width(), grid.depth(), grid.height()), (1, 2, 2));
    assert!(grid.get(0, 0, 0).is_none()); // null leaf
    assert!(grid.get(0, 0, 1).is_none()); // zero leaf
    assert_eq!(grid.get(0, 1, 1).unwrap().color, Rgb(0x00_00_ff));
}
