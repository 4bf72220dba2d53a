use tui_arcade::core::{decode, DecodeError, DecodedCell, FrameView};
use tui_arcade::types::{CellKind, GridSize};

#[test]
fn decoder_index_five_of_four_by_three_is_col1_row1() {
    let bytes = [0u8; 12];
    let view = FrameView::from_parts(GridSize::new(4, 3), &bytes, 0).unwrap();
    let cell = view.cells().nth(5).unwrap().unwrap();
    assert_eq!((cell.col, cell.row), (1, 1));
}

#[test]
fn decoder_maps_every_known_byte() {
    let kinds: Vec<_> = decode(&[0, 1, 2, 3, 4], 5)
        .map(|c| c.unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            CellKind::Empty,
            CellKind::Obstacle,
            CellKind::BodyPrimary,
            CellKind::BodySecondary,
            CellKind::Target,
        ]
    );
}

#[test]
fn decoder_is_a_pure_function_of_its_input() {
    let bytes = [1, 0, 2, 9, 3, 4, 0, 1, 4];
    let view = FrameView::from_parts(GridSize::new(3, 3), &bytes, 0).unwrap();
    let first: Vec<_> = view.cells().collect();
    let second: Vec<_> = view.cells().collect();
    assert_eq!(first, second);
}

#[test]
fn decoder_flags_unknown_byte_and_keeps_going() {
    let out: Vec<_> = decode(&[4, 9, 0, 1], 2).collect();
    assert_eq!(out.len(), 4);
    assert_eq!(
        out[0],
        Ok(DecodedCell {
            col: 0,
            row: 0,
            kind: CellKind::Target
        })
    );
    assert_eq!(
        out[1],
        Err(DecodeError {
            index: 1,
            col: 1,
            row: 0,
            byte: 9
        })
    );
    assert_eq!(
        out[3],
        Ok(DecodedCell {
            col: 1,
            row: 1,
            kind: CellKind::Obstacle
        })
    );
}

#[test]
fn decode_error_message_names_the_cell() {
    let err = decode(&[7], 1).next().unwrap().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown cell byte 7 at index 0 (col 0, row 0)"
    );
}
