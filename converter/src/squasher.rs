use crate::note::Note;

/// Ragnarock reads every note as a single drum hit: one row, one color, one direction
pub const SQUASHED_LINE_LAYER: i32 = 1;
pub const SQUASHED_NOTE_TYPE: i32 = 0; // red
pub const SQUASHED_CUT_DIRECTION: i32 = 1; // down

#[derive(Clone, Debug, Default)]
pub struct Squasher;

impl Squasher {
    pub fn new() -> Self {
        Squasher
    }

    /// Collapse every note onto the canonical layer, color and direction.
    /// Time and lane are left alone; nothing is added or removed.
    pub fn squash_notes(&self, notes: &[Note]) -> Vec<Note> {
        notes
            .iter()
            .map(|note| Note {
                line_layer: SQUASHED_LINE_LAYER,
                note_type: SQUASHED_NOTE_TYPE,
                cut_direction: SQUASHED_CUT_DIRECTION,
                ..note.clone()
            })
            .collect()
    }

    pub fn is_squashed(note: &Note) -> bool {
        note.line_layer == SQUASHED_LINE_LAYER
            && note.note_type == SQUASHED_NOTE_TYPE
            && note.cut_direction == SQUASHED_CUT_DIRECTION
    }
}
