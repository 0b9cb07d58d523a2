use crate::note::Note;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct StackFilter {
    pub time_epsilon: f64, // notes closer than this (in beats) count as stacked
    pub lookahead: usize,  // how many following notes each note is compared against
}

impl StackFilter {
    pub fn new(time_epsilon: f64, lookahead: usize) -> Self {
        StackFilter {
            time_epsilon,
            lookahead,
        }
    }

    /// Remove notes that have a later note in the same lane within `time_epsilon`.
    ///
    /// Only the next `lookahead` notes are checked, and only forwards, so of two
    /// stacked notes the earlier one is dropped and the later one is kept.
    pub fn eliminate_stacked_notes(&self, notes: &[Note]) -> Vec<Note> {
        let stacked: HashSet<usize> = notes
            .iter()
            .enumerate()
            .filter(|&(i, note)| {
                notes.iter().skip(i + 1).take(self.lookahead).any(|next| {
                    next.line_index == note.line_index && note.is_near(next, self.time_epsilon)
                })
            })
            .map(|(i, _)| i)
            .collect();

        log::debug!(
            "Stacked-note pass marked {} of {} notes",
            stacked.len(),
            notes.len()
        );

        notes
            .iter()
            .enumerate()
            .filter(|(i, _)| !stacked.contains(i))
            .map(|(_, note)| note.clone())
            .collect()
    }
}
