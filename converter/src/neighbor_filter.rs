use crate::note::Note;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct NeighborFilter {
    pub time_epsilon: f64,    // notes closer than this (in beats) are neighbors
    pub max_neighbors: usize, // more neighbors than this and the note is dropped
}

impl NeighborFilter {
    pub fn new(time_epsilon: f64, max_neighbors: usize) -> Self {
        NeighborFilter {
            time_epsilon,
            max_neighbors,
        }
    }

    /// Count the notes anywhere in `notes`, other than the one at `index`, within `time_epsilon` of it
    pub fn neighbor_count(&self, notes: &[Note], index: usize) -> usize {
        let note = &notes[index];
        notes
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != index && note.is_near(other, self.time_epsilon))
            .count()
    }

    /// Remove notes crowded by more than `max_neighbors` near-simultaneous notes.
    ///
    /// Lanes are ignored. Every count is taken against the full input before
    /// anything is removed.
    pub fn eliminate_neighbor_notes(&self, notes: &[Note]) -> Vec<Note> {
        let crowded: HashSet<usize> = (0..notes.len())
            .filter(|&i| self.neighbor_count(notes, i) > self.max_neighbors)
            .collect();

        log::debug!(
            "Neighbor pass marked {} of {} notes",
            crowded.len(),
            notes.len()
        );

        notes
            .iter()
            .enumerate()
            .filter(|(i, _)| !crowded.contains(i))
            .map(|(_, note)| note.clone())
            .collect()
    }
}
