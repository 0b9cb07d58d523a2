use proptest::prelude::*;
use ragnarock_converter::{
    neighbor_filter::NeighborFilter, note::Note, squasher::Squasher, stack_filter::StackFilter,
    Converter, ConverterConfig,
};

const EPSILON: f64 = 0.16;

fn arb_note() -> impl Strategy<Value = Note> {
    (0u32..400, 0i32..4, 0i32..3, 0i32..2, 0i32..9).prop_map(|(tick, lane, layer, color, dir)| {
        Note::new(f64::from(tick) / 20.0, lane, layer, color, dir)
    })
}

fn arb_chart() -> impl Strategy<Value = Vec<Note>> {
    prop::collection::vec(arb_note(), 0..64).prop_map(|mut notes| {
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        notes
    })
}

/// Whether `sub` can be obtained from `full` by deleting elements
fn is_subsequence(sub: &[Note], full: &[Note]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|candidate| candidate == wanted))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn squashing_is_idempotent_and_total(notes in arb_chart()) {
        let squasher = Squasher::new();
        let once = squasher.squash_notes(&notes);
        let twice = squasher.squash_notes(&once);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), notes.len());
        prop_assert!(once.iter().all(Squasher::is_squashed));
        for (before, after) in notes.iter().zip(&once) {
            prop_assert_eq!(before.time, after.time);
            prop_assert_eq!(before.line_index, after.line_index);
        }
    }

    #[test]
    fn stacked_elimination_keeps_an_ordered_subsequence(notes in arb_chart()) {
        let result = StackFilter::new(EPSILON, 3).eliminate_stacked_notes(&notes);

        prop_assert!(result.len() <= notes.len());
        prop_assert!(is_subsequence(&result, &notes));
    }

    #[test]
    fn survivors_of_neighbor_pass_had_at_most_one_neighbor(notes in arb_chart()) {
        let filter = NeighborFilter::new(EPSILON, 1);
        let result = filter.eliminate_neighbor_notes(&notes);

        let expected: Vec<Note> = (0..notes.len())
            .filter(|&i| filter.neighbor_count(&notes, i) <= 1)
            .map(|i| notes[i].clone())
            .collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn squashing_commutes_with_both_filters(notes in arb_chart()) {
        let stack = StackFilter::new(EPSILON, 3);
        let squash = Squasher::new();
        let neighbors = NeighborFilter::new(EPSILON, 1);

        let pipeline = Converter::new(ConverterConfig::default())
            .expect("default config is valid")
            .convert_notes(&notes);
        let squash_last = squash.squash_notes(
            &neighbors.eliminate_neighbor_notes(&stack.eliminate_stacked_notes(&notes)),
        );

        prop_assert_eq!(pipeline, squash_last);
    }
}

#[test]
fn earlier_of_two_stacked_notes_is_removed() {
    let notes = vec![Note::new(6.0, 2, 0, 1, 4), Note::new(6.1, 2, 2, 0, 7)];

    let result = StackFilter::new(EPSILON, 3).eliminate_stacked_notes(&notes);
    assert_eq!(result, vec![notes[1].clone()]);
}

#[test]
fn cluster_threshold_is_more_than_one() {
    let filter = NeighborFilter::new(EPSILON, 1);

    let pair = vec![Note::new(1.0, 0, 1, 0, 1), Note::new(1.1, 3, 1, 0, 1)];
    assert_eq!(filter.eliminate_neighbor_notes(&pair), pair);

    let trio = vec![
        Note::new(1.0, 0, 1, 0, 1),
        Note::new(1.05, 1, 1, 0, 1),
        Note::new(1.1, 3, 1, 0, 1),
    ];
    assert!(filter.eliminate_neighbor_notes(&trio).is_empty());
}
