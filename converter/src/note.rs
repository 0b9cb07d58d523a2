use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single note from a Beat Saber v2 chart (`_notes` entry)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Note {
    #[serde(rename = "_time")]
    pub time: f64,          // time in beats
    #[serde(rename = "_lineIndex")]
    pub line_index: i32,    // column, 0 = leftmost
    #[serde(rename = "_lineLayer")]
    pub line_layer: i32,    // row, 0 = bottom
    #[serde(rename = "_type")]
    pub note_type: i32,     // 0 = red, 1 = blue, 3 = bomb
    #[serde(rename = "_cutDirection")]
    pub cut_direction: i32, // 0 = up, 1 = down, ..., 8 = any
    /// Keys this tool does not interpret (e.g. `_customData`), written back as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(time: f64, line_index: i32, line_layer: i32, note_type: i32, cut_direction: i32) -> Self {
        Note {
            time,
            line_index,
            line_layer,
            note_type,
            cut_direction,
            extra: Map::new(),
        }
    }

    /// Whether two notes are closer in time than `epsilon` (strictly)
    pub fn is_near(&self, other: &Note, epsilon: f64) -> bool {
        (self.time - other.time).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_uses_beat_saber_keys() {
        let note = Note::new(1.5, 2, 0, 1, 8);
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(
            json,
            r#"{"_time":1.5,"_lineIndex":2,"_lineLayer":0,"_type":1,"_cutDirection":8}"#
        );
    }

    #[test]
    fn test_unknown_note_keys_survive() {
        let raw = r#"{"_time":4,"_lineIndex":1,"_lineLayer":2,"_type":0,"_cutDirection":3,"_customData":{"_color":[1,0,0]}}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.time, 4.0);
        assert!(note.extra.contains_key("_customData"));

        let back = serde_json::to_value(&note).unwrap();
        assert_eq!(back["_customData"]["_color"][0], 1);
    }

    #[test]
    fn test_is_near_is_strict() {
        let a = Note::new(1.0, 0, 0, 0, 0);
        let b = Note::new(1.25, 3, 0, 0, 0);
        assert!(a.is_near(&b, 0.3));
        assert!(!a.is_near(&b, 0.25));
        assert!(b.is_near(&a, 0.3));
    }
}
