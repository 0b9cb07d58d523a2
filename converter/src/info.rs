use crate::error::{ConvertError, Result};
use crate::store;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

pub const TOOL_NAME: &str = "BeatSaber2Ragnarock";
pub const DEFAULT_LEVEL_AUTHOR: &str = "drumnation";

#[derive(Deserialize, Debug, Clone)]
pub struct DifficultyBeatmapSet {
    #[serde(rename = "_beatmapCharacteristicName", default)]
    pub characteristic: String,
    #[serde(rename = "_difficultyBeatmaps")]
    pub beatmaps: Vec<DifficultyBeatmap>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DifficultyBeatmap {
    #[serde(rename = "_difficulty", default)]
    pub difficulty: String,
    #[serde(rename = "_beatmapFilename")]
    pub filename: String,
}

/// One difficulty file listed in the manifest, resolved against its directory
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyChart {
    pub characteristic: String,
    pub difficulty: String,
    pub path: PathBuf,
}

/// Attribution written into the manifest after conversion
#[derive(Clone, Debug)]
pub struct EditorStamp {
    pub name: String,
    pub version: String,
    pub source: String,
    pub level_author: String,
}

impl Default for EditorStamp {
    fn default() -> Self {
        EditorStamp {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            source: env!("CARGO_PKG_REPOSITORY").to_string(),
            level_author: DEFAULT_LEVEL_AUTHOR.to_string(),
        }
    }
}

/// A song's `Info.dat` manifest
#[derive(Debug, Clone)]
pub struct Info {
    pub path: PathBuf,
    fields: Map<String, Value>,
}

impl Info {
    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Info {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ConvertError::schema(path, "manifest must be a JSON object")),
        }
    }

    /// Directory the difficulty files are resolved against
    pub fn chart_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn song_name(&self) -> Option<&str> {
        self.fields.get("_songName").and_then(Value::as_str)
    }

    pub fn difficulty_beatmap_sets(&self) -> Result<Vec<DifficultyBeatmapSet>> {
        let sets = self
            .fields
            .get("_difficultyBeatmapSets")
            .cloned()
            .ok_or_else(|| ConvertError::schema(&self.path, "missing `_difficultyBeatmapSets`"))?;

        serde_json::from_value(sets).map_err(|e| {
            ConvertError::schema(&self.path, format!("malformed `_difficultyBeatmapSets`: {}", e))
        })
    }

    /// Every difficulty chart, in manifest order
    pub fn difficulty_charts(&self) -> Result<Vec<DifficultyChart>> {
        let dir = self.chart_dir();
        Ok(self
            .difficulty_beatmap_sets()?
            .into_iter()
            .flat_map(|set| {
                let characteristic = set.characteristic;
                set.beatmaps.into_iter().map(move |beatmap| DifficultyChart {
                    characteristic: characteristic.clone(),
                    difficulty: beatmap.difficulty,
                    path: dir.join(&beatmap.filename),
                })
            })
            .collect())
    }

    /// Record this tool as the last editor and set the level author
    pub fn stamp_editor(&mut self, stamp: &EditorStamp) {
        let custom_data = object_entry(&mut self.fields, "_customData");
        let editors = object_entry(custom_data, "_editors");

        editors.insert(
            stamp.name.clone(),
            json!({
                "version": stamp.version,
                "source": stamp.source,
            }),
        );
        editors.insert("_lastEditedBy".to_string(), json!(stamp.name));

        self.fields
            .insert("_levelAuthorName".to_string(), json!(stamp.level_author));

        log::info!(
            "Stamped {} v{} as last editor of {}",
            stamp.name,
            stamp.version,
            self.path.display()
        );
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Pretty JSON with four-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// Get `map[key]` as an object, replacing it with `{}` when absent or not an object
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(inner) => inner,
        _ => unreachable!("entry was just made an object"),
    }
}

pub fn load_info(path: &Path) -> Result<Info> {
    log::debug!("Loading manifest {}", path.display());
    let value = store::read_json(path)?;
    Info::from_value(path, value)
}

pub fn save_info(path: &Path, info: &Info) -> Result<()> {
    log::debug!("Saving manifest {}", path.display());
    let content = info
        .to_pretty_json()
        .map_err(|e| ConvertError::serialize(path, e))?;
    store::write_atomic(path, &content)
}
