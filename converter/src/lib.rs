pub mod chart;
pub mod error;
pub mod info;
pub mod neighbor_filter;
pub mod note;
pub mod squasher;
pub mod stack_filter;
pub mod store;

use chart::{load_chart, save_chart};
use error::{ConvertError, Result};
use info::{load_info, save_info, DifficultyChart, EditorStamp};
use neighbor_filter::NeighborFilter;
use note::Note;
use squasher::Squasher;
use stack_filter::StackFilter;
use std::path::{Path, PathBuf};

pub const DEFAULT_TIME_EPSILON: f64 = 0.16;
pub const DEFAULT_LOOKAHEAD: usize = 3;
pub const DEFAULT_MAX_NEIGHBORS: usize = 1;

/// Main converter configuration
#[derive(Clone, Debug)]
pub struct ConverterConfig {
    pub time_epsilon: f64,    // beats; notes closer than this are "too close"
    pub lookahead: usize,     // notes checked after each note for stacking
    pub max_neighbors: usize, // near-simultaneous notes tolerated per note
    pub level_author: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            time_epsilon: DEFAULT_TIME_EPSILON,
            lookahead: DEFAULT_LOOKAHEAD,
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            level_author: info::DEFAULT_LEVEL_AUTHOR.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.time_epsilon.is_finite() || self.time_epsilon <= 0.0 {
            return Err(ConvertError::InvalidConfig {
                reason: format!(
                    "time epsilon must be a positive number, got {}",
                    self.time_epsilon
                ),
            });
        }
        Ok(())
    }
}

/// Note counts for one converted chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartReport {
    pub path: PathBuf,
    pub original_notes: usize,
    pub after_stacked: usize,
    pub final_notes: usize,
}

#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub converted: Vec<ChartReport>,
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl ConversionSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the note pipeline over charts and manifests
pub struct Converter {
    config: ConverterConfig,
    stack_filter: StackFilter,
    squasher: Squasher,
    neighbor_filter: NeighborFilter,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Converter {
            stack_filter: StackFilter::new(config.time_epsilon, config.lookahead),
            squasher: Squasher::new(),
            neighbor_filter: NeighborFilter::new(config.time_epsilon, config.max_neighbors),
            config,
        })
    }

    /// Stacked-note elimination, then squashing, then neighbor elimination
    pub fn convert_notes(&self, notes: &[Note]) -> Vec<Note> {
        self.convert_notes_with_report(notes).0
    }

    fn convert_notes_with_report(&self, notes: &[Note]) -> (Vec<Note>, usize) {
        log::debug!("Initial note count: {}", notes.len());
        let unstacked = self.stack_filter.eliminate_stacked_notes(notes);
        log::debug!("Note count after stacked elimination: {}", unstacked.len());

        let squashed = self.squasher.squash_notes(&unstacked);

        let result = self.neighbor_filter.eliminate_neighbor_notes(&squashed);
        log::debug!("Note count after neighbor elimination: {}", result.len());

        (result, unstacked.len())
    }

    /// Convert a single difficulty file in place
    pub fn process_chart(&self, path: &Path) -> Result<ChartReport> {
        let mut chart = load_chart(path)?;
        let original_notes = chart.notes.len();

        let (notes, after_stacked) = self.convert_notes_with_report(&chart.notes);
        chart.notes = notes;
        save_chart(path, &chart)?;

        log::info!(
            "{} converted to Ragnarock ({} -> {} notes)",
            path.display(),
            original_notes,
            chart.notes.len()
        );

        Ok(ChartReport {
            path: path.to_path_buf(),
            original_notes,
            after_stacked,
            final_notes: chart.notes.len(),
        })
    }

    /// Convert every listed chart; a failing chart is logged and skipped
    pub fn process_all_charts(&self, charts: &[DifficultyChart]) -> ConversionSummary {
        let mut summary = ConversionSummary::default();

        for chart in charts {
            log::info!(
                "Processing {} {} chart {}",
                chart.characteristic,
                chart.difficulty,
                chart.path.display()
            );
            match self.process_chart(&chart.path) {
                Ok(report) => summary.converted.push(report),
                Err(e) => {
                    log::error!("Failed to process file \"{}\": {}", chart.path.display(), e);
                    summary.failed.push((chart.path.clone(), e));
                }
            }
        }

        summary
    }

    /// Convert every difficulty listed in an `Info.dat`, then stamp and save the manifest
    pub fn process_info_file(&self, info_path: &Path) -> Result<ConversionSummary> {
        let mut info = load_info(info_path)?;
        if let Some(name) = info.song_name() {
            log::info!("Converting \"{}\"", name);
        }

        let charts = info.difficulty_charts()?;
        let summary = self.process_all_charts(&charts);

        let stamp = EditorStamp {
            level_author: self.config.level_author.clone(),
            ..EditorStamp::default()
        };
        info.stamp_editor(&stamp);
        save_info(info_path, &info)?;

        Ok(summary)
    }
}
