//! Batch front end for the decision analyzer.
//!
//! Finds the perception files written by the vision stage in an input directory, analyses
//! each one and writes a text report per file into the output directory. A failing file is
//! logged and skipped.

// Dependencies
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::perception::PerceptionResult;
use crate::RovConfig;
use crate::analysis::{AnalysisResult, DecisionAnalyzer, FileSink};

const INPUT_SUFFIX: &str = "_analysis.json";
const REPORT_SUFFIX: &str = "_report.txt";

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files analysed and reported
    pub processed: usize,
    /// Files that could not be read, parsed or reported
    pub failed: usize,
}

/// Analyses every perception file of a directory with one shared analyzer, so the
/// analyzer's decision history covers the whole batch.
pub struct AnalysisSystem {
    input_dir: PathBuf,
    output_dir: PathBuf,
    analyzer: DecisionAnalyzer,
}

impl AnalysisSystem {
    /// Creates the system with default thresholds; the output directory is created if missing
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> crate::Result<Self> {
        Self::with_config(input_dir, output_dir, &RovConfig::default())
    }

    /// Like [`AnalysisSystem::new`], with thresholds taken from `config`
    pub fn with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        input_dir: P,
        output_dir: Q,
        config: &RovConfig,
    ) -> crate::Result<Self> {
        fs::create_dir_all(output_dir.as_ref())?;
        info!(
            "System started: {} -> {}",
            input_dir.as_ref().display(),
            output_dir.as_ref().display()
        );

        Ok(AnalysisSystem {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            analyzer: DecisionAnalyzer::with_config(config.analysis.clone()),
        })
    }

    /// Lists `*_analysis.json` files in the input directory, sorted by path
    pub fn find_inputs(&self) -> crate::Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(&self.input_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(INPUT_SUFFIX));
            if path.is_file() && matches {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    /// Path of the report written for `input`
    pub fn report_path_for(&self, input: &Path) -> PathBuf {
        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("run");
        let name = file_name
            .strip_suffix(INPUT_SUFFIX)
            .or_else(|| input.file_stem().and_then(|s| s.to_str()))
            .unwrap_or(file_name);
        self.output_dir.join(format!("{}{}", name, REPORT_SUFFIX))
    }

    /// Analyses one perception file and writes its report
    pub fn analyze_file(&mut self, input: &Path) -> crate::Result<AnalysisResult> {
        info!("Analyzing: {}", input.display());
        let perception = PerceptionResult::load(input)?;
        let result = self.analyzer.analyze_decision_patterns(&perception);

        let mut sink = FileSink::new(self.report_path_for(input));
        self.analyzer.generate_decision_report(&result, &mut sink)?;
        info!("Report saved to {}", sink.path().display());
        Ok(result)
    }

    /// Analyses every input file, continuing past failures
    pub fn analyze_all(&mut self) -> crate::Result<BatchSummary> {
        let inputs = self.find_inputs()?;
        info!("Found {} perception files", inputs.len());

        let mut summary = BatchSummary::default();
        for input in &inputs {
            match self.analyze_file(input) {
                Ok(_) => {
                    summary.processed += 1;
                    info!("Done: {}", input.display());
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Failed to analyse {}: {}", input.display(), e);
                }
            }
        }
        Ok(summary)
    }

    /// The shared analyzer, including its accumulated history
    pub fn analyzer(&self) -> &DecisionAnalyzer {
        &self.analyzer
    }
}

// Weaknesses:
// - Files are processed sequentially with a single analyzer.
// - Only the text report is written; the analysis result itself is not persisted.

// Current Functionality:
// - Discovers perception files and derives report names from them.
// - Runs the decision analyzer per file and writes one report each.
// - Logs and counts failures without aborting the batch.
