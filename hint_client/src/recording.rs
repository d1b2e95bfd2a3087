use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use codenames::{HintRequest, HintResult, Team};
use serde::{Deserialize, Serialize};

use crate::dispatcher::HintOutcome;

/// Writes every exchange with the hint service into a directory, one JSON
/// file per request.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Stores the exchange and returns the path of the file it was written to.
    pub fn record(&mut self, outcome: &HintOutcome) -> anyhow::Result<PathBuf> {
        let (response, error) = match &outcome.outcome {
            Ok(result) => (Some(result.clone()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        let recording = HintRecording {
            token: outcome.token.0,
            team: outcome.team,
            elapsed_ms: outcome.elapsed.as_millis() as u64,
            request: outcome.request.clone(),
            response,
            error,
        };

        let filepath = self.directory.join(format!("hint_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct HintRecording {
    pub token: u64,
    pub team: Team,
    pub elapsed_ms: u64,
    pub request: HintRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub response: Option<HintResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub error: Option<String>,
}
