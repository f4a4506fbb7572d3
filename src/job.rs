use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON description of a merge. Every field is optional; CLI arguments win.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct JobFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl JobFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let job: JobFile = serde_json::from_str(&contents)?;
        Ok(job)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Where `--write-job-file` writes when no file is named: next to the output, as `.json`.
pub fn default_job_file_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}
