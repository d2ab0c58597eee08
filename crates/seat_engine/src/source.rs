//! Where coach charts come from.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use shared::domain::{ClassPreference, CoachChart};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ChartSourceError {
    #[error("invalid train number '{0}'")]
    InvalidTrainNumber(String),
    #[error("failed to read chart '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Returns the charts of every coach of `train_no` admitted by `class`,
    /// in coach order. An unknown train yields an empty list.
    async fn coach_charts(
        &self,
        train_no: &str,
        class: ClassPreference,
    ) -> Result<Vec<CoachChart>, ChartSourceError>;
}

/// Reads `coachComposition` captures laid out as
/// `{root}/{train_no}/{coach_label}.json`.
#[derive(Debug, Clone)]
pub struct CapturedChartSource {
    root: PathBuf,
}

impl CapturedChartSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn coach_files(&self, train_dir: &Path) -> Result<Vec<(String, PathBuf)>, ChartSourceError> {
        let mut entries = match tokio::fs::read_dir(train_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ChartSourceError::Io {
                    path: train_dir.to_path_buf(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|source| ChartSourceError::Io {
                path: train_dir.to_path_buf(),
                source,
            })?;
            let Some(entry) = entry else {
                break;
            };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            files.push((label.to_string(), path));
        }
        files.sort_by(|a, b| coach_order_key(&a.0).cmp(&coach_order_key(&b.0)));
        Ok(files)
    }
}

#[async_trait]
impl ChartSource for CapturedChartSource {
    async fn coach_charts(
        &self,
        train_no: &str,
        class: ClassPreference,
    ) -> Result<Vec<CoachChart>, ChartSourceError> {
        let train_no = train_no.trim();
        if !is_plain_train_number(train_no) {
            return Err(ChartSourceError::InvalidTrainNumber(train_no.to_string()));
        }

        let train_dir = self.root.join(train_no);
        let files = self.coach_files(&train_dir).await?;
        let mut charts = Vec::new();
        for (label, path) in files {
            if !class.admits_coach(&label) {
                debug!(%label, %class, "skipping coach outside class filter");
                continue;
            }

            let raw = tokio::fs::read(&path)
                .await
                .map_err(|source| ChartSourceError::Io {
                    path: path.clone(),
                    source,
                })?;
            match serde_json::from_slice::<CoachChart>(&raw) {
                Ok(mut chart) => {
                    chart.scraped_coach_name = Some(label);
                    charts.push(chart);
                }
                Err(source) => {
                    warn!(path = %path.display(), %source, "skipping malformed coach chart");
                }
            }
        }

        info!(%train_no, %class, coaches = charts.len(), "loaded coach charts");
        Ok(charts)
    }
}

/// Natural coach order: letter prefix first, then the coach number, so `S2`
/// sorts before `S10`.
fn coach_order_key(label: &str) -> (&str, Option<u64>, &str) {
    let split = label.find(|c: char| c.is_ascii_digit()).unwrap_or(label.len());
    let (prefix, rest) = label.split_at(split);
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    (prefix, rest[..digits].parse().ok(), rest)
}

fn is_plain_train_number(train_no: &str) -> bool {
    !train_no.is_empty()
        && train_no
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
