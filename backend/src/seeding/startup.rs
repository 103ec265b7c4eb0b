//! Demo data seeding orchestration for the seed binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use demo_data::{DatasetError, DemoDataset};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::{DemoDataSeeder, SeedSummary, SeedingError};
use crate::seeding::config::DemoDataSettings;

/// Errors returned while executing a seed run.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Dataset file could not be read.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset parsing failed.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    /// A record was rejected or the store failed.
    #[error("demo data seeding error: {0}")]
    Seeding(#[from] SeedingError),
}

/// Load the configured dataset, falling back to the built-in one.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the file cannot be read or parsed.
pub fn load_dataset(settings: &DemoDataSettings) -> Result<DemoDataset, StartupSeedingError> {
    match settings.dataset_path.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "loading demo dataset from file");
            let contents = read_dataset(path)?;
            Ok(DemoDataset::from_json(&contents)?)
        }
        None => {
            info!("loading built-in demo dataset");
            Ok(DemoDataset::builtin()?)
        }
    }
}

/// Reset `store` to the configured demo dataset.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use linkboard::outbound::persistence::InMemoryStore;
/// use linkboard::seeding::{DemoDataSettings, seed_demo_data};
/// use mockable::DefaultClock;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = DemoDataSettings {
///     dataset_path: None,
///     json_logs: false,
/// };
/// let summary =
///     seed_demo_data(&settings, Arc::new(InMemoryStore::new()), Arc::new(DefaultClock)).await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the dataset cannot be loaded or a
/// record is rejected.
pub async fn seed_demo_data<S>(
    settings: &DemoDataSettings,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
) -> Result<SeedSummary, StartupSeedingError>
where
    S: UserRepository + PostRepository + CommentRepository,
{
    let dataset = load_dataset(settings)?;
    let seeder = DemoDataSeeder::new(Arc::clone(&store), Arc::clone(&store), store, clock);
    let summary = seeder.seed(&dataset).await?;
    info!(
        users = summary.users,
        posts = summary.posts,
        comments = summary.comments,
        "demo data seed run finished"
    );
    Ok(summary)
}

fn read_dataset(path: &Path) -> Result<String, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::DatasetRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "dataset path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}

#[cfg(test)]
mod tests {
    //! Unit tests for dataset loading.

    use super::*;
    use crate::test_support::cap_fs::write_file;
    use rstest::rstest;

    fn settings_for(path: Option<PathBuf>) -> DemoDataSettings {
        DemoDataSettings {
            dataset_path: path,
            json_logs: false,
        }
    }

    #[rstest]
    fn builtin_dataset_is_used_without_path() {
        let dataset = load_dataset(&settings_for(None)).expect("built-in dataset");
        assert_eq!(dataset.users().len(), 3);
    }

    #[rstest]
    fn dataset_file_is_read_through_cap_std() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("dataset.json");
        write_file(
            &path,
            br#"{"version": 1, "users": [{"username": "ada_l", "email": "ada@example.com"}]}"#,
        )
        .expect("write dataset");

        let dataset = load_dataset(&settings_for(Some(path))).expect("dataset loads");
        assert_eq!(dataset.users().len(), 1);
        assert!(dataset.posts().is_empty());
    }

    #[rstest]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let error = load_dataset(&settings_for(Some(path.clone()))).expect_err("missing file");
        assert!(matches!(
            error,
            StartupSeedingError::DatasetRead { path: ref reported, .. } if *reported == path
        ));
    }

    #[rstest]
    fn malformed_file_reports_dataset_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        write_file(&path, b"{ not json").expect("write dataset");

        let error = load_dataset(&settings_for(Some(path))).expect_err("parse failure");
        assert!(matches!(
            error,
            StartupSeedingError::Dataset(DatasetError::ParseError { .. })
        ));
    }
}
