//! Season data loader
//!
//! Reads the season record and the pity cost table from RON or JSON files,
//! falling back to built-in defaults for anything missing or broken.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::DataError;
use crate::hyperchrome::PityCostTable;
use crate::progression::Season;

/// File stem of the season record
const SEASON_FILE: &str = "season";
/// File stem of the pity cost table
const PITY_FILE: &str = "pity";

/// Everything the calculators need from outside
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonData {
    /// Active season and its curve constants
    pub season: Season,
    /// Hyperchrome robbery costs
    pub pity: PityCostTable,
}

impl SeasonData {
    /// Load from the user's data directory, or use defaults
    pub fn new() -> Self {
        Self::load_from_dir(&data_directory())
    }

    /// Load both files from `dir`, each falling back to its default on its own
    pub fn load_from_dir(dir: &Path) -> Self {
        let season = load_or_default(dir, SEASON_FILE, Season::validate);
        let pity = load_or_default(dir, PITY_FILE, PityCostTable::validate);

        Self { season, pity }
    }

    /// Load a season record from an explicit file, e.g. a saved API response.
    ///
    /// Unlike [`SeasonData::load_from_dir`] this fails loudly, since the user
    /// asked for this file by name.
    pub fn from_season_file(path: &Path) -> Result<Self, DataError> {
        let season: Season = read_record(path)?;
        season.validate()?;
        log::info!("Loaded season {} from {:?}", season.number, path);

        Ok(Self {
            season,
            pity: PityCostTable::default(),
        })
    }

    /// Load from a file or a directory, whichever `path` is
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        if path.is_dir() {
            Ok(Self::load_from_dir(path))
        } else {
            Self::from_season_file(path)
        }
    }
}

/// Get the data directory path
pub fn data_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "seasoncalc", "SeasonCalc") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from("./data")
    }
}

/// Deserialize one record, picking the format from the file extension
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let format = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);

    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format.as_deref() {
        Some("ron") => ron::from_str(&content).map_err(|source| DataError::Ron {
            path: path.to_path_buf(),
            source,
        }),
        Some("json") => serde_json::from_str(&content).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(DataError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Find `<stem>.ron` or `<stem>.json` in `dir`, preferring RON
fn find_record(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["ron", "json"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.exists())
}

fn load_or_default<T, V>(dir: &Path, stem: &str, validate: V) -> T
where
    T: DeserializeOwned + Default,
    V: Fn(&T) -> Result<(), DataError>,
{
    let Some(path) = find_record(dir, stem) else {
        log::info!("No {} data in {:?}, using defaults", stem, dir);
        return T::default();
    };

    match read_record(&path).and_then(|record: T| validate(&record).map(|_| record)) {
        Ok(record) => {
            log::info!("Loaded {} data from {:?}", stem, path);
            record
        }
        Err(e) => {
            log::warn!("Failed to load {:?}: {}. Using defaults.", path, e);
            T::default()
        }
    }
}

/// Export the default season and pity table as RON files for editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let defaults = SeasonData::default();
    let pretty = ron::ser::PrettyConfig::default();

    let season_ron = ron::ser::to_string_pretty(&defaults.season, pretty.clone())
        .map_err(|source| DataError::Serialize { what: "season", source })?;
    write_file(&dir.join(format!("{}.ron", SEASON_FILE)), &season_ron)?;

    let pity_ron = ron::ser::to_string_pretty(&defaults.pity, pretty)
        .map_err(|source| DataError::Serialize { what: "pity table", source })?;
    write_file(&dir.join(format!("{}.ron", PITY_FILE)), &pity_ron)?;

    log::info!("Exported default data to {:?}", dir);
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), DataError> {
    fs::write(path, content).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperchrome::HyperchromeLevel;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("seasoncalc-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let dir = scratch_dir("missing");
        let data = SeasonData::load_from_dir(&dir);
        assert_eq!(data, SeasonData::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let result = export_default_data(&dir);
        assert!(result.is_ok(), "Failed to export default data: {:?}", result.err());

        assert!(dir.join("season.ron").exists(), "season.ron not created");
        assert!(dir.join("pity.ron").exists(), "pity.ron not created");

        let data = SeasonData::load_from_dir(&dir);
        assert_eq!(data, SeasonData::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_api_json() {
        let dir = scratch_dir("json");
        let json = r#"{
            "number": 24,
            "title": "Season 24",
            "startTime": 1700000000,
            "endTime": 1702592000,
            "rates": {
                "maxDailyXp": 2000,
                "maxDailyXpWithPass": 3000,
                "avgXpPerContract": 500,
                "contractsPerDay": 3,
                "totalDays": 30,
                "efficiency": 0.8,
                "curveK": 1.05,
                "targetLevel": 10
            }
        }"#;
        fs::write(dir.join("season.json"), json).unwrap();
        fs::write(
            dir.join("pity.ron"),
            "(base_costs: (50, 75, 100, 125, 150), private_server_multiplier: 1.5)",
        )
        .unwrap();

        let data = SeasonData::load_from_dir(&dir);
        assert_eq!(data.season.number, 24);
        assert_eq!(data.season.rates.max_daily_xp, 2000.0);
        assert_eq!(data.pity.base_cost(HyperchromeLevel::Level0), 50);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = scratch_dir("invalid");
        fs::write(dir.join("pity.ron"), "(base_costs: (90, 10, 100, 125, 150), private_server_multiplier: 1.5)")
            .unwrap();
        fs::write(dir.join("season.ron"), "this is not ron").unwrap();

        let data = SeasonData::load_from_dir(&dir);
        assert_eq!(data, SeasonData::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_file_errors_are_reported() {
        let dir = scratch_dir("explicit");

        let missing = SeasonData::from_season_file(&dir.join("nope.json"));
        assert!(matches!(missing, Err(DataError::Io { .. })));

        let yaml = dir.join("season.yaml");
        fs::write(&yaml, "number: 1").unwrap();
        assert!(matches!(SeasonData::from_season_file(&yaml), Err(DataError::UnsupportedFormat(_))));

        let broken = dir.join("season.json");
        fs::write(&broken, "{").unwrap();
        assert!(matches!(SeasonData::from_path(&broken), Err(DataError::Json { .. })));

        let _ = fs::remove_dir_all(&dir);
    }
}
