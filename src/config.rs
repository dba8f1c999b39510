use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use home::home_dir;
use ruxtab::{find_preset, RuxError, TuningTable};
use serde::{Deserialize, Serialize};

/// Open string of a user defined tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningString {
    pub label: String,
    pub pitch: i32,
}

/// User defined tuning, strings listed from low to high
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTuning {
    pub name: String,
    pub strings: Vec<TuningString>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    tuning: Option<String>,
    ticks_per_beat: Option<u32>,
    tempo: Option<u32>,
    output_folder: Option<PathBuf>,
    #[serde(default)]
    custom_tunings: Vec<CustomTuning>,
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".ruxtab";

    pub fn get_tuning(&self) -> Option<&str> {
        self.tuning.as_deref()
    }

    pub const fn get_ticks_per_beat(&self) -> Option<u32> {
        self.ticks_per_beat
    }

    pub const fn get_tempo(&self) -> Option<u32> {
        self.tempo
    }

    pub fn get_output_folder(&self) -> Option<PathBuf> {
        self.output_folder.clone()
    }

    pub fn custom_tunings(&self) -> &[CustomTuning] {
        &self.custom_tunings
    }

    /// Custom tunings shadow the built-in presets of the same name
    pub fn resolve_tuning(&self, name: &str) -> Result<TuningTable, RuxError> {
        if let Some(custom) = self
            .custom_tunings
            .iter()
            .find(|tuning| tuning.name.eq_ignore_ascii_case(name))
        {
            log::debug!("Using custom tuning {}", custom.name);
            let entries = custom
                .strings
                .iter()
                .map(|string| (string.label.as_str(), string.pitch));
            return Ok(TuningTable::from_entries(entries));
        }
        find_preset(name)
            .map(|preset| TuningTable::from_preset(&preset))
            .ok_or_else(|| RuxError::ConfigError(format!("Unknown tuning '{name}'")))
    }

    fn get_base_path() -> Result<PathBuf, RuxError> {
        let home = home_dir()
            .ok_or_else(|| RuxError::ConfigError("Could not find home directory".to_string()))?;
        let path = home.join(Self::FOLDER);
        Ok(path)
    }

    fn get_path() -> Result<PathBuf, RuxError> {
        let base = Self::get_base_path()?;
        Ok(base.join("config.json"))
    }

    /// Creates config if it does not exist
    pub fn read_config() -> Result<Self, RuxError> {
        let base_path = Self::get_base_path()?;
        if !base_path.exists() {
            create_dir_all(base_path)?;
        }
        let config_path = Self::get_path()?;
        if !config_path.exists() {
            // create empty config
            Config::default().save_to(&config_path)?;
        }
        Self::read_from(&config_path)
    }

    fn read_from(config_path: &Path) -> Result<Self, RuxError> {
        let file = File::open(config_path)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|err| {
            RuxError::ConfigError(format!("Could not read local configuration {err:}"))
        })?;
        Ok(config)
    }

    /// Assumes the config folder exists
    fn save_to(&self, config_path: &Path) -> Result<(), RuxError> {
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            RuxError::ConfigError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.get_tuning(), None);
        assert!(config.custom_tunings().is_empty());
    }

    #[test]
    fn test_resolve_preset_and_custom_tuning() {
        let json = r#"{
            "tuning": "open-g",
            "ticks_per_beat": 960,
            "custom_tunings": [
                { "name": "open-g", "strings": [
                    { "label": "D", "pitch": 38 },
                    { "label": "g", "pitch": 67 }
                ] }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.get_tuning(), Some("open-g"));
        assert_eq!(config.get_ticks_per_beat(), Some(960));
        assert_eq!(config.get_tempo(), None);

        let open_g = config.resolve_tuning("Open-G").unwrap();
        assert_eq!(open_g.resolve("g", 2), 69);
        let standard = config.resolve_tuning("standard").unwrap();
        assert_eq!(standard.resolve("e", 3), 67);
        assert!(matches!(
            config.resolve_tuning("banjo"),
            Err(RuxError::ConfigError(_))
        ));
    }

    #[test]
    fn test_save_and_read_back() {
        let path = std::env::temp_dir().join(format!("ruxtab-config-{}.json", std::process::id()));
        let config: Config = serde_json::from_str(r#"{ "tempo": 90 }"#).unwrap();
        config.save_to(&path).unwrap();
        let read = Config::read_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, config);
        assert_eq!(read.get_tempo(), Some(90));
    }
}
