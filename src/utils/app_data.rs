use super::config_file::{
    ConfigFile, DEFAULT_CONFIG, SECTION_EXCL_DIRECTORIES, SECTION_EXCL_EXTENSIONS,
    SECTION_FILE_MATCH_BACKGROUND, SECTION_FILE_MATCH_FOREGROUND, SECTION_LIMIT_LINE_LENGTH,
    SECTION_MATCH_BACKGROUND, SECTION_MATCH_FOREGROUND, SECTION_MIN_WORD_LENGTH,
};
use anyhow::{Context, Result, anyhow, bail};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

const APP_DIR: &str = ".sol";
const CONFIG_FILE: &str = ".solconfig";

/// A 24-bit colour written as six bare hex digits (`7D56F4`).
///
/// There is no `#` prefix: in `.solconfig` a `#` starts a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("expected six hex digits, got {:?}", s);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Effective settings, produced once at startup and passed down explicitly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolConfig {
    /// Extensions without their leading dot
    pub excluded_extensions: Vec<String>,
    pub excluded_directories: Vec<String>,
    /// Words shorter than this are not searchable
    pub min_word_length: usize,
    /// Context lines are cut to this many bytes
    pub line_length_limit: usize,
    pub match_background: HexColor,
    pub match_foreground: HexColor,
    pub file_match_background: HexColor,
    pub file_match_foreground: HexColor,
}

impl Default for SolConfig {
    fn default() -> Self {
        // Same values as DEFAULT_CONFIG
        Self::from_config_file(&ConfigFile::parse(DEFAULT_CONFIG)).unwrap_or(Self {
            excluded_extensions: Vec::new(),
            excluded_directories: Vec::new(),
            min_word_length: 4,
            line_length_limit: 120,
            match_background: HexColor::new(0x7D, 0x56, 0xF4),
            match_foreground: HexColor::new(0xFA, 0xFA, 0xFA),
            file_match_background: HexColor::new(0xF4, 0x7D, 0x56),
            file_match_foreground: HexColor::new(0xFA, 0xFA, 0xFA),
        })
    }
}

impl SolConfig {
    /// Load `~/.sol/.solconfig`, writing the default file first if missing
    pub fn load() -> Result<Self> {
        let path = ensure_default_config(&get_app_data_dir()?)?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config text. Sections that are missing or empty fall back to the
    /// defaults; values that are present must be valid.
    pub fn parse(content: &str) -> Result<Self> {
        let file = ConfigFile::parse(content);
        let defaults = ConfigFile::parse(DEFAULT_CONFIG);
        let mut merged = Self::from_config_file(&defaults)?;

        if !file.section(SECTION_EXCL_EXTENSIONS).is_empty() {
            merged.excluded_extensions = strings(&file, SECTION_EXCL_EXTENSIONS);
        }
        if !file.section(SECTION_EXCL_DIRECTORIES).is_empty() {
            merged.excluded_directories = strings(&file, SECTION_EXCL_DIRECTORIES);
        }
        if let Some(value) = file.single(SECTION_MIN_WORD_LENGTH) {
            merged.min_word_length = parse_value(SECTION_MIN_WORD_LENGTH, value)?;
        }
        if let Some(value) = file.single(SECTION_LIMIT_LINE_LENGTH) {
            merged.line_length_limit = parse_value(SECTION_LIMIT_LINE_LENGTH, value)?;
        }
        for (section, slot) in [
            (SECTION_MATCH_BACKGROUND, &mut merged.match_background),
            (SECTION_MATCH_FOREGROUND, &mut merged.match_foreground),
            (SECTION_FILE_MATCH_BACKGROUND, &mut merged.file_match_background),
            (SECTION_FILE_MATCH_FOREGROUND, &mut merged.file_match_foreground),
        ] {
            if let Some(value) = file.single(section) {
                *slot = parse_value(section, value)?;
            }
        }

        Ok(merged)
    }

    fn from_config_file(file: &ConfigFile) -> Result<Self> {
        let require = |section: &str| {
            file.single(section)
                .ok_or_else(|| anyhow!("Missing value for {}", section))
        };
        Ok(Self {
            excluded_extensions: strings(file, SECTION_EXCL_EXTENSIONS),
            excluded_directories: strings(file, SECTION_EXCL_DIRECTORIES),
            min_word_length: parse_value(SECTION_MIN_WORD_LENGTH, require(SECTION_MIN_WORD_LENGTH)?)?,
            line_length_limit: parse_value(
                SECTION_LIMIT_LINE_LENGTH,
                require(SECTION_LIMIT_LINE_LENGTH)?,
            )?,
            match_background: parse_value(SECTION_MATCH_BACKGROUND, require(SECTION_MATCH_BACKGROUND)?)?,
            match_foreground: parse_value(SECTION_MATCH_FOREGROUND, require(SECTION_MATCH_FOREGROUND)?)?,
            file_match_background: parse_value(
                SECTION_FILE_MATCH_BACKGROUND,
                require(SECTION_FILE_MATCH_BACKGROUND)?,
            )?,
            file_match_foreground: parse_value(
                SECTION_FILE_MATCH_FOREGROUND,
                require(SECTION_FILE_MATCH_FOREGROUND)?,
            )?,
        })
    }
}

fn strings(file: &ConfigFile, section: &str) -> Vec<String> {
    file.section(section).into_iter().map(str::to_string).collect()
}

fn parse_value<T>(section: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e| anyhow!("Could not read config for {}, message: {}", section, e))
}

/// `~/.sol`, created if needed
pub fn get_app_data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("The home directory is not set")?;
    let app_dir = home.join(APP_DIR);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;
    Ok(app_dir)
}

/// Path of the config file inside `dir`
pub fn get_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Write the default config into `dir` unless one already exists.
/// Returns the config path either way.
pub fn ensure_default_config(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = get_config_path(dir);
    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote default config");
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SolConfig::default();
        assert_eq!(config.min_word_length, 4);
        assert_eq!(config.line_length_limit, 120);
        assert_eq!(config.match_background, HexColor::new(0x7D, 0x56, 0xF4));
        assert_eq!(config.file_match_background, HexColor::new(0xF4, 0x7D, 0x56));
        assert!(config.excluded_extensions.contains(&"jar".to_string()));
        assert!(config.excluded_directories.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = SolConfig::parse("[min-word-length]\n2\n").unwrap();
        assert_eq!(config.min_word_length, 2);
        assert_eq!(config.line_length_limit, 120);
        assert_eq!(config.excluded_extensions, SolConfig::default().excluded_extensions);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(SolConfig::parse("").unwrap(), SolConfig::default());
    }

    #[test]
    fn test_invalid_number_names_section() {
        let err = SolConfig::parse("[limit-line-length]\nwide\n").unwrap_err();
        assert!(err.to_string().contains("[limit-line-length]"));
    }

    #[test]
    fn test_invalid_color() {
        assert!(SolConfig::parse("[match-foreground-clr]\nFFF\n").is_err());
        assert!(SolConfig::parse("[match-foreground-clr]\nGGGGGG\n").is_err());
    }

    #[test]
    fn test_hex_color() {
        let color: HexColor = "f47d56".parse().unwrap();
        assert_eq!(color, HexColor::new(0xF4, 0x7D, 0x56));
        assert_eq!(color.to_string(), "F47D56");
    }

    #[test]
    fn test_hash_prefixed_color_is_rejected() {
        assert!("#f47d56".parse::<HexColor>().is_err());
        // in the config file the value is a comment, so the default applies
        let config = SolConfig::parse("[match-background-clr]\n#000000\n").unwrap();
        assert_eq!(config.match_background, HexColor::new(0x7D, 0x56, 0xF4));
    }

    #[test]
    fn test_ensure_default_config_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = ensure_default_config(dir.path()).unwrap();
        assert_eq!(SolConfig::load_from(&path).unwrap(), SolConfig::default());

        fs::write(&path, "[min-word-length]\n7\n").unwrap();
        let again = ensure_default_config(dir.path()).unwrap();
        assert_eq!(again, path);
        assert_eq!(SolConfig::load_from(&path).unwrap().min_word_length, 7);
    }

    #[test]
    fn test_config_serializes_colors_as_hex() {
        let json = serde_json::to_value(SolConfig::default()).unwrap();
        assert_eq!(json["match_background"], "7D56F4");
        assert_eq!(json["min_word_length"], 4);
    }
}
