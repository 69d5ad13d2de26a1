use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fire: FireSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct FireSettings {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub time: Option<f32>,   // Seconds per frame
    pub seed: Option<u64>,
    pub palette: Option<String>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "ignoring malformed settings: {e}");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read settings: {e}");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("doomfire")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let s = Settings::parse("").unwrap();
        assert!(s.fire.width.is_none());
        assert!(s.fire.palette.is_none());
    }

    #[test]
    fn test_partial_fire_section() {
        let s = Settings::parse("[fire]\nheight = 68\npalette = \"ice\"\n").unwrap();
        assert_eq!(s.fire.height, Some(68));
        assert_eq!(s.fire.width, None);
        assert_eq!(s.fire.palette.as_deref(), Some("ice"));
    }

    #[test]
    fn test_full_fire_section() {
        let s = Settings::parse(
            "[fire]\nwidth = 240\nheight = 136\ntime = 0.016\nseed = 42\npalette = \"fire\"\n",
        )
        .unwrap();
        assert_eq!(s.fire.width, Some(240));
        assert_eq!(s.fire.seed, Some(42));
        assert!((s.fire.time.unwrap() - 0.016).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(Settings::parse("[fire]\nwidth = \"wide\"\n").is_err());
    }
}
