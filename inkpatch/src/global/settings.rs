//! User settings, read from `settings.toml` in the preferences directory.

const DOCUMENTATION: &str = r"# Settings for inkpatch.
#
# history_limit: how many undo steps each document keeps. Zero or negative keeps every step.
# canvas_width, canvas_height: size in pixels of every layer of a new document.
# bytes_per_pixel: bytes stored for each pixel. Colors given to tools must be this long.
# layers: how many blank layers a new document starts with.

";

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub history_limit: i64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub bytes_per_pixel: u32,
    pub layers: u32,
    #[serde(skip)]
    failed_to_load: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            history_limit: 100,
            canvas_width: 512,
            canvas_height: 512,
            bytes_per_pixel: 4,
            layers: 1,
            failed_to_load: false,
        }
    }
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    /// Load from the user's preferences, or defaults if that fails.
    #[must_use]
    pub fn load() -> Self {
        match super::preferences_dir() {
            None => Self::no_path(),
            Some(mut dir) => {
                dir.push(Self::FILENAME);
                Self::load_or_default(&dir)
            }
        }
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Settings weren't available, defaulting.");
        Self {
            failed_to_load: true,
            ..Self::default()
        }
    }
    #[must_use]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        let settings: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let settings : Self = toml::from_str(&string)?;
            anyhow::ensure!(settings.bytes_per_pixel != 0, "bytes_per_pixel must be at least 1");

            Ok(settings)
        };

        match settings {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to read settings from {}: {e:#}", path.display());
                Self::no_path()
            }
        }
    }
    /// Return true if loading user's settings failed, and these are the defaults.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    /// Serialize, with the field documentation prefixed.
    pub fn to_documented_string(&self) -> anyhow::Result<String> {
        let string = toml::ser::to_string_pretty(self)?;
        Ok(DOCUMENTATION.to_owned() + &string)
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            super::preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        std::fs::write(preferences, self.to_documented_string()?)?;
        Ok(())
    }
}
