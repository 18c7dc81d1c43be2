use std::path::PathBuf;

/// File locations, read from `TILLBOOK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub out_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let profile = path("TILLBOOK_PROFILE");
        if profile.is_none() {
            tracing::warn!("TILLBOOK_PROFILE not set; using the default shop profile");
        }
        let catalog = path("TILLBOOK_CATALOG");
        if catalog.is_none() {
            tracing::warn!("TILLBOOK_CATALOG not set; every scan will miss");
        }
        let font = path("TILLBOOK_FONT");
        if font.is_none() {
            tracing::warn!("TILLBOOK_FONT not set; PDF text limited to Latin-1");
        }
        let out_dir = path("TILLBOOK_OUT_DIR").unwrap_or_else(|| {
            tracing::warn!("TILLBOOK_OUT_DIR not set; writing to the current directory");
            PathBuf::from(".")
        });

        Self {
            profile,
            catalog,
            font,
            out_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_and_blank_variables_fall_back() {
        let settings = Settings::from_lookup(|key| match key {
            "TILLBOOK_CATALOG" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(settings.profile, None);
        assert_eq!(settings.catalog, None);
        assert_eq!(settings.font, None);
        assert_eq!(settings.out_dir, PathBuf::from("."));
    }

    #[test]
    fn set_variables_become_paths() {
        let settings = Settings::from_lookup(|key| Some(format!("/tmp/{key}")));
        assert_eq!(settings.profile, Some(PathBuf::from("/tmp/TILLBOOK_PROFILE")));
        assert_eq!(settings.out_dir, PathBuf::from("/tmp/TILLBOOK_OUT_DIR"));
    }
}
