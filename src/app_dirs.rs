use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("tulipa-mouse"),
            )
        } else {
            ProjectDirs::from("", "", "tulipa-mouse")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("tulipa-mouse.log"))
            .unwrap_or_else(|| PathBuf::from("tulipa-mouse.log"))
    }

    /// Default directory for CSV exports when none is configured
    pub fn export_dir() -> PathBuf {
        ProjectDirs::from("", "", "tulipa-mouse")
            .map(|proj_dirs| proj_dirs.data_dir().join("exports"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_names_the_app() {
        let path = AppDirs::log_path();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("tulipa-mouse.log")
        );
    }

    #[test]
    fn export_dir_is_not_empty() {
        assert!(!AppDirs::export_dir().as_os_str().is_empty());
    }
}
