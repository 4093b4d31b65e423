use crate::contact::SalesContact;
use crate::errors::QuestError;
use crate::logging::{DEFAULT_DISK_BUDGET_BYTES, DEFAULT_MAX_PAYLOAD_BYTES};
use crate::runtime::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_PATH: &str = ".cache/chef-quest/quest.jsonl";
pub const MIN_SURFACE_WIDTH: u16 = 60;
pub const MIN_SURFACE_HEIGHT: u16 = 24;
pub const MAX_SURFACE_WIDTH: u16 = 500;
pub const MAX_SURFACE_HEIGHT: u16 = 200;

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub no_log: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub surface: SurfaceConfig,
    pub contact: SalesContact,
    pub logging: LoggingConfig,
    pub quest: QuestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub width: u16,
    pub height: u16,
    pub parallax: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub max_payload_bytes: usize,
    pub budget_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QuestConfig {
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig {
                width: 100,
                height: 32,
                parallax: true,
            },
            contact: SalesContact::default(),
            logging: LoggingConfig {
                enabled: true,
                path: PathBuf::from(DEFAULT_LOG_PATH),
                max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
                budget_bytes: DEFAULT_DISK_BUDGET_BYTES,
            },
            quest: QuestConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialAppConfig {
    surface: Option<PartialSurfaceConfig>,
    contact: Option<PartialContactConfig>,
    logging: Option<PartialLoggingConfig>,
    quest: Option<QuestConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialSurfaceConfig {
    width: Option<u16>,
    height: Option<u16>,
    parallax: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialContactConfig {
    email: Option<String>,
    subject: Option<String>,
    interest_subject: Option<String>,
    opener: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialLoggingConfig {
    enabled: Option<bool>,
    path: Option<PathBuf>,
    max_payload_bytes: Option<usize>,
    budget_bytes: Option<u64>,
}

pub fn load_config(
    overrides: &CliOverrides,
    process_cwd: &Path,
    fs: &dyn FileSystem,
) -> Result<AppConfig, QuestError> {
    let mut cfg = AppConfig::default();

    if let Some(path) = &overrides.config_path {
        let file_contents = fs.read_to_string(path)?;
        let partial: PartialAppConfig = toml::from_str(&file_contents)
            .map_err(|e| QuestError::ConfigParse(e.to_string()))?;
        merge_partial_config(&mut cfg, partial);
    }

    apply_cli_overrides(&mut cfg, overrides);
    cfg.logging.path = absolutize_path(process_cwd, &cfg.logging.path);

    validate_config(&cfg)?;
    Ok(cfg)
}

fn merge_partial_config(cfg: &mut AppConfig, partial: PartialAppConfig) {
    if let Some(surface) = partial.surface {
        if let Some(value) = surface.width {
            cfg.surface.width = value;
        }
        if let Some(value) = surface.height {
            cfg.surface.height = value;
        }
        if let Some(value) = surface.parallax {
            cfg.surface.parallax = value;
        }
    }

    if let Some(contact) = partial.contact {
        if let Some(value) = contact.email {
            cfg.contact.email = value;
        }
        if let Some(value) = contact.subject {
            cfg.contact.subject = value;
        }
        if let Some(value) = contact.interest_subject {
            cfg.contact.interest_subject = value;
        }
        if let Some(value) = contact.opener {
            cfg.contact.opener = value;
        }
    }

    if let Some(logging) = partial.logging {
        if let Some(value) = logging.enabled {
            cfg.logging.enabled = value;
        }
        if let Some(value) = logging.path {
            cfg.logging.path = value;
        }
        if let Some(value) = logging.max_payload_bytes {
            cfg.logging.max_payload_bytes = value;
        }
        if let Some(value) = logging.budget_bytes {
            cfg.logging.budget_bytes = value;
        }
    }

    if let Some(quest) = partial.quest {
        cfg.quest = quest;
    }
}

fn apply_cli_overrides(cfg: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(seed) = overrides.seed {
        cfg.quest.seed = Some(seed);
    }
    if let Some(width) = overrides.width {
        cfg.surface.width = width;
    }
    if let Some(height) = overrides.height {
        cfg.surface.height = height;
    }
    if overrides.no_log {
        cfg.logging.enabled = false;
    }
}

fn absolutize_path(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}

fn validate_config(cfg: &AppConfig) -> Result<(), QuestError> {
    if cfg.surface.width < MIN_SURFACE_WIDTH || cfg.surface.height < MIN_SURFACE_HEIGHT {
        return Err(QuestError::InvalidConfig(format!(
            "surface must be at least {MIN_SURFACE_WIDTH}x{MIN_SURFACE_HEIGHT}, got {}x{}",
            cfg.surface.width, cfg.surface.height
        )));
    }
    if cfg.surface.width > MAX_SURFACE_WIDTH || cfg.surface.height > MAX_SURFACE_HEIGHT {
        return Err(QuestError::InvalidConfig(format!(
            "surface must be at most {MAX_SURFACE_WIDTH}x{MAX_SURFACE_HEIGHT}, got {}x{}",
            cfg.surface.width, cfg.surface.height
        )));
    }

    if !cfg.contact.email.contains('@') || cfg.contact.email.trim().len() < 3 {
        return Err(QuestError::InvalidConfig(
            "contact.email must be a mail address".to_string(),
        ));
    }

    if cfg.contact.opener.trim().is_empty() {
        return Err(QuestError::InvalidConfig(
            "contact.opener must name a program".to_string(),
        ));
    }

    if cfg.logging.enabled && (cfg.logging.budget_bytes == 0 || cfg.logging.max_payload_bytes == 0)
    {
        return Err(QuestError::InvalidConfig(
            "logging.budget_bytes and logging.max_payload_bytes must be greater than zero"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig, CliOverrides};
    use crate::errors::QuestError;
    use crate::runtime::FakeFileSystem;
    use std::path::{Path, PathBuf};

    fn overrides(path: &str) -> CliOverrides {
        CliOverrides {
            config_path: Some(PathBuf::from(path)),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn defaults_load_without_a_file() {
        let fs = FakeFileSystem::default();
        let cfg = load_config(&CliOverrides::default(), Path::new("/kiosk"), &fs).expect("cfg");
        let expected = AppConfig::default();
        assert_eq!(cfg.surface, expected.surface);
        assert_eq!(cfg.contact, expected.contact);
        assert_eq!(
            cfg.logging.path,
            PathBuf::from("/kiosk/.cache/chef-quest/quest.jsonl")
        );
    }

    #[test]
    fn partial_file_merges_over_defaults_and_cli_wins() {
        let fs = FakeFileSystem::with_file(
            "/cfg.toml",
            "[surface]\nwidth = 120\n[contact]\nemail = \"demo@example.com\"\n[quest]\nseed = 7\n",
        );
        let mut cli = overrides("/cfg.toml");
        cli.seed = Some(9);
        cli.no_log = true;
        let cfg = load_config(&cli, Path::new("/"), &fs).expect("cfg");
        assert_eq!(cfg.surface.width, 120);
        assert_eq!(cfg.surface.height, 32);
        assert_eq!(cfg.contact.email, "demo@example.com");
        assert_eq!(cfg.contact.subject, "Chef Quest Demo");
        assert_eq!(cfg.quest.seed, Some(9));
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let fs = FakeFileSystem::with_file("/cfg.toml", "[surface]\ncolour = \"green\"\n");
        let err = load_config(&overrides("/cfg.toml"), Path::new("/"), &fs).expect_err("bad");
        assert!(matches!(err, QuestError::ConfigParse(_)));
    }

    #[test]
    fn read_failures_surface_as_io_errors() {
        let fs = FakeFileSystem::with_file("/cfg.toml", "");
        fs.set_fail_next(QuestError::Io("disk unplugged".to_string()));
        let err = load_config(&overrides("/cfg.toml"), Path::new("/"), &fs).expect_err("io");
        assert_eq!(err, QuestError::Io("disk unplugged".to_string()));
    }

    #[test]
    fn tiny_surface_is_rejected() {
        let fs = FakeFileSystem::default();
        let cli = CliOverrides {
            width: Some(20),
            ..CliOverrides::default()
        };
        let err = load_config(&cli, Path::new("/"), &fs).expect_err("too small");
        assert!(matches!(err, QuestError::InvalidConfig(_)));
    }

    #[test]
    fn oversized_surface_is_rejected_before_rendering() {
        let fs = FakeFileSystem::default();
        let cli = CliOverrides {
            width: Some(u16::MAX),
            height: Some(u16::MAX),
            ..CliOverrides::default()
        };
        let err = load_config(&cli, Path::new("/"), &fs).expect_err("too large");
        assert!(matches!(err, QuestError::InvalidConfig(_)));

        let edge = CliOverrides {
            width: Some(super::MAX_SURFACE_WIDTH),
            height: Some(super::MAX_SURFACE_HEIGHT),
            ..CliOverrides::default()
        };
        let cfg = load_config(&edge, Path::new("/"), &fs).expect("largest surface accepted");
        assert_eq!(cfg.surface.width, super::MAX_SURFACE_WIDTH);
    }
}
