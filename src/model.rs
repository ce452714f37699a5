use serde::{Deserialize, Serialize};

use abst_fs::{self as fs, AbstPath};
use fd_tree::{ExcludeList, Renderer};

use anyhow::{Context, Result};

/// User defaults, read from `~/.config/fdsub/config.toml` when present
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub monochrome: bool,
    pub total: bool,
    pub exclude: Vec<String>,
}
impl Config {
    fn path(home_dir: &AbstPath) -> AbstPath {
        home_dir
            .add_last(".config")
            .add_last("fdsub")
            .add_last("config.toml")
    }
    pub fn exists(home_dir: &AbstPath) -> bool {
        Config::path(home_dir).exists()
    }
    pub fn load(home_dir: &AbstPath) -> Result<Config> {
        if !Config::exists(home_dir) {
            return Ok(Config::default());
        }
        let config: Config =
            fs::load(&Config::path(home_dir)).context("failed to load user config")?;
        Ok(config)
    }
}

/// Command line switches that override the config
pub struct Flags {
    pub monochrome: bool,
    pub total: bool,
    pub exclude: Vec<String>,
    pub serialize: Option<String>,
}

pub struct Settings {
    pub renderer: Renderer,
    pub exclude_list: ExcludeList,
    pub serialize: Option<AbstPath>,
}
impl Settings {
    pub fn resolve(config: &Config, flags: &Flags) -> Result<Settings> {
        let exclude_list = ExcludeList::from(config.exclude.as_slice())
            .and_then(|list| list.join(flags.exclude.as_slice()))
            .context("invalid exclude rule")?;
        Ok(Settings {
            renderer: Renderer {
                color: !(config.monochrome || flags.monochrome),
                // the flag toggles whatever the config says
                totals: config.total ^ flags.total,
            },
            exclude_list,
            serialize: flags.serialize.as_ref().map(AbstPath::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Flags, Settings};
    use abst_fs::AbstPath;

    fn flags() -> Flags {
        Flags {
            monochrome: false,
            total: false,
            exclude: Vec::new(),
            serialize: None,
        }
    }

    #[test]
    fn config() {
        let tmp = tempfile::tempdir().unwrap();
        let home = AbstPath::from(tmp.path());

        assert!(!Config::exists(&home));
        assert_eq!(Config::load(&home).unwrap(), Config::default());

        let dir = tmp.path().join(".config").join("fdsub");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "total = true\nexclude = [\"\\\\.git/$\"]\n")
            .unwrap();
        assert!(Config::exists(&home));
        assert_eq!(
            Config::load(&home).unwrap(),
            Config {
                monochrome: false,
                total: true,
                exclude: vec![String::from("\\.git/$")],
            }
        );

        std::fs::write(dir.join("config.toml"), "total = \"yes\"\n").unwrap();
        assert!(Config::load(&home).is_err());
    }

    #[test]
    fn settings() {
        let settings = Settings::resolve(&Config::default(), &flags()).unwrap();
        assert!(settings.renderer.color);
        assert!(!settings.renderer.totals);
        assert!(settings.exclude_list.is_empty());
        assert!(settings.serialize.is_none());

        let config = Config {
            monochrome: false,
            total: true,
            exclude: vec![String::from("\\.git/$")],
        };
        let settings = Settings::resolve(
            &config,
            &Flags {
                monochrome: true,
                total: true,
                exclude: vec![String::from("\\.tmp$")],
                serialize: Some(String::from("out/tree")),
            },
        )
        .unwrap();
        assert!(!settings.renderer.color);
        assert!(!settings.renderer.totals);
        assert!(settings.exclude_list.should_exclude("./.git", true));
        assert!(settings.exclude_list.should_exclude("./a.tmp", false));
        assert_eq!(settings.serialize, Some(AbstPath::from("out/tree")));

        let bad = Flags {
            exclude: vec![String::from("(")],
            ..flags()
        };
        assert!(Settings::resolve(&Config::default(), &bad).is_err());
    }
}
