//! Configuration discovery and effective settings resolution.
//!
//! jshint-runner reads `jshint-runner.toml|yaml|yml` from the project root
//! (or closest ancestor) and merges it with CLI flags to produce an
//! [`Effective`] config.
//! Defaults:
//! - `jshint`: `jshint` (looked up on `PATH`)
//! - `extra_ext`: `js`
//! - `color`: true
//! - no reporter (the built-in default reporter is used)
//!
//! Overrides precedence: CLI > config file > defaults. The `[options]` table
//! holds lint options forwarded to the engine; `--option key=value` entries
//! override it key by key.
//!
//! A `jshintrc` file is different: when one is set, its JSON object replaces
//! the whole option set at lint time (see [`crate::lint::run_lint`]).

use crate::error::{Error, Result};
use crate::models::options::{
    CHECKSTYLE_REPORTER, EXTRA_EXT, JSHINTRC, JSLINT_REPORTER, REPORTER, SHOW_NON_ERRORS,
};
use crate::models::LintOptions;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["jshint-runner.toml", "jshint-runner.yaml", "jshint-runner.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `jshint-runner.toml|yaml`.
pub struct RunnerConfig {
    /// `jslint`, `checkstyle`, or a path to an external reporter program.
    pub reporter: Option<String>,
    #[serde(alias = "extra-ext")]
    pub extra_ext: Option<String>,
    pub jshintrc: Option<String>,
    /// Engine program.
    pub jshint: Option<String>,
    pub color: Option<bool>,
    #[serde(alias = "show-non-errors")]
    pub show_non_errors: Option<bool>,
    #[serde(default)]
    pub options: Option<Map<String, Json>>,
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<String>,
    pub reporter: Option<String>,
    pub jslint_reporter: bool,
    pub checkstyle_reporter: bool,
    pub show_non_errors: bool,
    pub extra_ext: Option<String>,
    pub jshintrc: Option<String>,
    pub jshint: Option<String>,
    pub options: Vec<String>,
    pub debug: Option<bool>,
    pub verbose: bool,
    pub no_color: bool,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    /// Lint options including the interpreted keys (`reporter`, `jshintrc`, ...).
    pub options: LintOptions,
    pub jshint: String,
    pub color: bool,
    pub verbose: bool,
    pub debug: Option<bool>,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when a `jshint-runner.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_project_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RunnerConfig` from `jshint-runner.toml` or `jshint-runner.yaml|yml`
/// if present. An unparsable file is logged and ignored.
pub fn load_config(root: &Path) -> Option<RunnerConfig> {
    let toml_path = root.join(CONFIG_NAMES[0]);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return match toml::from_str::<RunnerConfig>(&s) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                tracing::warn!(path = %toml_path.display(), %err, "ignoring invalid config");
                None
            }
        };
    }
    for yml in &CONFIG_NAMES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return match serde_yaml::from_str::<RunnerConfig>(&s) {
                Ok(cfg) => Some(cfg),
                Err(err) => {
                    tracing::warn!(path = %p.display(), %err, "ignoring invalid config");
                    None
                }
            };
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective> {
    let start = PathBuf::from(cli.root.as_deref().unwrap_or("."));
    let root = detect_project_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    let mut options = LintOptions::from_map(cfg.options.clone().unwrap_or_default());
    for pair in &cli.options {
        let (k, v) = LintOptions::parse_pair(pair).ok_or_else(|| Error::InvalidOption(pair.clone()))?;
        options.insert(k, v);
    }

    if let Some(reporter) = cli.reporter.clone().or(cfg.reporter) {
        options.insert(REPORTER, reporter);
    }
    if cli.jslint_reporter {
        options.insert(JSLINT_REPORTER, true);
    }
    if cli.checkstyle_reporter {
        options.insert(CHECKSTYLE_REPORTER, true);
    }
    if cli.show_non_errors || cfg.show_non_errors.unwrap_or(false) {
        options.insert(SHOW_NON_ERRORS, true);
    }
    if let Some(ext) = cli.extra_ext.clone().or(cfg.extra_ext) {
        options.insert(EXTRA_EXT, ext);
    }
    // a config-file jshintrc is relative to the project root, a CLI one to cwd
    let jshintrc = match (&cli.jshintrc, &cfg.jshintrc) {
        (Some(p), _) => Some(PathBuf::from(p)),
        (None, Some(p)) => Some(root.join(p)),
        (None, None) => None,
    };
    if let Some(p) = jshintrc {
        options.insert(JSHINTRC, p.to_string_lossy().to_string());
    }

    let jshint = cli
        .jshint
        .clone()
        .or(cfg.jshint)
        .unwrap_or_else(|| "jshint".to_string());
    let color = !cli.no_color && cfg.color.unwrap_or(true);

    Ok(Effective {
        root,
        options,
        jshint,
        color,
        verbose: cli.verbose,
        debug: cli.debug,
    })
}

/// Read a jshintrc file: a JSON object of lint options.
pub fn read_jshintrc(path: &Path) -> Result<LintOptions> {
    let s = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let v: Json = serde_json::from_str(&s).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    match v {
        Json::Object(map) => Ok(LintOptions::from_map(map)),
        _ => Err(Error::ConfigNotObject {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::tempdir;

    fn overrides(root: &Path) -> Overrides {
        Overrides {
            root: root.to_str().map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("jshint-runner.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
reporter = "checkstyle"
extra_ext = "js,jsx"
jshint = "node_modules/.bin/jshint"
color = false
[options]
curly = true
indent = 2
    "#
        )
        .unwrap();

        // Resolve using explicit root to avoid global CWD races
        let eff = resolve_effective(&overrides(root)).unwrap();
        assert_eq!(eff.options.str_value("reporter"), Some("checkstyle"));
        assert_eq!(eff.options.str_value("extra-ext"), Some("js,jsx"));
        assert_eq!(eff.options.get("curly"), Some(&json!(true)));
        assert_eq!(eff.options.get("indent"), Some(&json!(2)));
        assert_eq!(eff.jshint, "node_modules/.bin/jshint");
        assert!(!eff.color);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("jshint-runner.yaml"),
            "show-non-errors: true\noptions:\n  node: true\n",
        )
        .unwrap();

        let eff = resolve_effective(&overrides(root)).unwrap();
        assert!(eff.options.is_truthy("show-non-errors"));
        assert!(eff.options.is_truthy("node"));
        assert_eq!(eff.jshint, "jshint");
        assert!(eff.color);
        assert_eq!(eff.debug, None);
    }

    #[test]
    fn test_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("jshint-runner.toml"),
            "reporter = \"checkstyle\"\njshintrc = \"conf/.jshintrc\"\n[options]\ncurly = true\nmaxerr = 5\n",
        )
        .unwrap();

        let cli = Overrides {
            reporter: Some("jslint".into()),
            options: vec!["maxerr=50".into(), "quotmark=single".into()],
            no_color: true,
            debug: Some(false),
            ..overrides(root)
        };
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.options.str_value("reporter"), Some("jslint"));
        assert_eq!(eff.options.get("maxerr"), Some(&json!(50)));
        assert_eq!(eff.options.get("quotmark"), Some(&json!("single")));
        assert_eq!(eff.options.get("curly"), Some(&json!(true)));
        let expected = root.join("conf/.jshintrc").to_string_lossy().to_string();
        assert_eq!(eff.options.str_value("jshintrc"), Some(expected.as_str()));
        assert!(!eff.color);
        assert_eq!(eff.debug, Some(false));
    }

    #[test]
    fn test_invalid_option_pair() {
        let dir = tempdir().unwrap();
        let cli = Overrides {
            options: vec!["nonsense".into()],
            ..overrides(dir.path())
        };
        assert!(matches!(resolve_effective(&cli), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn test_detect_root_stops_at_git() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("src/deep")).unwrap();
        assert_eq!(detect_project_root(&root.join("src/deep")), root.to_path_buf());
    }

    #[test]
    fn test_read_jshintrc() {
        let dir = tempdir().unwrap();
        let good = dir.path().join(".jshintrc");
        fs::write(&good, r#"{"node": true, "curly": true}"#).unwrap();
        let opts = read_jshintrc(&good).unwrap();
        assert!(opts.is_truthy("node"));

        let list = dir.path().join("list.json");
        fs::write(&list, "[1, 2]").unwrap();
        assert!(matches!(read_jshintrc(&list), Err(Error::ConfigNotObject { .. })));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ nope").unwrap();
        assert!(matches!(read_jshintrc(&bad), Err(Error::ParseConfig { .. })));

        assert!(matches!(
            read_jshintrc(&dir.path().join("missing")),
            Err(Error::ReadConfig { .. })
        ));
    }
}
