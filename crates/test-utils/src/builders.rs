#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use surfigures::config::{ConfigFile, RawConfigFile, RunConfig};
use surfigures::Options;
use surfigures::types::StageMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
    base_dir: PathBuf,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                options: Options::default(),
                run: BTreeMap::new(),
            },
            base_dir: PathBuf::new(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.config.options = options;
        self
    }

    pub fn with_run(mut self, name: &str, run: RunConfig) -> Self {
        self.config.run.insert(name.to_string(), run);
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::from_raw(self.config, self.base_dir)
            .expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RunConfig`.
pub struct RunConfigBuilder {
    run: RunConfig,
}

impl RunConfigBuilder {
    pub fn new(output: &str) -> Self {
        Self {
            run: RunConfig::new(Vec::<PathBuf>::new(), output),
        }
    }

    pub fn src(mut self, src: impl Into<PathBuf>) -> Self {
        self.run.src.push(src.into());
        self
    }

    pub fn tool_args(mut self, args: &[&str]) -> Self {
        self.run.tool_args = Some(args.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn append_default_args(mut self, val: bool) -> Self {
        self.run.append_default_args = val;
        self
    }

    pub fn include(mut self, pattern: &str) -> Self {
        self.run
            .include
            .get_or_insert_with(Vec::new)
            .push(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.run
            .exclude
            .get_or_insert_with(Vec::new)
            .push(pattern.to_string());
        self
    }

    pub fn stage(mut self, stage: StageMode) -> Self {
        self.run.stage = Some(stage);
        self
    }

    pub fn build(self) -> RunConfig {
        self.run
    }
}
