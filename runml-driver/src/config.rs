use crate::cli::Cli;

/// How the translated program is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub compiler: String,
    pub cflags: Vec<String>,
    pub libs: Vec<String>,
    pub keep_temp: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: "cc".to_string(),
            cflags: vec!["-std=c11".to_string(), "-Wall".to_string(), "-Werror".to_string()],
            libs: vec!["-lm".to_string()],
            keep_temp: false,
        }
    }
}

impl BuildConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            compiler: cli.cc.clone(),
            keep_temp: cli.keep_temp,
            ..Self::default()
        }
    }
}
