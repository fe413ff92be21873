use clap::{Parser, ValueEnum};
use runml_translator::config::DEFAULT_MAX_IDENTIFIERS;
use runml_translator::TranslatorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "runml")]
#[command(about = "Translate an ml program to C, build it and run it", version)]
pub struct Cli {
    /// ml source file
    pub source: PathBuf,

    /// Arguments forwarded to the program (arg0, arg1, ...)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// C compiler used to build the translated program
    #[arg(long, default_value = "cc")]
    pub cc: String,

    /// Print the translated C instead of building and running it
    #[arg(short = 'E', long)]
    pub emit_c: bool,

    /// Write the translated C to this file (with --emit-c)
    #[arg(short, long, requires = "emit_c")]
    pub output: Option<PathBuf>,

    /// Build in the current directory and keep the C file and executable
    #[arg(short, long)]
    pub keep_temp: bool,

    /// Maximum number of distinct identifiers a program may introduce
    #[arg(long, default_value_t = DEFAULT_MAX_IDENTIFIERS)]
    pub max_identifiers: usize,

    /// Drop unrecognized lines with a warning instead of failing
    #[arg(long)]
    pub allow_unrecognized: bool,

    /// How diagnostics are written to stderr
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

impl Cli {
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig::default()
            .with_max_identifiers(self.max_identifiers)
            .with_allow_unrecognized(self.allow_unrecognized)
    }
}
