//! Build and run the translated program
//!
//! Intermediate files live in a temporary directory that is removed when the
//! [`BuildContext`] is dropped, whether or not the build succeeded.

use crate::config::BuildConfig;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::TempDir;
use which::which;

pub struct BuildContext {
    config: BuildConfig,
    temp_dir: Option<TempDir>,
    /// Directory the C file and executable are written to
    work_dir: PathBuf,
}

impl BuildContext {
    pub fn new(config: BuildConfig) -> Result<Self> {
        let (temp_dir, work_dir) = if config.keep_temp {
            let cwd = std::env::current_dir().context("Could not determine the current directory")?;
            (None, cwd)
        } else {
            let dir = tempfile::Builder::new()
                .prefix("runml-")
                .tempdir()
                .context("Could not create a temporary build directory")?;
            let path = dir.path().to_path_buf();
            (Some(dir), path)
        };

        Ok(Self {
            config,
            temp_dir,
            work_dir,
        })
    }

    fn c_path(&self) -> PathBuf {
        self.work_dir.join(format!("ml-{}.c", std::process::id()))
    }

    fn executable_path(&self) -> PathBuf {
        self.work_dir.join(format!(
            "ml_executable_{}{}",
            std::process::id(),
            std::env::consts::EXE_SUFFIX
        ))
    }

    fn check_tool(name: &str) -> Result<PathBuf> {
        which(name).with_context(|| format!("Could not find '{}' in PATH", name))
    }

    /// Write the translated program where the compiler will find it
    pub fn write_source(&self, c_source: &str) -> Result<PathBuf> {
        let path = self.c_path();
        fs::write(&path, c_source).with_context(|| format!("Could not create {}", path.display()))?;
        debug!("wrote {} ({} bytes)", path.display(), c_source.len());
        Ok(path)
    }

    /// Compile `c_file` into an executable and return its path
    pub fn compile(&self, c_file: &Path) -> Result<PathBuf> {
        let cc = Self::check_tool(&self.config.compiler)?;
        let executable = self.executable_path();

        let mut cmd = Command::new(cc);
        cmd.args(&self.config.cflags)
            .arg("-o")
            .arg(&executable)
            .arg(c_file)
            .args(&self.config.libs);
        debug!("Running: {:?}", cmd);

        let output = cmd
            .output()
            .with_context(|| format!("Failed to start {}", self.config.compiler))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Compilation failed: {}", stderr.trim_end());
        }

        if !executable.exists() {
            anyhow::bail!("Executable not found: {}", executable.display());
        }
        Ok(executable)
    }

    /// Run the executable with `args`, inheriting stdio, and wait for it
    pub fn run(&self, executable: &Path, args: &[String]) -> Result<i32> {
        debug!("Running: {} {:?}", executable.display(), args);
        let status = Command::new(executable)
            .args(args)
            .status()
            .with_context(|| format!("Failed to execute {}", executable.display()))?;
        Ok(exit_code(status))
    }

    pub fn build_and_run(&self, c_source: &str, args: &[String]) -> Result<i32> {
        debug!(
            "building in {} ({})",
            self.work_dir.display(),
            if self.temp_dir.is_some() { "removed afterwards" } else { "kept" }
        );
        let c_file = self.write_source(c_source)?;
        let executable = self.compile(&c_file)?;
        self.run(&executable, args)
    }
}

/// Exit code of the child; a signal death maps to 128 + signal on Unix
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use runml_translator::translate;

    fn have_cc() -> bool {
        if which("cc").is_err() {
            eprintln!("skipping: no C compiler in PATH");
            return false;
        }
        true
    }

    /// Build `source` and return the program's stdout for `args`
    fn build_and_capture(source: &str, args: &[&str]) -> String {
        let context = BuildContext::new(BuildConfig::default()).unwrap();
        let c_file = context.write_source(&translate(source).unwrap()).unwrap();
        let executable = context.compile(&c_file).unwrap();
        let output = Command::new(executable).args(args).output().unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    }

    #[test]
    fn test_temporary_files_are_removed_on_drop() {
        let context = BuildContext::new(BuildConfig::default()).unwrap();
        assert!(context.temp_dir.is_some());
        let c_file = context.write_source("int main(void) { return 0; }\n").unwrap();
        assert!(c_file.exists());

        drop(context);
        assert!(!c_file.exists());
    }

    #[test]
    fn test_missing_compiler_is_reported() {
        let config = BuildConfig {
            compiler: "runml-no-such-compiler".to_string(),
            ..BuildConfig::default()
        };
        let context = BuildContext::new(config).unwrap();
        let c_file = context.write_source("int main(void) { return 0; }\n").unwrap();
        let err = context.compile(&c_file).unwrap_err();
        assert!(err.to_string().contains("Could not find 'runml-no-such-compiler'"));
    }

    #[test]
    fn test_integral_and_fractional_printing() {
        if !have_cc() {
            return;
        }
        let stdout = build_and_capture(
            indoc! {"
                function add a b
                \treturn a + b
                print add(2,3)
                print add(2,3.5)
                print 0 - 3
                print 1.0 / 3
            "},
            &[],
        );
        assert_eq!(stdout, "5\n5.500000\n-3\n0.333333\n");
    }

    #[test]
    fn test_user_trunc_does_not_change_printing() {
        if !have_cc() {
            return;
        }
        let stdout = build_and_capture(
            indoc! {"
                x <- 7
                function trunc v
                \treturn v
                print x / 2
                print trunc(x)
            "},
            &[],
        );
        assert_eq!(stdout, "3.500000\n7\n");
    }

    #[test]
    fn test_arguments_are_forwarded() {
        if !have_cc() {
            return;
        }
        let stdout = build_and_capture("print arg0 + arg1\n", &["2", "3.5"]);
        assert_eq!(stdout, "5.500000\n");
    }

    #[test]
    fn test_functions_locals_and_calls() {
        if !have_cc() {
            return;
        }
        let stdout = build_and_capture(
            indoc! {"
                base <- 10
                function show v
                \tprint v
                function twice n
                \tt <- n * 2
                \tt <- t + 1
                \treturn t
                show(twice(base))
                print twice(0.25)
            "},
            &[],
        );
        assert_eq!(stdout, "21\n1.500000\n");
    }

    #[test]
    fn test_compile_failure_is_reported() {
        if !have_cc() {
            return;
        }
        let context = BuildContext::new(BuildConfig::default()).unwrap();
        // undefined function, rejected by the C compiler
        let c_file = context.write_source(&translate("missing(1)\n").unwrap()).unwrap();
        let err = context.compile(&c_file).unwrap_err();
        assert!(err.to_string().starts_with("Compilation failed"));
    }

    #[test]
    fn test_build_and_run_returns_exit_code() {
        if !have_cc() {
            return;
        }
        let context = BuildContext::new(BuildConfig::default()).unwrap();
        let code = context.build_and_run(&translate("x <- 1\n").unwrap(), &[]).unwrap();
        assert_eq!(code, 0);
    }
}
