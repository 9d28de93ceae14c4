use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// RAII guard for test .netrc files
///
/// Creates a temporary home directory containing a `.netrc` file with the
/// given content. The directory is removed when the guard is dropped. Nothing
/// in the process environment is touched, so pass [`NetrcGuard::home_dir`]
/// explicitly (or as `HOME` to a child process).
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    let mut file = fs::File::create(&netrc_path).expect("Failed to create test .netrc");
    file.write_all(content.as_bytes()).expect("Failed to write test .netrc");

    Self { temp_dir, netrc_path }
  }

  /// Create a guard holding a single multi-line entry for `machine`
  pub fn with_entry(machine: &str, login: &str, password: &str) -> Self {
    Self::new(&format!("machine {machine}\n  login {login}\n  password {password}\n"))
  }

  /// Append another entry to the `.netrc` file
  pub fn append_entry(&self, machine: &str, login: &str, password: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
      .append(true)
      .open(&self.netrc_path)
      .context("Failed to open test .netrc for appending")?;
    writeln!(file, "machine {machine} login {login} password {password}")?;
    Ok(())
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
