// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Check a Symphony source file without writing output.

use camino::Utf8Path;
use miette::Result;
use tracing::instrument;

use crate::diagnostic::CompileDiagnostic;

use super::read_source;

/// Runs the full compilation pipeline on `path`, discarding the
/// result. Diagnoses exactly what `build` would.
#[instrument(skip_all, fields(path = %path))]
pub fn check(path: &Utf8Path) -> Result<()> {
    let source = read_source(path)?;
    symphony_core::compile(&source)
        .map_err(|err| CompileDiagnostic::new(err, path.as_str(), &source))?;
    println!("{path}: ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn check_source(name: &str, source: &str) -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        std::fs::write(&path, source).unwrap();
        check(&path)
    }

    #[test]
    fn check_accepts_valid_source() {
        check_source("ok.sym", "tempo=120\nC4 qn\n[C4 E4 G4] wn\n").unwrap();
    }

    #[test]
    fn check_rejects_invalid_source() {
        let err = check_source("bad.sym", "tempo=120\nC4 qn D4\n").unwrap_err();
        assert!(err.to_string().contains("expected a newline"));
    }

    #[test]
    fn check_fails_on_missing_file() {
        assert!(check(Utf8Path::new("/nonexistent/missing.sym")).is_err());
    }
}
