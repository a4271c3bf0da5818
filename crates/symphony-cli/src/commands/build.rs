// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! Build a Symphony source file into a MIDI file.

use camino::{Utf8Path, Utf8PathBuf};
use miette::Result;
use tracing::{debug, info, instrument};

use crate::diagnostic::CompileDiagnostic;

use super::read_source;

/// Compiles `path` and saves the MIDI output.
///
/// The output lands next to the input with a `.mid` extension unless
/// `output` overrides it.
#[instrument(skip_all, fields(path = %path))]
pub fn build(path: &Utf8Path, output: Option<&Utf8Path>) -> Result<()> {
    let source = read_source(path)?;
    let output = output.map_or_else(|| default_output(path), Utf8Path::to_path_buf);
    debug!(%output, "Compiling");

    let bytes = symphony_core::compile(&source)
        .map_err(|err| CompileDiagnostic::new(err, path.as_str(), &source))?;
    symphony_core::codegen::smf::save(&output, &bytes)
        .map_err(|err| CompileDiagnostic::new(err.into(), path.as_str(), &source))?;

    info!(bytes = bytes.len(), "Build finished");
    println!("Wrote {output}");
    Ok(())
}

/// The input path with its extension replaced by `.mid`.
fn default_output(path: &Utf8Path) -> Utf8PathBuf {
    path.with_extension("mid")
}
