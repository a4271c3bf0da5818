// Copyright 2026 The Symphony Authors
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

mod build;
mod check;

pub use build::build;
pub use check::check;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};

/// Reads a Symphony source file.
fn read_source(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{path}'"))
}
