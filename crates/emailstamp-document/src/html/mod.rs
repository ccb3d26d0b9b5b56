// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTML module — composition of the stamp document.

pub mod template;

pub use template::{RenderedDocument, StampOptions, assemble};
