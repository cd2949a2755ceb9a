// SPDX-License-Identifier: GPL-3.0-only

//! Photo output pipelines
//!
//! - [`photo`]: frame encoding into self-contained payloads
//! - [`download`]: saving a gallery photo as a file

pub mod download;
pub mod photo;
