// SPDX-License-Identifier: GPL-3.0-only

//! Photo pipeline
//!
//! ```text
//! Active stream → current frame (RGBA) → FrameEncoder → data: URI → Gallery
//! ```
//!
//! Filters are a display-layer effect and never reach this pipeline; the
//! stored photo is the unfiltered frame.

pub mod encoding;

pub use encoding::{
    EncodedImage, EncodingFormat, FrameEncoder, ImageEncoder, parse_data_uri, to_data_uri,
};
