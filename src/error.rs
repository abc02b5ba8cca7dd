// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error taxonomy.  The computational core (escape, palette,
//! planes, render) is total over its documented inputs, so everything
//! here is either a rejected configuration or a failure at the file
//! boundary.

use failure::Fail;

/// Everything that can abort a render or a zoom.
#[derive(Debug, Fail)]
pub enum Error {
    /// A parameter was rejected before any computation began.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The image or animation encoder could not write (or re-read) a file.
    #[fail(display = "could not encode {}: {}", path, error)]
    Encode {
        /// The file being written or read back.
        path: String,
        /// What the encoder reported.
        #[cause]
        error: image::ImageError,
    },

    /// An output directory or file could not be created.
    #[fail(display = "could not write {}: {}", path, error)]
    Io {
        /// The path being created.
        path: String,
        /// The underlying I/O failure.
        #[cause]
        error: std::io::Error,
    },

    /// A render worker thread panicked.
    #[fail(display = "render worker failed: {}", _0)]
    Worker(String),
}

impl Error {
    /// Shorthand for the configuration rejection.
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Error::InvalidConfiguration(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
