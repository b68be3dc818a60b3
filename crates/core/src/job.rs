//! Job wire schema and decoder.
//!
//! The dispatch endpoint answers every poll with one JSON document in the
//! adjacently tagged form `{"type": "<Variant>", "data": {…}}`. [`decode`]
//! turns a raw [`serde_json::Value`] into exactly one [`Job`] variant or
//! fails -- a response that matches no known shape never yields a
//! partially populated job.

use serde::Deserialize;
use url::Url;

/// One unit of work handed out by the dispatch endpoint.
///
/// The three producing variants are identified by their tile coordinates;
/// `NoJobLeft` carries no data and signals an empty work queue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Job {
    Lidar { x: i32, y: i32, tile_url: String },
    Render { x: i32, y: i32 },
    Pyramid { x: i32, y: i32, z: i32 },
    NoJobLeft,
}

/// Errors produced by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The document matched none of the known job shapes, or matched a
    /// discriminant but had a missing or mistyped field.
    #[error("unrecognized job payload: {0}")]
    Shape(#[from] serde_json::Error),

    /// The lidar tile URL was not a syntactically valid absolute URL.
    #[error("invalid tile URL '{url}': {source}")]
    InvalidTileUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Decode a raw dispatch response into a typed [`Job`].
///
/// Field types are enforced strictly: coordinates must be JSON numbers
/// (numeric strings are rejected) and a lidar `tile_url` must parse as an
/// absolute URL. Pure function, no side effects.
pub fn decode(raw: serde_json::Value) -> Result<Job, DecodeError> {
    let job: Job = serde_json::from_value(raw)?;

    if let Job::Lidar { tile_url, .. } = &job {
        // Url::parse rejects relative references, so absoluteness comes
        // for free here.
        Url::parse(tile_url).map_err(|source| DecodeError::InvalidTileUrl {
            url: tile_url.clone(),
            source,
        })?;
    }

    Ok(job)
}
