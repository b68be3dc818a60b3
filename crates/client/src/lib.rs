//! `mapant-client` -- HTTP plumbing for the mapant worker.
//!
//! Wraps the two remote interactions the worker performs: polling the
//! dispatch endpoint for the next job ([`api`]) and streaming tile
//! downloads to disk ([`transfer`]).

pub mod api;
pub mod transfer;

pub use api::{ApiError, MapantApi};
pub use transfer::{download, TransferError};
