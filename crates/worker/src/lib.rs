//! `mapant-worker` -- worker node for the mapant.fr map generation.
//!
//! Polls the mapant dispatch endpoint for the next unit of work, executes
//! it with the external processing toolchain, and polls again. See
//! [`dispatch`] for the loop itself and [`lidar`] for the one pipeline
//! that is fully implemented today.

pub mod dispatch;
pub mod lidar;
pub mod process;
pub mod pyramid;
pub mod render;
