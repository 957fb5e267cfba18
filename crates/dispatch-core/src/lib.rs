//! dispatch-core: schedule aggregation over heterogeneous work records.
//!
//! Three source collections (projects, work orders, recurring service tasks)
//! are normalized into one [`model::item::WorkItem`] sequence, filtered, and
//! bucketed under the dates a day/week/month calendar view displays. The
//! pipeline stages are pure and synchronous; everything is recomputed from
//! the sources per invocation.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at I/O seams, [`error::DispatchError`] for
//!   typed domain failures. The pipeline itself has no error path.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`).

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod schedule;
pub mod timing;
