//! API Queue - Admission-controlled execution for rate-limited backends
//!
//! Runs asynchronous operations with bounded concurrency, strict FIFO
//! queueing of the overflow, and a time-bounded result cache keyed by an
//! optional identifier.
//!
//! ```no_run
//! use std::time::Duration;
//! use api_queue::{Executor, ExecutorConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let executor: Executor<String> =
//!     Executor::new(ExecutorConfig::new(5, Duration::from_secs(30)))?;
//!
//! let body = executor
//!     .submit(|| async { Ok::<_, std::io::Error>("pong".to_string()) }, Some("ping"))
//!     .await?;
//! assert_eq!(body, "pong");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod queue;
pub mod rewards;

pub use api::AppState;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ExecutorConfig};
pub use error::{ConfigError, StoreError};
pub use queue::{Executor, ExecutorStatus, Submission};
