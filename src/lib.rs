//! In-memory register of calendar arrangements with place, date-window and
//! grouped queries.
//!
//! # Examples
//!
//! Direct usage with [`core::store::ArrangementRegister`]:
//! ```
//! use arrangements::{arrangement::Arrangement, core::store::ArrangementRegister};
//!
//! let mut register = ArrangementRegister::new();
//! register.add(Arrangement::new(1, 100, 900, "A", "X", "H", "Talk"));
//! register.add_new(2, 100, 800, "B", "X", "H", "Talk");
//!
//! let grouped = register.grouped_and_sorted();
//! let ids: Vec<_> = grouped["X"]["Talk"].iter().map(|a| a.id()).collect();
//! assert_eq!(ids, vec![2, 1]);
//! assert_eq!(register.on_date(100).len(), 2);
//! ```
//!
//! Shared async usage through the single-writer runtime:
//! ```no_run
//! use arrangements::{
//!     core::store::ArrangementRegister,
//!     runtime::handle::{spawn_register, RuntimeConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_register(ArrangementRegister::new(), RuntimeConfig::default());
//! handle.add_new(1, 20240301, 1800, "Quiz", "Pub", "Kari", "Social").await.expect("add");
//! let at_pub = handle.at_place("Pub").await.expect("query");
//! assert_eq!(at_pub.len(), 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// Arrangement record type.
pub mod arrangement;
/// Register and index helpers.
pub mod core;
/// Numeric date windows and boundary ordering.
pub mod query;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive keys and constants.
pub mod types;
