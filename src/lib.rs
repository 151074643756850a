//! CQL Thin Client for Rust
//!
//! A pure Rust implementation of a thin client for Cassandra-family
//! databases, speaking the CQL binary transport protocol (version 1)
//! directly over TCP without a native driver library.
//!
//! A [`Session`] holds exactly one blocking connection and issues one
//! request at a time: queries, prepared statements and executions, with
//! all CQL column types decoded into [`CqlValue`].
//!
//! # Example
//!
//! ```no_run
//! use cassandra_thin_rs::{Session, CqlValue, CONSISTENCY_ONE, Result};
//! use std::collections::HashMap;
//!
//! fn main() -> Result<()> {
//!     // Connect, authenticate if asked, and select a keyspace.
//!     let mut session = Session::connect("localhost:9042/demo", "user", "password")?;
//!
//!     // Plain query
//!     let outcome = session.query("SELECT name, age FROM users", CONSISTENCY_ONE)?;
//!     if let Some(rows) = outcome.rows() {
//!         for row in rows {
//!             println!("{:?} {:?}", row.get_by_name("name"), row.get_by_name("age"));
//!         }
//!     }
//!
//!     // Prepared statement with name-keyed bind values
//!     let stmt = session.prepare("INSERT INTO users (name, age) VALUES (?, ?)")?;
//!     let mut values = HashMap::new();
//!     values.insert("name".to_string(), CqlValue::Text("alice".to_string()));
//!     values.insert("age".to_string(), CqlValue::Int(30));
//!     session.execute(&stmt, &values, CONSISTENCY_ONE)?;
//!
//!     session.close();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod session;
pub mod statement;

// Re-export main types
pub use error::{Error, Result};
pub use protocol::result::{QueryOutcome, QueryResult};
pub use protocol::types::{ColumnInfo, ColumnSpec, CqlType, CqlValue, Row, RowsMetadata};
pub use session::{ConnectParams, Session};
pub use statement::PreparedStatement;

// Consistency levels at the crate root for call sites
pub use protocol::constants::{
    CONSISTENCY_ALL, CONSISTENCY_ANY, CONSISTENCY_EACH_QUORUM, CONSISTENCY_LOCAL_ONE,
    CONSISTENCY_LOCAL_QUORUM, CONSISTENCY_ONE, CONSISTENCY_QUORUM, CONSISTENCY_THREE,
    CONSISTENCY_TWO,
};
