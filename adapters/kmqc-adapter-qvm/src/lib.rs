//! KMQC Connection to a Remote QVM
//!
//! Compiles a [`Program`](kmqc_ir::Program) to its wire payload and posts it
//! to a quantum virtual machine endpoint over HTTPS.
//!
//! # Authentication
//!
//! Every request carries two headers, `X-User-Id` and `X-Api-Key`, taken from
//! a [`ConnectionConfig`]. Settings come from a YAML section and may be
//! overridden by environment variables:
//!
//! ```bash
//! export KMQC_ENDPOINT="https://qvm.example.org/api/execute"
//! export KMQC_USER_ID="alice"
//! export KMQC_API_KEY="your-api-key"
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kmqc_adapter_qvm::{ConnectionConfig, DEFAULT_SECTION, connect};
//! use kmqc_ir::{Program, gate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConnectionConfig::load(None, DEFAULT_SECTION)?;
//!     let conn = connect(config)?;
//!
//!     let program = Program::from_sources((gate::h(0_u32)?, gate::cnot(0_u32, 1_u32)?));
//!     let result = conn.execute(&program).await?;
//!     println!("{result}");
//!
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod connection;
mod error;

pub use api::{API_KEY_HEADER, QvmClient, USER_ID_HEADER};
pub use config::{
    ConfigError, ConnectionConfig, DEFAULT_SECTION, ENV_API_KEY, ENV_ENDPOINT, ENV_USER_ID,
};
pub use connection::{Connection, connect};
pub use error::{QvmError, QvmResult};
