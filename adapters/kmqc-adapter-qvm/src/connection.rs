//! Program execution on a remote QVM.

use kmqc_ir::{Payload, Program, compile};
use serde_json::Value;
use tracing::{info, instrument};

use crate::api::QvmClient;
use crate::config::ConnectionConfig;
use crate::error::QvmResult;

/// A validated connection to one QVM endpoint.
///
/// Every [`execute`](Connection::execute) compiles the program locally and
/// then sends a single request; nothing is retried.
#[derive(Debug)]
pub struct Connection {
    client: QvmClient,
}

impl Connection {
    /// Validate `config` and build the HTTP client.
    pub fn new(config: ConnectionConfig) -> QvmResult<Self> {
        config.validate()?;
        let client = QvmClient::new(&config)?;
        Ok(Self { client })
    }

    /// The URL programs are posted to.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// The payload [`execute`](Connection::execute) would send for `program`.
    pub fn payload(&self, program: &Program) -> QvmResult<Payload> {
        Ok(compile(program)?)
    }

    /// Compile `program` and run it on the endpoint.
    ///
    /// A compile failure is returned before any network activity.
    #[instrument(skip(self, program))]
    pub async fn execute(&self, program: &Program) -> QvmResult<Value> {
        let payload = self.payload(program)?;
        info!(
            ops = payload.circuit().len(),
            units = payload.count_units(),
            dimension = ?payload.dimension(),
            "Executing program on {}",
            self.endpoint()
        );
        self.client.post_json(&payload).await
    }
}

/// Open a connection from `config`.
pub fn connect(config: ConnectionConfig) -> QvmResult<Connection> {
    Connection::new(config)
}
