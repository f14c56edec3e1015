//! Read-only handles to remote canisters, bound to the anonymous identity.

use candid::CandidType;
use ic_agent::export::Principal;
use ic_agent::identity::AnonymousIdentity;
use ic_agent::{Agent, AgentError};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Default boundary node for mainnet queries.
pub const DEFAULT_IC_HOST: &str = "https://icp-api.io";

#[derive(Debug, Clone, Error)]
pub enum ActorError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Query {method} failed: {message}")]
    Call { method: String, message: String },
    #[error("Query {method} rejected: {message}")]
    Rejected { method: String, message: String },
    #[error("Failed to decode {method} reply: {message}")]
    Decode { method: String, message: String },
}

/// Builds [`ActorHandle`]s that share one lazily constructed anonymous agent.
///
/// Handles are not cached; creating one is cheap once the agent exists.
pub struct AnonymousActorFactory {
    host: String,
    fetch_root_key: bool,
    agent: OnceCell<Agent>,
}

impl AnonymousActorFactory {
    /// Create a factory targeting `host`.
    ///
    /// Set `fetch_root_key` only for local replicas; mainnet's root key is
    /// built into the agent.
    pub fn new(host: impl Into<String>, fetch_root_key: bool) -> Self {
        Self {
            host: host.into(),
            fetch_root_key,
            agent: OnceCell::new(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(DEFAULT_IC_HOST, false)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the shared agent has been constructed yet.
    pub fn has_agent(&self) -> bool {
        self.agent.initialized()
    }

    /// Bind the shared anonymous agent to the canister at `address`.
    ///
    /// The address is validated before the agent is touched, so a malformed
    /// address never triggers agent construction.
    pub async fn create_read_only_handle(&self, address: &str) -> Result<ActorHandle, ActorError> {
        let canister_id = Principal::from_text(address)
            .map_err(|e| ActorError::InvalidAddress(format!("{}: {}", address, e)))?;

        let agent = self.agent.get_or_try_init(|| self.build_agent()).await?;

        debug!("Created read-only handle for canister {}", canister_id);
        Ok(ActorHandle {
            agent: agent.clone(),
            canister_id,
        })
    }

    async fn build_agent(&self) -> Result<Agent, ActorError> {
        url::Url::parse(&self.host)
            .map_err(|e| ActorError::Connection(format!("invalid host {}: {}", self.host, e)))?;

        let agent = Agent::builder()
            .with_url(self.host.clone())
            .with_identity(AnonymousIdentity)
            .build()
            .map_err(|e| ActorError::Connection(e.to_string()))?;

        if self.fetch_root_key {
            agent
                .fetch_root_key()
                .await
                .map_err(|e| ActorError::Connection(format!("fetch_root_key: {}", e)))?;
        }

        info!("Anonymous agent ready for {}", self.host);
        Ok(agent)
    }
}

impl fmt::Debug for AnonymousActorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnonymousActorFactory")
            .field("host", &self.host)
            .field("fetch_root_key", &self.fetch_root_key)
            .field("has_agent", &self.has_agent())
            .finish()
    }
}

/// Capability to run query-class calls against one canister.
#[derive(Clone)]
pub struct ActorHandle {
    agent: Agent,
    canister_id: Principal,
}

impl ActorHandle {
    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    /// Run a no-argument query and decode its single return value.
    pub async fn query<R>(&self, method: &str) -> Result<R, ActorError>
    where
        R: CandidType + DeserializeOwned,
    {
        let bytes = self.query_bytes(method).await?;
        decode_reply(method, &bytes)
    }

    /// Run a no-argument query and return the undecoded candid reply.
    pub async fn query_bytes(&self, method: &str) -> Result<Vec<u8>, ActorError> {
        let arg = candid::encode_args(()).map_err(|e| ActorError::Call {
            method: method.to_string(),
            message: e.to_string(),
        })?;

        self.agent
            .query(&self.canister_id, method)
            .with_arg(arg)
            .call()
            .await
            .map_err(|e| call_error(method, e))
    }
}

fn call_error(method: &str, err: AgentError) -> ActorError {
    let method = method.to_string();
    let message = err.to_string();
    match err {
        AgentError::CertifiedReject { .. } | AgentError::UncertifiedReject { .. } => {
            ActorError::Rejected { method, message }
        }
        _ => ActorError::Call { method, message },
    }
}

/// Decode a candid reply holding a single value of type `R`.
pub fn decode_reply<R>(method: &str, bytes: &[u8]) -> Result<R, ActorError>
where
    R: CandidType + DeserializeOwned,
{
    candid::decode_one(bytes).map_err(|e| ActorError::Decode {
        method: method.to_string(),
        message: e.to_string(),
    })
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("canister_id", &self.canister_id.to_text())
            .finish()
    }
}
