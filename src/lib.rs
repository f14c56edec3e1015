pub mod actor;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod error;
pub mod orchestration;
pub mod state;

pub use actor::{ActorError, ActorHandle, AnonymousActorFactory};
pub use config::Config;
pub use datasource::{
    CanisterPoolSource, FetchError, MockPoolSource, PoolSource, PriceClient, PriceQuery,
};
pub use domain::{
    normalize, AmountError, DecimalAmount, FeeTotals, MonetaryAmount, PoolKey, PoolRecord,
    RawFeeTotals, TokenId, TokenPrice, DIVISOR,
};
pub use error::AppError;
pub use orchestration::run_until;
pub use state::{FeeAccountingState, PoolStore, RefreshOutcome, StateEvent, SyncState};
