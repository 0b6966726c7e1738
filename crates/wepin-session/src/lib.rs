/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public wallet session crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod config;
pub mod error;
pub mod sandbox;
pub mod sdk;
pub mod session;
pub mod types;
pub mod units;

pub use config::SessionConfig;
pub use error::{Result, SessionError};

// Re-export the SDK seams
pub use sdk::{AppCredentials, BlockchainProvider, LoginSdk, ProviderSdk, Services, WalletSdk};

// Re-export commonly used session types
pub use session::{
    ChannelNotifier,
    DialogOutcome,
    InputKind,
    InputRequest,
    InputSource,
    LifecycleEvent,
    LifecycleMachine,
    MemoryNotifier,
    Notice,
    NoticeLevel,
    Notifier,
    RegisterOutcome,
    ScriptedInput,
    SessionManager,
    SessionStore,
    TransitionError,
};

pub use sandbox::{Sandbox, SandboxConfig, SandboxOperation};

// Re-export all types
pub use types::*;
