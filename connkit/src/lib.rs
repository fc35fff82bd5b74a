//! # connkit - Connector and Customizer Framework
//!
//! `connkit` lets an identity-management source be integrated by writing one
//! async handler per standard command, and lets deployments adjust a
//! command's input or output with before/after customizer hooks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use connkit::prelude::*;
//!
//! let connector = CommandRegistry::builder()
//!     .std_test_connection(|_ctx, _input, res| async move {
//!         res.send(StdTestConnectionOutput::default())
//!     })
//!     .build();
//!
//! let customizer = HookChain::builder()
//!     .after_std_account_read(|_ctx, mut output| async move {
//!         output.attributes.get_or_insert_with(Default::default).insert("location".into(), "Austin".into());
//!         Ok::<_, ConnectorError>(output)
//!     })
//!     .build();
//!
//! let runtime = Runtime::new(connector).with_customizer(customizer);
//! let mut sink = NdjsonSink::stdout();
//! runtime.invoke(Command::TestConnection, EmptyContext::shared(), json!({}), &mut sink).await?;
//! ```

#![deny(clippy::wildcard_imports)]

pub use connkit_core::{
    // Context
    AssumeRoleRequest,
    // Errors
    BoxError,
    // Commands
    Command,
    // Handler
    CommandHandler,
    ConnectorError,
    Context,
    ContextRef,
    Credentials,
    // Hook
    CustomizerHook,
    DynCommandHandler,
    DynCustomizerHook,
    EmptyContext,
    HookKey,
    // Output
    OutputSink,
    Phase,
    RawResponse,
    Response,
    ResponseType,
    StdCommand,
    TypedHandler,
    TypedHook,
    commands,
};

// Dispatch and runtime
pub use connkit_std::{
    CONFIG_ENV, CommandRegistry, Config, HookChain, HookChainBuilder, InvokeRequest, NdjsonSink,
    RegistryBuilder, Runtime,
};

/// Standard command payloads.
pub mod models {
    #![allow(clippy::wildcard_imports)]
    pub use connkit_core::models::*;
}

/// Backend client used by the template connector.
pub mod client {
    pub use connkit_std::client::{Account, AccountClient, AccountStore, MockAccountStore};
}

/// Starter connector and customizer.
pub mod template {
    pub use connkit_std::template::{connector, connector_with_client, customizer};
}

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use connkit_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use connkit_std::testing::*;
}

/// Prelude module - common imports for connkit.
///
/// # Usage
///
/// ```rust,ignore
/// use connkit::prelude::*;
/// ```
pub mod prelude {
    #![allow(clippy::wildcard_imports)]
    pub use crate::{
        BoxError, Command, CommandHandler, CommandRegistry, Config, ConnectorError, ContextRef,
        CustomizerHook, EmptyContext, HookChain, NdjsonSink, OutputSink, Phase, RawResponse,
        Response, Runtime, models::*,
    };
}
