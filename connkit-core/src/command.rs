//! Standard command identifiers and hook phases.
//!
//! The connector runtime defines a closed set of standard commands. Each one
//! has a stable wire name (`std:account:read`, ...) used in invocation
//! envelopes and in log output.

use crate::error::ConnectorError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fmt, str::FromStr};

/// A standard connector command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Command {
    /// `std:test-connection`
    #[serde(rename = "std:test-connection")]
    TestConnection,
    /// `std:account:list`
    #[serde(rename = "std:account:list")]
    AccountList,
    /// `std:account:read`
    #[serde(rename = "std:account:read")]
    AccountRead,
    /// `std:account:create`
    #[serde(rename = "std:account:create")]
    AccountCreate,
    /// `std:account:update`
    #[serde(rename = "std:account:update")]
    AccountUpdate,
    /// `std:account:delete`
    #[serde(rename = "std:account:delete")]
    AccountDelete,
    /// `std:account:discover-schema`
    #[serde(rename = "std:account:discover-schema")]
    AccountDiscoverSchema,
    /// `std:entitlement:list`
    #[serde(rename = "std:entitlement:list")]
    EntitlementList,
    /// `std:entitlement:read`
    #[serde(rename = "std:entitlement:read")]
    EntitlementRead,
    /// `std:change-password`
    #[serde(rename = "std:change-password")]
    ChangePassword,
    /// `std:source-data:discover`
    #[serde(rename = "std:source-data:discover")]
    SourceDataDiscover,
    /// `std:source-data:read`
    #[serde(rename = "std:source-data:read")]
    SourceDataRead,
    /// `std:spec:read`
    #[serde(rename = "std:spec:read")]
    SpecRead,
}

impl Command {
    /// Every standard command, in wire-name order of the runtime contract.
    pub const ALL: [Command; 13] = [
        Command::TestConnection,
        Command::AccountList,
        Command::AccountRead,
        Command::AccountCreate,
        Command::AccountUpdate,
        Command::AccountDelete,
        Command::AccountDiscoverSchema,
        Command::EntitlementList,
        Command::EntitlementRead,
        Command::ChangePassword,
        Command::SourceDataDiscover,
        Command::SourceDataRead,
        Command::SpecRead,
    ];

    /// The wire name of the command.
    pub const fn as_str(self) -> &'static str {
        match self {
            Command::TestConnection => "std:test-connection",
            Command::AccountList => "std:account:list",
            Command::AccountRead => "std:account:read",
            Command::AccountCreate => "std:account:create",
            Command::AccountUpdate => "std:account:update",
            Command::AccountDelete => "std:account:delete",
            Command::AccountDiscoverSchema => "std:account:discover-schema",
            Command::EntitlementList => "std:entitlement:list",
            Command::EntitlementRead => "std:entitlement:read",
            Command::ChangePassword => "std:change-password",
            Command::SourceDataDiscover => "std:source-data:discover",
            Command::SourceDataRead => "std:source-data:read",
            Command::SpecRead => "std:spec:read",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| ConnectorError::UnknownCommand(s.to_string()))
    }
}

/// Position of a customizer hook relative to the command handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Runs on the command input before the handler.
    Before,
    /// Runs on each output record after the handler emits it.
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Before => f.write_str("before"),
            Phase::After => f.write_str("after"),
        }
    }
}

/// Lookup key of a customizer hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookKey {
    /// When the hook runs.
    pub phase: Phase,
    /// The command the hook is attached to.
    pub command: Command,
}

impl HookKey {
    /// Create a hook key.
    pub const fn new(phase: Phase, command: Command) -> Self {
        Self { phase, command }
    }
}

impl fmt::Display for HookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.phase, self.command)
    }
}

/// Binds a standard command to its typed input and output records.
///
/// Implemented by the marker types in [`commands`]; used by the typed
/// registration methods to convert records at the dispatch seam.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a standard command",
    label = "missing `StdCommand` implementation",
    note = "Use one of the marker types in `connkit_core::commands`."
)]
pub trait StdCommand: Send + Sync + 'static {
    /// The command identifier.
    const COMMAND: Command;
    /// The record the handler receives.
    type Input: Serialize + DeserializeOwned + Send + 'static;
    /// The record type the handler emits.
    type Output: Serialize + DeserializeOwned + Send + 'static;
}

/// Marker types for each standard command.
pub mod commands {
    use super::{Command, StdCommand};
    use crate::models::{
        SourceData, StdAccountCreateInput, StdAccountDeleteInput, StdAccountDeleteOutput,
        StdAccountDiscoverSchemaInput, StdAccountListInput, StdAccountOutput,
        StdAccountReadInput, StdAccountSchema, StdAccountUpdateInput, StdChangePasswordInput,
        StdChangePasswordOutput, StdEntitlementListInput, StdEntitlementOutput,
        StdEntitlementReadInput, StdSourceDataDiscoverInput, StdSourceDataReadInput,
        StdSpecReadInput, StdSpecReadOutput, StdTestConnectionInput, StdTestConnectionOutput,
    };

    macro_rules! std_command {
        ($(#[$meta:meta])* $name:ident => $command:ident, $input:ty, $output:ty) => {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl StdCommand for $name {
                const COMMAND: Command = Command::$command;
                type Input = $input;
                type Output = $output;
            }
        };
    }

    std_command!(
        /// `std:test-connection`
        TestConnection => TestConnection, StdTestConnectionInput, StdTestConnectionOutput
    );
    std_command!(
        /// `std:account:list`
        AccountList => AccountList, StdAccountListInput, StdAccountOutput
    );
    std_command!(
        /// `std:account:read`
        AccountRead => AccountRead, StdAccountReadInput, StdAccountOutput
    );
    std_command!(
        /// `std:account:create`
        AccountCreate => AccountCreate, StdAccountCreateInput, StdAccountOutput
    );
    std_command!(
        /// `std:account:update`
        AccountUpdate => AccountUpdate, StdAccountUpdateInput, StdAccountOutput
    );
    std_command!(
        /// `std:account:delete`
        AccountDelete => AccountDelete, StdAccountDeleteInput, StdAccountDeleteOutput
    );
    std_command!(
        /// `std:account:discover-schema`
        AccountDiscoverSchema => AccountDiscoverSchema, StdAccountDiscoverSchemaInput, StdAccountSchema
    );
    std_command!(
        /// `std:entitlement:list`
        EntitlementList => EntitlementList, StdEntitlementListInput, StdEntitlementOutput
    );
    std_command!(
        /// `std:entitlement:read`
        EntitlementRead => EntitlementRead, StdEntitlementReadInput, StdEntitlementOutput
    );
    std_command!(
        /// `std:change-password`
        ChangePassword => ChangePassword, StdChangePasswordInput, StdChangePasswordOutput
    );
    std_command!(
        /// `std:source-data:discover`
        SourceDataDiscover => SourceDataDiscover, StdSourceDataDiscoverInput, SourceData
    );
    std_command!(
        /// `std:source-data:read`
        SourceDataRead => SourceDataRead, StdSourceDataReadInput, SourceData
    );
    std_command!(
        /// `std:spec:read`
        SpecRead => SpecRead, StdSpecReadInput, StdSpecReadOutput
    );
}
