
pub mod traits;
pub mod mixed;
pub mod logger;
pub mod outgoing;
pub mod log_builder;
pub mod gateway;
pub mod resolver;
pub mod permission_handler;
pub mod usage_builder;
pub mod cooldowns;
pub mod locale;
pub mod bot_config;
pub mod mod_ledger;
pub mod ticket_handler;

#[cfg(feature = "welcome")]
pub mod welcome;

pub use traits::ToMessage;
pub use mixed::{BoxedFuture, whole_seconds};
pub use logger::Logger;
pub use outgoing::*;
pub use log_builder::LogBuilder;
pub use gateway::{Gateway, GatewayError, ChannelInfo, ChannelKind, ChannelSpec};
pub use resolver::Resolver;
pub use permission_handler::{PermissionHandler, member_grant, OWNER_ACCESS, STAFF_ACCESS};
pub use usage_builder::{UsageBuilder, CommandType, ParameterKind};
pub use cooldowns::Cooldowns;
pub use locale::{Language, Text};
pub use bot_config::BotConfig;
pub use mod_ledger::{ModLedger, ModRequest, ModerationError, ClearOutcome};
pub use ticket_handler::{TicketHandler, TicketError};
