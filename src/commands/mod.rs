
pub mod command_manager;

pub mod command;
pub use command::{Command, CommandParams, CommandArgs, ArgValue, CommandError};
pub use command_manager::CommandManager;

// ---- src/commands/casual/ ---- //

pub mod casual;

pub use casual::help::HelpCommand;
pub use casual::language::{LanguageCommand, MyLanguageCommand};
pub use casual::prefix::PrefixCommand;

// ---- src/commands/moderation/ ---- //

pub mod moderation;

pub use moderation::ban::BanCommand;
pub use moderation::kick::KickCommand;
pub use moderation::warn::WarnCommand;
pub use moderation::warnings::WarningsCommand;
pub use moderation::clear_warnings::ClearWarningsCommand;

// ---- src/commands/tickets/ ---- //

#[cfg(feature = "tickets")]
pub mod tickets;

#[cfg(feature = "tickets")]
pub use tickets::setup::TicketSetupCommand;
#[cfg(feature = "tickets")]
pub use tickets::open::OpenTicketCommand;
#[cfg(feature = "tickets")]
pub use tickets::claim::ClaimTicketCommand;
#[cfg(feature = "tickets")]
pub use tickets::close::CloseTicketCommand;

// ---- src/commands/welcome/ ---- //

#[cfg(feature = "welcome")]
pub mod welcome;

#[cfg(feature = "welcome")]
pub use welcome::setup::WelcomeSetupCommand;
#[cfg(feature = "welcome")]
pub use welcome::message::WelcomeMessageCommand;
#[cfg(feature = "welcome")]
pub use welcome::embed::WelcomeEmbedCommand;
#[cfg(feature = "welcome")]
pub use welcome::roles::WelcomeRolesCommand;
#[cfg(feature = "welcome")]
pub use welcome::test::WelcomeTestCommand;
