pub mod ban;
pub mod kick;
pub mod warn;
pub mod warnings;
pub mod clear_warnings;

use crate::commands::command::CommandArgs;


pub const NO_REASON: &str = "No reason provided";

pub fn reason_of<'a>(args: &'a CommandArgs) -> &'a str {
    args.text("reason")
        .map(|reason| reason.trim())
        .filter(|reason| !reason.is_empty())
        .unwrap_or(NO_REASON)
}
