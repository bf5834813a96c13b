pub mod setup;
pub mod message;
pub mod embed;
pub mod roles;

use crate::commands::command::{CommandError, CommandParams};
use crate::databases::WelcomeConfig;


pub const SETUP_FIRST: &str = "Primero debes configurar el sistema de bienvenida con `/welcome-setup`";

/// Applies `change` to the guild's welcome config, refusing guilds that never
/// ran `welcome-setup`.
pub async fn update_config<R>(params: &CommandParams<'_>, change: impl FnOnce(&mut WelcomeConfig) -> R) -> Result<R, CommandError> {
    let guild = params.guild_id.to_string();
    params.state.store.mutate(|data| data.welcome_configs.get_mut(&guild).map(change)).await?
        .ok_or_else(|| CommandError::Validation(SETUP_FIRST.to_string()))
}
