
use serenity::model::id::{GuildId, UserId};

use std::sync::Arc;

use crate::databases::*;
use crate::utility::*;


pub const DEFAULT_PREFIX: &str = "/";

/// Everything a handler needs, built once in `main` and shared by reference.
pub struct BotState {
    pub config: BotConfig,
    pub store: Store,
    pub gateway: Arc<dyn Gateway>,
    pub ledger: ModLedger,
    pub cooldowns: Cooldowns,
    #[cfg(feature = "tickets")]
    pub tickets: TicketHandler,
}

impl BotState {

    pub fn new(config: BotConfig, store: Store, gateway: Arc<dyn Gateway>) -> BotState {
        BotState {
            ledger: ModLedger::new(store.clone(), Arc::clone(&gateway)),
            cooldowns: Cooldowns::new(),
            #[cfg(feature = "tickets")]
            tickets: TicketHandler::new(store.clone(), Arc::clone(&gateway), config.staff_role, config.close_delay),
            config,
            store,
            gateway,
        }
    }

    /// The user's stored preference, else the configured default.
    pub async fn language_of(&self, user: UserId) -> Language {
        self.store.read(|data| data.language_of(user).and_then(Language::from_code)).await
            .unwrap_or(self.config.default_language)
    }

    pub async fn prefix_of(&self, guild: GuildId) -> String {
        self.store.read(|data| data.prefixes.get(&guild.to_string()).cloned()).await
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

}


#[cfg(test)]
pub mod testing {

    use super::*;
    use crate::commands::command::{CommandArgs, CommandParams};
    use crate::utility::gateway::mock::MockGateway;
    use serenity::model::id::{ChannelId, RoleId};
    use serenity::model::permissions::Permissions;
    use std::time::Duration;

    pub const STAFF: RoleId = RoleId::new(400);
    pub const GUILD: GuildId = GuildId::new(100);
    pub const CHANNEL: ChannelId = ChannelId::new(7);

    /// A slash invocation in `GUILD` by a member holding every permission.
    pub fn invocation<'a>(state: &'a BotState, author: UserId, args: CommandArgs) -> CommandParams<'a> {
        let mut params = CommandParams::new(state, GUILD, CHANNEL, author, Language::En);
        params.guild_name = "Test Guild".to_string();
        params.member_count = 10;
        params.author_tag = format!("user{}", author);
        params.member_permissions = Permissions::all();
        params.args = args;
        params
    }

    pub struct TestState {
        pub state: BotState,
        pub gateway: Arc<MockGateway>,
        _dir: tempfile::TempDir,
    }

    pub async fn test_state() -> TestState {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("config.json")).await.unwrap();
        let gateway = Arc::new(MockGateway::new());
        let config = BotConfig {
            token: "token".to_string(),
            staff_role: STAFF,
            store_path: store.path().to_path_buf(),
            close_delay: Duration::from_millis(20),
            default_language: Language::En,
        };
        TestState {
            state: BotState::new(config, store, gateway.clone()),
            gateway,
            _dir: dir,
        }
    }
}
