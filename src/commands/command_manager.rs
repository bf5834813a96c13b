
use serenity::builder::CreateCommand;

use std::time::{Duration, Instant};

use crate::commands::*;
use crate::utility::*;


pub enum DispatchOutcome {
    Unknown,
    Denied(OutgoingMessage),
    CooldownActive { remaining: Duration, notice: OutgoingMessage },
    Completed(OutgoingMessage),
    Failed { error: CommandError, notice: OutgoingMessage },
}

impl DispatchOutcome {

    /// The interaction response, if any.
    pub fn reply(self) -> Option<OutgoingMessage> {
        match self {
            DispatchOutcome::Unknown                        => None,
            DispatchOutcome::Denied(notice)                 => Some(notice),
            DispatchOutcome::CooldownActive { notice, .. }  => Some(notice),
            DispatchOutcome::Completed(message)             => Some(message),
            DispatchOutcome::Failed { notice, .. }          => Some(notice),
        }
    }
}

pub struct CommandManager {
    commands: Vec<Box<dyn Command>>,
}

impl CommandManager {

    pub fn new() -> CommandManager {
        let mut commands: Vec<Box<dyn Command>> = vec![
            Box::new(BanCommand),
            Box::new(KickCommand),
            Box::new(WarnCommand),
            Box::new(WarningsCommand),
            Box::new(ClearWarningsCommand),
            Box::new(HelpCommand),
            Box::new(LanguageCommand),
            Box::new(MyLanguageCommand),
            Box::new(PrefixCommand),
        ];

        #[cfg(feature = "tickets")]
        commands.extend([
            Box::new(TicketSetupCommand) as Box<dyn Command>,
            Box::new(OpenTicketCommand),
            Box::new(ClaimTicketCommand),
            Box::new(CloseTicketCommand),
        ]);

        #[cfg(feature = "welcome")]
        commands.extend([
            Box::new(WelcomeSetupCommand) as Box<dyn Command>,
            Box::new(WelcomeMessageCommand),
            Box::new(WelcomeEmbedCommand),
            Box::new(WelcomeRolesCommand),
            Box::new(WelcomeTestCommand),
        ]);

        CommandManager { commands }
    }

    pub fn with_commands(commands: Vec<Box<dyn Command>>) -> CommandManager {
        CommandManager { commands }
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    pub fn registrations(&self) -> Vec<CreateCommand> {
        self.commands.iter()
            .filter_map(|command| command.define_usage().register())
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands.iter()
            .find(|command| command.is_triggered_by(name))
            .map(|command| command.as_ref())
    }

    /// Runs `name` for the invoking member. Unknown names are ignored. The
    /// cooldown is charged once the permission check passed, whatever the
    /// command's result.
    pub async fn dispatch<'a>(&'a self, name: &str, mut params: CommandParams<'a>) -> DispatchOutcome {

        let command = match self.find(name) {
            Some(command) => command,
            None => return DispatchOutcome::Unknown,
        };
        let usage = command.define_usage();
        let lang = params.lang;

        // buttons only live in channels the presser is allowed to see
        if !params.from_component && !command.permission(&params) {
            return DispatchOutcome::Denied(OutgoingMessage::text(lang.text(Text::PermissionDenied)).ephemeral());
        }

        let key = usage.name().to_string();
        let window = usage.get_cooldown();
        let now = Instant::now();
        let cooldowns = &params.state.cooldowns;
        if let Err(remaining) = cooldowns.try_acquire(&key, params.author, window, now).await {
            let seconds = whole_seconds(remaining).to_string();
            let notice = lang.render(Text::CooldownActive, &[("seconds", seconds.as_str()), ("command", key.as_str())]);
            return DispatchOutcome::CooldownActive {
                remaining,
                notice: OutgoingMessage::text(notice).ephemeral(),
            };
        }
        cooldowns.schedule_cleanup(&key, params.author, window, now);

        #[cfg(feature = "debug")]
        Logger::info_long("Running command", &key);

        params.commands = &self.commands;
        let author = params.author;
        match command.run(params).await {
            Ok(message) => DispatchOutcome::Completed(message),
            Err(error) => {
                let detail = format!("{} by {}: {}", key, author, error);
                match error.is_expected() {
                    true  => Logger::warn_long("Command rejected", &detail),
                    false => Logger::err_long("Command failed", &detail),
                }
                let notice = error.user_message(lang)
                    .unwrap_or_else(|| lang.text(Text::GenericFailure).to_string());
                DispatchOutcome::Failed { error, notice: OutgoingMessage::text(notice).ephemeral() }
            }
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use nonempty::nonempty;
    use serenity::model::id::{ChannelId, GuildId, UserId};
    use serenity::model::permissions::Permissions;

    const GUILD: GuildId = GuildId::new(100);
    const CHANNEL: ChannelId = ChannelId::new(7);
    const AUTHOR: UserId = UserId::new(200);

    struct FailingCommand;

    impl Command for FailingCommand {

        fn define_usage(&self) -> UsageBuilder {
            UsageBuilder::new(CommandType::Utility, nonempty!["explode".to_string(), "boom".to_string()])
                .cooldown(5)
        }

        fn run<'a>(&'a self, _params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
            Box::pin(async move {
                Err(CommandError::Gateway(GatewayError::Transient("socket closed".to_string())))
            })
        }
    }

    struct GuardedCommand;

    impl Command for GuardedCommand {

        fn define_usage(&self) -> UsageBuilder {
            UsageBuilder::new(CommandType::Moderation, nonempty!["guarded".to_string()])
                .permission(Permissions::BAN_MEMBERS)
        }

        fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
            Box::pin(async move {
                Ok(OutgoingMessage::text(format!("{} commands known", params.commands.len())))
            })
        }
    }

    fn manager() -> CommandManager {
        CommandManager::with_commands(vec![Box::new(FailingCommand), Box::new(GuardedCommand)])
    }

    #[tokio::test]
    async fn unknown_names_are_ignored() {
        let t = test_state().await;
        let params = CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::En);

        assert!(matches!(manager().dispatch("nope", params).await, DispatchOutcome::Unknown));
    }

    #[tokio::test]
    async fn failures_become_one_generic_notice() {
        let t = test_state().await;
        let manager = manager();

        let outcome = manager.dispatch("explode", CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::En)).await;

        match outcome {
            DispatchOutcome::Failed { notice, .. } => {
                assert_eq!(notice.content.as_deref(), Some("There was an error while executing this command!"));
                assert!(notice.ephemeral);
            },
            _ => panic!("expected a failure"),
        }
    }

    #[tokio::test]
    async fn cooldown_is_charged_even_when_the_command_fails() {
        let t = test_state().await;
        let manager = manager();

        manager.dispatch("explode", CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::En)).await;
        // aliases share the head name's cooldown
        let outcome = manager.dispatch("boom", CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::En)).await;

        match outcome {
            DispatchOutcome::CooldownActive { remaining, notice } => {
                assert!(remaining <= Duration::from_secs(5));
                assert!(notice.rendered().contains("before reusing `explode`"));
            },
            _ => panic!("expected a cooldown"),
        }

        let other = UserId::new(201);
        let outcome = manager.dispatch("explode", CommandParams::new(&t.state, GUILD, CHANNEL, other, Language::En)).await;
        assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn permission_denial_does_not_consume_the_cooldown() {
        let t = test_state().await;
        let manager = manager();

        let outcome = manager.dispatch("guarded", CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::Es)).await;
        assert!(matches!(outcome, DispatchOutcome::Denied(_)));
        assert_eq!(t.state.cooldowns.len().await, 0);

        let mut params = CommandParams::new(&t.state, GUILD, CHANNEL, AUTHOR, Language::En);
        params.member_permissions = Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS;
        let reply = manager.dispatch("GUARDED", params).await.reply().unwrap();
        assert_eq!(reply.content.as_deref(), Some("2 commands known"));
    }

    #[test]
    fn default_registry_registers_slash_commands_only() {
        let manager = CommandManager::new();
        let registered = manager.registrations().len();
        let component_only = manager.commands().iter()
            .filter(|command| command.define_usage().is_component_only())
            .count();
        assert_eq!(registered + component_only, manager.commands().len());
        assert!(manager.find("b").is_some());
        assert!(manager.find("clearwarnings").is_some());
    }
}
