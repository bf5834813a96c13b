
use serenity::async_trait;
use serenity::model::application::{
    Command as ApplicationCommand,
    CommandDataOption,
    CommandDataOptionValue,
    Interaction,
};
use serenity::model::channel::{GuildChannel, Message};
use serenity::model::gateway::Ready;
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::permissions::Permissions;
use serenity::model::user::User;
use serenity::prelude::*;

use crate::commands::*;
use crate::state::BotState;
use crate::utility::*;


/// Converts one resolved slash option, `None` for kinds no command declares.
fn arg_value(value: &CommandDataOptionValue) -> Option<ArgValue> {
    match value {
        CommandDataOptionValue::User(user)       => Some(ArgValue::User(*user)),
        CommandDataOptionValue::String(text)     => Some(ArgValue::Text(text.clone())),
        CommandDataOptionValue::Integer(number)  => Some(ArgValue::Integer(*number)),
        CommandDataOptionValue::Channel(channel) => Some(ArgValue::Channel(*channel)),
        CommandDataOptionValue::Role(role)       => Some(ArgValue::Role(*role)),
        CommandDataOptionValue::Boolean(value)   => Some(ArgValue::Boolean(*value)),
        _ => None,
    }
}

fn command_args(options: &[CommandDataOption]) -> CommandArgs {
    let mut args = CommandArgs::new();
    for option in options.iter() {
        if let Some(value) = arg_value(&option.value) {
            args.insert(&option.name, value);
        }
    }
    args
}

async fn guild_summary(ctx: &Context, guild: GuildId) -> (String, u64) {

    let cached = guild.to_guild_cached(&ctx.cache)
        .map(|guild| (guild.name.clone(), guild.member_count));
    if let Some(summary) = cached {
        return summary;
    }

    match ctx.http.get_guild_with_counts(guild).await {
        Ok(partial) => (partial.name, partial.approximate_member_count.unwrap_or(0)),
        Err(why) => {
            Logger::warn_long(&format!("Couldn't resolve guild {}", guild), &why.to_string());
            (String::new(), 0)
        }
    }
}

pub struct Handler {
    state: BotState,
    command_manager: CommandManager,
}

impl Handler {

    pub fn new(state: BotState, command_manager: CommandManager) -> Handler {
        Handler {
            state,
            command_manager,
        }
    }

    async fn params<'a>(&'a self, ctx: &Context, guild: GuildId, channel: ChannelId, user: &User, member: Option<&Member>) -> CommandParams<'a> {
        let lang = self.state.language_of(user.id).await;
        let (guild_name, member_count) = guild_summary(ctx, guild).await;

        let mut params = CommandParams::new(&self.state, guild, channel, user.id, lang);
        params.guild_name = guild_name;
        params.member_count = member_count;
        params.author_tag = user.name.clone();
        params.author_avatar = Some(user.face());
        params.member_permissions = member
            .and_then(|member| member.permissions)
            .unwrap_or_else(Permissions::empty);
        params
    }

}

#[async_trait]
impl EventHandler for Handler {

    async fn ready(&self, ctx: Context, ready: Ready) {

        Logger::info_long("Connected as", &ready.user.name);

        #[cfg(feature = "commands")]
        match ApplicationCommand::set_global_commands(&ctx.http, self.command_manager.registrations()).await {
            Ok(registered) => Logger::info_long("Registered slash commands", &registered.len().to_string()),
            Err(why) => Logger::err_long("Couldn't register slash commands", &why.to_string()),
        };
    }

    #[cfg(feature = "commands")]
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {

        match interaction {
            Interaction::Command(command) => {
                let Some(guild) = command.guild_id else { return };

                let mut params = self.params(&ctx, guild, command.channel_id, &command.user, command.member.as_deref()).await;
                params.args = command_args(&command.data.options);

                #[cfg(feature = "debug")]
                Logger::info_long("Slash command", &command.data.name);

                let outcome = self.command_manager.dispatch(&command.data.name, params).await;
                if let Some(reply) = outcome.reply() {
                    if let Err(why) = command.create_response(&ctx.http, reply.to_response()).await {
                        Logger::err_long("Couldn't answer interaction", &why.to_string());
                    }
                }
            },
            Interaction::Component(component) => {
                let Some(guild) = component.guild_id else { return };

                let mut params = self.params(&ctx, guild, component.channel_id, &component.user, component.member.as_ref()).await;
                params.from_component = true;

                let outcome = self.command_manager.dispatch(&component.data.custom_id, params).await;
                if let Some(reply) = outcome.reply() {
                    if let Err(why) = component.create_response(&ctx.http, reply.to_response()).await {
                        Logger::err_long("Couldn't answer button press", &why.to_string());
                    }
                }
            },
            _ => {}
        }
    }

    #[cfg(feature = "welcome")]
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {

        let guild = new_member.guild_id;
        let (server, member_count) = guild_summary(&ctx, guild).await;
        let avatar = new_member.user.face();
        let greeting = crate::utility::welcome::Greeting {
            user: new_member.user.id,
            username: &new_member.user.name,
            server: &server,
            member_count,
            avatar_url: Some(&avatar),
        };

        if let Err(why) = crate::utility::welcome::greet(self.state.gateway.as_ref(), &self.state.store, guild, &greeting).await {
            Logger::err_long(&format!("Couldn't welcome {}", new_member.user.id), &why.to_string());
        }
    }

    #[cfg(feature = "tickets")]
    async fn channel_delete(&self, _ctx: Context, channel: GuildChannel, _messages: Option<Vec<Message>>) {
        match self.state.tickets.forget_channel(channel.guild_id, channel.id).await {
            Ok(true) => Logger::info_long("Dropped record of deleted ticket channel", &channel.name),
            Ok(false) => {},
            Err(why) => Logger::err_long("Couldn't drop deleted ticket channel", &why.to_string()),
        }
    }

}
