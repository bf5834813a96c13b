
use serenity::builder::CreateChannel;
use serenity::http::{Http, HttpError};
use serenity::model::channel::{Channel, ChannelType, GuildChannel, PermissionOverwrite};
use serenity::model::error::Error as ModelError;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

use std::sync::Arc;

use crate::utility::gateway::*;
use crate::utility::mixed::BoxedFuture;
use crate::utility::outgoing::OutgoingMessage;
use crate::utility::traits::ToMessage;


impl From<serenity::Error> for GatewayError {
    fn from(why: serenity::Error) -> Self {
        match &why {
            serenity::Error::Http(http) => match http.status_code().map(|status| status.as_u16()) {
                Some(401) | Some(403) => GatewayError::PermissionDenied,
                Some(404)             => GatewayError::NotFound,
                _                     => GatewayError::Transient(why.to_string()),
            },
            serenity::Error::Model(ModelError::InvalidPermissions { .. }) => GatewayError::PermissionDenied,
            serenity::Error::Model(ModelError::Hierarchy) => GatewayError::PermissionDenied,
            _ => GatewayError::Transient(why.to_string()),
        }
    }
}

fn is_missing(why: &serenity::Error) -> bool {
    matches!(why, serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
        if response.status_code.as_u16() == 404)
}

fn channel_info(channel: &GuildChannel) -> ChannelInfo {
    ChannelInfo {
        id: channel.id,
        guild_id: channel.guild_id,
        name: channel.name.clone(),
        kind: match channel.kind {
            ChannelType::Category => ChannelKind::Category,
            ChannelType::Text     => ChannelKind::Text,
            _                     => ChannelKind::Other,
        },
        topic: channel.topic.clone(),
        parent_id: channel.parent_id,
    }
}

/// `Gateway` over serenity's REST client.
#[derive(Clone)]
pub struct Resolver {
    http: Arc<Http>,
}

impl Resolver {

    pub fn new(http: Arc<Http>) -> Resolver {
        Resolver { http }
    }

}

impl Gateway for Resolver {

    fn find_channel<'a>(&'a self, guild: GuildId, filter: ChannelFilter)
        -> BoxedFuture<'a, GatewayResult<Option<ChannelInfo>>> {
        Box::pin(async move {
            let channels = guild.channels(&self.http).await?;
            Ok(channels.values()
                .map(channel_info)
                .find(|channel| filter(channel)))
        })
    }

    fn channel_info<'a>(&'a self, channel: ChannelId)
        -> BoxedFuture<'a, GatewayResult<Option<ChannelInfo>>> {
        Box::pin(async move {
            match channel.to_channel(&*self.http).await {
                Ok(Channel::Guild(channel)) => Ok(Some(channel_info(&channel))),
                Ok(_) => Ok(None),
                Err(why) if is_missing(&why) => Ok(None),
                Err(why) => Err(why.into()),
            }
        })
    }

    fn create_category<'a>(&'a self, guild: GuildId, name: &'a str, overwrites: Vec<PermissionOverwrite>)
        -> BoxedFuture<'a, GatewayResult<ChannelInfo>> {
        Box::pin(async move {
            let builder = CreateChannel::new(name)
                .kind(ChannelType::Category)
                .permissions(overwrites);
            let category = guild.create_channel(&*self.http, builder).await?;
            Ok(channel_info(&category))
        })
    }

    fn create_channel<'a>(&'a self, guild: GuildId, spec: ChannelSpec)
        -> BoxedFuture<'a, GatewayResult<ChannelInfo>> {
        Box::pin(async move {
            let mut builder = CreateChannel::new(spec.name)
                .kind(ChannelType::Text)
                .permissions(spec.overwrites);
            if let Some(parent) = spec.parent {
                builder = builder.category(parent);
            }
            if let Some(topic) = spec.topic {
                builder = builder.topic(topic);
            }
            let channel = guild.create_channel(&*self.http, builder).await?;
            Ok(channel_info(&channel))
        })
    }

    fn send_message<'a>(&'a self, channel: ChannelId, message: OutgoingMessage)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            channel.send_message(&*self.http, message.to_message()).await?;
            Ok(())
        })
    }

    fn delete_channel<'a>(&'a self, channel: ChannelId)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            channel.delete(&*self.http).await?;
            Ok(())
        })
    }

    fn edit_permissions<'a>(&'a self, channel: ChannelId, overwrite: PermissionOverwrite)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            channel.create_permission(&self.http, overwrite).await?;
            Ok(())
        })
    }

    fn ban_member<'a>(&'a self, guild: GuildId, user: UserId, reason: &'a str, delete_message_days: u8)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            guild.ban_with_reason(&self.http, user, delete_message_days, reason).await?;
            Ok(())
        })
    }

    fn kick_member<'a>(&'a self, guild: GuildId, user: UserId, reason: &'a str)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            guild.kick_with_reason(&self.http, user, reason).await?;
            Ok(())
        })
    }

    fn send_direct_message<'a>(&'a self, user: UserId, message: OutgoingMessage)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            user.direct_message(&*self.http, message.to_message()).await?;
            Ok(())
        })
    }

    fn fetch_member<'a>(&'a self, guild: GuildId, user: UserId)
        -> BoxedFuture<'a, GatewayResult<Option<MemberInfo>>> {
        Box::pin(async move {
            match guild.member(&*self.http, user).await {
                Ok(member) => Ok(Some(MemberInfo {
                    user_id: member.user.id,
                    username: member.user.name.clone(),
                    avatar_url: member.face(),
                })),
                Err(why) if is_missing(&why) => Ok(None),
                Err(why) => Err(why.into()),
            }
        })
    }

    fn add_role<'a>(&'a self, guild: GuildId, user: UserId, role: RoleId)
        -> BoxedFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            self.http.add_member_role(guild, user, role, Some("Welcome role")).await?;
            Ok(())
        })
    }

}
