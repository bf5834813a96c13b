
use serenity::model::channel::PermissionOverwrite;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};

use crate::utility::mixed::BoxedFuture;
use crate::utility::outgoing::OutgoingMessage;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("missing permissions")]
    PermissionDenied,
    #[error("not found")]
    NotFound,
    #[error("transient failure: {0}")]
    Transient(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Category,
    Text,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub guild_id: GuildId,
    pub name: String,
    pub kind: ChannelKind,
    pub topic: Option<String>,
    pub parent_id: Option<ChannelId>,
}

pub struct ChannelSpec {
    pub name: String,
    pub parent: Option<ChannelId>,
    pub topic: Option<String>,
    pub overwrites: Vec<PermissionOverwrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    pub user_id: UserId,
    pub username: String,
    pub avatar_url: String,
}

pub type ChannelFilter = Box<dyn Fn(&ChannelInfo) -> bool + Send + Sync>;

/// Everything the bot needs from the chat platform. `Resolver` implements it
/// over serenity's HTTP client.
pub trait Gateway: Send + Sync {

    fn find_channel<'a>(&'a self, guild: GuildId, filter: ChannelFilter)
        -> BoxedFuture<'a, GatewayResult<Option<ChannelInfo>>>;

    /// `Ok(None)` when the channel does not exist (anymore).
    fn channel_info<'a>(&'a self, channel: ChannelId)
        -> BoxedFuture<'a, GatewayResult<Option<ChannelInfo>>>;

    fn create_category<'a>(&'a self, guild: GuildId, name: &'a str, overwrites: Vec<PermissionOverwrite>)
        -> BoxedFuture<'a, GatewayResult<ChannelInfo>>;

    fn create_channel<'a>(&'a self, guild: GuildId, spec: ChannelSpec)
        -> BoxedFuture<'a, GatewayResult<ChannelInfo>>;

    fn send_message<'a>(&'a self, channel: ChannelId, message: OutgoingMessage)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn delete_channel<'a>(&'a self, channel: ChannelId)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn edit_permissions<'a>(&'a self, channel: ChannelId, overwrite: PermissionOverwrite)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn ban_member<'a>(&'a self, guild: GuildId, user: UserId, reason: &'a str, delete_message_days: u8)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn kick_member<'a>(&'a self, guild: GuildId, user: UserId, reason: &'a str)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn send_direct_message<'a>(&'a self, user: UserId, message: OutgoingMessage)
        -> BoxedFuture<'a, GatewayResult<()>>;

    fn fetch_member<'a>(&'a self, guild: GuildId, user: UserId)
        -> BoxedFuture<'a, GatewayResult<Option<MemberInfo>>>;

    fn add_role<'a>(&'a self, guild: GuildId, user: UserId, role: RoleId)
        -> BoxedFuture<'a, GatewayResult<()>>;
}
