
use serenity::model::permissions::Permissions;
use serenity::model::channel::{PermissionOverwriteType, PermissionOverwrite};
use serenity::model::id::{GuildId, RoleId, UserId};

use crate::utility::traits::ToList;


pub const OWNER_ACCESS: Permissions = Permissions::VIEW_CHANNEL
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::ATTACH_FILES);

pub const STAFF_ACCESS: Permissions = Permissions::VIEW_CHANNEL
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::MANAGE_MESSAGES);


/// Collects channel permission overwrites; the everyone role shares the
/// guild's id.
#[derive(Default)]
pub struct PermissionHandler {
    overwrites: Vec<PermissionOverwrite>,
}

impl PermissionHandler {

    pub fn new() -> PermissionHandler {
        PermissionHandler::default()
    }

    pub fn deny_everyone(self, guild: GuildId, permission: Permissions) -> Self {
        self.deny_role(permission, RoleId::new(guild.get()))
    }

    pub fn allow_role(mut self, permission: Permissions, ids: impl ToList<RoleId>) -> Self {
        self.overwrites.extend(ids.to_list().into_iter().map(|id| {
            PermissionOverwrite {
                allow: permission,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(id),
            }
        }));
        self
    }

    pub fn deny_role(mut self, permission: Permissions, ids: impl ToList<RoleId>) -> Self {
        self.overwrites.extend(ids.to_list().into_iter().map(|id| {
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: permission,
                kind: PermissionOverwriteType::Role(id),
            }
        }));
        self
    }

    pub fn allow_member(mut self, permission: Permissions, ids: impl ToList<UserId>) -> Self {
        self.overwrites.extend(ids.to_list().into_iter().map(|id| {
            PermissionOverwrite {
                allow: permission,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(id),
            }
        }));
        self
    }

    pub fn build(self) -> Vec<PermissionOverwrite> {
        self.overwrites
    }

}

pub fn member_grant(permission: Permissions, user: UserId) -> PermissionOverwrite {
    PermissionOverwrite {
        allow: permission,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Member(user),
    }
}
