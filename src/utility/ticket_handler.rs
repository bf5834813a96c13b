
use serenity::model::permissions::Permissions;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use once_cell::sync::Lazy;
use regex::Regex;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::databases::*;
use crate::utility::*;


pub const TICKET_CATEGORY: &str = "Tickets";
pub const CREATE_TICKET_ID: &str = "create_ticket";
pub const CLAIM_TICKET_ID: &str = "claim_ticket";
pub const CLOSE_TICKET_ID: &str = "close_ticket";

static TICKET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ticket-(\d+)$").unwrap());
static TICKET_TOPIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"ticket-owner:(\d+)").unwrap());


#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("the ticket system is disabled in this guild")]
    Disabled,
    #[error("user already has an open ticket in channel {0}")]
    DuplicateTicket(ChannelId),
    #[error("channel is not a ticket")]
    NotATicket,
    #[error("ticket is already closing")]
    AlreadyClosing,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketHandle {
    pub channel: ChannelId,
    pub number: u64,
}

pub fn ticket_topic(owner: UserId) -> String {
    format!("Support ticket | ticket-owner:{}", owner)
}

pub fn parse_ticket_number(channel_name: &str) -> Option<u64> {
    TICKET_NAME.captures(channel_name)
        .and_then(|captures| captures[1].parse().ok())
}

pub fn parse_ticket_owner(topic: &str) -> Option<UserId> {
    TICKET_TOPIC.captures(topic)
        .and_then(|captures| captures[1].parse::<u64>().ok())
        .filter(|id| *id != 0)
        .map(UserId::new)
}

pub struct TicketHandler {
    store: Store,
    gateway: Arc<dyn Gateway>,
    staff_role: RoleId,
    close_delay: Duration,
    creation_locks: Mutex<HashMap<(GuildId, UserId), Arc<Mutex<()>>>>,
    pending_closes: Arc<Mutex<HashMap<ChannelId, JoinHandle<()>>>>,
}

impl TicketHandler {

    pub fn new(store: Store, gateway: Arc<dyn Gateway>, staff_role: RoleId, close_delay: Duration) -> Self {
        TicketHandler {
            store,
            gateway,
            staff_role,
            close_delay,
            creation_locks: Mutex::new(HashMap::new()),
            pending_closes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub async fn setup(&self, guild: GuildId, panel: ChannelId, category: Option<ChannelId>) -> Result<(), TicketError> {

        let panel_message = LogBuilder::new("Support Tickets")
            .description("Click the button below to create a support ticket")
            .color(0x0099ff)
            .to_message()
            .with_button(Button::new(CREATE_TICKET_ID, "Create Ticket", ButtonKind::Primary).emoji('🎫'));
        self.gateway.send_message(panel, panel_message).await?;

        let config = TicketConfig {
            channel_id: panel.to_string(),
            category_id: category.map(|category| category.to_string()),
            enabled: true,
        };
        self.store.mutate(|data| {
            data.tickets.insert(guild.to_string(), config);
        }).await?;

        Ok(())
    }

    /// Opens a ticket channel for `owner`. Creations for the same
    /// (guild, user) pair run one at a time.
    pub async fn create(&self, guild: GuildId, owner: UserId) -> Result<TicketHandle, TicketError> {

        #[cfg(feature = "debug")]
        let logstr = &format!("Creating ticket for '{}'", owner);
        #[cfg(feature = "debug")]
        Logger::info_long("Start", logstr);

        let key = (guild, owner);
        let key_lock = {
            let mut locks = self.creation_locks.lock().await;
            Arc::clone(locks.entry(key).or_default())
        };

        let result = {
            let _guard = key_lock.lock().await;
            self.create_exclusive(guild, owner).await
        };

        let mut locks = self.creation_locks.lock().await;
        if Arc::strong_count(&key_lock) == 2 {
            locks.remove(&key);
        }

        #[cfg(feature = "debug")]
        Logger::info_long("End", logstr);

        result
    }

    async fn create_exclusive(&self, guild: GuildId, owner: UserId) -> Result<TicketHandle, TicketError> {

        let config = self.store.read(|data| data.ticket_config(guild).cloned()).await;
        let config = match config {
            Some(config) if config.enabled => config,
            _ => return Err(TicketError::Disabled),
        };

        if let Some(existing) = self.find_open_ticket(guild, owner).await? {
            return Err(TicketError::DuplicateTicket(existing));
        }

        let category = self.resolve_category(guild, &config).await?;

        // the number is persisted before it is used, so a crash can only skip numbers
        let number = self.store.mutate(|data| data.next_ticket_number(guild)).await?;

        let overwrites = PermissionHandler::new()
            .deny_everyone(guild, Permissions::VIEW_CHANNEL)
            .allow_member(OWNER_ACCESS, owner)
            .allow_role(STAFF_ACCESS, self.staff_role)
            .build();
        let channel = self.gateway.create_channel(guild, ChannelSpec {
            name: format!("ticket-{}", number),
            parent: Some(category),
            topic: Some(ticket_topic(owner)),
            overwrites,
        }).await?;

        let record = TicketRecord::new(guild, Some(owner), number, channel.id);
        self.store.mutate(|data| data.insert_ticket(record)).await?;

        let introduction = LogBuilder::new(&format!("Ticket #{}", number))
            .description(&format!(
                "Hello {}, the support team will be with you shortly.\nPlease describe your issue in detail.",
                mention_user(owner)))
            .color(0x0099ff)
            .user(owner)
            .timestamp()
            .to_message()
            .with_content(format!("{}, {}", mention_user(owner), mention_role(self.staff_role)))
            .with_button(Button::new(CLOSE_TICKET_ID, "Close Ticket", ButtonKind::Danger))
            .with_button(Button::new(CLAIM_TICKET_ID, "Claim Ticket", ButtonKind::Primary));
        // the ticket is live at this point, a missing introduction doesn't undo it
        if let Err(why) = self.gateway.send_message(channel.id, introduction).await {
            Logger::warn_long(&format!("Failed to introduce ticket #{}", number), &why.to_string());
        }

        Ok(TicketHandle { channel: channel.id, number })
    }

    async fn find_open_ticket(&self, guild: GuildId, owner: UserId) -> Result<Option<ChannelId>, TicketError> {

        let recorded = self.store.read(|data| data.open_ticket_of(guild, owner)).await;
        if let Some(record) = recorded {
            if let Some(channel) = record.channel() {
                if self.gateway.channel_info(channel).await?.is_some() {
                    return Ok(Some(channel));
                }
                Logger::warn_long("Dropping stale ticket record", &record.channel_id);
                self.store.mutate(|data| data.remove_ticket(guild, channel)).await?;
            }
        }

        // channels opened before records were kept only carry the owner in their topic
        let closing = self.store.read(|data| data.closing_channels(guild)).await;
        let topic = ticket_topic(owner);
        let found = self.gateway.find_channel(guild, Box::new(move |channel: &ChannelInfo| {
            channel.kind == ChannelKind::Text
                && channel.topic.as_deref() == Some(topic.as_str())
                && !closing.contains(&channel.id)
        })).await?;
        Ok(found.map(|channel| channel.id))
    }

    async fn resolve_category(&self, guild: GuildId, config: &TicketConfig) -> Result<ChannelId, TicketError> {

        if let Some(category) = config.category() {
            if self.gateway.channel_info(category).await?.is_some() {
                return Ok(category);
            }
            Logger::warn_long("Configured ticket category is gone", &category.to_string());
        }

        let existing = self.gateway.find_channel(guild, Box::new(|channel: &ChannelInfo| {
            channel.kind == ChannelKind::Category && channel.name == TICKET_CATEGORY
        })).await?;
        if let Some(category) = existing {
            return Ok(category.id);
        }

        let overwrites = PermissionHandler::new()
            .deny_everyone(guild, Permissions::VIEW_CHANNEL)
            .allow_role(Permissions::VIEW_CHANNEL, self.staff_role)
            .build();
        let category = self.gateway.create_category(guild, TICKET_CATEGORY, overwrites).await?;
        Ok(category.id)
    }

    /// Looks up the ticket behind `channel`. Channels named `ticket-<n>`
    /// without a record are adopted.
    pub async fn get_ticket(&self, guild: GuildId, channel: ChannelId) -> Result<TicketRecord, TicketError> {

        if let Some(record) = self.store.read(|data| data.ticket_by_channel(guild, channel)).await {
            return Ok(record);
        }

        let info = self.gateway.channel_info(channel).await?
            .ok_or(TicketError::NotATicket)?;
        let number = parse_ticket_number(&info.name)
            .ok_or(TicketError::NotATicket)?;
        let owner = info.topic.as_deref().and_then(parse_ticket_owner);

        let record = TicketRecord::new(guild, owner, number, channel);
        let stored = record.clone();
        self.store.mutate(|data| data.insert_ticket(stored)).await?;
        Ok(record)
    }

    /// Grants `moderator` staff access. Claims are not exclusive; every claim
    /// is announced.
    pub async fn claim(&self, guild: GuildId, channel: ChannelId, moderator: UserId) -> Result<TicketRecord, TicketError> {

        let record = self.get_ticket(guild, channel).await?;
        if !record.is_open() {
            return Err(TicketError::AlreadyClosing);
        }

        self.gateway.edit_permissions(channel, member_grant(STAFF_ACCESS, moderator)).await?;

        let claimed = self.store.mutate(|data| {
            let record = data.ticket_mut(guild, channel)?;
            let moderator = moderator.to_string();
            if !record.claimants.contains(&moderator) {
                record.claimants.push(moderator);
            }
            Some(record.clone())
        }).await?;

        let notice = LogBuilder::new("Ticket Claimed")
            .description(&format!("{} has claimed this ticket", mention_user(moderator)))
            .color(0x00ff00)
            .timestamp()
            .to_message();
        self.gateway.send_message(channel, notice).await?;

        Ok(claimed.unwrap_or(record))
    }

    /// Announces the closure and deletes the channel after the grace delay.
    pub async fn close(&self, guild: GuildId, channel: ChannelId, closer: UserId) -> Result<TicketRecord, TicketError> {

        let record = self.get_ticket(guild, channel).await?;
        if !record.is_open() {
            return Err(TicketError::AlreadyClosing);
        }

        self.store.mutate(|data| {
            if let Some(record) = data.ticket_mut(guild, channel) {
                record.status = TicketStatus::Closing;
            }
        }).await?;

        let notice = LogBuilder::new("Ticket Closed")
            .description(&format!("This ticket has been closed by {}", mention_user(closer)))
            .color(0xff0000)
            .timestamp()
            .to_message();
        if let Err(why) = self.gateway.send_message(channel, notice).await {
            Logger::warn_long("Failed to announce ticket closure", &why.to_string());
        }

        self.schedule_deletion(guild, channel).await;
        Ok(record)
    }

    async fn schedule_deletion(&self, guild: GuildId, channel: ChannelId) {

        let store = self.store.clone();
        let gateway = Arc::clone(&self.gateway);
        let pending = Arc::clone(&self.pending_closes);
        let delay = self.close_delay;

        // held until the handle is stored, the task removes its own entry
        let mut pending_closes = self.pending_closes.lock().await;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if let Err(why) = gateway.delete_channel(channel).await {
                Logger::warn_long(&format!("Failed to delete ticket channel {}", channel), &why.to_string());
            }
            if let Err(why) = store.mutate(|data| data.remove_ticket(guild, channel)).await {
                Logger::err_long("Failed to drop ticket record", &why.to_string());
            }
            pending.lock().await.remove(&channel);
        });
        if let Some(previous) = pending_closes.insert(channel, task) {
            previous.abort();
        }
    }

    /// Called when a channel disappeared by other means: cancels a pending
    /// deletion and forgets the record.
    pub async fn forget_channel(&self, guild: GuildId, channel: ChannelId) -> Result<bool, TicketError> {

        if let Some(task) = self.pending_closes.lock().await.remove(&channel) {
            task.abort();
        }

        let known = self.store.read(|data| data.ticket_by_channel(guild, channel).is_some()).await;
        if known {
            self.store.mutate(|data| data.remove_ticket(guild, channel)).await?;
        }
        Ok(known)
    }

    #[cfg(test)]
    pub async fn pending_closes(&self) -> usize {
        self.pending_closes.lock().await.len()
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::gateway::mock::MockGateway;
    use serenity::model::channel::PermissionOverwriteType;
    use std::sync::atomic::Ordering;

    const GUILD: GuildId = GuildId::new(100);
    const USER: UserId = UserId::new(200);
    const MODERATOR: UserId = UserId::new(300);
    const STAFF: RoleId = RoleId::new(400);
    const DELAY: Duration = Duration::from_millis(20);

    struct Fixture {
        handler: TicketHandler,
        gateway: Arc<MockGateway>,
        store: Store,
        panel: ChannelId,
        dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("config.json")).await.unwrap();
        let gateway = Arc::new(MockGateway::new());
        let panel = gateway.add_channel(GUILD, "support", ChannelKind::Text, None);
        let handler = TicketHandler::new(store.clone(), gateway.clone(), STAFF, DELAY);
        handler.setup(GUILD, panel, None).await.unwrap();
        Fixture { handler, gateway, store, panel, dir }
    }

    async fn wait_for_deletion() {
        tokio::time::sleep(DELAY * 5).await;
    }

    #[test]
    fn ticket_names_and_topics_parse() {
        assert_eq!(parse_ticket_number("ticket-12"), Some(12));
        assert_eq!(parse_ticket_number("ticket-"), None);
        assert_eq!(parse_ticket_number("general"), None);
        assert_eq!(parse_ticket_owner(&ticket_topic(USER)), Some(USER));
        assert_eq!(parse_ticket_owner("no owner here"), None);
    }

    #[tokio::test]
    async fn setup_posts_panel_and_enables_tickets() {
        let f = fixture().await;

        let panel_messages = f.gateway.messages_in(f.panel);
        assert_eq!(panel_messages.len(), 1);
        assert_eq!(panel_messages[0].buttons[0].custom_id, CREATE_TICKET_ID);
        let config = f.store.read(|data| data.ticket_config(GUILD).cloned()).await.unwrap();
        assert!(config.enabled);
        assert_eq!(config.channel_id, f.panel.to_string());
    }

    #[tokio::test]
    async fn create_requires_enabled_config() {
        let f = fixture().await;
        f.store.mutate(|data| data.tickets.clear()).await.unwrap();

        let result = f.handler.create(GUILD, USER).await;

        assert!(matches!(result, Err(TicketError::Disabled)));
        assert_eq!(f.store.read(|data| data.ticket_counter(GUILD)).await, 0);
    }

    #[tokio::test]
    async fn create_builds_private_channel_in_lazy_category() {
        let f = fixture().await;

        let ticket = f.handler.create(GUILD, USER).await.unwrap();

        assert_eq!(ticket.number, 1);
        let category = f.gateway.channel_named(TICKET_CATEGORY).unwrap();
        assert_eq!(category.kind, ChannelKind::Category);
        let channel = f.gateway.channel_named("ticket-1").unwrap();
        assert_eq!(channel.id, ticket.channel);
        assert_eq!(channel.parent_id, Some(category.id));
        assert_eq!(channel.topic, Some(ticket_topic(USER)));

        let overwrites = f.gateway.channel_overwrites.lock().unwrap()[&ticket.channel].clone();
        assert_eq!(overwrites.len(), 3);
        assert_eq!(overwrites[0].kind, PermissionOverwriteType::Role(RoleId::new(GUILD.get())));
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert_eq!(overwrites[1].kind, PermissionOverwriteType::Member(USER));
        assert_eq!(overwrites[1].allow, OWNER_ACCESS);
        assert_eq!(overwrites[2].kind, PermissionOverwriteType::Role(STAFF));
        assert_eq!(overwrites[2].allow, STAFF_ACCESS);

        let introduction = &f.gateway.messages_in(ticket.channel)[0];
        let ids: Vec<_> = introduction.buttons.iter().map(|b| b.custom_id.as_str()).collect();
        assert_eq!(ids, vec![CLOSE_TICKET_ID, CLAIM_TICKET_ID]);
        assert!(introduction.content.as_deref().unwrap().contains(&mention_role(STAFF)));
    }

    #[tokio::test]
    async fn configured_category_is_reused() {
        let f = fixture().await;
        let category = f.gateway.add_channel(GUILD, "Help Desk", ChannelKind::Category, None);
        f.handler.setup(GUILD, f.panel, Some(category)).await.unwrap();

        let ticket = f.handler.create(GUILD, USER).await.unwrap();

        let channel = f.gateway.channel_info(ticket.channel).await.unwrap().unwrap();
        assert_eq!(channel.parent_id, Some(category));
        assert!(f.gateway.channel_named(TICKET_CATEGORY).is_none());
    }

    #[tokio::test]
    async fn ticket_lifecycle_never_reuses_numbers() {
        let f = fixture().await;

        let first = f.handler.create(GUILD, USER).await.unwrap();
        assert_eq!(first.number, 1);

        let duplicate = f.handler.create(GUILD, USER).await;
        assert!(matches!(duplicate, Err(TicketError::DuplicateTicket(channel)) if channel == first.channel));
        assert_eq!(f.store.read(|data| data.ticket_counter(GUILD)).await, 1);

        f.handler.close(GUILD, first.channel, USER).await.unwrap();
        wait_for_deletion().await;
        assert!(f.gateway.channel_info(first.channel).await.unwrap().is_none());
        assert!(f.store.read(|data| data.ticket_by_channel(GUILD, first.channel)).await.is_none());

        let second = f.handler.create(GUILD, USER).await.unwrap();
        assert_eq!(second.number, 2);
    }

    #[tokio::test]
    async fn numbers_increase_across_users() {
        let f = fixture().await;
        let mut numbers = Vec::new();
        for user in 1..=4 {
            numbers.push(f.handler.create(GUILD, UserId::new(user)).await.unwrap().number);
        }
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn concurrent_creations_yield_one_ticket() {
        let f = fixture().await;

        let (left, right) = tokio::join!(f.handler.create(GUILD, USER), f.handler.create(GUILD, USER));

        let created = [&left, &right].iter().filter(|result| result.is_ok()).count();
        assert_eq!(created, 1);
        assert!([&left, &right].iter().any(|result| matches!(result, Err(TicketError::DuplicateTicket(_)))));
        assert_eq!(f.store.read(|data| data.ticket_counter(GUILD)).await, 1);
    }

    #[tokio::test]
    async fn stale_record_does_not_block_creation() {
        let f = fixture().await;
        let first = f.handler.create(GUILD, USER).await.unwrap();
        // deleted by hand, the bot never saw it go
        f.gateway.channels.lock().unwrap().remove(&first.channel);

        let second = f.handler.create(GUILD, USER).await.unwrap();

        assert_eq!(second.number, 2);
        assert!(f.store.read(|data| data.ticket_by_channel(GUILD, first.channel)).await.is_none());
    }

    #[tokio::test]
    async fn legacy_channel_counts_as_duplicate() {
        let f = fixture().await;
        let legacy = f.gateway.add_channel(GUILD, "ticket-7", ChannelKind::Text, Some(&ticket_topic(USER)));

        let result = f.handler.create(GUILD, USER).await;

        assert!(matches!(result, Err(TicketError::DuplicateTicket(channel)) if channel == legacy));
    }

    #[tokio::test]
    async fn failed_channel_creation_keeps_counter() {
        let f = fixture().await;
        f.handler.create(GUILD, UserId::new(1)).await.unwrap();
        f.gateway.fail_channel_creation.store(true, Ordering::SeqCst);

        let result = f.handler.create(GUILD, USER).await;
        assert!(matches!(result, Err(TicketError::Gateway(GatewayError::PermissionDenied))));

        f.gateway.fail_channel_creation.store(false, Ordering::SeqCst);
        let ticket = f.handler.create(GUILD, USER).await.unwrap();
        assert_eq!(ticket.number, 3);
    }

    #[tokio::test]
    async fn failed_introduction_still_opens_the_ticket() {
        let f = fixture().await;
        f.gateway.fail_messages.store(true, Ordering::SeqCst);

        let ticket = f.handler.create(GUILD, USER).await.unwrap();

        assert!(f.gateway.messages_in(ticket.channel).is_empty());
        assert!(f.store.read(|data| data.ticket_by_channel(GUILD, ticket.channel)).await.is_some());
        let again = f.handler.create(GUILD, USER).await;
        assert!(matches!(again, Err(TicketError::DuplicateTicket(channel)) if channel == ticket.channel));
    }

    #[tokio::test]
    async fn claims_are_additive() {
        let f = fixture().await;
        let ticket = f.handler.create(GUILD, USER).await.unwrap();
        let other = UserId::new(301);

        f.handler.claim(GUILD, ticket.channel, MODERATOR).await.unwrap();
        f.handler.claim(GUILD, ticket.channel, MODERATOR).await.unwrap();
        let record = f.handler.claim(GUILD, ticket.channel, other).await.unwrap();

        assert_eq!(record.claimants, vec![MODERATOR.to_string(), other.to_string()]);
        let grants = f.gateway.edited_permissions.lock().unwrap().clone();
        assert_eq!(grants.len(), 3);
        assert!(grants.iter().all(|(_, grant)| grant.allow == STAFF_ACCESS));
        let notices = f.gateway.messages_in(ticket.channel).iter()
            .filter(|message| message.rendered().contains("has claimed this ticket"))
            .count();
        assert_eq!(notices, 3);
    }

    #[tokio::test]
    async fn claim_and_close_reject_other_channels() {
        let f = fixture().await;
        let general = f.gateway.add_channel(GUILD, "general", ChannelKind::Text, None);

        assert!(matches!(f.handler.claim(GUILD, general, MODERATOR).await, Err(TicketError::NotATicket)));
        assert!(matches!(f.handler.close(GUILD, general, MODERATOR).await, Err(TicketError::NotATicket)));
        assert!(f.gateway.channel_info(general).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn legacy_ticket_channels_can_be_closed() {
        let f = fixture().await;
        let legacy = f.gateway.add_channel(GUILD, "ticket-3", ChannelKind::Text, None);

        let record = f.handler.close(GUILD, legacy, MODERATOR).await.unwrap();

        assert_eq!(record.number, 3);
        assert_eq!(record.owner(), None);
        wait_for_deletion().await;
        assert!(f.gateway.channel_info(legacy).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn closing_twice_is_rejected() {
        let f = fixture().await;
        let ticket = f.handler.create(GUILD, USER).await.unwrap();

        f.handler.close(GUILD, ticket.channel, USER).await.unwrap();
        let again = f.handler.close(GUILD, ticket.channel, USER).await;

        assert!(matches!(again, Err(TicketError::AlreadyClosing)));
        assert_eq!(f.handler.pending_closes().await, 1);
        wait_for_deletion().await;
        assert_eq!(f.handler.pending_closes().await, 0);
    }

    #[tokio::test]
    async fn failed_close_can_be_retried() {
        let f = fixture().await;
        let ticket = f.handler.create(GUILD, USER).await.unwrap();
        let path = f.dir.path().join("config.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let failed = f.handler.close(GUILD, ticket.channel, USER).await;
        assert!(matches!(failed, Err(TicketError::Persistence(_))));
        assert!(f.store.read(|data| data.ticket_by_channel(GUILD, ticket.channel)).await.unwrap().is_open());
        assert_eq!(f.handler.pending_closes().await, 0);

        std::fs::remove_dir(&path).unwrap();
        f.handler.close(GUILD, ticket.channel, USER).await.unwrap();
        wait_for_deletion().await;
        assert!(f.gateway.channel_info(ticket.channel).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn closing_ticket_does_not_block_a_new_one() {
        let f = fixture().await;
        let first = f.handler.create(GUILD, USER).await.unwrap();
        f.handler.close(GUILD, first.channel, USER).await.unwrap();

        let second = f.handler.create(GUILD, USER).await.unwrap();

        assert_eq!(second.number, 2);
        assert_ne!(second.channel, first.channel);
    }

    #[tokio::test]
    async fn forgetting_a_channel_cancels_its_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("config.json")).await.unwrap();
        let gateway = Arc::new(MockGateway::new());
        let panel = gateway.add_channel(GUILD, "support", ChannelKind::Text, None);
        let handler = TicketHandler::new(store.clone(), gateway.clone(), STAFF, Duration::from_secs(60));
        handler.setup(GUILD, panel, None).await.unwrap();
        let ticket = handler.create(GUILD, USER).await.unwrap();

        handler.close(GUILD, ticket.channel, USER).await.unwrap();
        assert_eq!(handler.pending_closes().await, 1);

        assert!(handler.forget_channel(GUILD, ticket.channel).await.unwrap());
        assert_eq!(handler.pending_closes().await, 0);
        assert!(store.read(|data| data.ticket_by_channel(GUILD, ticket.channel)).await.is_none());
        assert!(!handler.forget_channel(GUILD, ticket.channel).await.unwrap());
    }
}
