
use serenity::model::id::UserId;
use tokio::sync::Mutex;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};


/// Last invocation per (command, user). Entries are dropped by a timer once
/// their window has passed.
#[derive(Clone, Default)]
pub struct Cooldowns {
    entries: Arc<Mutex<HashMap<(String, UserId), Instant>>>,
}

impl Cooldowns {

    pub fn new() -> Self {
        Cooldowns::default()
    }

    /// Records `now` as the invocation time unless the user is still inside
    /// the window, in which case the remaining wait is returned.
    pub async fn try_acquire(&self, command: &str, user: UserId, window: Duration, now: Instant) -> Result<(), Duration> {
        let key = (command.to_string(), user);
        let mut entries = self.entries.lock().await;
        if let Some(last) = entries.get(&key) {
            let expires = *last + window;
            if now < expires {
                return Err(expires - now);
            }
        }
        entries.insert(key, now);
        Ok(())
    }

    pub fn schedule_cleanup(&self, command: &str, user: UserId, window: Duration, stamp: Instant) {
        let entries = Arc::clone(&self.entries);
        let key = (command.to_string(), user);
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut entries = entries.lock().await;
            // a newer invocation owns the entry now
            if entries.get(&key) == Some(&stamp) {
                entries.remove(&key);
            }
        });
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn window_rejects_then_accepts() {
        let cooldowns = Cooldowns::new();
        let user = UserId::new(1);
        let window = Duration::from_secs(5);
        let start = Instant::now();

        assert!(cooldowns.try_acquire("warn", user, window, start).await.is_ok());
        let remaining = cooldowns.try_acquire("warn", user, window, start + Duration::from_secs(3)).await;
        assert_eq!(remaining, Err(Duration::from_secs(2)));
        assert!(cooldowns.try_acquire("warn", user, window, start + Duration::from_secs(6)).await.is_ok());
    }

    #[tokio::test]
    async fn windows_are_per_command_and_user() {
        let cooldowns = Cooldowns::new();
        let window = Duration::from_secs(5);
        let now = Instant::now();

        assert!(cooldowns.try_acquire("warn", UserId::new(1), window, now).await.is_ok());
        assert!(cooldowns.try_acquire("warn", UserId::new(2), window, now).await.is_ok());
        assert!(cooldowns.try_acquire("ban", UserId::new(1), window, now).await.is_ok());
        assert_eq!(cooldowns.len().await, 3);
    }

    #[tokio::test]
    async fn cleanup_drops_expired_entries() {
        let cooldowns = Cooldowns::new();
        let user = UserId::new(1);
        let window = Duration::from_millis(20);
        let now = Instant::now();

        cooldowns.try_acquire("kick", user, window, now).await.unwrap();
        cooldowns.schedule_cleanup("kick", user, window, now);
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(cooldowns.len().await, 0);
    }

    #[tokio::test]
    async fn cleanup_keeps_a_newer_invocation() {
        let cooldowns = Cooldowns::new();
        let user = UserId::new(1);
        let window = Duration::from_millis(20);
        let first = Instant::now();

        cooldowns.try_acquire("kick", user, window, first).await.unwrap();
        cooldowns.schedule_cleanup("kick", user, window, first);
        let second = first + Duration::from_millis(25);
        cooldowns.try_acquire("kick", user, window, second).await.unwrap();
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(cooldowns.len().await, 1);
        let blocked = cooldowns.try_acquire("kick", user, window, second + Duration::from_millis(5)).await;
        assert_eq!(blocked, Err(Duration::from_millis(15)));
    }
}
