// ============================================================================
// Account Infrastructure - In-Memory User Store
// File: crates/account-infrastructure/src/memory/user_store.rs
// ============================================================================

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{debug, info};
use uuid::Uuid;

use account_core::domain::User;
use account_core::repositories::{StoreError, UserStore};

/// Concurrent user store keyed by id, with a unique case-insensitive
/// email index.
///
/// Lock order is always `by_email` then `users`; no method holds a `users`
/// guard while touching `by_email`.
pub struct InMemoryUserStore {
    users: DashMap<Uuid, User>,
    by_email: DashMap<String, Uuid>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            by_email: DashMap::new(),
        }
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        if users.is_empty() {
            return Err(StoreError::NotExist);
        }
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(user.id.to_string()));
        }

        match self.by_email.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(user.email.clone())),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                info!(user_id = %user.id, "User stored");
                Ok(())
            }
        }
    }

    async fn find_user_by_id(&self, id: &Uuid) -> Result<User, StoreError> {
        self.users
            .get(id)
            .map(|r| r.value().clone())
            .ok_or(StoreError::NotExist)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let id = self
            .by_email
            .get(&email_key(email))
            .map(|r| *r.value())
            .ok_or(StoreError::NotExist)?;
        self.find_user_by_id(&id).await
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let previous_email = self
            .users
            .get(&user.id)
            .map(|r| r.value().email.clone())
            .ok_or(StoreError::NotExist)?;

        let old_key = email_key(&previous_email);
        let new_key = email_key(&user.email);
        if old_key != new_key {
            match self.by_email.entry(new_key.clone()) {
                Entry::Occupied(o) if *o.get() != user.id => {
                    return Err(StoreError::Duplicate(user.email.clone()));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.by_email.remove(&old_key);
            debug!(user_id = %user.id, "Email index moved");
        }

        let stored = match self.users.get_mut(&user.id) {
            Some(mut slot) => {
                *slot = user.clone();
                true
            }
            None => false,
        };

        if stored {
            Ok(())
        } else {
            // Deleted after the email key was reserved.
            self.by_email.remove_if(&new_key, |_, owner| *owner == user.id);
            Err(StoreError::NotExist)
        }
    }

    async fn delete_user_by_id(&self, id: &Uuid) -> Result<(), StoreError> {
        let (_, user) = self.users.remove(id).ok_or(StoreError::NotExist)?;
        self.by_email
            .remove_if(&email_key(&user.email), |_, owner| owner == id);
        info!(user_id = %id, "User removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use account_core::domain::CreateUserRequest;

    fn user(email: &str) -> User {
        User::new(
            CreateUserRequest {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                mobile_num: "123".to_string(),
                email: email.to_string(),
                password: "unused".to_string(),
                gender: "M".to_string(),
                role: "member".to_string(),
            },
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_empty_store_lists_not_exist() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.list_users().await, Err(StoreError::NotExist));
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = InMemoryUserStore::new();
        let u = user("a@b.com");
        store.create_user(&u).await.unwrap();

        assert_eq!(store.find_user_by_id(&u.id).await.unwrap(), u);
        assert_eq!(store.find_user_by_email("A@B.com").await.unwrap(), u);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create_user(&user("a@b.com")).await.unwrap();
        let result = store.create_user(&user("a@b.com")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_moves_email_index() {
        let store = InMemoryUserStore::new();
        let mut u = user("old@b.com");
        store.create_user(&u).await.unwrap();

        u.email = "new@b.com".to_string();
        store.update_user(&u).await.unwrap();

        assert_eq!(
            store.find_user_by_email("old@b.com").await,
            Err(StoreError::NotExist)
        );
        assert_eq!(store.find_user_by_email("new@b.com").await.unwrap().id, u.id);
    }

    #[tokio::test]
    async fn test_update_into_taken_email() {
        let store = InMemoryUserStore::new();
        store.create_user(&user("taken@b.com")).await.unwrap();
        let mut u = user("mine@b.com");
        store.create_user(&u).await.unwrap();

        u.email = "taken@b.com".to_string();
        assert!(matches!(
            store.update_user(&u).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = InMemoryUserStore::new();
        assert_eq!(
            store.update_user(&user("a@b.com")).await,
            Err(StoreError::NotExist)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_racing_delete_leaves_no_stale_email() {
        let store = std::sync::Arc::new(InMemoryUserStore::new());

        for i in 0..200 {
            let mut u = user(&format!("before{i}@b.com"));
            store.create_user(&u).await.unwrap();
            u.email = format!("after{i}@b.com");
            let id = u.id;

            let updater = {
                let store = store.clone();
                tokio::spawn(async move { store.update_user(&u).await })
            };
            let deleter = {
                let store = store.clone();
                tokio::spawn(async move { store.delete_user_by_id(&id).await })
            };
            let _ = updater.await.unwrap();
            deleter.await.unwrap().unwrap();
        }

        assert!(store.is_empty());
        assert!(store
            .by_email
            .iter()
            .all(|entry| store.users.contains_key(entry.value())));
        assert_eq!(store.by_email.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_frees_email() {
        let store = InMemoryUserStore::new();
        let u = user("a@b.com");
        store.create_user(&u).await.unwrap();

        store.delete_user_by_id(&u.id).await.unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.delete_user_by_id(&u.id).await,
            Err(StoreError::NotExist)
        );
        store.create_user(&user("a@b.com")).await.unwrap();
    }
}
