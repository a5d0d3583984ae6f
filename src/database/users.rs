use tracing::{info, warn};
use uuid::Uuid;

use super::backend::KeyValueStore;
use super::error::StorageError;
use super::records::{keys, RecordStore};
use crate::clinic::models::{User, UserPatch};
use crate::clinic::states::Role;

/// The signed-in user, passed explicitly to whatever needs role checks.
/// Mirrors the `user` key of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Session { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Mock sign-in: any non-empty email and password succeed and produce
    /// the demonstration user for `role`. Returns `None` when either is
    /// empty.
    pub async fn login<S: KeyValueStore>(
        store: &RecordStore<S>,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Session>, StorageError> {
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }
        let user = demo_user(role, email);
        store.set_value(keys::USER, &user).await?;
        info!("{} signed in as {}", user.name, role);
        Ok(Some(Session { user }))
    }

    /// Picks up the user left by a previous run. An unreadable record is
    /// treated as signed out.
    pub async fn restore<S: KeyValueStore>(store: &RecordStore<S>) -> Result<Option<Session>, StorageError> {
        match store.get_value::<User>(keys::USER).await {
            Ok(user) => Ok(user.map(Session::new)),
            Err(e) if e.is_corrupt() => {
                warn!("Error loading stored user: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update<S: KeyValueStore>(&mut self, store: &RecordStore<S>, patch: UserPatch) -> Result<(), StorageError> {
        let mut user = self.user.clone();
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if patch.avatar.is_some() {
            user.avatar = patch.avatar;
        }
        if patch.phone.is_some() {
            user.phone = patch.phone;
        }
        if patch.address.is_some() {
            user.address = patch.address;
        }
        store.set_value(keys::USER, &user).await?;
        self.user = user;
        Ok(())
    }

    pub async fn logout<S: KeyValueStore>(self, store: &RecordStore<S>) -> Result<(), StorageError> {
        store.remove(keys::USER).await?;
        info!("{} signed out", self.user.name);
        Ok(())
    }
}

/// The fixed profile each role signs in as.
pub fn demo_user(role: Role, email: &str) -> User {
    let (name, phone, address, avatar) = match role {
        Role::Receptionist => (
            "Priya Sharma",
            "+91 98765 43210",
            "Mumbai, Maharashtra",
            "https://images.pexels.com/photos/3823488/pexels-photo-3823488.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
        ),
        Role::Doctor => (
            "Dr. Rajesh Kumar",
            "+91 87654 32109",
            "Delhi, India",
            "https://images.pexels.com/photos/5327921/pexels-photo-5327921.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
        ),
        Role::Patient => (
            "Amit Patel",
            "+91 76543 21098",
            "Pune, Maharashtra",
            "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=2",
        ),
    };
    User {
        id: Uuid::new_v4().simple().to_string()[..9].to_string(),
        name: name.into(),
        email: email.into(),
        role,
        avatar: Some(avatar.into()),
        phone: Some(phone.into()),
        address: Some(address.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::backend::SqliteStore;

    async fn store() -> RecordStore<SqliteStore> {
        RecordStore::new(SqliteStore::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn login_requires_email_and_password() {
        let store = store().await;
        assert!(Session::login(&store, "", "pw", Role::Doctor).await.unwrap().is_none());
        assert!(Session::login(&store, "d@h.in", "", Role::Doctor).await.unwrap().is_none());
        assert!(Session::restore(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_persists_and_restores() {
        let store = store().await;
        let session = Session::login(&store, "d@h.in", "pw", Role::Doctor).await.unwrap().unwrap();
        assert_eq!(session.user().name, "Dr. Rajesh Kumar");
        assert_eq!(session.user().id.len(), 9);

        let restored = Session::restore(&store).await.unwrap().unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.role(), Role::Doctor);
    }

    #[tokio::test]
    async fn update_merges_and_logout_clears() {
        let store = store().await;
        let mut session = Session::login(&store, "p@h.in", "pw", Role::Patient).await.unwrap().unwrap();
        session
            .update(
                &store,
                UserPatch {
                    phone: Some("+91 11111 22222".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let restored = Session::restore(&store).await.unwrap().unwrap();
        assert_eq!(restored.user().phone.as_deref(), Some("+91 11111 22222"));
        assert_eq!(restored.user().name, "Amit Patel");

        restored.logout(&store).await.unwrap();
        assert!(Session::restore(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreadable_user_counts_as_signed_out() {
        let store = store().await;
        store.backend().set_item(keys::USER, "nope").await.unwrap();
        assert!(Session::restore(&store).await.unwrap().is_none());
    }

    #[test]
    fn stored_role_is_lowercase() {
        let user = demo_user(Role::Receptionist, "r@h.in");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "receptionist");
    }
}
