use async_trait::async_trait;
use uuid::Uuid;

use agora_core::domain::User;
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, UserRepository};

use super::InMemoryDatabase;

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if taken {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.remove_user(id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = User::normalize_email(email);
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}
