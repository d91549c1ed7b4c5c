use std::cmp::Reverse;

use async_trait::async_trait;
use uuid::Uuid;

use agora_core::domain::{Post, PostFilter};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, PostRepository};

use super::InMemoryDatabase;

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.remove_post(id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryDatabase {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse((p.created_at, p.id)));

        Ok(posts
            .into_iter()
            .skip(usize::try_from(filter.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(filter.limit).unwrap_or(usize::MAX))
            .collect())
    }
}
