use axum_helpers::PageParams;
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user; emails are unique regardless of case
    pub async fn create_user(&self, input: NewUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.exists_by_email(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        self.repository.create(input).await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users(&self, ids: &[i64], page: PageParams) -> UserResult<Vec<User>> {
        self.repository
            .list(ids, page.offset(), page.limit())
            .await
    }

    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn ann() -> NewUser {
        NewUser {
            name: "Ann".into(),
            email: "ann@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let service = UserService::new(InMemoryUserRepository::new());
        let user = service.create_user(ann()).await.unwrap();
        assert_eq!(service.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_before_insert() {
        let mut mock = MockUserRepository::new();
        mock.expect_exists_by_email().returning(|_| Ok(true));
        mock.expect_create().never();

        let service = UserService::new(mock);
        assert!(matches!(
            service.create_user(ann()).await,
            Err(UserError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input_fails_validation() {
        let service = UserService::new(InMemoryUserRepository::new());
        let input = NewUser {
            name: "Ann".into(),
            email: "nope".into(),
        };
        assert!(matches!(
            service.create_user(input).await,
            Err(UserError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service.delete_user(42).await.unwrap_err();
        assert_eq!(err.to_string(), "User with id=42 was not found");
    }

    #[tokio::test]
    async fn test_list_uses_page_offset() {
        let mut mock = MockUserRepository::new();
        mock.expect_list()
            .withf(|ids, offset, limit| ids.is_empty() && *offset == 10 && *limit == 10)
            .returning(|_, _, _| Ok(vec![]));

        let service = UserService::new(mock);
        let users = service
            .list_users(&[], PageParams::new(15, 10))
            .await
            .unwrap();
        assert!(users.is_empty());
    }
}
