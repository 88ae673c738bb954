use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::UserResponse;
use crate::application::mediator::{Request, RequestHandler};
use crate::domain::UserRepository;
use crate::shared::error::AppError;

/// Fetch the public projection of a live user.
#[derive(Debug, Clone, Copy)]
pub struct GetUserQuery {
    pub user_id: Uuid,
}

impl Request for GetUserQuery {
    type Response = UserResponse;
    const NAME: &'static str = "get_user";
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RequestHandler<GetUserQuery> for GetUserHandler {
    async fn handle(&self, query: GetUserQuery) -> Result<UserResponse, AppError> {
        self.users
            .find_by_id(query.user_id)
            .await?
            .map(|user| UserResponse::from(&user))
            .ok_or_else(|| AppError::NotFound(format!("User with ID '{}' not found.", query.user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockUserRepository, User};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_returns_projection_of_live_user() {
        let user = User::new("abc", "Ann", "Lee", "a@x.com", "hash");
        let expected = UserResponse::from(&user);
        let id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(move |requested| *requested == id)
            .returning(move |_| Ok(Some(user.clone())));

        let handler = GetUserHandler::new(Arc::new(users));

        assert_eq!(handler.handle(GetUserQuery { user_id: id }).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let handler = GetUserHandler::new(Arc::new(users));
        let result = handler.handle(GetUserQuery { user_id: Uuid::new_v4() }).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
