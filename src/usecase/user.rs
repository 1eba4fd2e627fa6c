use recipebook_shared::{
    User,
    validation::{validate_email, validate_password},
};
use recipebook_user::Session;
use validator::Validate;

use crate::repository::UserRepository;

#[derive(Validate, Debug, Clone, Default)]
pub struct LoginInput {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Validate, Debug, Clone, Default)]
pub struct SignupInput {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
}

pub struct Login(pub UserRepository);

impl Login {
    pub async fn execute(&self, mut input: LoginInput) -> recipebook_shared::Result<Session> {
        input.email = input.email.trim().to_owned();
        input.validate()?;

        let session = self.0.sign_in(&input.email, &input.password).await?;

        tracing::info!(user.uid = %session.uid, "logged in");

        Ok(session)
    }
}

pub struct Signup(pub UserRepository);

impl Signup {
    pub async fn execute(&self, mut input: SignupInput) -> recipebook_shared::Result<Session> {
        input.email = input.email.trim().to_owned();
        input.validate()?;

        let session = self.0.sign_up(&input.email, &input.password).await?;

        tracing::info!(user.uid = %session.uid, "signed up");

        Ok(session)
    }
}

pub struct GetOrCreateUser(pub UserRepository);

impl GetOrCreateUser {
    pub async fn execute(&self, uid: &str) -> recipebook_shared::Result<User> {
        self.0.get_or_create_user(uid).await
    }
}
