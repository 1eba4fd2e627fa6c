use recipebook_shared::validation::{is_valid_email, is_valid_password};
use recipebook_user::Session;
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{GetOrCreateUser, Signup, SignupInput};

pub struct SignupViewModel {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    signup: Signup,
    get_or_create_user: GetOrCreateUser,
    state: watch::Sender<ScreenState<Session>>,
    events: Events,
}

impl SignupViewModel {
    pub fn new(
        signup: Signup,
        get_or_create_user: GetOrCreateUser,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                email: String::new(),
                password: String::new(),
                confirm_password: String::new(),
                signup,
                get_or_create_user,
                state: state_channel(),
                events,
            },
            rx,
        )
    }

    pub fn state(&self) -> watch::Receiver<ScreenState<Session>> {
        self.state.subscribe()
    }

    pub fn email_error(&self) -> Option<&'static str> {
        (!self.email.is_empty() && !is_valid_email(self.email.trim()))
            .then_some("Invalid email format")
    }

    pub fn password_error(&self) -> Option<&'static str> {
        (!self.password.is_empty() && !is_valid_password(&self.password)).then_some(
            "At least 8 characters with an upper-case letter, a lower-case letter, a digit and one of @#$%^&+=!",
        )
    }

    pub fn confirm_password_error(&self) -> Option<&'static str> {
        (!self.confirm_password.is_empty() && self.confirm_password != self.password)
            .then_some("Passwords do not match")
    }

    pub fn is_signup_enabled(&self) -> bool {
        is_valid_email(self.email.trim())
            && is_valid_password(&self.password)
            && self.confirm_password == self.password
    }

    pub fn go_to_login(&self) {
        self.events.navigate(Destination::Login);
    }

    pub async fn signup(&self) -> Option<Session> {
        if !self.is_signup_enabled() {
            return None;
        }

        self.state.send_replace(ScreenState::Loading);

        let result = async {
            let session = self
                .signup
                .execute(SignupInput {
                    email: self.email.trim().to_owned(),
                    password: self.password.to_owned(),
                    confirm_password: self.confirm_password.to_owned(),
                })
                .await?;

            self.get_or_create_user.execute(&session.uid).await?;

            Ok::<_, recipebook_shared::Error>(session)
        }
        .await;

        match result {
            Ok(session) => {
                self.state.send_replace(ScreenState::Loaded(session.clone()));
                self.events.navigate(Destination::Home);
                Some(session)
            }
            Err(err) => {
                self.state.send_replace(ScreenState::Idle);
                self.events.error(&err);
                None
            }
        }
    }
}
