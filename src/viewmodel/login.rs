use recipebook_shared::validation::is_valid_email;
use recipebook_user::Session;
use tokio::sync::{mpsc, watch};

use super::{Destination, Events, ScreenState, UiEvent, state_channel};
use crate::usecase::{GetOrCreateUser, Login, LoginInput};

pub struct LoginViewModel {
    pub email: String,
    pub password: String,
    login: Login,
    get_or_create_user: GetOrCreateUser,
    state: watch::Sender<ScreenState<Session>>,
    events: Events,
}

impl LoginViewModel {
    pub fn new(
        login: Login,
        get_or_create_user: GetOrCreateUser,
    ) -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (events, rx) = Events::channel();

        (
            Self {
                email: String::new(),
                password: String::new(),
                login,
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

    pub fn is_login_enabled(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty() && self.email_error().is_none()
    }

    pub fn go_to_signup(&self) {
        self.events.navigate(Destination::Signup);
    }

    pub async fn login(&self) -> Option<Session> {
        if !self.is_login_enabled() {
            return None;
        }

        self.state.send_replace(ScreenState::Loading);

        let result = async {
            let session = self
                .login
                .execute(LoginInput {
                    email: self.email.trim().to_owned(),
                    password: self.password.to_owned(),
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
