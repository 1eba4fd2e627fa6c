use anyhow::Result;
use recipebook::{
    App,
    config::Config,
    usecase::{GetOrCreateUser, Login, LoginInput, Signup, SignupInput},
};
use recipebook_user::Session;

async fn remember(config: &Config, app: &App, session: Session) -> Result<()> {
    let user = GetOrCreateUser(app.users.clone())
        .execute(&session.uid)
        .await?;

    let store = super::preference_store(config);
    let mut preferences = store.load().await?;
    preferences.session = Some(session.clone());
    store.save(&preferences).await?;

    println!(
        "signed in as {} ({} recipes, {} favorites)",
        session.email,
        user.local_recipes().count(),
        user.favorites().count()
    );

    Ok(())
}

pub async fn login(config: Config, email: String, password: String) -> Result<()> {
    let app = App::new(&config).await?;
    let session = Login(app.users.clone())
        .execute(LoginInput { email, password })
        .await?;

    remember(&config, &app, session).await
}

pub async fn signup(config: Config, email: String, password: String) -> Result<()> {
    let app = App::new(&config).await?;
    let session = Signup(app.users.clone())
        .execute(SignupInput {
            email,
            confirm_password: password.to_owned(),
            password,
        })
        .await?;

    remember(&config, &app, session).await
}

pub async fn logout(config: Config) -> Result<()> {
    let store = super::preference_store(&config);
    let mut preferences = store.load().await?;

    if let Some(session) = preferences.session.take() {
        store.save(&preferences).await?;
        println!("signed out {}", session.email);
    }

    Ok(())
}
