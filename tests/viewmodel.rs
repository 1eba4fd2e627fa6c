use std::sync::Arc;

use recipebook::{
    App,
    usecase::{
        CreateRecipe, DeleteRecipe, GetFavoriteRecipes, GetOrCreateUser, GetRecipes, Login,
        SearchRecipes, Signup, ToggleFavorite, UpdateRecipe,
    },
    viewmodel::{
        Destination, FavoritesViewModel, LoginViewModel, RecipeFormViewModel, RecipesViewModel,
        ScreenState, SearchViewModel, SignupViewModel, UiEvent,
    },
};
use recipebook_shared::{ErrorKind, Recipe, RecipeId, RecipeType};
use recipebook_user::{
    AuthService, DocumentStore, Documents, MemoryAuth, MemoryDocumentStore, UserDocument,
};
use temp_dir::TempDir;
use tokio::sync::RwLock;

mod helpers;

#[tokio::test]
async fn test_login_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let users = state.app.users.clone();
    state
        .auth
        .sign_up("john.doe@recipebook.localhost", "Passw0rd!")
        .await?;

    let (mut vm, mut events) =
        LoginViewModel::new(Login(users.clone()), GetOrCreateUser(users.clone()));
    let screen = vm.state();

    assert!(!vm.is_login_enabled());

    vm.email = "john.doe".to_owned();
    vm.password = "Passw0rd!".to_owned();
    assert_eq!(vm.email_error(), Some("Invalid email format"));
    assert!(!vm.is_login_enabled());
    assert!(vm.login().await.is_none());

    vm.email = "john.doe@recipebook.localhost".to_owned();
    vm.password = "wrong".to_owned();
    assert!(vm.is_login_enabled());
    assert!(vm.login().await.is_none());
    assert_eq!(
        events.recv().await,
        Some(UiEvent::ShowMessage(
            "Invalid email or password. Please try again.".to_owned()
        ))
    );
    assert_eq!(*screen.borrow(), ScreenState::Idle);

    vm.password = "Passw0rd!".to_owned();
    let session = vm.login().await.unwrap();
    assert_eq!(events.recv().await, Some(UiEvent::Navigate(Destination::Home)));
    assert_eq!(*screen.borrow(), ScreenState::Loaded(session));

    Ok(())
}

#[tokio::test]
async fn test_signup_flags() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let users = state.app.users.clone();

    let (mut vm, mut events) = SignupViewModel::new(Signup(users.clone()), GetOrCreateUser(users));

    vm.email = "jane.doe@recipebook.localhost".to_owned();
    vm.password = "password".to_owned();
    assert!(vm.password_error().is_some());
    assert!(!vm.is_signup_enabled());

    vm.password = "Passw0rd!".to_owned();
    vm.confirm_password = "Passw0rd".to_owned();
    assert!(vm.password_error().is_none());
    assert_eq!(vm.confirm_password_error(), Some("Passwords do not match"));
    assert!(!vm.is_signup_enabled());

    vm.confirm_password = "Passw0rd!".to_owned();
    assert!(vm.is_signup_enabled());

    let session = vm.signup().await.unwrap();
    assert_eq!(session.email, "jane.doe@recipebook.localhost");
    assert_eq!(events.recv().await, Some(UiEvent::Navigate(Destination::Home)));

    assert!(vm.signup().await.is_none());
    assert_eq!(
        events.recv().await,
        Some(UiEvent::ShowMessage("Email already exists".to_owned()))
    );

    Ok(())
}

#[tokio::test]
async fn test_recipe_form_create_and_edit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = state.app.recipes.clone();

    let (mut vm, mut events) = RecipeFormViewModel::new(
        "u1",
        CreateRecipe(recipes.clone()),
        UpdateRecipe(recipes.clone()),
    );
    assert!(!vm.is_save_enabled());

    vm.name = "Pancakes".to_owned();
    vm.prep_time = "0".to_owned();
    vm.toggle_type(RecipeType::Breakfast);
    vm.ingredients[0].name = "Flour".to_owned();
    vm.ingredients[0].quantity = "200 g".to_owned();
    vm.add_ingredient();
    vm.steps[0] = "Mix".to_owned();
    vm.add_step();
    vm.steps[1] = "Fry".to_owned();
    assert!(vm.prep_time_error().is_some());
    assert!(!vm.is_save_enabled());

    vm.prep_time = "20".to_owned();
    assert!(vm.is_save_enabled());
    assert_eq!(vm.input().ingredients.len(), 1);

    let created = vm.save().await.unwrap();
    assert_eq!(
        events.recv().await,
        Some(UiEvent::ShowMessage("Recipe saved".to_owned()))
    );
    assert_eq!(
        events.recv().await,
        Some(UiEvent::Navigate(Destination::Recipe(RecipeId::Local(created.id))))
    );

    let (mut edit, _events) =
        RecipeFormViewModel::new("u1", CreateRecipe(recipes.clone()), UpdateRecipe(recipes.clone()));
    edit.edit(created.clone());
    assert!(edit.is_editing());
    assert_eq!(edit.ingredients[0].name, "flour");

    edit.name = "Banana pancakes".to_owned();
    edit.add_ingredient();
    edit.ingredients[1].name = "banana".to_owned();
    edit.ingredients[1].quantity = "2".to_owned();
    let updated = edit.save().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Banana pancakes");
    assert_eq!(updated.ingredients.len(), 2);
    assert_eq!(recipes.get_local_recipes("u1").await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_search_pagination_and_favorite() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = state.app.recipes.clone();

    let (mut vm, mut events) = SearchViewModel::new(
        "u1",
        SearchRecipes(recipes.clone()),
        ToggleFavorite(recipes.clone()),
    );
    let screen = vm.state();

    vm.query = "chicken".to_owned();
    vm.search().await;
    assert_eq!(screen.borrow().loaded().unwrap().len(), 2);
    assert!(vm.has_more());

    vm.load_more().await;
    assert_eq!(screen.borrow().loaded().unwrap().len(), 3);
    assert!(!vm.has_more());

    vm.toggle_favorite(1).await;
    {
        let results = screen.borrow();
        let results = results.loaded().unwrap();
        assert!(results[1].favorite);
        assert!(!results[0].favorite);
    }

    vm.search().await;
    assert!(screen.borrow().loaded().unwrap()[1].favorite);

    vm.query = "pizza".to_owned();
    vm.search().await;
    assert_eq!(*screen.borrow(), ScreenState::Empty);

    state.search.set_offline(true);
    vm.query = "chicken".to_owned();
    vm.search().await;
    assert_eq!(events.recv().await, Some(UiEvent::ShowError(ErrorKind::NoInternet)));
    assert_eq!(*screen.borrow(), ScreenState::Idle);

    Ok(())
}

#[tokio::test]
async fn test_favorites_unfavorite_removes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = state.app.recipes.clone();

    let chili = recipes
        .create_local("u1", helpers::new_recipe("Chili", &[("beans", "400 g")]))
        .await?;
    let chili = recipes.toggle_favorite("u1", Recipe::Local(chili)).await?;
    for id in ["a", "b", "c"] {
        recipes
            .toggle_favorite("u1", Recipe::Remote(helpers::remote(id, id)))
            .await?;
    }

    let (mut vm, _events) = FavoritesViewModel::new(
        "u1",
        2,
        GetFavoriteRecipes(recipes.clone()),
        ToggleFavorite(recipes.clone()),
    );
    let screen = vm.state();

    vm.load().await;
    assert_eq!(screen.borrow().loaded().unwrap().len(), 3);

    vm.load_more().await;
    assert_eq!(screen.borrow().loaded().unwrap().len(), 4);

    vm.load_more().await;
    assert!(!vm.has_more());

    vm.remove(&chili.id()).await;
    let ids = screen
        .borrow()
        .loaded()
        .unwrap()
        .iter()
        .map(Recipe::id)
        .collect::<Vec<_>>();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&chili.id()));
    assert!(!recipes.get_local("u1", 1).await?.unwrap().favorite);

    Ok(())
}

#[tokio::test]
async fn test_recipes_list_and_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let recipes = state.app.recipes.clone();

    let (vm, mut events) =
        RecipesViewModel::new("u1", GetRecipes(recipes.clone()), DeleteRecipe(recipes.clone()));
    let screen = vm.state();

    vm.load().await;
    assert_eq!(*screen.borrow(), ScreenState::Empty);

    let dal = recipes
        .create_local("u1", helpers::new_recipe("Dal", &[("lentils", "250 g")]))
        .await?;
    vm.load().await;
    assert_eq!(screen.borrow().loaded().unwrap().len(), 1);

    vm.delete(dal.id).await;
    assert_eq!(
        events.recv().await,
        Some(UiEvent::ShowMessage("Recipe deleted".to_owned()))
    );
    assert_eq!(*screen.borrow(), ScreenState::Empty);

    vm.delete(dal.id).await;
    assert_eq!(events.recv().await, Some(UiEvent::ShowError(ErrorKind::Other)));

    Ok(())
}

/// Document store refusing requests until a token is installed.
#[derive(Default)]
struct TokenGuardedStore {
    inner: MemoryDocumentStore,
    token: RwLock<Option<String>>,
}

impl TokenGuardedStore {
    async fn check(&self) -> recipebook_shared::Result<()> {
        if self.token.read().await.is_none() {
            return Err(recipebook_shared::Error::Unknown(anyhow::anyhow!(
                "401 Unauthorized"
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl DocumentStore for TokenGuardedStore {
    async fn get(&self, uid: &str) -> recipebook_shared::Result<Option<UserDocument>> {
        self.check().await?;
        self.inner.get(uid).await
    }

    async fn set(&self, document: &UserDocument) -> recipebook_shared::Result<()> {
        self.check().await?;
        self.inner.set(document).await
    }

    async fn authorize(&self, token: Option<&str>) {
        *self.token.write().await = token.map(str::to_owned);
    }
}

#[tokio::test]
async fn test_login_authorizes_cloud_documents() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let auth = Arc::new(MemoryAuth::default());
    let store = Arc::new(TokenGuardedStore::default());
    let app = App::with_services(
        pool,
        Arc::new(helpers::FakeSearch::new(helpers::catalog())),
        auth.clone(),
        Documents::from_arc(store.clone()),
    );
    auth.sign_up("john.doe@recipebook.localhost", "Passw0rd!")
        .await?;

    let users = app.users.clone();
    let (mut vm, mut events) =
        LoginViewModel::new(Login(users.clone()), GetOrCreateUser(users));
    vm.email = "john.doe@recipebook.localhost".to_owned();
    vm.password = "Passw0rd!".to_owned();

    let session = vm.login().await.unwrap();
    assert_eq!(events.recv().await, Some(UiEvent::Navigate(Destination::Home)));
    assert_eq!(store.token.read().await.as_deref(), Some(session.token.as_str()));
    assert!(store.inner.get(&session.uid).await?.is_some());

    app.set_session(None).await;
    assert!(store.token.read().await.is_none());

    Ok(())
}
