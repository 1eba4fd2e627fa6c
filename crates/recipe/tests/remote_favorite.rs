use recipebook_recipe::local;
use recipebook_shared::{Page, RemoteRecipe};
use temp_dir::TempDir;

mod helpers;

fn remote(id: &str) -> RemoteRecipe {
    RemoteRecipe {
        id: format!("http://www.edamam.com/ontologies/edamam.owl#recipe_{id}"),
        name: format!("Remote {id}"),
        types: vec![],
        prep_time: 30,
        image: None,
        favorite: true,
        source: "Serious Eats".to_owned(),
        url: "https://example.com".to_owned(),
        ingredients: vec!["1 egg".to_owned()],
    }
}

#[tokio::test]
async fn test_add_and_remove() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;

    local::add_remote_favorite(&pool, "john", &remote("a")).await?;
    local::add_remote_favorite(&pool, "john", &remote("b")).await?;
    local::add_remote_favorite(&pool, "john", &remote("a")).await?;
    local::add_remote_favorite(&pool, "jane", &remote("a")).await?;

    let ids = local::remote_favorite_ids(&pool, "john", None).await?;
    assert_eq!(ids, vec![remote("a").id, remote("b").id]);

    local::remove_remote_favorite(&pool, "john", remote("a").id).await?;

    let ids = local::remote_favorite_ids(&pool, "john", None).await?;
    assert_eq!(ids, vec![remote("b").id]);

    let ids = local::remote_favorite_ids(&pool, "jane", None).await?;
    assert_eq!(ids, vec![remote("a").id]);

    Ok(())
}

#[tokio::test]
async fn test_ids_paginated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;

    let ids = ["a", "b", "c"].map(|id| remote(id).id).to_vec();
    local::replace_remote_favorites(&pool, "john", &ids).await?;

    let first = local::remote_favorite_ids(&pool, "john", Some(Page::first(2))).await?;
    let second = local::remote_favorite_ids(&pool, "john", Some(Page::first(2).next())).await?;

    assert_eq!(first, ids[..2].to_vec());
    assert_eq!(second, ids[2..].to_vec());

    local::replace_remote_favorites(&pool, "john", &[]).await?;
    assert!(local::remote_favorite_ids(&pool, "john", None).await?.is_empty());

    Ok(())
}
