//! The top-level helpers build their client from settings. This binary holds a
//! single test because it sets a process-wide environment variable.

use mockito::{Matcher, Server};
use recipe_finder::{recipe_details, random_recipes, search_recipes, FetchError, FinderError, SearchResult};

const CURRY: &str = r#"{"meals":[{"idMeal":"52795","strMeal":"Chicken Handi","strMealThumb":"https://x/handi.jpg","strCategory":"Chicken","strArea":"Indian","strInstructions":"Fry the onions. Add chicken.","strIngredient1":"Chicken","strMeasure1":"1.2 kg"}]}"#;

#[tokio::test]
async fn test_helpers_follow_configured_base_url() {
    let mut server = Server::new_async().await;
    let filter = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "chicken".into()))
        .with_status(200)
        .with_body(CURRY)
        .expect(1)
        .create_async()
        .await;
    let random = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_body(CURRY)
        .expect(2)
        .create_async()
        .await;
    let _found = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52795".into()))
        .with_status(200)
        .with_body(CURRY)
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    std::env::set_var("RECIPE_FINDER__BASE_URL", server.url());

    match search_recipes("chicken").await.unwrap() {
        SearchResult::Found(recipes) => assert_eq!(recipes[0].title, "Chicken Handi"),
        other => panic!("Expected Found, got {:?}", other),
    }

    let batch = random_recipes(2).await.unwrap();
    assert_eq!(batch.len(), 2);

    let detail = recipe_details("52795").await.unwrap();
    assert_eq!(detail.title, "Chicken Handi");
    assert_eq!(detail.category.as_deref(), Some("Chicken"));

    let missing = recipe_details("1").await;
    assert!(matches!(
        missing,
        Err(FinderError::Fetch(FetchError::NotFound(ref id))) if id == "1"
    ));

    filter.assert_async().await;
    random.assert_async().await;
}
