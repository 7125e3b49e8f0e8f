use mockito::{Matcher, Server};
use rand::rngs::StdRng;
use rand::SeedableRng;
use recipe_finder::render::detail::{DEFAULT_CATEGORY, DEFAULT_REGION};
use recipe_finder::render::render_detail;
use recipe_finder::{fetch_detail_by_id, FetchError, MealDbClient};

const LOOKUP_BODY: &str = r#"{"meals":[{
    "idMeal":"52772",
    "strMeal":"Teriyaki Chicken Casserole",
    "strCategory":null,
    "strArea":null,
    "strInstructions":"Preheat oven to 350° F. Spray a 9x13-inch baking pan with non-stick spray.\r\nCombine soy sauce, ½ cup water, brown sugar, ginger and garlic in a small saucepan and cover. Bring to a boil over medium heat.",
    "strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
    "strIngredient1":"soy sauce",
    "strIngredient2":"water",
    "strIngredient3":"brown sugar",
    "strIngredient4":" ",
    "strIngredient5":null,
    "strMeasure1":"3/4 cup",
    "strMeasure2":"1/2 cup",
    "strMeasure3":"1/4 cup",
    "strMeasure4":" ",
    "strMeasure5":null
}]}"#;

fn client_for(server: &Server) -> MealDbClient {
    MealDbClient::builder().base_url(server.url()).build().unwrap()
}

#[tokio::test]
async fn test_lookup_renders_full_detail() {
    let mut server = Server::new_async().await;
    let lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOOKUP_BODY)
        .create_async()
        .await;

    let detail = fetch_detail_by_id(&client_for(&server), "52772").await.unwrap();
    let view = render_detail(&detail, &mut StdRng::seed_from_u64(1));

    assert_eq!(view.title, "Teriyaki Chicken Casserole");
    assert_eq!(view.category, DEFAULT_CATEGORY);
    assert_eq!(view.region, DEFAULT_REGION);
    assert_eq!(
        view.ingredients,
        vec!["3/4 cup soy sauce", "1/2 cup water", "1/4 cup brown sugar"]
    );
    assert_eq!(
        view.steps,
        vec![
            "Preheat oven to 350° F.",
            "Spray a 9x13-inch baking pan with non-stick spray.",
            "Combine soy sauce, ½ cup water, brown sugar, ginger and garlic in a small saucepan and cover.",
            "Bring to a boil over medium heat.",
        ]
    );
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let mut server = Server::new_async().await;
    let _lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    let result = fetch_detail_by_id(&client_for(&server), "1").await;
    assert!(matches!(result, Err(FetchError::NotFound(ref id)) if id == "1"));
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    // Port 9 (discard) is not listening in test environments
    let client = MealDbClient::builder()
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let result = fetch_detail_by_id(&client, "52772").await;
    assert!(matches!(result, Err(FetchError::Request(_))));
}
