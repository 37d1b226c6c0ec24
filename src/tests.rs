#[cfg(test)]
mod tests {
    use actix::Actor;
    use actix_web::{App, http::StatusCode, test, web};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::{Value, json};

    use crate::config::game::GameConfig;
    use crate::game::interpreter::{JOIN_DURING_GAMEPLAY, join_success_message};
    use crate::game::state::MatchState;
    use crate::server::match_session::MatchServer;
    use crate::server::router::config;
    use crate::server::state::AppState;

    fn app_state() -> web::Data<AppState> {
        let state = MatchState::with_rng(GameConfig::default(), StdRng::seed_from_u64(9));
        web::Data::new(AppState::new(MatchServer::new(state).start()))
    }

    fn chat(identity: &str, line: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/chat")
            .set_json(json!({ "identity": identity, "line": line }))
    }

    #[actix_web::test]
    async fn test_join_then_start() {
        let app = test::init_service(App::new().app_data(app_state()).configure(config)).await;

        let outcome: Value =
            test::call_and_read_body_json(&app, chat("Alice", "!join abc").to_request()).await;
        assert_eq!(outcome["whispers"][0]["to"], "Alice");
        assert_eq!(outcome["whispers"][0]["text"], join_success_message("ABC"));
        assert_eq!(outcome["changed"], true);

        let started: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/match/start").to_request(),
        ).await;
        assert_eq!(started["started"], true);

        let again: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/match/start").to_request(),
        ).await;
        assert_eq!(again["started"], false);

        let late: Value =
            test::call_and_read_body_json(&app, chat("bob", "!join").to_request()).await;
        assert_eq!(late["whispers"][0]["text"], JOIN_DURING_GAMEPLAY);

        let snapshot: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/match/state").to_request(),
        ).await;
        assert_eq!(snapshot["phase"], "Gameplay");
        assert_eq!(snapshot["player_count_start"], 1);
        assert_eq!(snapshot["width"], 8);
        let occupied = snapshot["cells"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|row| row.as_array().unwrap())
            .filter(|cell| cell["occupied"] == true)
            .count();
        assert_eq!(occupied, 1);
    }

    #[actix_web::test]
    async fn test_place_object() {
        let app = test::init_service(App::new().app_data(app_state()).configure(config)).await;

        let placed: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/match/place")
                .set_json(json!({ "object": "gun", "x": 2, "y": 5 }))
                .to_request(),
        ).await;
        assert_eq!(placed["placed"], true);

        let snapshot: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/match/state").to_request(),
        ).await;
        assert_eq!(snapshot["cells"][5][2]["has_gun"], true);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/match/place")
                .set_json(json!({ "object": "wall", "x": 20, "y": 0 }))
                .to_request(),
        ).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "OUT_OF_BOUNDS");
    }

    #[actix_web::test]
    async fn test_chat_requires_identity() {
        let app = test::init_service(App::new().app_data(app_state()).configure(config)).await;

        let resp = test::call_service(&app, chat("  ", "!join").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[actix_web::test]
    async fn test_silent_commands_return_empty_outcome() {
        let app = test::init_service(App::new().app_data(app_state()).configure(config)).await;

        let outcome: Value =
            test::call_and_read_body_json(&app, chat("ghost", "!random").to_request()).await;
        assert_eq!(outcome, json!({ "whispers": [], "events": [], "changed": false }));
    }
}
