
use test_helpers::*;

#[tokio::test]
async fn test_first_start_writes_default_document() {
    let dir = TempDir::new();
    let path = dir.file("data/database.json");

    let app = create_file_app(path.clone()).await;
    assert!(path.exists());

    let document = get_json(&app, "/api/db").await;
    assert_eq!(document["users"][0]["email"], "admin");
    let password = document["users"][0]["password"].as_str().unwrap();
    assert!(password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_saved_document_survives_restart() {
    let dir = TempDir::new();
    let path = dir.file("database.json");

    let app = create_file_app(path.clone()).await;
    let mut document = get_json(&app, "/api/db").await;
    document["alliance"]["name"] = serde_json::json!("Night Watch");

    let response = warp::test::request()
        .method("POST")
        .path("/api/save-db")
        .json(&document)
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);

    let response = warp::test::request()
        .method("POST")
        .path("/api/war-map/node-tactic")
        .json(&serde_json::json!({
            "difficulty": "Expert",
            "tactic": { "nodeNumber": 3, "tactic": "Parry" }
        }))
        .reply(&app)
        .await;
    assert_eq!(response.status(), 200);

    let restarted = create_file_app(path.clone()).await;
    let document = get_json(&restarted, "/api/db").await;
    assert_eq!(document["alliance"]["name"], "Night Watch");
    assert_eq!(document["warMap"]["nodeTactics"][0]["nodeId"], "NODE_003");
}

#[tokio::test]
async fn test_plaintext_document_is_upgraded_on_start() {
    let dir = TempDir::new();
    let path = dir.file("database.json");
    std::fs::write(
        &path,
        serde_json::to_vec_pretty(&serde_json::json!({
            "users": [{
                "id": "USR_001",
                "email": "admin",
                "password": "admin",
                "fullName": "Admin User",
                "lineId": "admin",
                "role": "admin",
                "status": "approved",
                "data": { "champions": [], "settings": {} }
            }],
            "alliance": { "name": "Legacy", "members": [] },
            "warMap": {},
            "seasons": []
        }))
        .unwrap(),
    )
    .unwrap();

    let app = create_file_app(path.clone()).await;
    let document = get_json(&app, "/api/db").await;
    assert_eq!(document["alliance"]["name"], "Legacy");
    assert_eq!(document["warMap"]["nodes"].as_array().unwrap().len(), 50);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_ne!(on_disk["users"][0]["password"], "admin");
}
