#[allow(dead_code)]
mod common;

use serde_json::json;

use common::{TempDir, TestServer};

#[tokio::test]
async fn tournament_survives_restart() {
    let dir = TempDir::new();

    {
        let server = TestServer::with_data_dir(&dir.0).await;
        server.add_flat_course().await;
        for (name, handicap) in [("Ann", 0), ("Bob", 10), ("Cy", 20), ("Dee", 5)] {
            server.enter(name, handicap).await;
        }
        for (day, strokes) in [(1, 4), (2, 5)] {
            for name in ["Ann", "Bob", "Cy", "Dee"] {
                let (status, _) = server.submit(name, day, strokes).await;
                assert_eq!(status, 200);
            }
        }
        let (status, _) = server.post("/days/1/complete", json!({})).await;
        assert_eq!(status, 200);
        let (status, _) = server
            .post("/days/2/complete", json!({ "cutline": -5 }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(server.delete("/competitors/Dee").await, 204);
    }

    let server = TestServer::with_data_dir(&dir.0).await;
    let (_, health) = server.get("/health").await;
    assert_eq!(health["persistent"], true);
    assert_eq!(health["tournament"]["competitors"], 3);
    assert_eq!(health["tournament"]["courses"], 1);
    assert_eq!(health["tournament"]["cutline"], -5);

    // withdrawing Dee dropped their pair
    let (_, pairs) = server.get("/pairs").await;
    assert_eq!(pairs.as_array().unwrap().len(), 1);

    let (status, body) = server.post("/split", json!({ "cutline": 0 })).await;
    assert_eq!(status, 409, "{body}");

    let (status, round) = server.submit("Ann", 3, 4).await;
    assert_eq!(status, 200);
    assert_eq!(round["standing"]["days_played"], 3);
    assert_eq!(round["standing"]["eligibility"], "SecondaryOnly");
}

#[tokio::test]
async fn failed_update_is_not_persisted() {
    let dir = TempDir::new();

    {
        let server = TestServer::with_data_dir(&dir.0).await;
        server.add_flat_course().await;
        server.enter("Ann", 12).await;
        let (status, _) = server.submit("Ann", 1, 9).await;
        assert_eq!(status, 400);
    }

    let server = TestServer::with_data_dir(&dir.0).await;
    let (_, board) = server.get("/standings/secondary").await;
    assert_eq!(board["rows"][0]["name"], "Ann");
    assert!(board["rows"][0]["days"].as_array().unwrap().is_empty());
}
