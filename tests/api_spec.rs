use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use ninebox::api::{create_router, AppState, DropResponse};
use ninebox::engine::*;
use ninebox::models::*;
use ninebox::roster::Roster;
use ninebox::snapshot::GridSnapshot;
use serde_json::json;

fn pos(raw: i64) -> Position {
    Position::new(raw).unwrap()
}

fn setup_with(preferences: MemoryPreferences) -> (TestServer, Roster) {
    let roster = Roster::new([
        Employee::new(EmployeeId(1), "Ada", pos(5)),
        Employee::new(EmployeeId(2), "Grace", pos(1)),
    ]);
    let state = AppState::new(roster.clone(), Arc::new(preferences), 60);
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, roster)
}

fn setup() -> (TestServer, Roster) {
    setup_with(MemoryPreferences::new())
}

mod grid {
    use super::*;

    #[tokio::test]
    async fn health_check() {
        let (server, _) = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn returns_nine_boxes_in_normal_layout() {
        let (server, _) = setup();

        let response = server.get("/api/v1/grid").await;
        response.assert_status_ok();
        let grid: GridSnapshot = response.json();

        assert_eq!(grid.boxes.len(), 9);
        assert_eq!(grid.focus, FocusState::Normal);
        assert_eq!(grid.css.columns, "1fr 1fr 1fr");
        assert_eq!(grid.employee_count(), 2);
        assert_eq!(grid.get(pos(5)).unwrap().employees[0].name, "Ada");
        assert_eq!(grid.get(pos(9)).unwrap().label, "H,H");
    }

    #[tokio::test]
    async fn lists_the_position_table() {
        let (server, _) = setup();

        let response = server.get("/api/v1/positions").await;
        response.assert_status_ok();
        let rows: Vec<serde_json::Value> = response.json();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[6]["position"], 7);
        assert_eq!(rows[6]["label"], "L,H");
        assert_eq!(rows[6]["row"], 0);
    }
}

mod focus {
    use super::*;

    #[tokio::test]
    async fn expand_reshapes_the_template() {
        let (server, _) = setup();

        server.post("/api/v1/focus/9").await.assert_status_ok();
        let grid: GridSnapshot = server.get("/api/v1/grid").await.json();

        assert_eq!(grid.focus, FocusState::Focused(pos(9)));
        assert_eq!(grid.css.columns, "60px 60px 1fr");
        assert_eq!(grid.css.rows, "1fr 60px 60px");
        assert_eq!(grid.get(pos(9)).unwrap().display, BoxDisplay::Expanded);
        assert_eq!(grid.get(pos(5)).unwrap().display, BoxDisplay::Collapsed);
    }

    #[tokio::test]
    async fn out_of_range_expand_is_ignored() {
        let (server, _) = setup();

        let response = server.post("/api/v1/focus/12").await;
        response.assert_status_ok();
        assert_eq!(response.json::<FocusState>(), FocusState::Normal);
    }

    #[tokio::test]
    async fn non_numeric_expand_keeps_the_current_focus() {
        let (server, _) = setup();
        server.post("/api/v1/focus/4").await.assert_status_ok();

        for segment in ["abc", "99999999999999999999999", "4.5"] {
            let response = server.post(&format!("/api/v1/focus/{segment}")).await;
            response.assert_status_ok();
            assert_eq!(response.json::<FocusState>(), FocusState::Focused(pos(4)));
        }
    }

    #[tokio::test]
    async fn escape_and_collapse_clear_the_persisted_key() {
        let preferences = MemoryPreferences::new();
        let (server, _) = setup_with(preferences.clone());

        server.post("/api/v1/focus/4").await;
        assert_eq!(
            preferences.get(EXPANDED_POSITION_KEY).unwrap(),
            Some("4".to_string())
        );

        let response = server.post("/api/v1/focus/escape").await;
        assert_eq!(response.json::<FocusState>(), FocusState::Normal);
        assert_eq!(preferences.get(EXPANDED_POSITION_KEY).unwrap(), None);

        server.post("/api/v1/focus/4").await;
        server.delete("/api/v1/focus").await.assert_status_ok();
        assert_eq!(preferences.get(EXPANDED_POSITION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn restores_persisted_focus_on_startup() {
        let (server, _) = setup_with(MemoryPreferences::with_value(EXPANDED_POSITION_KEY, "3"));

        let focus: FocusState = server.get("/api/v1/focus").await.json();
        assert_eq!(focus, FocusState::Focused(pos(3)));
    }
}

mod drag_and_drop {
    use super::*;

    #[tokio::test]
    async fn permanent_move_through_the_api() {
        let (server, roster) = setup();

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 1 }))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let response = server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": 9 }))
            .await;
        response.assert_status_ok();
        let drop: DropResponse = response.json();

        assert_eq!(drop.outcome, "dispatched");
        let report = drop.report.expect("report");
        assert_eq!(report.operation, MoveOperation::Permanent);
        assert!(report.error.is_none());

        let ada = roster.get(EmployeeId(1)).unwrap();
        assert_eq!(ada.grid_position, pos(9));
        assert_eq!(ada.original_grid_position, Some(pos(5)));
    }

    #[tokio::test]
    async fn donut_move_through_the_api() {
        let (server, roster) = setup();

        server
            .put("/api/v1/donut")
            .json(&json!({ "active": true }))
            .await
            .assert_status_ok();
        let grid: GridSnapshot = server.get("/api/v1/grid").await.json();
        assert!(grid.donut_mode);
        assert_eq!(grid.employee_count(), 1);

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 1 }))
            .await;
        let drop: DropResponse = server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": 7 }))
            .await
            .json();

        assert_eq!(drop.report.expect("report").operation, MoveOperation::Overlay);
        let ada = roster.get(EmployeeId(1)).unwrap();
        assert_eq!(ada.grid_position, pos(5));
        assert_eq!(ada.donut_position, Some(pos(7)));
    }

    #[tokio::test]
    async fn failed_move_is_returned_as_a_report() {
        let (server, roster) = setup();
        roster.set_donut_mode(true);

        // Grace sits at 1, outside the donut box.
        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 2 }))
            .await;
        let drop: DropResponse = server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": 3 }))
            .await
            .json();

        let report = drop.report.expect("report");
        assert!(report.error.unwrap().contains("outside the donut"));
        assert_eq!(roster.get(EmployeeId(2)).unwrap().donut_position, None);
    }

    #[tokio::test]
    async fn drop_outside_and_cancel_do_not_move() {
        let (server, roster) = setup();

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 1 }))
            .await;
        let drop: DropResponse = server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": null }))
            .await
            .json();
        assert_eq!(drop.outcome, "no_target");

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 1 }))
            .await;
        server
            .post("/api/v1/drag/cancel")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let drop: DropResponse = server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": 9 }))
            .await
            .json();
        assert_eq!(drop.outcome, "not_dragging");

        assert_eq!(roster.get(EmployeeId(1)).unwrap().grid_position, pos(5));
        assert!(roster.history().is_empty());
    }

    #[tokio::test]
    async fn drag_start_rejects_unknown_and_concurrent_drags() {
        let (server, _) = setup();

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 42 }))
            .await
            .assert_status_not_found();

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 1 }))
            .await;
        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 2 }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}

mod employees {
    use super::*;

    #[tokio::test]
    async fn select_and_fetch() {
        let (server, roster) = setup();

        server
            .post("/api/v1/employees/2/select")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(roster.selected(), Some(EmployeeId(2)));

        let grace: Employee = server.get("/api/v1/employees/2").await.json();
        assert_eq!(grace.name, "Grace");

        server
            .get("/api/v1/employees/99")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn history_lists_applied_moves() {
        let (server, _) = setup();

        server
            .post("/api/v1/drag/start")
            .json(&json!({ "employee_id": 2 }))
            .await;
        server
            .post("/api/v1/drag/end")
            .json(&json!({ "target": 2 }))
            .await;

        let history: Vec<MoveRecord> = server.get("/api/v1/history").await.json();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, MoveKind::Permanent);
        assert_eq!(history[0].from, pos(1));
        assert_eq!(history[0].to, pos(2));
    }
}
