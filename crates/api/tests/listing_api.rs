//! HTTP-level tests for the paginated admin listing.

mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use beasiswa_core::application::{ApplicationStatus, NewApplication, ReviewStage};
use beasiswa_db::store::ApplicationStore;
use chrono::{DateTime, Utc};
use common::{body_json, build_test_app, get_auth, TestApp};

async fn seed(app: &TestApp, count: usize) {
    for i in 0..count {
        let input = NewApplication {
            nim: format!("24{i:04}"),
            email: format!("mhs{i}@kampus.ac.id"),
            nama_lengkap: format!("Mahasiswa {i}"),
            nomor_telepon: String::new(),
            alamat: String::new(),
            ipk: 3.0,
            penghasilan_keluarga: 0,
            essay: String::new(),
            dokumen_pendukung: String::new(),
            rekomendasi: String::new(),
            status: ApplicationStatus::UnderReview,
            tahap: ReviewStage::Administrative,
            catatan: None,
        };
        app.applications.insert(&input).await.unwrap();
    }
}

#[tokio::test]
async fn test_pages_of_ten_over_twenty_five_records() {
    let app = build_test_app().await;
    let token = app.admin_token().await;
    seed(&app, 25).await;

    let expected = [(1, 10, true, false), (2, 10, true, true), (3, 5, false, true)];
    let mut seen = HashSet::new();
    let mut previous: Option<DateTime<Utc>> = None;

    for (page, len, has_next, has_prev) in expected {
        let uri = format!("/api/admin/applications?page={page}&page_size=10");
        let response = get_auth(&app.router, &uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), len, "page {page}");

        let meta = &json["pagination"];
        assert_eq!(meta["page"], page);
        assert_eq!(meta["page_size"], 10);
        assert_eq!(meta["total"], 25);
        assert_eq!(meta["total_pages"], 3);
        assert_eq!(meta["has_next"], has_next, "page {page}");
        assert_eq!(meta["has_prev"], has_prev, "page {page}");

        for record in data {
            assert!(seen.insert(record["id"].as_i64().unwrap()), "ids must not repeat");
            let registered: DateTime<Utc> =
                record["tanggal_daftar"].as_str().unwrap().parse().unwrap();
            if let Some(prev) = previous {
                assert!(registered <= prev, "newest registrations come first");
            }
            previous = Some(registered);
        }
    }
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let app = build_test_app().await;
    let token = app.admin_token().await;
    seed(&app, 3).await;

    let response = get_auth(&app.router, "/api/admin/applications?page=5", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["total_pages"], 1);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["has_prev"], true);
}

#[tokio::test]
async fn test_defaults_and_clamping() {
    let app = build_test_app().await;
    let token = app.admin_token().await;
    seed(&app, 12).await;

    let json = body_json(get_auth(&app.router, "/api/admin/applications", &token).await).await;
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["page_size"], 10);
    assert_eq!(json["data"].as_array().unwrap().len(), 10);

    let uri = "/api/admin/applications?page_size=1000";
    let json = body_json(get_auth(&app.router, uri, &token).await).await;
    assert_eq!(json["pagination"]["page_size"], 100);
    assert_eq!(json["data"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_empty_store() {
    let app = build_test_app().await;
    let token = app.admin_token().await;

    let json = body_json(get_auth(&app.router, "/api/admin/applications", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total_pages"], 0);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["has_prev"], false);
}

#[tokio::test]
async fn test_page_zero_is_rejected() {
    let app = build_test_app().await;
    let token = app.admin_token().await;

    let response = get_auth(&app.router, "/api/admin/applications?page=0", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_non_numeric_page_is_bad_request() {
    let app = build_test_app().await;
    let token = app.admin_token().await;

    let response = get_auth(&app.router, "/api/admin/applications?page=abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
