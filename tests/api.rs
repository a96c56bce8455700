use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web::Data;
use actix_web::App;
use serde_json::{json, Value};

use volunteer_center::config::Config;
use volunteer_center::core::models::participation::TransitionPolicy;
use volunteer_center::core::models::user::{Insert as UserInsert, UserType};
use volunteer_center::core::ports::repository::{Manager, UserCommon};
use volunteer_center::database::{self, schema, sqlx::SqliteSqlxManager};
use volunteer_center::routes;

macro_rules! app {
    ($manager:expr, $policy:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new($manager.clone()))
                .app_data(Data::new($policy))
                .configure(routes::configure),
        )
        .await
    };
}

async fn manager() -> SqliteSqlxManager {
    let pool = database::connect("sqlite::memory:", 1).await.unwrap();
    schema::init(&pool).await.unwrap();
    SqliteSqlxManager::new(pool)
}

async fn seed_user(manager: &SqliteSqlxManager, name: &str, user_type: UserType) -> i64 {
    let mut db = manager.db().await.unwrap();
    let email = format!("{}@example.org", name.to_lowercase().replace(' ', "."));
    UserCommon::insert(&mut db, UserInsert::new(name, &email, user_type)).await.unwrap()
}

fn initiative_body(organization_id: i64, category: &str) -> Value {
    json!({
        "title": format!("Akcja: {}", category),
        "description": "Sprzątanie bulwarów wiślanych",
        "category": category,
        "location": "Kraków, Bulwary Wiślane",
        "latitude": 50.0519,
        "longitude": 19.9336,
        "start_date": "2026-05-10",
        "end_date": "2026-05-11",
        "hours_required": 4,
        "spots_available": 20,
        "requirements": "Rękawice",
        "organization_id": organization_id,
    })
}

#[actix_web::test]
async fn test_index() {
    let manager = manager().await;
    let app = app!(manager, TransitionPolicy::Strict);
    let body: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(body["endpoints"]["initiatives"], "/initiatives");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_created_initiative_echoes_input() {
    let manager = manager().await;
    let org = seed_user(&manager, "Fundacja Zielony Kraków", UserType::Organization).await;
    let volunteer = seed_user(&manager, "Anna Kowalska", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Ekologia")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = TestRequest::get().uri(&format!("/initiatives/{}", id)).to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["title"], "Akcja: Ekologia");
    assert_eq!(detail["category"], "Ekologia");
    assert_eq!(detail["location"], "Kraków, Bulwary Wiślane");
    assert_eq!(detail["start_date"], "2026-05-10");
    assert_eq!(detail["end_date"], "2026-05-11");
    assert_eq!(detail["hours_required"], 4);
    assert_eq!(detail["spots_available"], 20);
    assert_eq!(detail["requirements"], "Rękawice");
    assert_eq!(detail["organization_id"], org);
    assert_eq!(detail["status"], "active");
    assert_eq!(detail["organization_name"], "Fundacja Zielony Kraków");
    assert_eq!(detail["applications_count"], 0);

    // a volunteer is not an organization
    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(volunteer, "Ekologia")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, TestRequest::get().uri("/initiatives/999").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_apply_twice_is_conflict() {
    let manager = manager().await;
    let org = seed_user(&manager, "Caritas", UserType::Organization).await;
    let volunteer = seed_user(&manager, "Jan Nowak", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Pomoc społeczna")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let initiative = created["id"].as_i64().unwrap();

    let apply = json!({"volunteer_id": volunteer, "message": "Chętnie pomogę"});
    let req = TestRequest::post().uri(&format!("/initiatives/{}/apply", initiative)).set_json(&apply).to_request();
    let applied: Value = test::call_and_read_body_json(&app, req).await;
    assert!(applied["participation_id"].as_i64().is_some());

    let req = TestRequest::post().uri(&format!("/initiatives/{}/apply", initiative)).set_json(&apply).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = TestRequest::post().uri("/initiatives/999/apply").set_json(&apply).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri(&format!("/volunteers/{}/participations", volunteer)).to_request();
    let participations: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(participations["count"], 1);
    assert_eq!(participations["items"][0]["status"], "pending");
    assert_eq!(participations["items"][0]["organization_name"], "Caritas");

    let req = TestRequest::get().uri(&format!("/organizations/{}/applications?status=pending", org)).to_request();
    let applications: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(applications["count"], 1);
    assert_eq!(applications["items"][0]["volunteer_name"], "Jan Nowak");

    let req = TestRequest::get().uri(&format!("/organizations/{}/initiatives", org)).to_request();
    let initiatives: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(initiatives["items"][0]["pending_applications"], 1);
    assert_eq!(initiatives["items"][0]["approved_volunteers"], 0);
}

#[actix_web::test]
async fn test_category_filter_is_exact() {
    let manager = manager().await;
    let org = seed_user(&manager, "Fundacja", UserType::Organization).await;
    let app = app!(manager, TransitionPolicy::Strict);

    for category in ["Ekologia", "Ekologia miejska", "Sport"] {
        let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, category)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let list: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/initiatives?category=Ekologia").to_request()).await;
    assert_eq!(list["count"], 1);
    for item in list["items"].as_array().unwrap() {
        assert_eq!(item["category"], "Ekologia");
    }

    let list: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/initiatives?category=Kultura").to_request()).await;
    assert_eq!(list["count"], 0);

    let list: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/initiatives?status=all").to_request()).await;
    assert_eq!(list["count"], 3);

    let resp = test::call_service(&app, TestRequest::get().uri("/initiatives?status=archived").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_certificate_requires_completed_participation() {
    let manager = manager().await;
    let org = seed_user(&manager, "Bank Żywności", UserType::Organization).await;
    let volunteer = seed_user(&manager, "Ewa Zielińska", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Pomoc społeczna")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let req = TestRequest::post()
        .uri(&format!("/initiatives/{}/apply", created["id"]))
        .set_json(json!({"volunteer_id": volunteer}))
        .to_request();
    let applied: Value = test::call_and_read_body_json(&app, req).await;
    let participation = applied["participation_id"].as_i64().unwrap();
    let certificate = json!({"participation_id": participation, "organization_id": org});

    let req = TestRequest::post().uri("/certificates").set_json(&certificate).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", participation))
        .set_json(json!({"status": "approved"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = TestRequest::post().uri("/certificates").set_json(&certificate).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", participation))
        .set_json(json!({"status": "completed", "hours_completed": 8, "feedback": "Świetna praca"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "completed");

    // the issuing organization must be an organization
    let req = TestRequest::post()
        .uri("/certificates")
        .set_json(json!({"participation_id": participation, "organization_id": volunteer}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::post().uri("/certificates").set_json(&certificate).to_request();
    let issued: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(issued["volunteer_name"], "Ewa Zielińska");
    assert_eq!(issued["hours"], 8);
    assert_eq!(issued["initiative_title"], "Akcja: Pomoc społeczna");

    let req = TestRequest::get().uri(&format!("/volunteers/{}/certificates", volunteer)).to_request();
    let certificates: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(certificates["count"], 1);
    assert_eq!(certificates["items"][0]["organization_name"], "Bank Żywności");

    let req = TestRequest::post()
        .uri("/certificates")
        .set_json(json!({"participation_id": 999, "organization_id": org}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_review_dates_and_hours() {
    let manager = manager().await;
    let org = seed_user(&manager, "Hospicjum", UserType::Organization).await;
    let anna = seed_user(&manager, "Anna", UserType::Volunteer).await;
    let piotr = seed_user(&manager, "Piotr", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Permissive);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Zdrowie")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let mut participations = vec![];
    for volunteer in [anna, piotr] {
        let req = TestRequest::post()
            .uri(&format!("/initiatives/{}/apply", created["id"]))
            .set_json(json!({"volunteer_id": volunteer}))
            .to_request();
        let applied: Value = test::call_and_read_body_json(&app, req).await;
        participations.push(applied["participation_id"].as_i64().unwrap());
    }

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", participations[0]))
        .set_json(json!({"status": "approved"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = TestRequest::get().uri(&format!("/volunteers/{}/participations", anna)).to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert!(!list["items"][0]["approved_date"].is_null());

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", participations[1]))
        .set_json(json!({"status": "approved", "hours_completed": 5}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", participations[1]))
        .set_json(json!({"status": "rejected"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = TestRequest::get().uri(&format!("/volunteers/{}/participations", piotr)).to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["items"][0]["status"], "rejected");
    assert_eq!(list["items"][0]["hours_completed"], 5);

    let req = TestRequest::put().uri("/participations/999/approve").set_json(json!({"status": "approved"})).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_strict_policy_rejects_skipping_approval() {
    let manager = manager().await;
    let org = seed_user(&manager, "Schronisko", UserType::Organization).await;
    let volunteer = seed_user(&manager, "Ola", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Zwierzęta")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let req = TestRequest::post()
        .uri(&format!("/initiatives/{}/apply", created["id"]))
        .set_json(json!({"volunteer_id": volunteer}))
        .to_request();
    let applied: Value = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", applied["participation_id"]))
        .set_json(json!({"status": "completed", "hours_completed": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some());
}

#[actix_web::test]
async fn test_statistics_total_hours() {
    let manager = manager().await;
    let org = seed_user(&manager, "Dom Kultury", UserType::Organization).await;
    let volunteers = [
        seed_user(&manager, "Kasia", UserType::Volunteer).await,
        seed_user(&manager, "Tomek", UserType::Volunteer).await,
        seed_user(&manager, "Marek", UserType::Volunteer).await,
    ];
    let app = app!(manager, TransitionPolicy::Permissive);

    let stats: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/statistics").to_request()).await;
    assert_eq!(stats["overview"]["total_hours"], 0);
    assert_eq!(stats["overview"]["volunteers"], 3);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Kultura")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    for (volunteer, status, hours) in [(volunteers[0], "completed", 3), (volunteers[1], "completed", 4), (volunteers[2], "approved", 9)] {
        let req = TestRequest::post()
            .uri(&format!("/initiatives/{}/apply", created["id"]))
            .set_json(json!({"volunteer_id": volunteer}))
            .to_request();
        let applied: Value = test::call_and_read_body_json(&app, req).await;
        let req = TestRequest::put()
            .uri(&format!("/participations/{}/approve", applied["participation_id"]))
            .set_json(json!({"status": status, "hours_completed": hours}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let stats: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/statistics").to_request()).await;
    assert_eq!(stats["overview"]["total_hours"], 7);
    assert_eq!(stats["overview"]["completed_participations"], 2);
    assert_eq!(stats["categories"][0]["category"], "Kultura");
    assert_eq!(stats["recent_initiatives"][0]["organization"], "Dom Kultury");
}

#[actix_web::test]
async fn test_users_and_coordinators() {
    let manager = manager().await;
    let coordinator = seed_user(&manager, "Pani Dyrektor", UserType::Coordinator).await;
    seed_user(&manager, "Kuba", UserType::Volunteer).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let users: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/users?user_type=volunteer").to_request()).await;
    assert_eq!(users["count"], 1);
    assert_eq!(users["items"][0]["name"], "Kuba");

    let resp = test::call_service(&app, TestRequest::get().uri("/users?user_type=admin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let user: Value = test::call_and_read_body_json(&app, TestRequest::get().uri(&format!("/users/{}", coordinator)).to_request()).await;
    assert_eq!(user["user_type"], "coordinator");

    // no school assigned
    let students: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri(&format!("/coordinators/{}/students", coordinator)).to_request()).await;
    assert_eq!(students["count"], 0);
    let report: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri(&format!("/coordinators/{}/reports", coordinator)).to_request()).await;
    assert!(report["school_id"].is_null());
    assert_eq!(report["statistics"]["total_hours"], 0);

    let resp = test::call_service(&app, TestRequest::get().uri("/coordinators/999/reports").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_input_has_json_error_body() {
    let manager = manager().await;
    let org = seed_user(&manager, "Teatr", UserType::Organization).await;
    let app = app!(manager, TransitionPolicy::Strict);

    let resp = test::call_service(&app, TestRequest::get().uri("/initiatives/abc").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("abc"));

    let resp = test::call_service(&app, TestRequest::get().uri("/initiatives?organization_id=teatr").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = TestRequest::post()
        .uri("/initiatives")
        .insert_header(("content-type", "application/json"))
        .set_payload(format!("{{\"organization_id\": {}", org))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_empty_status_lists_everything() {
    let manager = manager().await;
    let org = seed_user(&manager, "Biblioteka", UserType::Organization).await;
    let app = app!(manager, TransitionPolicy::Strict);

    for category in ["Kultura", "Edukacja"] {
        let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, category)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
    let list: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/initiatives?status=").to_request()).await;
    assert_eq!(list["count"], 2);
    let list: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri(&format!("/organizations/{}/applications?status=", org)).to_request()).await;
    assert_eq!(list["count"], 0);
}

#[actix_web::test]
async fn test_default_policy_accepts_direct_completion() {
    let manager = manager().await;
    let org = seed_user(&manager, "Ogród Społeczny", UserType::Organization).await;
    let volunteer = seed_user(&manager, "Zosia", UserType::Volunteer).await;
    let config = Config::from_lookup(|_| None).unwrap();
    let app = app!(manager, config.transition_policy);

    let req = TestRequest::post().uri("/initiatives").set_json(initiative_body(org, "Ekologia")).to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let req = TestRequest::post()
        .uri(&format!("/initiatives/{}/apply", created["id"]))
        .set_json(json!({"volunteer_id": volunteer}))
        .to_request();
    let applied: Value = test::call_and_read_body_json(&app, req).await;

    let req = TestRequest::put()
        .uri(&format!("/participations/{}/approve", applied["participation_id"]))
        .set_json(json!({"status": "completed", "hours_completed": 3}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "completed");

    let req = TestRequest::get().uri(&format!("/volunteers/{}/participations", volunteer)).to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["items"][0]["hours_completed"], 3);
    assert!(list["items"][0]["approved_date"].is_null());
}
