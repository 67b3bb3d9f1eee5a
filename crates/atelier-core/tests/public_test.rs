#![allow(clippy::unwrap_used)]
// Integration tests for the public-site facade.

use std::sync::Arc;

use atelier_api::ApiClient;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atelier_core::{
    ApplicationSubmission, ApplicationType, CoreError, EntityId, EnquirySubmission, PublicSite,
    Session,
};

async fn setup() -> (MockServer, PublicSite) {
    let server = MockServer::start().await;
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Arc::new(Session::ephemeral()),
    );
    (server, PublicSite::new(Arc::new(client)))
}

fn jobs() -> serde_json::Value {
    json!([
        { "id": 1, "title": "Frontend Developer", "slug": "frontend-developer",
          "location": "Bangalore", "type": "full-time", "department": "Engineering" },
        { "id": 2, "title": "Content Writer", "slug": "content-writer",
          "location": "Remote", "type": "part-time", "department": "Marketing" }
    ])
}

#[tokio::test]
async fn test_services_are_active_and_ordered() {
    let (server, site) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "SEO", "order": 3, "status": "active" },
            { "id": 2, "name": "Legacy", "order": 1, "status": "inactive" },
            { "id": 3, "name": "Branding", "order": 2, "status": "active" }
        ])))
        .mount(&server)
        .await;

    let names: Vec<String> = site
        .services()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Branding", "SEO"]);
}

#[tokio::test]
async fn test_job_by_slug_falls_back_to_list() {
    let (server, site) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/content-writer/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs()))
        .mount(&server)
        .await;

    let job = site.job_by_slug("content-writer").await.unwrap();
    assert_eq!(job.id, EntityId::new(2));

    let missing = site.job_by_slug("astronaut").await.unwrap_err();
    assert!(matches!(missing, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_career_search() {
    let (server, site) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs()))
        .mount(&server)
        .await;

    assert_eq!(site.search_careers("remote").await.unwrap().len(), 1);
    assert_eq!(site.search_careers("ENGINEERING").await.unwrap()[0].id, EntityId::new(1));
    assert_eq!(site.search_careers("").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_enquiry_is_not_sent() {
    let (server, site) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = site
        .submit_enquiry(&EnquirySubmission {
            name: "John Doe".into(),
            email: "john@example".into(),
            phone: "+91 9876543210".into(),
            company: None,
            service: "SEO".into(),
            message: "Hi".into(),
        })
        .await
        .unwrap_err();

    let CoreError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.get("email").is_some());
}

#[tokio::test]
async fn test_referral_without_friend_is_not_sent() {
    let (server, site) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = site
        .submit_application(
            &ApplicationSubmission {
                job: EntityId::new(1),
                application_type: ApplicationType::Referral,
                first_name: "Ana".into(),
                last_name: "Lima".into(),
                email: "ana@example.com".into(),
                phone: "555".into(),
                ..ApplicationSubmission::default()
            },
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(ref e) if e.get("friend_email").is_some()));
}
