use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use tempfile::{tempdir, NamedTempFile};

use auth_cell::{sign_out, AuthService, LoginView, Route};
use client_flow_tests::{FakeBackend, TOKEN};
use dashboard_cell::{DashboardRender, DashboardStats, DashboardView};
use health_log_cell::{DraftField, HealthLogForm};
use reports_cell::{Prompt, ReportsRender, ReportsView};
use shared_config::ClientConfig;
use shared_models::health_log::Symptom;
use shared_utils::test_utils::{MockApiResponses, TestUser};
use shared_utils::Outcome;

struct AlwaysYes;

impl Prompt for AlwaysYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn alert(&self, message: &str) {
        panic!("unexpected alert: {}", message);
    }
}

#[tokio::test]
async fn test_patient_day_from_login_to_reports() {
    let user = TestUser::new("pat@example.com", "Pat Doe");
    let backend = FakeBackend::start(user.clone()).await;
    backend.accept_login().await;
    backend.accept_log().await;
    backend.serve_logs(MockApiResponses::health_logs(1)).await;
    backend
        .serve_reports(
            json!([]),
            json!([MockApiResponses::report_response("r-1", "Blood panel", Some("blood.pdf"))]),
        )
        .await;
    backend.accept_upload().await;

    let dir = tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let gateway = backend.client(&session_file);

    // Sign in
    let config = ClientConfig::with_base_url(&backend.uri(), session_file.clone());
    let mut login = LoginView::new(&config, Arc::new(AuthService::new(gateway.clone())), gateway.session().clone());
    login.email = user.email.clone();
    login.password = "secret".to_string();

    assert_eq!(login.submit().await, Outcome::Applied);
    assert_eq!(login.redirect(), Some(Route::Dashboard));
    assert_eq!(gateway.session().token().as_deref(), Some(TOKEN));

    // Record today's log
    let saved = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&saved);
    let mut form = HealthLogForm::new(gateway.clone()).on_success(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    form.toggle_symptom(Symptom::Headache);
    form.update(DraftField::SleepHours, "6.5").unwrap();

    assert_eq!(form.submit().await, Outcome::Applied);
    assert_eq!(saved.load(Ordering::SeqCst), 1);
    assert!(form.draft().symptoms().is_empty());

    // Dashboard counts
    let mut dashboard = DashboardView::new(gateway.clone());
    assert_eq!(dashboard.fetch().await, Outcome::Applied);
    assert_eq!(
        dashboard.render(),
        DashboardRender::Summary {
            user_name: "Pat Doe".to_string(),
            stats: DashboardStats { logs: 1, reports: 0 },
        }
    );

    // Upload a report and see it listed
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"%PDF-1.4 results").unwrap();

    let mut reports = ReportsView::new(gateway.clone());
    assert_eq!(reports.fetch().await, Outcome::Applied);
    assert_eq!(reports.render(), ReportsRender::Empty);

    let mut upload = reports.upload_form();
    upload.title = "Blood panel".to_string();
    upload.file = Some(file.path().to_path_buf());

    assert_eq!(upload.submit().await, Outcome::Applied);
    assert_eq!(reports.upload_finished().await, Outcome::Applied);

    match reports.render() {
        ReportsRender::List(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].title, "Blood panel");
            assert_eq!(
                cards[0].file_url.as_deref(),
                Some(format!("{}/static/uploads/blood.pdf", backend.uri()).as_str())
            );
        }
        other => panic!("expected a report list, got {:?}", other),
    }

    let requests = backend.server().received_requests().await.unwrap();
    let authorized = requests
        .iter()
        .filter(|request| request.url.path() != "/api/auth/login")
        .all(|request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                == Some(&*format!("Bearer {}", TOKEN))
        });
    assert!(authorized);
}

#[tokio::test]
async fn test_session_survives_restart_until_sign_out() {
    let user = TestUser::new("sam@example.com", "Sam Lee");
    let backend = FakeBackend::start(user.clone()).await;
    backend.accept_login().await;
    backend.serve_logs(MockApiResponses::health_logs(2)).await;
    backend.serve_reports(json!([]), json!([])).await;

    let dir = tempdir().unwrap();
    let session_file = dir.path().join("nested").join("session.json");

    {
        let gateway = backend.client(&session_file);
        let config = ClientConfig::with_base_url(&backend.uri(), session_file.clone());
        let mut login = LoginView::new(&config, Arc::new(AuthService::new(gateway.clone())), gateway.session().clone());
        login.email = user.email.clone();
        login.password = "pw".to_string();
        assert_eq!(login.submit().await, Outcome::Applied);
    }

    let restarted = backend.client(&session_file);
    assert_eq!(restarted.session().user().map(|u| u.full_name), Some("Sam Lee".to_string()));

    let mut dashboard = DashboardView::new(restarted.clone());
    assert_eq!(dashboard.fetch().await, Outcome::Applied);
    assert_eq!(dashboard.stats(), DashboardStats { logs: 2, reports: 0 });

    assert_eq!(sign_out(restarted.session()).unwrap(), Route::Login);
    assert!(!session_file.exists());

    let after_sign_out = backend.client(&session_file);
    let mut dashboard = DashboardView::new(after_sign_out);
    assert_eq!(dashboard.fetch().await, Outcome::NoSession);
    assert_eq!(dashboard.render(), DashboardRender::Placeholder);
}

#[tokio::test]
async fn test_delete_refreshes_list() {
    let backend = FakeBackend::start(TestUser::default()).await;
    backend.accept_delete().await;
    backend
        .serve_reports(
            json!([
                MockApiResponses::report_response("r-1", "X-ray", None),
                MockApiResponses::legacy_report_response("r-2", "lab_result", "lab.pdf")
            ]),
            json!([MockApiResponses::legacy_report_response("r-2", "lab_result", "lab.pdf")]),
        )
        .await;

    let dir = tempdir().unwrap();
    let gateway = backend.client(&dir.path().join("session.json"));
    gateway.session().login(TestUser::default().to_session(TOKEN)).unwrap();

    let mut reports = ReportsView::new(gateway);
    reports.fetch().await;
    assert_eq!(reports.reports().len(), 2);

    assert_eq!(reports.delete("r-1", &AlwaysYes).await, Outcome::Applied);

    match reports.render() {
        ReportsRender::List(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].title, "lab result");
        }
        other => panic!("expected a report list, got {:?}", other),
    }
}
