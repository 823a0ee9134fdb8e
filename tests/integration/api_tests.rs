//! Live API integration tests
//!
//! Need a running transport service on localhost:8080 with the demo accounts
//! loaded. Run with: cargo test -- --ignored

use darconnect_console::{
    config::{ApiConfig, AppConfig, SessionConfig},
    console::Command,
    models::enums::Role,
    AppError, Console,
};

const BASE_URL: &str = "http://localhost:8080";
const ADMIN_USER: &str = "admin";
const ADMIN_PASSWORD: &str = "admin";

fn console() -> Console {
    let config = AppConfig {
        api: ApiConfig {
            base_url: BASE_URL.to_string(),
            timeout_secs: 10,
        },
        session: SessionConfig {
            file: String::new(),
        },
        ..Default::default()
    };
    Console::new(config).expect("Failed to build console")
}

async fn admin_console() -> Console {
    let console = console();
    console
        .services
        .auth
        .login(ADMIN_USER, ADMIN_PASSWORD)
        .await
        .expect("Admin login failed");
    console
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_login() {
    let console = console();
    let session = console
        .services
        .auth
        .login(ADMIN_USER, ADMIN_PASSWORD)
        .await
        .expect("Failed to log in");

    assert_eq!(session.role, Role::Administrator);
    assert!(!session.token.is_empty());
    assert_eq!(console.services.session.current(), Some(session));
}

#[tokio::test]
#[ignore]
async fn test_login_bad_credentials() {
    let result = console()
        .services
        .auth
        .login(ADMIN_USER, "definitely-wrong")
        .await;

    assert!(matches!(result, Err(AppError::Authentication(_))));
}

#[tokio::test]
#[ignore]
async fn test_list_trips() {
    let console = admin_console().await;

    let all = console.services.trips.list().await.expect("Failed to list trips");
    let active = console
        .services
        .trips
        .list_active()
        .await
        .expect("Failed to list active trips");

    assert!(active.iter().all(|t| t.active));
    assert!(active.len() <= all.len());
}

#[tokio::test]
#[ignore]
async fn test_weekly_agenda_grid() {
    let console = admin_console().await;

    let schedules = console.services.schedules.list().await.expect("Failed to list schedules");
    let Some(schedule) = schedules.iter().find(|s| s.active) else {
        return;
    };

    let grid = console
        .services
        .trips
        .weekly_grid(Some(schedule.driver_id))
        .await
        .expect("Failed to build weekly grid");

    for day in 1..=7u8 {
        let entries = grid.trips_for_weekday(day);
        let times: Vec<&str> = entries.iter().map(|(time, _)| *time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);
    }
}

#[tokio::test]
#[ignore]
async fn test_admin_commands_render() {
    let console = admin_console().await;

    for line in [
        "day",
        "trips --active",
        "drivers",
        "patients",
        "schedules",
        "dashboard --period mes",
        "available-users",
    ] {
        let argv: Vec<&str> = line.split_whitespace().collect();
        let command = Command::parse(&argv).expect("Failed to parse command");
        let output = console.execute(command).await.expect(line);
        assert!(!output.is_empty(), "{} printed nothing", line);
    }
}
