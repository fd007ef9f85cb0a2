use std::sync::Arc;

use anyhow::{anyhow, bail, Context};

use auth_cell::{sign_out, AuthService, LoginView, Route};
use dashboard_cell::{DashboardRender, DashboardView};
use health_log_cell::api::LogService;
use health_log_cell::{DraftField, HealthLogForm};
use insights_cell::api::InsightsService;
use insights_cell::text::{format_sleep, reply_text};
use insights_cell::{AssistantChat, InsightsView};
use reports_cell::{ReportCard, ReportsRender, ReportsView};
use shared_config::ClientConfig;
use shared_gateway::ApiGateway;
use shared_models::auth::SessionUser;
use shared_utils::Outcome;

use crate::prompt::{ask, TerminalPrompt};
use crate::{Commands, ReportsCommand};

const NOT_SIGNED_IN: &str = "Not signed in. Run `carelog login` first.";

pub(crate) async fn run(command: Commands, config: &ClientConfig, gateway: ApiGateway) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => login(config, gateway, email, password).await,
        Commands::Logout => {
            sign_out(gateway.session()).context("Failed to clear the stored session")?;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => {
            match gateway.session().user() {
                Some(user) => println!("{}", user_line(&user)),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Commands::Log {
            symptoms,
            mood,
            sleep,
            pain,
            temperature,
            systolic,
            diastolic,
            notes,
        } => {
            let mut form = HealthLogForm::new(gateway).on_success(|| println!("Health log saved successfully!"));

            for symptom in symptoms {
                form.toggle_symptom(symptom);
            }

            let fields = [
                (DraftField::Mood, mood),
                (DraftField::SleepHours, sleep),
                (DraftField::PainLevel, pain),
                (DraftField::Temperature, temperature),
                (DraftField::BloodPressureSystolic, systolic),
                (DraftField::BloodPressureDiastolic, diastolic),
                (DraftField::Notes, notes),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    form.update(field, &value)?;
                }
            }

            let outcome = form.submit().await;
            settle(outcome, form.error())
        }
        Commands::Logs => {
            if !gateway.session().is_authenticated() {
                bail!(NOT_SIGNED_IN);
            }

            let logs = LogService::new(gateway).get_logs().await?;
            if logs.is_empty() {
                println!("No health logs yet.");
            }
            for log in logs {
                let date = log.date.map(|d| d.to_string()).unwrap_or_else(|| "----------".to_string());
                println!("{}  {}", date, log.summary());
            }
            Ok(())
        }
        Commands::Reports { action } => reports(gateway, action).await,
        Commands::Dashboard => {
            let mut view = DashboardView::new(gateway);
            let outcome = view.fetch().await;

            match view.render() {
                DashboardRender::Placeholder => bail!(NOT_SIGNED_IN),
                DashboardRender::Summary { user_name, stats } => {
                    println!("Welcome back, {}", user_name);
                    println!("Health logs:     {}", stats.logs);
                    println!("Medical reports: {}", stats.reports);
                }
            }

            if outcome == Outcome::Failed {
                eprintln!("Some counts could not be loaded.");
            }
            Ok(())
        }
        Commands::Insights { days } => {
            let mut view = InsightsView::new(gateway).with_days(days);
            let outcome = view.generate().await;

            if let Some(insight) = view.insight() {
                println!("{}", insight);
            }
            settle(outcome, view.error())
        }
        Commands::Advice { symptom, severity } => {
            if !gateway.session().is_authenticated() {
                bail!(NOT_SIGNED_IN);
            }

            let advice = InsightsService::new(gateway)
                .get_symptom_advice(&symptom, severity)
                .await
                .map_err(|e| anyhow!("Failed to get advice: {}", e.detail_or_message()))?;
            println!("{}", reply_text(&advice));
            Ok(())
        }
        Commands::Chat { message } => {
            let mut chat = AssistantChat::new(gateway);
            let outcome = chat.send(&message).await;

            if let Some(reply) = chat.last_reply() {
                println!("{}", reply);
            }
            settle(outcome, chat.error())
        }
        Commands::Sleep => {
            if !gateway.session().is_authenticated() {
                bail!(NOT_SIGNED_IN);
            }

            let analysis = InsightsService::new(gateway)
                .get_sleep_analysis()
                .await
                .map_err(|e| anyhow!("Failed to analyse sleep: {}", e.detail_or_message()))?;
            println!("{}", format_sleep(&analysis));
            Ok(())
        }
    }
}

async fn login(
    config: &ClientConfig,
    gateway: ApiGateway,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let session = gateway.session().clone();
    let auth = Arc::new(AuthService::new(gateway));
    let mut view = LoginView::new(config, auth, session);

    if let Some(email) = email {
        view.email = email;
    }
    if let Some(password) = password {
        view.password = password;
    }
    if view.email.is_empty() {
        view.email = ask("Email")?;
    }
    if view.password.is_empty() {
        view.password = ask("Password")?;
    }

    let outcome = view.submit().await;
    if view.redirect() == Some(Route::Dashboard) {
        println!("Signed in as {}.", view.email);
    }
    settle(outcome, view.error())
}

async fn reports(gateway: ApiGateway, action: ReportsCommand) -> anyhow::Result<()> {
    let mut view = ReportsView::new(gateway);

    match action {
        ReportsCommand::List => {
            view.fetch().await;
            print_reports(view.render())
        }
        ReportsCommand::Delete { id, yes } => {
            let prompt = TerminalPrompt { assume_yes: yes };
            match view.delete(&id, &prompt).await {
                Outcome::Applied => {
                    println!("Report deleted.");
                    print_reports(view.render())
                }
                Outcome::Declined => Ok(()),
                outcome => settle(outcome, None),
            }
        }
        ReportsCommand::Upload {
            file,
            title,
            report_type,
            date,
            description,
        } => {
            let mut form = view.upload_form();
            form.title = title;
            form.report_type = report_type.unwrap_or_default();
            form.report_date = date;
            form.description = description.unwrap_or_default();
            form.file = Some(file);

            let outcome = form.submit().await;
            settle(outcome, form.error())?;

            println!("Report uploaded.");
            view.upload_finished().await;
            print_reports(view.render())
        }
    }
}

fn print_reports(render: ReportsRender) -> anyhow::Result<()> {
    match render {
        ReportsRender::Placeholder => bail!(NOT_SIGNED_IN),
        ReportsRender::Loading => println!("Reports could not be loaded."),
        ReportsRender::Empty => println!("No reports uploaded yet."),
        ReportsRender::List(cards) => cards.iter().for_each(print_card),
    }
    Ok(())
}

fn print_card(card: &ReportCard) {
    card_lines(card).iter().for_each(|line| println!("{}", line));
}

fn card_lines(card: &ReportCard) -> Vec<String> {
    let mut lines = vec![match card.report_date {
        Some(date) => format!("[{}] {}  {}", card.id, card.title, date),
        None => format!("[{}] {}", card.id, card.title),
    }];

    if let Some(report_type) = &card.report_type {
        lines.push(format!("    type: {}", report_type));
    }
    if let Some(description) = &card.description {
        lines.push(format!("    {}", description));
    }
    if let Some(url) = &card.file_url {
        lines.push(format!("    {}", url));
    }
    lines
}

fn user_line(user: &SessionUser) -> String {
    match user.email.as_deref().filter(|email| !email.is_empty()) {
        Some(email) => format!("{} <{}>", user.full_name, email),
        None => user.full_name.clone(),
    }
}

/// Maps a view outcome to the process result.
fn settle(outcome: Outcome, error: Option<&str>) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied | Outcome::Declined => Ok(()),
        Outcome::NoSession => bail!(NOT_SIGNED_IN),
        Outcome::Busy => bail!("Another request is still running"),
        Outcome::Cancelled => bail!("Request cancelled"),
        Outcome::Failed => Err(anyhow!(error.unwrap_or("Request failed").to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn card() -> ReportCard {
        ReportCard {
            id: "r-1".to_string(),
            title: "Blood panel".to_string(),
            report_type: Some("lab_result".to_string()),
            report_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            description: None,
            file_url: Some("http://files/static/uploads/blood.pdf".to_string()),
        }
    }

    #[test]
    fn test_settle_maps_outcomes() {
        assert!(settle(Outcome::Applied, None).is_ok());
        assert!(settle(Outcome::Declined, None).is_ok());

        let err = settle(Outcome::NoSession, None).unwrap_err();
        assert_eq!(err.to_string(), NOT_SIGNED_IN);

        let err = settle(Outcome::Failed, Some("Failed to save log: Invalid data")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to save log: Invalid data");

        let err = settle(Outcome::Failed, None).unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_card_lines() {
        assert_eq!(
            card_lines(&card()),
            vec![
                "[r-1] Blood panel  2024-01-15".to_string(),
                "    type: lab_result".to_string(),
                "    http://files/static/uploads/blood.pdf".to_string(),
            ]
        );

        let bare = ReportCard {
            report_type: None,
            report_date: None,
            file_url: None,
            ..card()
        };
        assert_eq!(card_lines(&bare), vec!["[r-1] Blood panel".to_string()]);
    }

    #[test]
    fn test_user_line_without_email() {
        let mut user = SessionUser {
            full_name: "Pat Doe".to_string(),
            email: Some("pat@example.com".to_string()),
            id: None,
        };
        assert_eq!(user_line(&user), "Pat Doe <pat@example.com>");

        user.email = None;
        assert_eq!(user_line(&user), "Pat Doe");
    }
}
