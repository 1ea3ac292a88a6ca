use std::sync::Arc;
use std::time::Duration;
use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::time::sleep;
use tracing::{error, info, warn, info_span, Instrument};
use crate::domain::models::job::{Job, JobPayload, MAX_JOB_ATTEMPTS};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use crate::state::AppState;

const POLL_INTERVAL_SECS: u64 = 5;
const RETRY_BACKOFF_SECS: i64 = 60;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting notification outbox worker...");

    loop {
        if let Err(e) = drain_pending_jobs(&state).await {
            error!("Failed to fetch pending jobs: {:?}", e);
        }
        sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
    }
}

/// Processes one batch of due outbox jobs. Split out of the worker loop so
/// tests can drain the queue deterministically.
pub async fn drain_pending_jobs(state: &Arc<AppState>) -> Result<usize, AppError> {
    let jobs = state.job_repo.find_pending(10).await?;
    let count = jobs.len();

    for job in jobs {
        let span = info_span!(
            "notification_job",
            job_id = %job.id,
            job_type = %job.job_type,
            attempt = job.attempts + 1
        );

        async {
            match process_job(state, &job).await {
                Ok(_) => {
                    info!("Job completed successfully");
                    if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                        error!("Failed to mark job as completed: {:?}", e);
                    }
                }
                Err(e) => {
                    let err_msg = format!("{}", e);
                    if job.attempts + 1 >= MAX_JOB_ATTEMPTS {
                        error!("Job failed permanently after {} attempts: {}", job.attempts + 1, err_msg);
                        if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                            error!("Failed to mark job as failed: {:?}", up_err);
                        }
                    } else {
                        let delay = RETRY_BACKOFF_SECS * (job.attempts as i64 + 1);
                        warn!("Job failed, retrying in {}s: {}", delay, err_msg);
                        let next_run = Utc::now() + chrono::Duration::seconds(delay);
                        if let Err(up_err) = state.job_repo.reschedule(&job.id, next_run, Some(err_msg)).await {
                            error!("Failed to reschedule job: {:?}", up_err);
                        }
                    }
                }
            }
        }
            .instrument(span)
            .await;
    }

    Ok(count)
}

/// "Monday, June 1, 2025" / "09:00" as shown in outgoing mail.
pub fn format_date_for_email(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_time_for_email(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    match &job.payload.0 {
        JobPayload::Contact { name, email, phone, message } => {
            let mut context = tera::Context::new();
            context.insert("site_name", &state.config.site_name);
            context.insert("name", name);
            context.insert("email", email);
            context.insert("phone", phone);
            context.insert("message", message);

            let html = state.templates.render("contact_message.html", &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;

            let subject = format!("New contact message from {}", name);
            state.email_service.send(&state.config.notify_email, &subject, &html, None, None).await
        }
        JobPayload::Reservation { reservation_id, reason } => {
            let Some(reservation) = state.reservation_repo.find_by_id(reservation_id).await? else {
                // Deleted before the email went out; nothing left to notify about.
                warn!("Reservation {} no longer exists, skipping job", reservation_id);
                return Ok(());
            };

            let date_human = format_date_for_email(reservation.date);
            let time_human = format_time_for_email(reservation.time);

            let mut property_titles = Vec::new();
            for property_id in reservation.desired_properties.0.iter() {
                match state.property_repo.find_by_id(property_id).await? {
                    Some(p) => property_titles.push(p.title),
                    None => property_titles.push(property_id.clone()),
                }
            }

            let mut context = tera::Context::new();
            context.insert("site_name", &state.config.site_name);
            context.insert("frontend_url", &state.config.frontend_url);
            context.insert("name", &reservation.name);
            context.insert("email", &reservation.email);
            context.insert("phone", &reservation.phone);
            context.insert("date", &date_human);
            context.insert("time", &time_human);
            context.insert("message", &reservation.message);
            context.insert("budget", &reservation.budget);
            context.insert("property_type", &reservation.property_type);
            context.insert("investment_type", &reservation.investment_type);
            let reason_text = reason.clone().or_else(|| reservation.reason.clone());
            context.insert("reason", &reason_text);
            context.insert("referral_source", &reservation.referral_source);
            context.insert("properties", &property_titles);
            context.insert("meet_link", &reservation.meet_link);

            match job.job_type.as_str() {
                "BOOKING_NOTIFICATION" => {
                    let html = state.templates.render("booking_notification.html", &context)
                        .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
                    let subject = format!("New consultation request for {}", date_human);
                    state.email_service.send(&state.config.notify_email, &subject, &html, None, None).await
                }
                "CONFIRMATION" => {
                    let html = state.templates.render("booking_confirmation.html", &context)
                        .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
                    let subject = format!("Your consultation on {} is confirmed", date_human);
                    let ics = generate_ics(&reservation, &state.config.site_name, &state.config.site_timezone);
                    state.email_service.send(&reservation.email, &subject, &html, Some("invite.ics"), Some(ics.as_bytes())).await
                }
                "REJECTION" => {
                    let html = state.templates.render("booking_rejection.html", &context)
                        .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
                    let subject = format!("About your consultation on {}", date_human);
                    state.email_service.send(&reservation.email, &subject, &html, None, None).await
                }
                other => Err(AppError::InternalWithMsg(format!("Unknown job type {}", other))),
            }
        }
    }
}
