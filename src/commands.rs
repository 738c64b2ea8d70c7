//! Chat-command surface: parsing, validation and replies.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{DateRange, ExperienceLevel, FilterConfig, JobType, RemotePreference};
use crate::error::{AppError, Result};
use crate::repository::SeenJobStore;
use crate::service::scheduler::{CheckOutcome, Scheduler};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFilter { dimension: String, value: String },
    CheckNow,
    ClearHistory,
    ListSources,
    Help,
}

/// Parse one input line. Returns `None` for anything that is not a bot
/// command, so ordinary chatter passes through untouched.
pub fn parse(input: &str) -> Option<Command> {
    let mut parts = input.trim().split_whitespace();
    let command = parts.next()?.to_lowercase();

    match command.as_str() {
        "!jobfilter" => Some(Command::SetFilter {
            dimension: parts.next().unwrap_or_default().to_string(),
            value: parts.collect::<Vec<_>>().join(" "),
        }),
        "!jobcheck" => Some(Command::CheckNow),
        "!jobclear" => Some(Command::ClearHistory),
        "!jobsources" => Some(Command::ListSources),
        "!jobhelp" => Some(Command::Help),
        _ => None,
    }
}

pub struct CommandContext {
    pub filters: Arc<RwLock<FilterConfig>>,
    pub store: Arc<SeenJobStore>,
    pub scheduler: Arc<Scheduler>,
}

/// Execute a command and produce the reply text.
pub async fn execute(command: Command, ctx: &CommandContext) -> String {
    match command {
        Command::SetFilter { dimension, value } => {
            let mut filters = ctx.filters.write().await;
            match apply_filter(&mut filters, &dimension, &value) {
                Ok(reply) => reply,
                Err(e) => e.to_string(),
            }
        }
        Command::CheckNow => match ctx.scheduler.check_now().await {
            Ok(CheckOutcome::Completed { found, report }) => format!(
                "Check complete: {} new posting(s), {} delivered, {} failed",
                found, report.delivered, report.failed
            ),
            Ok(CheckOutcome::Skipped) => "A check is already running, try again shortly".to_string(),
            Err(AppError::ChannelUnresolved) => {
                "Notification channel is not configured; set WEBHOOK_URL".to_string()
            }
            Err(e) => format!("Check failed: {}", e),
        },
        Command::ClearHistory => {
            let dropped = ctx.store.clear();
            match ctx.store.persist().await {
                Ok(()) => format!("Cleared {} remembered posting(s)", dropped),
                Err(e) => format!("History cleared in memory, but saving failed: {:#}", e),
            }
        }
        Command::ListSources => {
            let mut reply = String::from("Sources, in priority order:");
            for (label, description) in ctx.scheduler.source_descriptions() {
                reply.push_str(&format!("\n- {}: {}", label, description));
            }
            reply
        }
        Command::Help => HELP_TEXT.to_string(),
    }
}

/// Validate and apply one filter mutation. The reply echoes the accepted
/// value; rejections come back as [`AppError::InvalidFilter`].
pub fn apply_filter(
    filters: &mut FilterConfig,
    dimension: &str,
    value: &str,
) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AppError::filter(
            "usage: !jobfilter <dimension> <value> - see !jobhelp",
        ));
    }

    match dimension.to_lowercase().as_str() {
        "keyword" => {
            filters.keyword = value.trim().to_string();
            Ok(format!("Keyword filter set to: {}", filters.keyword))
        }
        "location" => {
            filters.location = value.trim().to_string();
            Ok(format!("Location filter set to: {}", filters.location))
        }
        "experience" => match ExperienceLevel::parse(value) {
            Some(level) => {
                filters.experience = level;
                Ok(format!("Experience level filter set to: {}", level.as_str()))
            }
            None => Err(AppError::filter(
                "valid experience levels: ENTRY_LEVEL, ASSOCIATE, MID_SENIOR, DIRECTOR, EXECUTIVE, NONE",
            )),
        },
        "type" => match JobType::parse(value) {
            Some(job_type) => {
                filters.job_type = job_type;
                Ok(format!("Job type filter set to: {}", job_type.as_str()))
            }
            None => Err(AppError::filter(
                "valid job types: FULL_TIME, PART_TIME, CONTRACT, TEMPORARY, INTERNSHIP, ANY",
            )),
        },
        "daterange" => match DateRange::parse(value) {
            Some(range) => {
                filters.date_range = range;
                Ok(format!("Date range filter set to: {}", range.as_str()))
            }
            None => Err(AppError::filter(
                "valid date ranges: PAST_DAY, PAST_WEEK, PAST_MONTH, ANY",
            )),
        },
        "remote" => match RemotePreference::parse(value) {
            Some(preference) => {
                filters.remote = preference;
                Ok(format!("Remote preference set to: {}", preference.as_str()))
            }
            None => Err(AppError::filter(
                "valid remote preferences: ON_SITE, REMOTE, HYBRID, ANY",
            )),
        },
        "interval" => match value.trim().parse::<u64>() {
            Ok(ms) if ms >= 10_000 => {
                filters.check_interval_ms = ms;
                Ok(format!("Check interval set to {} ms", ms))
            }
            _ => Err(AppError::filter(
                "interval must be a number of milliseconds, at least 10000",
            )),
        },
        "cap" => match value.trim().parse::<usize>() {
            Ok(cap) if (1..=25).contains(&cap) => {
                filters.max_per_check = cap;
                Ok(format!("Max postings per check set to {}", cap))
            }
            _ => Err(AppError::filter("cap must be between 1 and 25")),
        },
        other => Err(AppError::filter(format!(
            "unknown dimension '{}'; available: keyword, location, experience, type, daterange, remote, interval, cap",
            other
        ))),
    }
}

pub const HELP_TEXT: &str = "\
Job Watch - commands:
!jobfilter keyword <text>        search keyword (free text)
!jobfilter location <text>       location (free text)
!jobfilter experience <LEVEL>    ENTRY_LEVEL, ASSOCIATE, MID_SENIOR, DIRECTOR, EXECUTIVE, NONE
!jobfilter type <TYPE>           FULL_TIME, PART_TIME, CONTRACT, TEMPORARY, INTERNSHIP, ANY
!jobfilter daterange <RANGE>     PAST_DAY, PAST_WEEK, PAST_MONTH, ANY
!jobfilter remote <PREF>         ON_SITE, REMOTE, HYBRID, ANY
!jobfilter interval <MS>         poll interval in milliseconds
!jobfilter cap <N>               max postings reported per check
!jobcheck                        run a check right now
!jobclear                        forget every reported posting
!jobsources                      list the configured sources
!jobhelp                         this message";
