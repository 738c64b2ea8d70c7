//! Runtime configuration: environment-backed settings and the mutable
//! search-filter state consulted by every source on each fetch.

use std::env;

// ====== Filter enums ======

/// Experience-level filter. Codes map to the search page's `f_E` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceLevel {
    #[default]
    Any,
    EntryLevel,
    Associate,
    MidSenior,
    Director,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Any => "NONE",
            ExperienceLevel::EntryLevel => "ENTRY_LEVEL",
            ExperienceLevel::Associate => "ASSOCIATE",
            ExperienceLevel::MidSenior => "MID_SENIOR",
            ExperienceLevel::Director => "DIRECTOR",
            ExperienceLevel::Executive => "EXECUTIVE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "NONE" | "ANY" => Some(ExperienceLevel::Any),
            "ENTRY_LEVEL" => Some(ExperienceLevel::EntryLevel),
            "ASSOCIATE" => Some(ExperienceLevel::Associate),
            "MID_SENIOR" => Some(ExperienceLevel::MidSenior),
            "DIRECTOR" => Some(ExperienceLevel::Director),
            "EXECUTIVE" => Some(ExperienceLevel::Executive),
            _ => None,
        }
    }

    /// Query-parameter code, `None` when no filter is active.
    pub fn query_code(&self) -> Option<&'static str> {
        match self {
            ExperienceLevel::Any => None,
            ExperienceLevel::EntryLevel => Some("2"),
            ExperienceLevel::Associate => Some("3"),
            ExperienceLevel::MidSenior => Some("4"),
            ExperienceLevel::Director => Some("5"),
            ExperienceLevel::Executive => Some("6"),
        }
    }
}

/// Job-type filter (`f_JT` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobType {
    #[default]
    Any,
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Any => "ANY",
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Temporary => "TEMPORARY",
            JobType::Internship => "INTERNSHIP",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ANY" | "NONE" => Some(JobType::Any),
            "FULL_TIME" => Some(JobType::FullTime),
            "PART_TIME" => Some(JobType::PartTime),
            "CONTRACT" => Some(JobType::Contract),
            "TEMPORARY" => Some(JobType::Temporary),
            "INTERNSHIP" => Some(JobType::Internship),
            _ => None,
        }
    }

    pub fn query_code(&self) -> Option<&'static str> {
        match self {
            JobType::Any => None,
            JobType::FullTime => Some("F"),
            JobType::PartTime => Some("P"),
            JobType::Contract => Some("C"),
            JobType::Temporary => Some("T"),
            JobType::Internship => Some("I"),
        }
    }
}

/// Posting-age filter (`f_TPR` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    Any,
    PastDay,
    PastWeek,
    PastMonth,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Any => "ANY",
            DateRange::PastDay => "PAST_DAY",
            DateRange::PastWeek => "PAST_WEEK",
            DateRange::PastMonth => "PAST_MONTH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ANY" | "NONE" => Some(DateRange::Any),
            "PAST_DAY" => Some(DateRange::PastDay),
            "PAST_WEEK" => Some(DateRange::PastWeek),
            "PAST_MONTH" => Some(DateRange::PastMonth),
            _ => None,
        }
    }

    pub fn query_code(&self) -> Option<&'static str> {
        match self {
            DateRange::Any => None,
            DateRange::PastDay => Some("r86400"),
            DateRange::PastWeek => Some("r604800"),
            DateRange::PastMonth => Some("r2592000"),
        }
    }
}

/// Workplace filter (`f_WT` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemotePreference {
    #[default]
    Any,
    OnSite,
    Remote,
    Hybrid,
}

impl RemotePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemotePreference::Any => "ANY",
            RemotePreference::OnSite => "ON_SITE",
            RemotePreference::Remote => "REMOTE",
            RemotePreference::Hybrid => "HYBRID",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ANY" | "NONE" => Some(RemotePreference::Any),
            "ON_SITE" | "ONSITE" => Some(RemotePreference::OnSite),
            "REMOTE" => Some(RemotePreference::Remote),
            "HYBRID" => Some(RemotePreference::Hybrid),
            _ => None,
        }
    }

    pub fn query_code(&self) -> Option<&'static str> {
        match self {
            RemotePreference::Any => None,
            RemotePreference::OnSite => Some("1"),
            RemotePreference::Remote => Some("2"),
            RemotePreference::Hybrid => Some("3"),
        }
    }
}

/// How the aggregator combines the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Try sources in priority order, keep the first non-empty batch.
    #[default]
    FallbackChain,
    /// Query every source and merge the combined batch.
    FanOutAll,
}

impl MergeStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "chain" | "fallback" => Some(MergeStrategy::FallbackChain),
            "fanout" | "fan-out" | "all" => Some(MergeStrategy::FanOutAll),
            _ => None,
        }
    }
}

// ====== Filter state ======

pub const DEFAULT_KEYWORD: &str = "software engineer";
pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_CHECK_INTERVAL_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_MAX_PER_CHECK: usize = 5;

/// Active search parameters. Mutated only through the `set-filter` command;
/// read live by every source adapter, so a change applies on the next poll.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub keyword: String,
    pub location: String,
    pub experience: ExperienceLevel,
    pub job_type: JobType,
    pub date_range: DateRange,
    pub remote: RemotePreference,
    pub max_per_check: usize,
    pub check_interval_ms: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            experience: ExperienceLevel::Any,
            job_type: JobType::Any,
            date_range: DateRange::Any,
            remote: RemotePreference::Any,
            max_per_check: DEFAULT_MAX_PER_CHECK,
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
        }
    }
}

// ====== Process configuration ======

pub const DEFAULT_DATA_FILE: &str = "jobs.json";

const DEFAULT_FEEDS: &[&str] = &[
    "https://weworkremotely.com/categories/remote-programming-jobs.rss",
    "https://remoteok.com/rss",
];

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Destination channel; `None` falls back to console delivery.
    pub webhook_url: Option<String>,
    /// Path of the seen-jobs file.
    pub data_file: String,
    /// Optional key for the structured jobs API.
    pub api_key: Option<String>,
    /// RSS feed origins polled by the feed source.
    pub feeds: Vec<String>,
    pub merge_strategy: MergeStrategy,
    pub filters: FilterConfig,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults on
    /// anything missing or unparsable (a bad value is logged, never fatal).
    pub fn from_env() -> Self {
        let mut filters = FilterConfig::default();

        if let Ok(keyword) = env::var("JOB_KEYWORD") {
            if !keyword.trim().is_empty() {
                filters.keyword = keyword.trim().to_string();
            }
        }
        if let Ok(location) = env::var("JOB_LOCATION") {
            if !location.trim().is_empty() {
                filters.location = location.trim().to_string();
            }
        }
        filters.experience = parse_env("EXPERIENCE_LEVEL", ExperienceLevel::parse);
        filters.job_type = parse_env("JOB_TYPE", JobType::parse);
        filters.date_range = parse_env("DATE_RANGE", DateRange::parse);
        filters.remote = parse_env("REMOTE_PREFERENCE", RemotePreference::parse);
        filters.check_interval_ms = parse_env_num("CHECK_INTERVAL", DEFAULT_CHECK_INTERVAL_MS);
        filters.max_per_check = parse_env_num("MAX_JOBS_PER_CHECK", DEFAULT_MAX_PER_CHECK);

        let feeds = match env::var("JOB_FEEDS") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            webhook_url: env::var("WEBHOOK_URL").ok().filter(|s| !s.trim().is_empty()),
            data_file: env::var("JOBS_DATA_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            api_key: env::var("JOBS_API_KEY").ok().filter(|s| !s.trim().is_empty()),
            feeds,
            merge_strategy: parse_env("MERGE_STRATEGY", MergeStrategy::parse),
            filters,
        }
    }
}

fn parse_env<T: Default>(key: &str, parse: impl Fn(&str) -> Option<T>) -> T {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse(&raw).unwrap_or_else(|| {
            log::warn!("Ignoring unrecognized {} value: {}", key, raw);
            T::default()
        }),
        _ => T::default(),
    }
}

fn parse_env_num<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring non-numeric {} value: {}", key, raw);
            default
        }),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_parse_accepts_known_levels() {
        assert_eq!(
            ExperienceLevel::parse("entry_level"),
            Some(ExperienceLevel::EntryLevel)
        );
        assert_eq!(
            ExperienceLevel::parse("MID_SENIOR"),
            Some(ExperienceLevel::MidSenior)
        );
        assert_eq!(ExperienceLevel::parse("none"), Some(ExperienceLevel::Any));
        assert_eq!(ExperienceLevel::parse("JUNIOR"), None);
    }

    #[test]
    fn query_codes_follow_search_page_params() {
        assert_eq!(ExperienceLevel::Any.query_code(), None);
        assert_eq!(ExperienceLevel::EntryLevel.query_code(), Some("2"));
        assert_eq!(JobType::FullTime.query_code(), Some("F"));
        assert_eq!(DateRange::PastDay.query_code(), Some("r86400"));
        assert_eq!(RemotePreference::Remote.query_code(), Some("2"));
    }

    #[test]
    fn merge_strategy_parse() {
        assert_eq!(MergeStrategy::parse("chain"), Some(MergeStrategy::FallbackChain));
        assert_eq!(MergeStrategy::parse("FanOut"), Some(MergeStrategy::FanOutAll));
        assert_eq!(MergeStrategy::parse("sometimes"), None);
    }

    #[test]
    fn filter_defaults_match_documented_values() {
        let filters = FilterConfig::default();
        assert_eq!(filters.keyword, "software engineer");
        assert_eq!(filters.location, "United States");
        assert_eq!(filters.check_interval_ms, 300_000);
        assert_eq!(filters.max_per_check, 5);
        assert_eq!(filters.experience, ExperienceLevel::Any);
    }
}
