// Mock data types.
// Deserialized from the fixture JSON; views only read these.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::state::navigation::RiskKind;

/// Three-level health classification used across organs, trends, and advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    SubHealth,
    Risk,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::SubHealth => "Sub-health",
            HealthStatus::Risk => "Risk",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub display_id: String,
    pub initial: String,
    pub gender: String,
    pub age: u8,
    pub height_cm: u16,
    pub weight_kg: u16,
    pub medical_history: String,
    pub emergency_contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub connected: bool,
    pub battery_percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSummary {
    pub title: String,
    pub subtitle: String,
    pub health_score: u8,
    pub tumor_note: String,
    pub tumor_status: String,
    pub report_teaser: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vital {
    pub label: String,
    pub value: String,
    pub unit: String,
}

/// Whether a risk factor is outside its reference band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    High,
    Normal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Short axis label.
    pub subject: String,
    /// Current value, 0-100.
    pub current: u8,
    /// Reference value, 0-100.
    pub reference: u8,
    /// Long label for the findings list.
    pub label: String,
    pub status: FactorStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub kind: RiskKind,
    pub title: String,
    /// Gauge value on the Home view, 0-100.
    pub gauge_percent: u8,
    /// Assessment score on the detail overlay, 0-100.
    pub score: u8,
    pub risk_level: String,
    pub factors: Vec<RiskFactor>,
}

impl RiskProfile {
    pub fn high_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors
            .iter()
            .filter(|f| f.status == FactorStatus::High)
    }

    pub fn normal_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors
            .iter()
            .filter(|f| f.status == FactorStatus::Normal)
    }

    /// Scores above 50 get the alarming badge.
    pub fn is_elevated(&self) -> bool {
        self.score > 50
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub value: u8,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganMark {
    pub name: String,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcmEvaluation {
    pub meridian: String,
    pub pattern: String,
    pub analysis: String,
    pub symptoms: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acupoint {
    pub name: String,
    pub method: String,
    pub location: String,
    pub indications: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub title: String,
    pub trend: Vec<TrendPoint>,
    pub organ_map: Vec<OrganMark>,
    pub overall: HealthStatus,
    pub stats: Vec<LabeledValue>,
    pub findings: Vec<String>,
    pub mood: LabeledValue,
    pub western: String,
    pub tcm: TcmEvaluation,
    pub diet_note: String,
    pub dishes: Vec<String>,
    pub acupoint: Acupoint,
}

/// Day counts per status over a report's trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub healthy: usize,
    pub sub_health: usize,
    pub risk: usize,
}

impl WeeklyReport {
    pub fn tally(&self) -> StatusTally {
        self.trend
            .iter()
            .fold(StatusTally::default(), |mut tally, point| {
                match point.status {
                    HealthStatus::Healthy => tally.healthy += 1,
                    HealthStatus::SubHealth => tally.sub_health += 1,
                    HealthStatus::Risk => tally.risk += 1,
                }
                tally
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepStageKind {
    Awake,
    Light,
    Deep,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepStage {
    pub time: String,
    pub stage: SleepStageKind,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepSummary {
    pub total: String,
    pub quality: String,
    pub description: String,
    pub deep: String,
    pub light: String,
    pub window_note: String,
    pub date: String,
    pub highlight: LabeledValue,
    pub highlight_note: String,
    pub stages: Vec<SleepStage>,
}

/// Metric sub-tabs on the Monitor view other than sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Uric,
    Lipid,
    Vessel,
    Glucose,
    Bp,
    Hr,
}

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Uric => "Uric acid",
            MetricKind::Lipid => "Lipids",
            MetricKind::Vessel => "Arteriosclerosis",
            MetricKind::Glucose => "Glucose",
            MetricKind::Bp => "Blood pressure",
            MetricKind::Hr => "Heart rate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPoint {
    pub day: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    pub id: MetricKind,
    pub status: String,
    pub unit: String,
    pub points: Vec<MetricPoint>,
    #[serde(default)]
    pub thresholds: Vec<Threshold>,
}

impl MetricSeries {
    /// Min and max over points and thresholds, for chart bounds.
    pub fn bounds(&self) -> (f64, f64) {
        self.points
            .iter()
            .map(|p| p.value)
            .chain(self.thresholds.iter().map(|t| t.value))
            .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganStatus {
    pub name: String,
    /// Shichen range, `HH:MM-HH:MM`.
    pub time: String,
    pub status: HealthStatus,
    pub description: String,
}

impl OrganStatus {
    /// Parse the shichen range into start and end times.
    pub fn range(&self) -> Option<(NaiveTime, NaiveTime)> {
        let (start, end) = self.time.split_once('-')?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
        Some((start, end))
    }

    /// Whether `time` falls inside this organ's shichen. Ranges may wrap midnight.
    pub fn contains(&self, time: NaiveTime) -> bool {
        match self.range() {
            Some((start, end)) if start <= end => time >= start && time < end,
            Some((start, end)) => time >= start || time < end,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advice {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub plan: Option<String>,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub title: String,
    pub date: String,
    pub score: u8,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archive {
    pub weekly: Vec<ArchiveReport>,
    pub monthly: Vec<ArchiveReport>,
    pub weekly_schedule: String,
    pub monthly_schedule: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    System,
    Device,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub time: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub push_notifications: bool,
    pub sms_alerts: bool,
    pub cache_size: String,
    pub version: String,
    pub build: String,
}

/// Everything the views display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixtures {
    pub user: UserProfile,
    pub device: Device,
    pub home: HomeSummary,
    pub vitals: Vec<Vital>,
    pub risks: Vec<RiskProfile>,
    pub report: WeeklyReport,
    pub sleep: SleepSummary,
    pub metrics: Vec<MetricSeries>,
    pub organs: Vec<OrganStatus>,
    pub advice: Vec<Advice>,
    pub technique_note: String,
    pub archive: Archive,
    pub notifications: Vec<Notification>,
    pub settings: AppSettings,
}

impl Fixtures {
    /// Risk profile for a kind. Validation guarantees one per kind.
    pub fn risk(&self, kind: RiskKind) -> Option<&RiskProfile> {
        self.risks.iter().find(|r| r.kind == kind)
    }

    /// Series for a metric, falling back to the first series when none exists.
    pub fn metric(&self, kind: MetricKind) -> Option<&MetricSeries> {
        self.metrics
            .iter()
            .find(|m| m.id == kind)
            .or_else(|| self.metrics.first())
    }

    /// Organ whose shichen contains `time`.
    pub fn current_shichen(&self, time: NaiveTime) -> Option<&OrganStatus> {
        self.organs.iter().find(|o| o.contains(time))
    }
}
