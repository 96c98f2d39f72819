use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde helper for `HH:MM` wall-clock times as the CMS stores them.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Geographic coordinates of an owner's registered address
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Ordinal size buckets used by the compatibility scorer (rank 0..4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogSize {
    Toy,
    Small,
    Medium,
    Large,
    Giant,
}

impl DogSize {
    pub fn rank(&self) -> u8 {
        match self {
            DogSize::Toy => 0,
            DogSize::Small => 1,
            DogSize::Medium => 2,
            DogSize::Large => 3,
            DogSize::Giant => 4,
        }
    }
}

/// Ordinal activity levels (rank 0..3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "veryhigh", alias = "very_high")]
    VeryHigh,
}

impl ActivityLevel {
    pub fn rank(&self) -> u8 {
        match self {
            ActivityLevel::Low => 0,
            ActivityLevel::Moderate => 1,
            ActivityLevel::High => 2,
            ActivityLevel::VeryHigh => 3,
        }
    }
}

/// Dog gender. The platform launched in Italy, so the stored labels are
/// `maschio`/`femmina`; English labels are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DogGender {
    #[serde(rename = "maschio", alias = "male")]
    Male,
    #[serde(rename = "femmina", alias = "female")]
    Female,
}

/// Dog profile carrying the attributes the matching engine scores on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogProfile {
    #[serde(rename = "dogId", alias = "id")]
    pub dog_id: String,
    pub name: String,
    #[serde(rename = "ownerId", alias = "owner")]
    pub owner_id: String,
    pub size: DogSize,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
    #[serde(rename = "activityLevel")]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub temperament: Vec<String>,
    pub gender: DogGender,
    #[serde(rename = "ownerLocation", default)]
    pub owner_location: Option<GeoPoint>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

impl DogProfile {
    /// Age in whole years at the given reference date
    pub fn age_years(&self, as_of: NaiveDate) -> i32 {
        let mut years = as_of.year() - self.birth_date.year();
        if (as_of.month(), as_of.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years
    }
}

fn default_true() -> bool {
    true
}

/// One recurring working-hours rule. `day_of_week` is 0..6 with 0 = Sunday,
/// matching how the CMS stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRule {
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: u8,
    #[serde(rename = "startTime", with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime", with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
}

/// A veterinarian's recurring weekly schedule, at most one rule per weekday
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub rules: Vec<DayRule>,
}

impl WeeklySchedule {
    pub fn new(rules: Vec<DayRule>) -> Self {
        Self { rules }
    }

    /// Weekday index for a date, 0 = Sunday
    pub fn weekday_index(date: NaiveDate) -> u8 {
        date.weekday().num_days_from_sunday() as u8
    }
}

/// An already-booked interval for a provider; read-only snapshot per
/// computation, cancelled bookings excluded upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedInterval {
    #[serde(rename = "startTime", alias = "start")]
    pub start: DateTime<Utc>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
}

impl BookedInterval {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::minutes(self.duration_minutes as i64)
    }
}

/// Scored candidate returned by the discovery pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(rename = "dogId")]
    pub dog_id: String,
    pub name: String,
    pub size: DogSize,
    pub gender: DogGender,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "sharedTemperament")]
    pub shared_temperament: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Compatibility scoring weights. The defaults sum to 100, so each weighted
/// sub-score contributes points directly. When geographic data is missing
/// the distance weight is NOT redistributed; the achievable maximum simply
/// degrades (to 85 with default weights).
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub size: f64,
    pub age: f64,
    pub activity: f64,
    pub temperament: f64,
    pub distance: f64,
    pub gender: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            size: 20.0,
            age: 15.0,
            activity: 20.0,
            temperament: 20.0,
            distance: 15.0,
            gender: 10.0,
        }
    }
}

/// Kind of a triage question, with its answer space
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Yes/no. `inverted` marks positive-phrased questions where a "no"
    /// answer is the alarming one.
    Boolean { inverted: bool },
    /// Numeric scale from 0 to `max`
    Scale { max: u8 },
    /// Ordinal options, least to most severe
    Multiple { options: Vec<String> },
}

/// One question of the fixed triage bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageQuestion {
    pub id: String,
    pub text: String,
    pub category: String,
    pub weight: f64,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// An owner's answer to a single triage question
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriageAnswer {
    Bool(bool),
    /// Scale value or multiple-choice option index
    Value(u8),
}

/// `(questionId, answer)` pair submitted by an owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResponse {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: TriageAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Derived triage outcome, recomputed on every submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    pub score: u8,
    #[serde(rename = "urgencyLevel")]
    pub urgency_level: UrgencyLevel,
    pub recommendations: Vec<String>,
    #[serde(rename = "requiresVeterinarian")]
    pub requires_veterinarian: bool,
    #[serde(rename = "requiresEmergencyServices")]
    pub requires_emergency_services: bool,
}
