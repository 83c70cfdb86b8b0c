//! Ad-impression record model and its CSV projection.

use chrono::NaiveDateTime;

/// Timestamp format used for record timestamps in the CSV output.
///
/// Lexicographic order of this format matches chronological order, which the
/// generator relies on when sorting batches.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV column names, in the same order as the fields of
/// [`AdImpressionRecord`].
pub const CSV_HEADER: [&str; 13] = [
    "timestamp",
    "channel_id",
    "channel_name",
    "ad_id",
    "ad_name",
    "advertiser",
    "duration",
    "viewer_count",
    "region",
    "device_type",
    "ad_position",
    "campaign_id",
    "revenue",
];

/// Placement of an ad relative to the program content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdPosition {
    PreRoll,
    MidRoll,
    PostRoll,
}

impl AdPosition {
    /// All placements, for uniform sampling.
    pub const ALL: [AdPosition; 3] = [AdPosition::PreRoll, AdPosition::MidRoll, AdPosition::PostRoll];

    /// Wire representation used in the CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdPosition::PreRoll => "pre-roll",
            AdPosition::MidRoll => "mid-roll",
            AdPosition::PostRoll => "post-roll",
        }
    }
}

/// One synthesized ad-impression event.
///
/// Records carry no identity beyond their field values and are immutable once
/// created; they exist only in memory until serialized by the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct AdImpressionRecord {
    pub timestamp: NaiveDateTime,
    pub channel_id: String,
    pub channel_name: String,
    pub ad_id: String,
    pub ad_name: String,
    pub advertiser: String,
    /// Ad length in seconds.
    pub duration: u32,
    pub viewer_count: u32,
    pub region: String,
    pub device_type: String,
    pub ad_position: AdPosition,
    pub campaign_id: String,
    /// Revenue in currency units, rounded to 2 decimal places.
    pub revenue: f64,
}

impl AdImpressionRecord {
    /// Project the record into a CSV row matching [`CSV_HEADER`].
    ///
    /// Revenue is always rendered with exactly two decimal digits.
    pub fn to_csv_record(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.channel_id.clone(),
            self.channel_name.clone(),
            self.ad_id.clone(),
            self.ad_name.clone(),
            self.advertiser.clone(),
            self.duration.to_string(),
            self.viewer_count.to_string(),
            self.region.clone(),
            self.device_type.clone(),
            self.ad_position.as_str().to_string(),
            self.campaign_id.clone(),
            format!("{:.2}", self.revenue),
        ]
    }
}
