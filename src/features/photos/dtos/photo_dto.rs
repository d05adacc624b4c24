use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::photos::models::{PhotoStatus, PhotoWithStats};
use crate::shared::constants::{DEFAULT_PRESIGN_TTL, DEFAULT_TAKE};

/// Temporal grouping for the photo listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Group by year and month ("2025-06")
    Ym,
    /// Group by calendar date ("2025-06-15")
    #[default]
    Ymd,
    /// Single "all" bucket
    All,
}

impl GroupBy {
    /// Derive the bucket key for a timestamp. Calendar fields are taken from
    /// the stored UTC instant, so the key is independent of server locale.
    pub fn key_for(&self, at: &DateTime<Utc>) -> String {
        match self {
            GroupBy::Ym => format!("{:04}-{:02}", at.year(), at.month()),
            GroupBy::Ymd => format!("{:04}-{:02}-{:02}", at.year(), at.month(), at.day()),
            GroupBy::All => "all".to_string(),
        }
    }
}

/// Query params for the photo listing
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct ListPhotosQuery {
    /// Page size (1-200, default 25)
    #[serde(default = "default_take")]
    #[validate(range(min = 1, max = 200))]
    #[param(minimum = 1, maximum = 200)]
    pub take: i64,

    /// Id of the last item of the previous page
    pub cursor: Option<Uuid>,

    /// Temporal grouping: "ym", "ymd" (default), or "all"
    #[serde(default)]
    pub group: GroupBy,

    /// Whether to generate preview URLs (default true)
    #[serde(default = "default_presign")]
    pub presign: bool,

    /// Preview URL lifetime in seconds (60-3600, default 300)
    #[serde(default = "default_ttl")]
    #[validate(range(min = 60, max = 3600))]
    #[param(minimum = 60, maximum = 3600)]
    pub ttl: u32,
}

fn default_take() -> i64 {
    DEFAULT_TAKE
}

fn default_presign() -> bool {
    true
}

fn default_ttl() -> u32 {
    DEFAULT_PRESIGN_TTL
}

/// One fully shaped photo item on the wire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoItemDto {
    pub id: Uuid,
    pub object_key: String,
    pub mime: String,
    pub bytes: i64,
    pub created_at: DateTime<Utc>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub exif_json: Option<serde_json::Value>,
    pub status: PhotoStatus,
    pub preview_url: Option<String>,
    pub favorite_count: i64,
    pub comment_count: i64,
    pub is_favorited: bool,
}

impl PhotoItemDto {
    pub fn from_stats(row: PhotoWithStats, preview_url: Option<String>) -> Self {
        Self {
            id: row.id,
            object_key: row.object_key,
            mime: row.mime,
            bytes: row.bytes,
            created_at: row.created_at,
            width: row.width,
            height: row.height,
            exif_json: row.exif_json,
            status: row.status,
            preview_url,
            favorite_count: row.favorite_count,
            comment_count: row.comment_count,
            is_favorited: row.is_favorited,
        }
    }
}

/// Response for the photo listing: items bucketed by temporal key plus the
/// cursor for the next page (null when this page was the last)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPhotosResponseDto {
    pub grouped: BTreeMap<String, Vec<PhotoItemDto>>,
    pub next_cursor: Option<Uuid>,
}

/// Bucket shaped items by their temporal key. Within each bucket the items
/// keep the order they arrive in (the listing query's newest-first order).
pub fn group_items(items: Vec<PhotoItemDto>, group: GroupBy) -> BTreeMap<String, Vec<PhotoItemDto>> {
    let mut grouped: BTreeMap<String, Vec<PhotoItemDto>> = BTreeMap::new();
    for item in items {
        let key = group.key_for(&item.created_at);
        grouped.entry(key).or_default().push(item);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: Uuid, created_at: DateTime<Utc>) -> PhotoItemDto {
        PhotoItemDto {
            id,
            object_key: format!("photos/{}.jpg", id),
            mime: "image/jpeg".to_string(),
            bytes: 1024,
            created_at,
            width: None,
            height: None,
            exif_json: None,
            status: PhotoStatus::Uploaded,
            preview_url: None,
            favorite_count: 0,
            comment_count: 0,
            is_favorited: false,
        }
    }

    #[test]
    fn test_group_key_ymd_and_ym() {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        assert_eq!(GroupBy::Ymd.key_for(&at), "2025-06-15");
        assert_eq!(GroupBy::Ym.key_for(&at), "2025-06");
        assert_eq!(GroupBy::All.key_for(&at), "all");
    }

    #[test]
    fn test_group_key_zero_pads() {
        let at = Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(GroupBy::Ymd.key_for(&at), "2025-01-05");
        assert_eq!(GroupBy::Ym.key_for(&at), "2025-01");
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let days = [(2025, 6, 15), (2025, 6, 15), (2025, 6, 14), (2025, 5, 1)];
        let items: Vec<PhotoItemDto> = days
            .iter()
            .enumerate()
            .map(|(i, (y, m, d))| {
                item(
                    Uuid::new_v4(),
                    Utc.with_ymd_and_hms(*y, *m, *d, 23 - i as u32, 0, 0).unwrap(),
                )
            })
            .collect();
        let all_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();

        for group in [GroupBy::Ym, GroupBy::Ymd, GroupBy::All] {
            let grouped = group_items(items.clone(), group);
            let mut seen: Vec<Uuid> = grouped
                .values()
                .flat_map(|bucket| bucket.iter().map(|i| i.id))
                .collect();
            assert_eq!(seen.len(), all_ids.len(), "no omissions for {:?}", group);
            seen.sort();
            let mut expected = all_ids.clone();
            expected.sort();
            assert_eq!(seen, expected, "no duplicates for {:?}", group);
        }
    }

    #[test]
    fn test_grouping_keeps_arrival_order_within_bucket() {
        let first = item(Uuid::new_v4(), Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap());
        let second = item(Uuid::new_v4(), Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap());
        let grouped = group_items(vec![first.clone(), second.clone()], GroupBy::Ymd);

        let bucket = &grouped["2025-06-15"];
        assert_eq!(bucket[0].id, first.id);
        assert_eq!(bucket[1].id, second.id);
    }

    #[test]
    fn test_group_all_uses_single_bucket() {
        let items = vec![
            item(Uuid::new_v4(), Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()),
            item(Uuid::new_v4(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ];
        let grouped = group_items(items, GroupBy::All);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["all"].len(), 2);
    }

    #[test]
    fn test_query_defaults() {
        let query: ListPhotosQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.take, 25);
        assert_eq!(query.cursor, None);
        assert_eq!(query.group, GroupBy::Ymd);
        assert!(query.presign);
        assert_eq!(query.ttl, 300);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_query_bounds() {
        let out_of_range: ListPhotosQuery =
            serde_json::from_value(serde_json::json!({"take": 0})).unwrap();
        assert!(out_of_range.validate().is_err());

        let too_big: ListPhotosQuery =
            serde_json::from_value(serde_json::json!({"take": 201})).unwrap();
        assert!(too_big.validate().is_err());

        let ttl_low: ListPhotosQuery =
            serde_json::from_value(serde_json::json!({"ttl": 59})).unwrap();
        assert!(ttl_low.validate().is_err());

        let ttl_high: ListPhotosQuery =
            serde_json::from_value(serde_json::json!({"ttl": 3601})).unwrap();
        assert!(ttl_high.validate().is_err());

        let ok: ListPhotosQuery =
            serde_json::from_value(serde_json::json!({"take": 200, "ttl": 3600})).unwrap();
        assert!(ok.validate().is_ok());
    }
}
