use url::Url;

use crate::ids::CourseID;

/// Course metadata as served alongside a video bundle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Course {
    pub id: CourseID,
    pub name: String,
    pub description: String,
    pub image_url: Url,
}
