use serde::Deserialize;

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Goal {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
}

impl Goal {
    pub fn marker(&self) -> &'static str {
        if self.is_completed {
            "✔"
        } else {
            "○"
        }
    }
}
