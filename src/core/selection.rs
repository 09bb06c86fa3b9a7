use serde::{Deserialize, Serialize};

/// Active view keys derived from the filter controls.
///
/// `key_x` names a value column (`"{nationality} {sex}"`), `key_y` names the
/// discriminator slice (semester) and the highlighted row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub key_x: String,
    pub key_y: String,
}

impl Selection {
    #[must_use]
    pub fn compose(nationality: &str, sex: &str, semester: &str) -> Self {
        Self {
            key_x: composite_key(nationality, sex),
            key_y: semester.to_owned(),
        }
    }
}

/// Column key for a nationality/sex pair, joined by a single space.
#[must_use]
pub fn composite_key(nationality: &str, sex: &str) -> String {
    format!("{nationality} {sex}")
}
