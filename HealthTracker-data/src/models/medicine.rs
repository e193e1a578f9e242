use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blob::BlobRef;
use crate::repository::{Namespace, Reading};

/// Storage model for a medicine the user takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescription: String,
    pub last_prescription_date: NaiveDate,

    /// Scan of the last prescription, if one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prescription_file: Option<BlobRef>,
}

impl Reading for Medicine {
    const NAMESPACE: Namespace = Namespace::MEDICINES;
}
