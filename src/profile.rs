use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Approver, ThreadConfig};
use crate::thread::reconcile_order;

/// A complete thread profile: configuration, approver chain, and the
/// display-order permutation for the original request's To line.
///
/// This is the only persisted shape. Import and export round-trip it
/// field-for-field; everything else in the crate is derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub config: ThreadConfig,
    pub approvers: Vec<Approver>,
    #[serde(default)]
    pub recipient_order: Vec<u32>,
}

/// Raw on-disk shape. Required sections are optional here so a missing
/// block can be reported with a descriptive message instead of a generic
/// serde error.
#[derive(Deserialize)]
struct RawProfile {
    config: Option<ThreadConfig>,
    approvers: Option<Vec<Approver>>,
    #[serde(default)]
    recipient_order: Vec<u32>,
}

impl Profile {
    /// Parse and validate a profile from JSON bytes. Fails fast on a missing
    /// configuration block or approver list; on failure nothing is returned,
    /// so existing state held by the caller is never partially overwritten.
    ///
    /// The recipient order is reconciled against the approver set on the way
    /// in: a stale permutation (ids removed, approvers added since the file
    /// was written) is repaired here and never reaches the composer.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let raw: RawProfile = serde_json::from_slice(bytes)?;

        let config = raw
            .config
            .ok_or_else(|| Error::Profile("missing \"config\" block".to_string()))?;
        let approvers = raw
            .approvers
            .ok_or_else(|| Error::Profile("missing \"approvers\" list".to_string()))?;

        let mut seen_ids = std::collections::HashSet::new();
        for approver in &approvers {
            if !seen_ids.insert(approver.id) {
                log::warn!("duplicate approver id {} in profile", approver.id);
            }
        }

        let recipient_order = reconcile_order(&approvers, &raw.recipient_order);
        if recipient_order != raw.recipient_order {
            log::debug!(
                "reconciled recipient order {:?} -> {:?}",
                raw.recipient_order,
                recipient_order,
            );
        }

        Ok(Profile {
            config,
            approvers,
            recipient_order,
        })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)?;
        Self::from_json(&bytes)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
