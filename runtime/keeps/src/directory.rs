use std::collections::HashMap;

use keepnet_schedule::Timestamp;

use crate::types::*;

/// Creation-ordered registry of keeps, scoped to one sanctioned
/// application.
///
/// The directory owns every keep's lifecycle. Rewards code only reads
/// from it: range queries for per-interval eligibility counts and
/// per-keep lookups at payout time.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct KeepDirectory {
    /// Keeps opened for this application count towards reward
    /// eligibility; anything else is recorded but never counted.
    sanctioned_application: ApplicationId,
    keeps: HashMap<KeepId, Keep>,
    /// Keep ids in creation order.
    order: Vec<KeepId>,
}

impl KeepDirectory {
    pub fn new(sanctioned_application: ApplicationId) -> Self {
        Self {
            sanctioned_application,
            keeps: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Record a newly opened keep.
    pub fn open_keep(
        &mut self,
        id: KeepId,
        creation_timestamp: Timestamp,
        members: Vec<KeepMember>,
        application: ApplicationId,
    ) -> Result<(), KeepError> {
        if self.keeps.contains_key(&id) {
            return Err(KeepError::DuplicateKeep(id));
        }
        if members.is_empty() {
            return Err(KeepError::NoMembers);
        }

        self.keeps.insert(
            id,
            Keep {
                id,
                creation_timestamp,
                members,
                application,
                status: KeepStatus::Active,
            },
        );
        self.order.push(id);

        tracing::info!(
            keep = %hex::encode(id),
            creation_timestamp,
            "keep opened"
        );
        Ok(())
    }

    /// Transition an active keep to Closed. Terminal.
    pub fn close_keep(&mut self, id: &KeepId) -> Result<(), KeepError> {
        self.transition(id, KeepStatus::Closed)
    }

    /// Transition an active keep to Terminated. Terminal.
    pub fn terminate_keep(&mut self, id: &KeepId) -> Result<(), KeepError> {
        self.transition(id, KeepStatus::Terminated)
    }

    fn transition(&mut self, id: &KeepId, to: KeepStatus) -> Result<(), KeepError> {
        let keep = self.keeps.get_mut(id).ok_or(KeepError::UnknownKeep(*id))?;
        if keep.status != KeepStatus::Active {
            return Err(KeepError::NotActive {
                id: *id,
                status: keep.status,
            });
        }
        keep.status = to;
        tracing::info!(keep = %hex::encode(id), status = ?to, "keep status changed");
        Ok(())
    }

    /// Look up a keep.
    pub fn keep(&self, id: &KeepId) -> Result<&Keep, KeepError> {
        self.keeps.get(id).ok_or(KeepError::UnknownKeep(*id))
    }

    pub fn status_of(&self, id: &KeepId) -> Result<KeepStatus, KeepError> {
        Ok(self.keep(id)?.status)
    }

    pub fn members_of(&self, id: &KeepId) -> Result<&[KeepMember], KeepError> {
        Ok(self.keep(id)?.members.as_slice())
    }

    pub fn creation_timestamp_of(&self, id: &KeepId) -> Result<Timestamp, KeepError> {
        Ok(self.keep(id)?.creation_timestamp)
    }

    /// True if the keep was opened for the sanctioned application.
    pub fn is_recognized(&self, id: &KeepId) -> bool {
        self.keeps
            .get(id)
            .map(|k| k.application == self.sanctioned_application)
            .unwrap_or(false)
    }

    /// Ids of recognized keeps created in `[start, end)`, in creation
    /// order.
    pub fn keeps_created_in_range(&self, start: Timestamp, end: Timestamp) -> Vec<KeepId> {
        self.order
            .iter()
            .filter(|id| {
                let keep = &self.keeps[*id];
                keep.application == self.sanctioned_application
                    && keep.creation_timestamp >= start
                    && keep.creation_timestamp < end
            })
            .copied()
            .collect()
    }

    /// Number of recognized keeps created in `[start, end)`.
    pub fn count_created_in_range(&self, start: Timestamp, end: Timestamp) -> u64 {
        self.keeps_created_in_range(start, end).len() as u64
    }

    /// Total number of keeps ever recorded, recognized or not.
    pub fn keep_count(&self) -> usize {
        self.order.len()
    }

    pub fn sanctioned_application(&self) -> ApplicationId {
        self.sanctioned_application
    }
}
