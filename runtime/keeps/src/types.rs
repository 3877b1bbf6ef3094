use serde::{Deserialize, Serialize};

use keepnet_schedule::Timestamp;

/// A keep's unique identity (32-byte address).
pub type KeepId = [u8; 32];

/// An operator identity as a 32-byte compressed public key.
pub type OperatorId = [u8; 32];

/// The account credited with an operator's share of a reward.
pub type BeneficiaryId = [u8; 32];

/// The application a keep was opened for.
pub type ApplicationId = [u8; 32];

/// A single keep member: the operator doing the signing work and the
/// beneficiary their rewards are paid to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepMember {
    pub operator: OperatorId,
    pub beneficiary: BeneficiaryId,
}

/// Lifecycle status of a keep.
///
/// `Active` is the only non-terminal state: a keep is closed when it
/// finishes its signing duty cleanly, and terminated when it
/// misbehaves or aborts. Closed and Terminated are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepStatus {
    Active,
    Closed,
    Terminated,
}

/// A threshold-signing group as recorded by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keep {
    /// The keep's address.
    pub id: KeepId,
    /// When the keep was opened, unix seconds.
    pub creation_timestamp: Timestamp,
    /// Members in selection order.
    pub members: Vec<KeepMember>,
    /// The application this keep was opened for.
    pub application: ApplicationId,
    /// Current lifecycle status.
    pub status: KeepStatus,
}

/// Errors that can occur during keep directory operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeepError {
    #[error("keep {} is not known to the directory", hex::encode(.0))]
    UnknownKeep(KeepId),

    #[error("keep {} already exists", hex::encode(.0))]
    DuplicateKeep(KeepId),

    #[error("keep {} is not active, status is {status:?}", hex::encode(.id))]
    NotActive { id: KeepId, status: KeepStatus },

    #[error("a keep must have at least one member")]
    NoMembers,
}
