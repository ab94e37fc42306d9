// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, warn};

use crate::{ApiError, ComputerId, EmployeeId, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTarget {
    Employee(EmployeeId),
    Computer(ComputerId),
}

impl ProfileTarget {
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Employee(_) => "employee",
            Self::Computer(_) => "computer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStatus {
    Loading,
    Failed { headline: String, detail: String },
    NotFound,
    Loaded(Summary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    pub seq: u64,
    pub target: ProfileTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub target: Option<ProfileTarget>,
    pub status: ProfileStatus,
    seq: u64,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            target: None,
            status: ProfileStatus::Loading,
            seq: 0,
        }
    }
}

impl ProfileView {
    /// Starts a summary fetch for `target`, superseding any earlier one.
    pub fn open(&mut self, target: ProfileTarget) -> ProfileQuery {
        self.seq += 1;
        self.target = Some(target);
        self.status = ProfileStatus::Loading;
        ProfileQuery {
            seq: self.seq,
            target,
        }
    }

    pub fn close(&mut self) {
        self.seq += 1;
        self.target = None;
        self.status = ProfileStatus::Loading;
    }

    pub fn apply(&mut self, seq: u64, result: Result<Option<Summary>, ApiError>) -> bool {
        if seq != self.seq {
            debug!(seq, current = self.seq, "dropping stale profile");
            return false;
        }
        let Some(target) = self.target else {
            return false;
        };
        self.status = match result {
            Ok(Some(summary)) if has_primary(target, &summary) => ProfileStatus::Loaded(summary),
            Ok(_) => ProfileStatus::NotFound,
            Err(error) if error.is_not_found() => ProfileStatus::NotFound,
            Err(error) => {
                warn!(noun = target.noun(), error = %error, "profile load failed");
                ProfileStatus::Failed {
                    headline: format!("Error loading {} information", target.noun()),
                    detail: error.message,
                }
            }
        };
        true
    }
}

fn has_primary(target: ProfileTarget, summary: &Summary) -> bool {
    match target {
        ProfileTarget::Employee(_) => summary.employee.is_some(),
        ProfileTarget::Computer(_) => summary.computer.is_some(),
    }
}
