use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::types::Role;

#[derive(Debug, Serialize)]
pub(crate) struct SessionResponse {
    pub(crate) signed_in: bool,
    pub(crate) user_id: Option<String>,
    pub(crate) role: Option<Role>,
    /// One of `admin`, `dosen`, `mahasiswa`, `unactivated`, `sign_in`.
    pub(crate) landing: &'static str,
    pub(crate) path: Option<&'static str>,
    pub(crate) can_sign_out: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminSummary {
    pub(crate) courses: i64,
    pub(crate) users: i64,
    pub(crate) users_by_role: BTreeMap<&'static str, i64>,
    pub(crate) unactivated: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct LecturerSummary {
    pub(crate) courses: i64,
    pub(crate) students: i64,
    pub(crate) grades_recorded: i64,
}
