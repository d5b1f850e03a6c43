pub(crate) mod access_guard;
pub(crate) mod errors;
pub(crate) mod gpa;
pub(crate) mod grade_book;
pub(crate) mod grade_policy;
pub(crate) mod role_assignment;
pub(crate) mod session;
pub(crate) mod stores;
