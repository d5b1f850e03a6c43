pub(crate) mod auth;
pub(crate) mod courses;
pub(crate) mod errors;
pub(crate) mod grades;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod json;
pub(crate) mod router;
pub(crate) mod session;
pub(crate) mod students;
pub(crate) mod summary;
pub(crate) mod users;
