pub(crate) mod auth_sessions;
pub(crate) mod courses;
pub(crate) mod grades;
pub(crate) mod profiles;
pub(crate) mod roles;
