use serde::{Deserialize, Serialize};
use sqlx::Type;

/// The closed set of portal roles. An identity holds at most one of these; holding none is the
/// "not yet activated" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "app_role", rename_all = "lowercase")]
pub(crate) enum Role {
    Admin,
    /// Lecturer.
    Dosen,
    /// Student.
    Mahasiswa,
}

impl Role {
    pub(crate) const ALL: [Role; 3] = [Role::Admin, Role::Dosen, Role::Mahasiswa];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Dosen => "dosen",
            Role::Mahasiswa => "mahasiswa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "grade_letter")]
pub(crate) enum GradeLetter {
    A,
    B,
    C,
    D,
    E,
}

impl GradeLetter {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::E => "E",
        }
    }
}
