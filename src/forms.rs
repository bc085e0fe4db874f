//! Form submissions accepted by the students page.

use serde::Deserialize;

use crate::db::{NewStudent, StudentId};
use crate::error::RecordsError;

pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;
pub const MIN_NAME_LEN: usize = 2;

/// Departments offered by the add form. Storage accepts any non-empty value.
pub const DEPARTMENTS: [&str; 5] = [
    "Computer Science",
    "Engineering",
    "Business",
    "Medicine",
    "Arts",
];

/// Raw `application/x-www-form-urlencoded` body. Every field is optional;
/// which ones matter depends on `action`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StudentForm {
    pub action: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    pub department: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Add(NewStudent),
    /// `None` when the submitted id is not a row id at all; such a delete
    /// matches nothing.
    Delete(Option<StudentId>),
    /// Unknown action or a required field left empty.
    Ignored,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl StudentForm {
    /// Decide what the submission asks for.
    ///
    /// Missing fields make the submission a no-op. Fields that are present
    /// but malformed are a validation error.
    pub fn action(&self) -> Result<FormAction, RecordsError> {
        match self.action.as_deref() {
            Some("add") => {
                let (Some(name), Some(age), Some(department)) = (
                    present(&self.name),
                    present(&self.age),
                    present(&self.department),
                ) else {
                    return Ok(FormAction::Ignored);
                };
                Ok(FormAction::Add(validate_new_student(name, age, department)?))
            }
            Some("delete") => match present(&self.id) {
                // Strict parse: `7abc` is not id 7 and deletes nothing.
                Some(id) => Ok(FormAction::Delete(id.parse().ok())),
                None => Ok(FormAction::Ignored),
            },
            _ => Ok(FormAction::Ignored),
        }
    }
}

pub fn validate_new_student(
    name: &str,
    age: &str,
    department: &str,
) -> Result<NewStudent, RecordsError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(RecordsError::Validation(format!(
            "Name must be at least {MIN_NAME_LEN} characters long"
        )));
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(RecordsError::Validation(
            "Name may only contain letters and spaces".to_string(),
        ));
    }
    let age: i32 = age
        .parse()
        .ok()
        .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
        .ok_or_else(|| {
            RecordsError::Validation(format!("Age must be between {MIN_AGE} and {MAX_AGE}"))
        })?;

    Ok(NewStudent {
        name: name.to_string(),
        age,
        department: department.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(name: &str, age: &str, department: &str) -> StudentForm {
        StudentForm {
            action: Some("add".into()),
            name: Some(name.into()),
            age: Some(age.into()),
            department: Some(department.into()),
            id: None,
        }
    }

    fn delete(id: &str) -> StudentForm {
        StudentForm {
            action: Some("delete".into()),
            id: Some(id.into()),
            ..StudentForm::default()
        }
    }

    #[test]
    fn valid_add_is_trimmed() {
        let action = add("  Jane Doe ", "21", "Engineering").action().unwrap();
        assert_eq!(
            action,
            FormAction::Add(NewStudent {
                name: "Jane Doe".into(),
                age: 21,
                department: "Engineering".into(),
            })
        );
    }

    #[test]
    fn empty_fields_are_ignored() {
        assert_eq!(add("", "21", "Arts").action().unwrap(), FormAction::Ignored);
        assert_eq!(add("Jane", "", "Arts").action().unwrap(), FormAction::Ignored);
        assert_eq!(add("Jane", "21", "  ").action().unwrap(), FormAction::Ignored);
    }

    #[test]
    fn age_out_of_range_is_rejected() {
        for age in ["15", "101", "abc", "20.5"] {
            let err = add("Jane", age, "Arts").action().unwrap_err();
            assert!(matches!(err, RecordsError::Validation(_)), "age {age}");
        }
        assert!(add("Jane", "16", "Arts").action().is_ok());
        assert!(add("Jane", "100", "Arts").action().is_ok());
    }

    #[test]
    fn name_rules() {
        assert!(add("J", "20", "Arts").action().is_err());
        assert!(add("<script>", "20", "Arts").action().is_err());
        assert!(add("R2D2", "20", "Arts").action().is_err());
        assert!(add("Zoë Saldaña", "20", "Arts").action().is_ok());
    }

    #[test]
    fn department_is_free_form() {
        assert!(add("Jane", "20", "Astrophysics").action().is_ok());
    }

    #[test]
    fn delete_parses_id() {
        assert_eq!(delete("7").action().unwrap(), FormAction::Delete(Some(7)));
        assert_eq!(delete("seven").action().unwrap(), FormAction::Delete(None));
        assert_eq!(delete("-1").action().unwrap(), FormAction::Delete(None));
        assert_eq!(delete("7abc").action().unwrap(), FormAction::Delete(None));
        assert_eq!(delete("").action().unwrap(), FormAction::Ignored);
    }

    #[test]
    fn unknown_or_missing_action_is_ignored() {
        let mut form = add("Jane", "20", "Arts");
        form.action = Some("update".into());
        assert_eq!(form.action().unwrap(), FormAction::Ignored);
        form.action = None;
        assert_eq!(form.action().unwrap(), FormAction::Ignored);
    }
}
