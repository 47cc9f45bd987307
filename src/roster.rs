//! Student table rows and the home/dashboard summary.

use std::collections::BTreeSet;

use crate::api::{student_photo_url, Student};

/// Photo column of the student table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoCell {
    Url(String),
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRow {
    pub id: i64,
    pub photo: PhotoCell,
    pub roll_no: String,
    pub name: String,
    pub course: String,
    pub branch: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        let has_photo = student
            .image_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty());
        Self {
            id: student.id,
            photo: if has_photo {
                PhotoCell::Url(student_photo_url(student.id))
            } else {
                PhotoCell::Placeholder
            },
            roll_no: student.roll_no.clone(),
            name: student.name.clone(),
            course: student.course.clone(),
            branch: student.branch.clone(),
        }
    }
}

pub const COLUMNS: [&str; 5] = ["Photo", "Roll No", "Name", "Course", "Branch"];

pub fn rows(students: &[Student]) -> Vec<StudentRow> {
    students.iter().map(StudentRow::from).collect()
}

/// Counts shown on the home and dashboard pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub courses: usize,
}

impl Summary {
    pub fn of(students: &[Student]) -> Self {
        let courses: BTreeSet<&str> = students
            .iter()
            .map(|s| s.course.trim())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            total: students.len(),
            courses: courses.len(),
        }
    }
}
