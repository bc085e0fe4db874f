//! HTML output. Everything here is a pure function of its inputs.

pub mod escape;
pub mod page;

pub use escape::escape_html;
pub use page::{StudentsPage, students_page};
