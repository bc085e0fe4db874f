use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::db::Student;
use crate::forms::{DEPARTMENTS, MAX_AGE, MIN_AGE};
use crate::region::RegionBanner;
use crate::render::escape_html;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/js/bootstrap.bundle.min.js";

pub const EMPTY_PLACEHOLDER: &str = "No students found. Add your first student!";

const STYLE: &str = r#"
        body { background-color: #f8f9fa; }
        .header-section {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 3rem 2rem;
            border-radius: 10px;
            margin-bottom: 2rem;
        }
        .table { background-color: white; border-radius: 10px; overflow: hidden; }
        .dr-indicator { position: absolute; top: 10px; right: 10px; font-size: 0.8rem; }
        .dr-indicator.primary { background-color: #28a745; color: white; padding: 5px 10px; border-radius: 5px; }
        .dr-indicator.dr { background-color: #ffc107; color: #212529; padding: 5px 10px; border-radius: 5px; }
"#;

const SCRIPT: &str = r#"
        document.addEventListener('DOMContentLoaded', function() {
            document.querySelectorAll('.alert').forEach(function(alert) {
                setTimeout(function() { new bootstrap.Alert(alert).close(); }, 5000);
            });
        });
        document.getElementById('addStudentForm').addEventListener('submit', function(e) {
            const name = this.name.value.trim();
            const age = parseInt(this.age.value);
            if (name.length < 2) {
                alert('Name must be at least 2 characters long');
                e.preventDefault();
                return false;
            }
            if (age < 16 || age > 100) {
                alert('Age must be between 16 and 100');
                e.preventDefault();
                return false;
            }
            if (!this.department.value) {
                alert('Please select a department');
                e.preventDefault();
                return false;
            }
        });
"#;

/// Everything the students page shows.
#[derive(Debug, Clone)]
pub struct StudentsPage<'a> {
    pub region: &'a RegionBanner,
    pub students: &'a [Student],
    pub error: Option<&'a str>,
    pub rendered_at: DateTime<Utc>,
}

/// Render the full HTML document.
pub fn students_page(page: &StudentsPage<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>Student Record System - DR Enabled</title>\n");
    let _ = writeln!(html, "    <link href=\"{BOOTSTRAP_CSS}\" rel=\"stylesheet\">");
    let _ = writeln!(html, "    <style>{STYLE}    </style>");
    html.push_str("</head>\n<body>\n");

    region_alert(&mut html, page.region);

    html.push_str("    <div class=\"container mt-5 position-relative\">\n");
    dr_indicator(&mut html, page.region);
    html.push_str(concat!(
        "        <div class=\"header-section text-center\">\n",
        "            <h1 class=\"display-4\">Student Record System</h1>\n",
        "            <p class=\"lead\">Containerized Application with Disaster Recovery</p>\n",
        "        </div>\n",
    ));

    if let Some(error) = page.error {
        error_banner(&mut html, error);
    }
    add_form(&mut html);
    students_table(&mut html, page.students, page.rendered_at);
    html.push_str("    </div>\n");

    let _ = writeln!(html, "    <script src=\"{BOOTSTRAP_JS}\"></script>");
    let _ = writeln!(html, "    <script>{SCRIPT}    </script>");
    html.push_str("</body>\n</html>\n");
    html
}

fn region_alert(html: &mut String, region: &RegionBanner) {
    let badge = if region.is_failover {
        "<span class=\"badge bg-warning\">Failover Active</span>"
    } else {
        "<span class=\"badge bg-success\">Normal Operation</span>"
    };
    let _ = write!(
        html,
        concat!(
            "    <div class=\"alert alert-info\" role=\"alert\">\n",
            "        <strong>Region:</strong> {region}\n",
            "        {badge}\n",
            "    </div>\n",
        ),
        region = escape_html(&region.region),
        badge = badge,
    );
}

fn dr_indicator(html: &mut String, region: &RegionBanner) {
    let (class, label) = if region.is_dr {
        ("dr", "(DR)")
    } else {
        ("primary", "(Primary)")
    };
    let _ = writeln!(
        html,
        "        <div class=\"dr-indicator {class}\">Region: {} {label}</div>",
        escape_html(&region.region),
    );
}

fn error_banner(html: &mut String, error: &str) {
    let _ = write!(
        html,
        concat!(
            "        <div class=\"alert alert-danger alert-dismissible fade show\" role=\"alert\">\n",
            "            {}\n",
            "            <button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\" aria-label=\"Close\"></button>\n",
            "        </div>\n",
        ),
        escape_html(error),
    );
}

fn add_form(html: &mut String) {
    html.push_str(concat!(
        "        <div class=\"card mb-4 shadow-sm\">\n",
        "            <div class=\"card-header bg-primary text-white\"><h3 class=\"mb-0\">Add New Student</h3></div>\n",
        "            <div class=\"card-body\">\n",
        "                <form method=\"POST\" id=\"addStudentForm\">\n",
        "                    <input type=\"hidden\" name=\"action\" value=\"add\">\n",
        "                    <div class=\"row g-3\">\n",
        "                        <div class=\"col-md-4\">\n",
        "                            <input type=\"text\" class=\"form-control\" name=\"name\" placeholder=\"Full Name\" required pattern=\"[A-Za-z\\s]+\" title=\"Please enter a valid name\">\n",
        "                        </div>\n",
    ));
    let _ = write!(
        html,
        concat!(
            "                        <div class=\"col-md-2\">\n",
            "                            <input type=\"number\" class=\"form-control\" name=\"age\" placeholder=\"Age\" min=\"{}\" max=\"{}\" required>\n",
            "                        </div>\n",
        ),
        MIN_AGE, MAX_AGE,
    );
    html.push_str(concat!(
        "                        <div class=\"col-md-4\">\n",
        "                            <select class=\"form-control\" name=\"department\" required>\n",
        "                                <option value=\"\">Select Department</option>\n",
    ));
    for dept in DEPARTMENTS {
        let _ = writeln!(
            html,
            "                                <option value=\"{dept}\">{dept}</option>"
        );
    }
    html.push_str(concat!(
        "                            </select>\n",
        "                        </div>\n",
        "                        <div class=\"col-md-2\">\n",
        "                            <button type=\"submit\" class=\"btn btn-primary w-100\">Add Student</button>\n",
        "                        </div>\n",
        "                    </div>\n",
        "                </form>\n",
        "            </div>\n",
        "        </div>\n",
    ));
}

fn students_table(html: &mut String, students: &[Student], rendered_at: DateTime<Utc>) {
    let _ = write!(
        html,
        concat!(
            "        <div class=\"card shadow-sm\">\n",
            "            <div class=\"card-header bg-secondary text-white\"><h3 class=\"mb-0\">All Students ({} total)</h3></div>\n",
            "            <div class=\"card-body p-0\">\n",
            "                <div class=\"table-responsive\">\n",
            "                    <table class=\"table table-striped mb-0\">\n",
            "                        <thead class=\"table-dark\">\n",
            "                            <tr><th>ID</th><th>Name</th><th>Age</th><th>Department</th><th>Added On</th><th>Actions</th></tr>\n",
            "                        </thead>\n",
            "                        <tbody>\n",
        ),
        students.len(),
    );

    if students.is_empty() {
        let _ = writeln!(
            html,
            "                            <tr><td colspan=\"6\" class=\"text-center py-4\"><p class=\"mb-0\">{EMPTY_PLACEHOLDER}</p></td></tr>"
        );
    }
    for student in students {
        student_row(html, student);
    }

    let _ = write!(
        html,
        concat!(
            "                        </tbody>\n",
            "                    </table>\n",
            "                </div>\n",
            "            </div>\n",
            "            <div class=\"card-footer text-muted\"><small>Last updated: {} UTC</small></div>\n",
            "        </div>\n",
        ),
        rendered_at.format("%B %-d, %Y, %-I:%M %P"),
    );
}

fn student_row(html: &mut String, student: &Student) {
    let _ = write!(
        html,
        concat!(
            "                            <tr>\n",
            "                                <td>{id}</td>\n",
            "                                <td>{name}</td>\n",
            "                                <td>{age}</td>\n",
            "                                <td><span class=\"badge bg-info text-dark\">{department}</span></td>\n",
            "                                <td>{added}</td>\n",
            "                                <td>\n",
            "                                    <form method=\"POST\" style=\"display:inline;\" onsubmit=\"return confirm('Are you sure you want to delete this student?');\">\n",
            "                                        <input type=\"hidden\" name=\"action\" value=\"delete\">\n",
            "                                        <input type=\"hidden\" name=\"id\" value=\"{id}\">\n",
            "                                        <button type=\"submit\" class=\"btn btn-danger btn-sm\">Delete</button>\n",
            "                                    </form>\n",
            "                                </td>\n",
            "                            </tr>\n",
        ),
        id = student.id,
        name = escape_html(&student.name),
        age = student.age,
        department = escape_html(&student.department),
        added = student.created_at.format("%b %d, %Y"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn student(id: u32, name: &str, department: &str) -> Student {
        Student {
            id,
            name: name.into(),
            age: 21,
            department: department.into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        }
    }

    fn render(students: &[Student], error: Option<&str>, region: &RegionBanner) -> String {
        students_page(&StudentsPage {
            region,
            students,
            error,
            rendered_at: Utc.with_ymd_and_hms(2024, 3, 5, 15, 4, 0).unwrap(),
        })
    }

    #[test]
    fn empty_list_shows_placeholder_not_error() {
        let region = RegionBanner::from_parts(None, None);
        let html = render(&[], None, &region);
        assert!(html.contains(EMPTY_PLACEHOLDER));
        assert!(html.contains("All Students (0 total)"));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn rows_render_in_given_order_with_dates() {
        let region = RegionBanner::from_parts(None, None);
        let rows = [student(2, "Zed", "Arts"), student(1, "Amy", "Business")];
        let html = render(&rows, None, &region);
        assert!(html.contains("All Students (2 total)"));
        assert!(!html.contains(EMPTY_PLACEHOLDER));
        assert!(html.find("Zed").unwrap() < html.find("Amy").unwrap());
        assert!(html.contains("<td>Mar 05, 2024</td>"));
        assert!(html.contains("name=\"id\" value=\"2\""));
        assert!(html.contains("Last updated: March 5, 2024, 3:04 pm UTC"));
    }

    #[test]
    fn user_text_is_escaped() {
        let region = RegionBanner::from_parts(Some("<b>west</b>"), None);
        let rows = [student(1, "<script>alert(1)</script>", "R&D \"labs\"")];
        let html = render(&rows, Some("Error adding student: <oops>"), &region);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("R&amp;D &quot;labs&quot;"));
        assert!(html.contains("Error adding student: &lt;oops&gt;"));
        assert!(html.contains("&lt;b&gt;west&lt;/b&gt;"));
    }

    #[test]
    fn region_badges_follow_flags() {
        let region = RegionBanner::from_parts(Some("us-east-1"), Some("eu-west-1"));
        let html = render(&[], None, &region);
        assert!(html.contains("Failover Active"));
        assert!(html.contains("(Primary)"));

        let region = RegionBanner::from_parts(Some("us-west-2"), None);
        let html = render(&[], None, &region);
        assert!(html.contains("Normal Operation"));
        assert!(html.contains("dr-indicator dr"));
        assert!(html.contains("(DR)"));
    }

    #[test]
    fn form_offers_departments() {
        let region = RegionBanner::from_parts(None, None);
        let html = render(&[], None, &region);
        for dept in DEPARTMENTS {
            assert!(html.contains(&format!("<option value=\"{dept}\">{dept}</option>")));
        }
        assert!(html.contains("min=\"16\" max=\"100\""));
    }
}
