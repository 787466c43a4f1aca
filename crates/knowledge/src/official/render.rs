//! Markdown rendering for matched official records.

use super::records::{field_text, list_field, Collection, Record};
use crate::types::{Answer, Citation};

/// Render matched records of one collection, collecting a citation for
/// every record that names a non-empty source.
pub fn render_records(collection: Collection, records: &[&Record]) -> Answer {
    let mut lines = vec![heading(collection).to_string()];
    let mut citations = Vec::new();

    for record in records {
        match collection {
            Collection::Contacts => lines.push(format!(
                "- **{}**: {} | {}",
                field_text(record, "office"),
                field_text(record, "email"),
                field_text(record, "phone")
            )),
            Collection::Addresses => lines.push(format!(
                "- **{}**: {}",
                field_text(record, "office"),
                field_text(record, "address")
            )),
            Collection::Fees => {
                lines.push(format!(
                    "- **{}**: ₱{} ({})",
                    field_text(record, "service"),
                    field_text(record, "fee_php"),
                    field_text(record, "unit")
                ));
                let notes = field_text(record, "notes");
                if !notes.is_empty() {
                    lines.push(format!("  - Notes: {}", notes));
                }
            }
            Collection::Requirements => {
                lines.push(format!("- **{}**:", field_text(record, "service")));
                for doc in list_field(record, "required_docs") {
                    lines.push(format!("  - {}", doc));
                }
            }
            Collection::Procedures => {
                lines.push(format!("- **{}**:", field_text(record, "service")));
                for (i, step) in list_field(record, "steps").iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, step));
                }
            }
        }

        let source = field_text(record, "source");
        if !source.is_empty() {
            citations.push(Citation::new(source));
        }
    }

    Answer::new(lines.join("\n"), citations)
}

fn heading(collection: Collection) -> &'static str {
    match collection {
        Collection::Contacts => "**Official Contacts:**",
        Collection::Addresses => "**Official Office Address:**",
        Collection::Fees => "**Official Fees:**",
        Collection::Requirements => "**Official Requirements:**",
        Collection::Procedures => "**Official Procedure:**",
    }
}
