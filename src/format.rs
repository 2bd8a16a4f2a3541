use anyhow::{Context as _, Result};
use serde::Serialize;

use modbook_core::ContactRecord;

use crate::config::OutputFormat;
use crate::edit::{CommandResult, Index};

/// One row of the displayed list.
#[derive(Debug, Serialize)]
struct ListedPerson<'a> {
    index: Index,
    #[serde(flatten)]
    person: &'a ContactRecord,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    persons: Vec<ListedPerson<'a>>,
    total: usize,
    filtered: bool,
}

impl OutputFormat {
    /// Serialize data as pretty JSON.
    pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
        serde_json::to_string_pretty(data).context("JSON serialization failed")
    }

    /// Render the displayed list.
    ///
    /// Text output numbers each person from 1, the same positions `edit`
    /// accepts.
    pub fn render_list(self, displayed: &[&ContactRecord], total: usize) -> Result<String> {
        match self {
            Self::Text => {
                if displayed.is_empty() {
                    return Ok("0 persons listed!".to_owned());
                }
                let mut out = String::new();
                for (i, person) in displayed.iter().enumerate() {
                    out.push_str(&format!("{}. {person}\n", Index::from_zero_based(i)));
                }
                out.push_str(&format!("{} persons listed!", displayed.len()));
                Ok(out)
            }
            Self::Json => Self::to_json(&ListOutput {
                persons: displayed
                    .iter()
                    .enumerate()
                    .map(|(i, person)| ListedPerson {
                        index: Index::from_zero_based(i),
                        person,
                    })
                    .collect(),
                total,
                filtered: displayed.len() != total,
            }),
        }
    }

    /// Render the outcome of a successful edit.
    pub fn render_edit(self, result: &CommandResult) -> Result<String> {
        match self {
            Self::Text => Ok(result.feedback.clone()),
            Self::Json => Self::to_json(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modbook_core::{Name, Phone};

    fn people() -> Vec<ContactRecord> {
        vec![
            ContactRecord::new(Name::new("Alex Yeoh").unwrap())
                .with_phone(Some(Phone::new("91234567").unwrap())),
            ContactRecord::new(Name::new("Bernice Yu").unwrap()),
        ]
    }

    #[test]
    fn text_list_is_numbered_from_one() {
        let people = people();
        let displayed: Vec<&ContactRecord> = people.iter().collect();
        let out = OutputFormat::Text.render_list(&displayed, 2).unwrap();
        assert_eq!(
            out,
            "1. Alex Yeoh; Phone: 91234567\n\
             2. Bernice Yu\n\
             2 persons listed!"
        );
    }

    #[test]
    fn text_list_empty() {
        let out = OutputFormat::Text.render_list(&[], 5).unwrap();
        assert_eq!(out, "0 persons listed!");
    }

    #[test]
    fn json_list_carries_index_and_fields() {
        let people = people();
        let displayed = vec![&people[1]];
        let out = OutputFormat::Json.render_list(&displayed, 2).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["total"], 2);
        assert_eq!(v["filtered"], true);
        assert_eq!(v["persons"][0]["index"], 1);
        assert_eq!(v["persons"][0]["name"], "Bernice Yu");
    }

    #[test]
    fn edit_text_is_feedback() {
        let result = CommandResult {
            feedback: "No changes made.\nEdited Person: Bernice Yu".to_owned(),
            person: people()[1].clone(),
            changes: Vec::new(),
        };
        assert_eq!(OutputFormat::Text.render_edit(&result).unwrap(), result.feedback);
        let json: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.render_edit(&result).unwrap()).unwrap();
        assert_eq!(json["person"]["name"], "Bernice Yu");
        assert_eq!(json["changes"], serde_json::json!([]));
    }
}
