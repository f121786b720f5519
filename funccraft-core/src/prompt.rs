//! Model inputs for the downstream name predictor
//!
//! Inference and scoring live outside this crate. This module only turns
//! prepared rows into masked-signature inputs and normalizes raw predictions
//! back into a bare identifier.

use crate::dataset::DatasetRow;
use serde::{Deserialize, Serialize};

/// Masked signature placed in front of every body
pub const MASKED_SIGNATURE: &str = "def <extra_id_0>():\n";

/// Which body variant the model sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Task 1: comments and docstring removed
    BodyNoComments,
    /// Task 2: body as written
    BodyWithComments,
}

impl Task {
    /// Map the numeric task id used on the command line
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Task::BodyNoComments),
            2 => Some(Task::BodyWithComments),
            _ => None,
        }
    }

    fn body<'r>(&self, row: &'r DatasetRow) -> &'r str {
        match self {
            Task::BodyNoComments => &row.record.body_no_comments,
            Task::BodyWithComments => &row.record.body_with_comments,
        }
    }
}

/// One model input with the name it should predict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptExample {
    /// Empty when the row has no body for the chosen task
    pub input: String,
    pub reference: String,
}

/// Masked-signature input for `row`, or `None` when its body is blank
pub fn build_input(row: &DatasetRow, task: Task) -> Option<String> {
    let body = task.body(row);
    if body.trim().is_empty() {
        return None;
    }
    Some(format!("{}{}", MASKED_SIGNATURE, body))
}

/// Build one example per row, keeping rows without a body as empty inputs
pub fn build_examples(rows: &[DatasetRow], task: Task) -> Vec<PromptExample> {
    rows.iter()
        .map(|row| PromptExample {
            input: build_input(row, task).unwrap_or_default(),
            reference: row.record.name.clone(),
        })
        .collect()
}

/// Reduce raw generated text to a bare identifier
///
/// Takes the first whitespace-separated token, then cuts it at the first `(`
/// and after that at the first `:`.
pub fn clean_prediction(raw: &str) -> String {
    let Some(token) = raw.split_whitespace().next() else {
        return String::new();
    };
    let token = token.split('(').next().unwrap_or("");
    let token = token.split(':').next().unwrap_or("");
    token.to_string()
}
