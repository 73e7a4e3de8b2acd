use serde::Deserialize;

/// Body of POST /addlist.
#[derive(Debug, Deserialize)]
pub struct AddListForm {
    pub name: String,
}
