use serde::Deserialize;

// Field names stay camelCase on the wire, matching the HTML forms.

/// Body of POST /add. `list_id` is absent in single-list mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemForm {
    pub new_item: String,
    pub list_id: Option<i64>,
}

/// Body of POST /edit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemForm {
    pub updated_item_id: i64,
    pub updated_item_title: String,
    pub list_id: Option<i64>,
}

/// Body of POST /delete.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemForm {
    pub delete_item_id: i64,
    pub list_id: Option<i64>,
}
