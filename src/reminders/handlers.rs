use axum::{
    extract::State,
    response::Redirect,
    Form,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::session::CurrentUser,
    error::AppError,
    lists::repo::List,
    reminders::{
        dto::{AddItemForm, DeleteItemForm, EditItemForm},
        repo::Reminder,
    },
    state::AppState,
};

/// Mutations land back on the list they came from (POST-redirect-GET);
/// single-list mode renders the list at /.
fn back_to_list(list_id: Option<i64>, multi_list: bool) -> Redirect {
    match (multi_list, list_id) {
        (true, Some(id)) => Redirect::to(&format!("/list-{id}")),
        _ => Redirect::to("/"),
    }
}

/// Pick the list the mutation targets. In multi-list mode the form must
/// name one of the caller's own lists; in single-list mode it is always
/// the default list.
async fn resolve_target_list(
    state: &AppState,
    user_id: Uuid,
    form_list_id: Option<i64>,
) -> Result<Option<List>, AppError> {
    if state.config.multi_list {
        match form_list_id {
            Some(id) => List::find_for_user(&state.db, user_id, id).await,
            None => Ok(None),
        }
    } else {
        List::default_for_user(&state.db, user_id).await.map(Some)
    }
}

/// POST /add.
#[instrument(skip_all)]
pub async fn add_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AddItemForm>,
) -> Result<Redirect, AppError> {
    let title = form.new_item.trim();
    if title.is_empty() {
        return Ok(back_to_list(form.list_id, state.config.multi_list));
    }

    let Some(list) = resolve_target_list(&state, user.id, form.list_id).await? else {
        warn!(user_id = %user.id, list_id = ?form.list_id, "add to list not owned by caller");
        return Ok(Redirect::to("/"));
    };

    let item = Reminder::create(&state.db, list.id, title).await?;
    info!(user_id = %user.id, list_id = list.id, item_id = item.id, "item added");
    Ok(back_to_list(Some(list.id), state.config.multi_list))
}

/// POST /edit. An id that does not resolve to one of the caller's items
/// is a no-op, not an error.
#[instrument(skip_all)]
pub async fn edit_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<EditItemForm>,
) -> Result<Redirect, AppError> {
    let title = form.updated_item_title.trim();
    if !title.is_empty() {
        let updated =
            Reminder::update(&state.db, form.updated_item_id, user.id, title).await?;
        if updated {
            info!(user_id = %user.id, item_id = form.updated_item_id, "item updated");
        } else {
            debug!(user_id = %user.id, item_id = form.updated_item_id, "edit was a no-op");
        }
    }
    Ok(back_to_list(form.list_id, state.config.multi_list))
}

/// POST /delete. Same no-op semantics as /edit.
#[instrument(skip_all)]
pub async fn delete_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<DeleteItemForm>,
) -> Result<Redirect, AppError> {
    let deleted = Reminder::delete(&state.db, form.delete_item_id, user.id).await?;
    if deleted {
        info!(user_id = %user.id, item_id = form.delete_item_id, "item deleted");
    } else {
        debug!(user_id = %user.id, item_id = form.delete_item_id, "delete was a no-op");
    }
    Ok(back_to_list(form.list_id, state.config.multi_list))
}
