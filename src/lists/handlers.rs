use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{info, instrument};

use crate::{
    auth::session::{CurrentUser, MaybeUser},
    error::AppError,
    lists::{dto::AddListForm, repo::List},
    reminders::repo::Reminder,
    state::AppState,
    views,
};

/// Title shown when the requested list id is not one of the caller's
/// lists. Kept as a silent fallback rather than an error.
const NO_LIST_TITLE: &str = "No List";

/// List views live at /list-<id>. The router can only bind whole path
/// segments, so the segment is matched as one parameter and split here.
pub fn parse_list_slug(slug: &str) -> Option<i64> {
    slug.strip_prefix("list-")?.parse::<i64>().ok()
}

/// GET /: anonymous visitors get the welcome page; authenticated users go
/// to their most recent list (multi-list) or straight into the default
/// list (single-list).
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Response, AppError> {
    let Some(user) = user else {
        return Ok(Html(views::welcome(state.config.google.is_some())).into_response());
    };

    if state.config.multi_list {
        let lists = List::for_user(&state.db, user.id).await?;
        return Ok(match lists.first() {
            Some(first) => Redirect::to(&format!("/list-{}", first.id)).into_response(),
            None => Html(views::no_lists()).into_response(),
        });
    }

    let list = List::default_for_user(&state.db, user.id).await?;
    let items = Reminder::for_list(&state.db, list.id).await?;
    Ok(Html(views::list_page(&list.name, None, &[], &items, false)).into_response())
}

/// GET /list-:id.
#[instrument(skip_all, fields(slug = %slug))]
pub async fn show_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Some(list_id) = parse_list_slug(&slug) else {
        return Err(AppError::NotFound);
    };

    let lists = List::for_user(&state.db, user.id).await?;
    let current = lists.iter().find(|l| l.id == list_id);

    let (title, current_id, items) = match current {
        Some(list) => (
            list.name.clone(),
            Some(list.id),
            Reminder::for_list(&state.db, list.id).await?,
        ),
        None => (NO_LIST_TITLE.to_string(), None, Vec::new()),
    };

    Ok(Html(views::list_page(
        &title,
        current_id,
        &lists,
        &items,
        state.config.multi_list,
    ))
    .into_response())
}

#[instrument(skip_all)]
pub async fn add_list_form(CurrentUser(_user): CurrentUser) -> Html<String> {
    Html(views::add_list_page())
}

/// POST /addlist: create the list and jump into it.
#[instrument(skip_all)]
pub async fn add_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<AddListForm>,
) -> Result<Redirect, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/addlist"));
    }

    let list = List::create(&state.db, user.id, name).await?;
    info!(user_id = %user.id, list_id = list.id, "list created");
    Ok(Redirect::to(&format!("/list-{}", list.id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_parsing() {
        assert_eq!(parse_list_slug("list-1"), Some(1));
        assert_eq!(parse_list_slug("list-42"), Some(42));
        assert_eq!(parse_list_slug("list-"), None);
        assert_eq!(parse_list_slug("list-abc"), None);
        assert_eq!(parse_list_slug("favicon.ico"), None);
        assert_eq!(parse_list_slug("1"), None);
    }
}
