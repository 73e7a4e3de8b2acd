//! Server-rendered HTML pages. The route layer hands a data bag to one of
//! these functions and wraps the result in `axum::response::Html`.

use crate::lists::repo::List;
use crate::reminders::repo::Reminder;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn welcome(oauth_enabled: bool) -> String {
    let google = if oauth_enabled {
        "<p><a href=\"/auth/google\">Sign in with Google</a></p>"
    } else {
        ""
    };
    layout(
        "To-Do List",
        &format!(
            "<h1>To-Do List</h1>\n<p><a href=\"/login\">Log in</a> or <a href=\"/register\">Register</a></p>\n{google}"
        ),
    )
}

pub fn login_page(oauth_enabled: bool) -> String {
    let google = if oauth_enabled {
        "<p><a href=\"/auth/google\">Sign in with Google</a></p>"
    } else {
        ""
    };
    layout(
        "Log in",
        &format!(
            "<h1>Log in</h1>\n\
             <form method=\"post\" action=\"/login\">\n\
             <input type=\"email\" name=\"username\" placeholder=\"Email\" required>\n\
             <input type=\"password\" name=\"password\" placeholder=\"Password\" required>\n\
             <button type=\"submit\">Log in</button>\n\
             </form>\n{google}\
             <p><a href=\"/register\">Register</a></p>"
        ),
    )
}

pub fn register_page() -> String {
    layout(
        "Register",
        "<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <input type=\"email\" name=\"username\" placeholder=\"Email\" required>\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p><a href=\"/login\">Log in</a></p>",
    )
}

pub fn no_lists() -> String {
    layout(
        "To-Do List",
        "<h1>No lists yet</h1>\n\
         <p><a href=\"/addlist\">Create your first list</a></p>\n\
         <p><a href=\"/logout\">Log out</a></p>",
    )
}

pub fn add_list_page() -> String {
    layout(
        "New list",
        "<h1>New list</h1>\n\
         <form method=\"post\" action=\"/addlist\">\n\
         <input type=\"text\" name=\"name\" placeholder=\"List name\" required>\n\
         <button type=\"submit\">Create</button>\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
    )
}

pub fn list_page(
    list_title: &str,
    list_id: Option<i64>,
    lists: &[List],
    items: &[Reminder],
    multi_list: bool,
) -> String {
    let hidden_list_id = list_id
        .map(|id| format!("<input type=\"hidden\" name=\"listId\" value=\"{id}\">\n"))
        .unwrap_or_default();

    let mut body = String::new();

    if multi_list {
        body.push_str("<nav><ul>\n");
        for list in lists {
            body.push_str(&format!(
                "<li><a href=\"/list-{}\">{}</a></li>\n",
                list.id,
                escape(&list.name)
            ));
        }
        body.push_str("</ul><a href=\"/addlist\">New list</a></nav>\n");
    }

    body.push_str(&format!("<h1>{}</h1>\n", escape(list_title)));

    body.push_str("<ul>\n");
    for item in items {
        body.push_str(&format!(
            "<li>\n\
             <form method=\"post\" action=\"/edit\">\n\
             {hidden_list_id}\
             <input type=\"hidden\" name=\"updatedItemId\" value=\"{id}\">\n\
             <input type=\"text\" name=\"updatedItemTitle\" value=\"{title}\">\n\
             <button type=\"submit\">Save</button>\n\
             </form>\n\
             <form method=\"post\" action=\"/delete\">\n\
             {hidden_list_id}\
             <input type=\"hidden\" name=\"deleteItemId\" value=\"{id}\">\n\
             <button type=\"submit\">Delete</button>\n\
             </form>\n\
             </li>\n",
            id = item.id,
            title = escape(&item.title),
        ));
    }
    body.push_str("</ul>\n");

    body.push_str(&format!(
        "<form method=\"post\" action=\"/add\">\n\
         {hidden_list_id}\
         <input type=\"text\" name=\"newItem\" placeholder=\"New item\" required>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         <p><a href=\"/logout\">Log out</a></p>"
    ));

    layout(list_title, &body)
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!("<h1>{}</h1>\n<p><a href=\"/\">Home</a></p>", escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn reminder(id: i64, title: &str) -> Reminder {
        Reminder {
            id,
            title: title.to_string(),
            list_id: 1,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"&'</script>"),
            "&lt;script&gt;&quot;&amp;&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn list_page_escapes_item_titles() {
        let items = vec![reminder(1, "<img onerror=x>")];
        let html = list_page("Today", Some(1), &[], &items, true);
        assert!(!html.contains("<img onerror=x>"));
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn list_page_renders_items_in_given_order() {
        let items = vec![reminder(2, "Eggs"), reminder(1, "Milk")];
        let html = list_page("Groceries", Some(7), &[], &items, true);
        let eggs = html.find("Eggs").unwrap();
        let milk = html.find("Milk").unwrap();
        assert!(eggs < milk);
        assert!(html.contains("name=\"listId\" value=\"7\""));
    }

    #[test]
    fn list_page_sidebar_links_lists() {
        let lists = vec![List {
            id: 3,
            name: "Work".into(),
            user_id: Uuid::new_v4(),
        }];
        let html = list_page("Work", Some(3), &lists, &[], true);
        assert!(html.contains("href=\"/list-3\""));

        // single-list mode has no sidebar and no hidden list id
        let html = list_page("Today", None, &[], &[], false);
        assert!(!html.contains("/addlist"));
        assert!(!html.contains("name=\"listId\""));
    }

    #[test]
    fn login_page_mentions_google_only_when_enabled() {
        assert!(login_page(true).contains("/auth/google"));
        assert!(!login_page(false).contains("/auth/google"));
        assert!(!welcome(false).contains("/auth/google"));
    }
}
