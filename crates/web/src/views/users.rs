//! User administration list.

use purplepaw_api::UsersApi;
use purplepaw_api::models::UserRecord;
use purplepaw_core::ClientResult;
use purplepaw_table::{Cell, Column, PageRequest, RowAction, SortConfig, Tone};

pub const EDIT: &str = "edit";
pub const TOGGLE_STATUS: &str = "toggle-status";
pub const DELETE: &str = "delete";

pub fn default_request(page_size: u32) -> PageRequest {
    PageRequest::new(page_size, SortConfig::ascending("nombre"))
}

pub fn columns() -> Vec<Column<UserRecord>> {
    vec![
        Column::derived("nombre", "Name", |u: &UserRecord| Cell::text(u.full_name())).sortable(),
        Column::plain("email", "Email").sortable(),
        Column::plain("telefono", "Phone"),
        Column::derived("role", "Role", |u: &UserRecord| {
            u.primary_role()
                .map(|r| Cell::text(r.as_str()))
                .unwrap_or(Cell::Empty)
        }),
        Column::derived("active", "Status", |u: &UserRecord| {
            if u.active {
                Cell::badge("Active", Tone::Success)
            } else {
                Cell::badge("Inactive", Tone::Danger)
            }
        }),
        Column::actions("actions", "Actions", |u: &UserRecord| {
            vec![
                RowAction::new(EDIT, "Edit", Tone::Info),
                if u.active {
                    RowAction::new(TOGGLE_STATUS, "Deactivate", Tone::Warning)
                } else {
                    RowAction::new(TOGGLE_STATUS, "Activate", Tone::Success)
                },
                RowAction::new(DELETE, "Delete", Tone::Danger),
            ]
        }),
    ]
}

/// Run a row action that needs no form. Returns `false` for actions the
/// view must handle itself (editing opens a form).
pub async fn perform(api: &UsersApi, user: &UserRecord, action: &str) -> ClientResult<bool> {
    match action {
        TOGGLE_STATUS => {
            api.toggle_status(&user.id, !user.active).await?;
            Ok(true)
        }
        DELETE => {
            api.delete(&user.id).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use purplepaw_auth::Role;
    use purplepaw_table::{DataTable, Pagination, TableBody};

    use super::*;

    fn user(active: bool) -> UserRecord {
        UserRecord {
            id: "u1".into(),
            email: "ana@purplepaw.test".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            phone: "5512345678".to_string(),
            roles: vec![Role::RECEPTIONIST, Role::VETERINARIAN],
            active,
        }
    }

    #[test]
    fn row_shows_derived_cells() {
        let pagination = Pagination {
            page_number: 0,
            page_size: 10,
            total_elements: 1,
            total_pages: 1,
        };
        let view = DataTable::render(&columns(), &[user(false)], &pagination, false);
        let TableBody::Rows { rows } = view.body else {
            panic!("expected rows");
        };
        let cells: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        assert_eq!(
            cells,
            vec![
                "Ana Ruiz",
                "ana@purplepaw.test",
                "5512345678",
                "RECEPCIONISTA",
                "Inactive",
                "[Edit] | [Activate] | [Delete]"
            ]
        );
    }

    #[test]
    fn status_is_a_badge_not_the_raw_flag() {
        let cols = columns();
        let status = cols.iter().find(|c| c.key == "active").unwrap();
        assert_eq!(status.cell(&user(true)), Cell::badge("Active", Tone::Success));
    }
}
