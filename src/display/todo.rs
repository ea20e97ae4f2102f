//! Todo display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::TodoItem;

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Content")]
    content: String,
}

/// Format todos as a table
pub fn format_todo_table(todos: &[&TodoItem]) -> String {
    if todos.is_empty() {
        return "No todos found.\n".to_string();
    }

    let rows: Vec<TodoRow> = todos
        .iter()
        .map(|todo| TodoRow {
            id: todo.id().short(),
            due: todo.due_date().format("%Y-%m-%d").to_string(),
            status: if todo.is_completed() { "done" } else { "open" },
            content: todo.content().to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_todo_table() {
        let mut todo =
            TodoItem::new("家賃を振り込む", NaiveDate::from_ymd_opt(2024, 5, 27).unwrap()).unwrap();
        todo.set_completed(true);

        let table = format_todo_table(&[&todo]);
        assert!(table.contains("家賃を振り込む"));
        assert!(table.contains("done"));
        assert!(table.contains("2024-05-27"));
    }
}
