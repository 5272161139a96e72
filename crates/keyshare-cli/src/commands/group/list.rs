use keyshare_core::GroupRecord;

use crate::app::AppContext;
use crate::ui::{
    badge, blank_line, format_datetime, header, info, print, table, yes_no, Badge, Column, UiContext,
};

const COLUMNS: [Column; 6] = [
    Column::new("Name"),
    Column::new("ID"),
    Column::new("Admin"),
    Column::new("Member"),
    Column::new("Created"),
    Column::new("Updated"),
];

pub async fn handle_list(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let mut resolver = ctx.resolver()?;
    let records: Vec<GroupRecord> = resolver.groups().await?.records().cloned().collect();

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        info(
            &ui,
            &badge(&ui, Badge::Info, "You are not an admin or member of any groups."),
        );
        return Ok(());
    }
    if ui.mode.is_pretty() && !ui.quiet {
        print(&ui, &header(&ui, "group list", Some(&format!("{} groups", records.len()))));
        blank_line(&ui);
    }
    print(&ui, &groups_table(&ui, &records));
    Ok(())
}

fn groups_table(ui: &UiContext, records: &[GroupRecord]) -> String {
    let pretty = ui.mode.is_pretty();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|group| {
            vec![
                group.display_name().to_string(),
                group.id.to_string(),
                yes_no(group.is_admin, ui.unicode).to_string(),
                yes_no(group.is_member, ui.unicode).to_string(),
                format_datetime(&group.created, pretty),
                format_datetime(&group.updated, pretty),
            ]
        })
        .collect();
    table(ui, &COLUMNS, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::group;

    #[test]
    fn test_plain_table_one_line_per_group() {
        let records = vec![group("g1", Some("ops"), true), group("g2", None, false)];
        let out = groups_table(&UiContext::plain(), &records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ops\tg1\tyes\tyes\t"));
        assert!(lines[1].starts_with("g2\tg2\tno\tyes\t"));
    }
}
