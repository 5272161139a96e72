use keyshare_core::service::{Device, DeviceId};
use keyshare_core::{check_batch_size, run_batch, BatchOutcome, BatchReport, KeyService};

use crate::app::AppContext;
use crate::cli::DeviceDeleteArgs;
use crate::errors::CliError;
use crate::helpers::parse_device_id;
use crate::ui::{format_datetime, print, print_batch_summary, table, Column, UiContext};

const COLUMNS: [Column; 5] = [
    Column::new("Device ID"),
    Column::new("Device Name"),
    Column::new("Created"),
    Column::new("Updated"),
    Column::new("Current Device"),
];

pub async fn handle_device_list(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let ui = ctx.ui_context();
    let service = ctx.service()?;
    let devices = service
        .device_list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to retrieve device keys: {}", e))?;

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }
    print(&ui, &device_table(&ui, &devices));
    Ok(())
}

fn device_table(ui: &UiContext, devices: &[Device]) -> String {
    let pretty = ui.mode.is_pretty();
    let current = if ui.unicode { "\u{2714}" } else { "yes" };
    let rows: Vec<Vec<String>> = devices
        .iter()
        .map(|device| {
            vec![
                device.id.to_string(),
                device.name.clone().unwrap_or_default(),
                format_datetime(&device.created, pretty),
                format_datetime(&device.updated, pretty),
                if device.is_current { current } else { "" }.to_string(),
            ]
        })
        .collect();
    table(ui, &COLUMNS, &rows)
}

pub async fn handle_device_delete(
    ctx: &AppContext<'_>,
    args: &DeviceDeleteArgs,
) -> anyhow::Result<()> {
    check_batch_size(args.ids.len())?;
    let ui = ctx.ui_context();
    let service = ctx.service()?;

    let devices = service
        .device_list()
        .await
        .map_err(|_| anyhow::anyhow!("Failed to make request to get current device keys."))?;
    let current = devices
        .iter()
        .find(|device| device.is_current)
        .map(|device| device.id)
        .unwrap_or_else(|| service.current_device());
    refuse_current(&args.ids, current)?;

    let report = delete_devices(service.as_ref(), args.ids.clone()).await;
    print_batch_summary(&ui, &report, "device key(s)", "device key(s)", "deleted", false)
}

/// Deleting this device's own keys is what `logout` is for.
/// IDs are compared after parsing, so `08` or `+8` still names device 8.
/// Unparseable IDs are left for the batch to report.
fn refuse_current(ids: &[String], current: DeviceId) -> Result<(), CliError> {
    if ids.iter().any(|id| parse_device_id(id) == Ok(current)) {
        return Err(CliError::invalid_input(
            "Attempting to delete keys for the current device. Use the 'logout' command instead.",
        ));
    }
    Ok(())
}

async fn delete_devices<S: KeyService + ?Sized>(service: &S, ids: Vec<String>) -> BatchReport {
    let result = run_batch(ids, |raw| async move {
        let outcome = match parse_device_id(&raw) {
            Ok(id) => service
                .device_delete(Some(id))
                .await
                .map_err(|e| format!("Unable to delete device with ID {} - {}", id, e)),
            Err(message) => Err(message),
        };
        BatchOutcome::from_result(outcome)
    })
    .await;
    BatchReport::from(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeService;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_bad_id_fails_alone() {
        let service = FakeService::default();
        let ids = vec!["12".to_string(), "abc".to_string(), "13".to_string(), "14".to_string()];
        let report = delete_devices(&service, ids).await;
        assert_eq!(report.success_count, 3);
        assert_eq!(report.failure_count, 1);
        assert_eq!(
            report.failures,
            vec!["Expected a numerical device ID but got 'abc' instead."]
        );
        assert_eq!(
            report.failure_line("device key(s)", "deleted").as_deref(),
            Some("1 device key(s) failed to be deleted.")
        );
    }

    #[tokio::test]
    async fn test_service_rejection_is_per_item() {
        let service = FakeService {
            missing_devices: vec![99],
            ..FakeService::default()
        };
        let report = delete_devices(&service, vec!["99".to_string(), "7".to_string()]).await;
        assert_eq!(report.success_count, 1);
        assert_eq!(
            report.failures,
            vec!["Unable to delete device with ID 99 - Device not found"]
        );
    }

    #[test]
    fn test_current_device_refused() {
        let ids = vec!["5".to_string(), "8".to_string()];
        let err = refuse_current(&ids, DeviceId(8)).unwrap_err();
        assert!(err.to_string().contains("Use the 'logout' command"));
        assert!(refuse_current(&ids, DeviceId(9)).is_ok());
    }

    #[test]
    fn test_current_device_refused_in_any_spelling() {
        for spelling in ["08", "+8", " 8 ", "0008"] {
            let ids = vec![spelling.to_string()];
            assert!(
                refuse_current(&ids, DeviceId(8)).is_err(),
                "'{}' slipped past the guard",
                spelling
            );
        }
        assert!(refuse_current(&["abc".to_string()], DeviceId(8)).is_ok());
    }

    #[test]
    fn test_current_device_marked() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let devices = vec![
            Device {
                id: DeviceId(4),
                name: Some("laptop".to_string()),
                created: at,
                updated: at,
                is_current: true,
            },
            Device {
                id: DeviceId(5),
                name: None,
                created: at,
                updated: at,
                is_current: false,
            },
        ];
        let out = device_table(&UiContext::plain(), &devices);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("4\tlaptop\t"));
        assert!(lines[0].ends_with("\tyes"));
        assert!(lines[1].ends_with("\t"));
    }
}
