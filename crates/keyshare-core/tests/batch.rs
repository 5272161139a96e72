use std::time::Duration;

use tokio::sync::oneshot;

use keyshare_core::batch::MAX_BATCH_TARGETS;
use keyshare_core::{check_batch_size, run_batch, BatchOutcome, BatchReport, KeyshareError};

#[tokio::test]
async fn test_one_failure_does_not_abort_siblings() {
    let targets = vec!["1", "2", "three", "4"];

    let result = run_batch(targets, |raw| async move {
        BatchOutcome::from_result(
            raw.parse::<u64>()
                .map_err(|_| format!("Expected a numerical device ID but got '{}' instead.", raw)),
        )
    })
    .await;

    assert_eq!(result.len(), 4);
    assert_eq!(result.success_count(), 3);
    assert_eq!(result.failure_count(), 1);
    assert_eq!(
        result.outcomes()[2].failure(),
        Some("Expected a numerical device ID but got 'three' instead.")
    );

    let report = BatchReport::from(&result);
    assert_eq!(
        report.success_line("device key(s)", "deleted").as_deref(),
        Some("3 device key(s) successfully deleted.")
    );
}

#[tokio::test]
async fn test_outcomes_follow_input_order_not_completion_order() {
    let (release_first, first_gate) = oneshot::channel::<()>();
    let mut gates = vec![Some(first_gate), None];
    let mut release = Some(release_first);

    let result = run_batch(vec!["A", "B"], |name| {
        let gate = if name == "A" { gates[0].take() } else { gates[1].take() };
        let release = if name == "B" { release.take() } else { None };
        async move {
            if let Some(gate) = gate {
                // A only finishes after B has completed.
                let _ = gate.await;
            }
            if let Some(release) = release {
                let _ = release.send(());
            }
            BatchOutcome::Success(name.to_lowercase())
        }
    })
    .await;

    let values: Vec<&String> = result.iter().filter_map(BatchOutcome::success).collect();
    assert_eq!(values, vec!["a", "b"]);
}

#[tokio::test]
async fn test_operations_run_concurrently() {
    let started = tokio::time::Instant::now();

    let result = run_batch((0..10).collect::<Vec<u32>>(), |n| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        BatchOutcome::<u32>::Success(n * 2)
    })
    .await;

    assert_eq!(result.success_count(), 10);
    assert!(started.elapsed() < Duration::from_millis(900));
}

#[tokio::test]
async fn test_all_failures_reported_in_order() {
    let result = run_batch(vec!["x.iron", "y.iron"], |file| async move {
        BatchOutcome::<()>::Failure(format!("{}: Failed to decrypt", file))
    })
    .await;

    let report = BatchReport::from(&result);
    assert_eq!(report.success_count, 0);
    assert_eq!(report.failures, vec!["x.iron: Failed to decrypt", "y.iron: Failed to decrypt"]);
    assert!(report.success_line("files", "decrypted").is_none());
    assert_eq!(
        report.failure_line("file(s)", "decrypted").as_deref(),
        Some("2 file(s) failed to be decrypted.")
    );
}

#[test]
fn test_oversized_batch_rejected() {
    let err = check_batch_size(MAX_BATCH_TARGETS + 5).unwrap_err();
    assert!(matches!(err, KeyshareError::BatchTooLarge { count: 80, .. }));
    assert!(err.to_string().contains("80"));
}
