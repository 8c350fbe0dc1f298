//! Integration tests for the executor kernel.
//!
//! These tests drive the kernel the way the prepared-statement layer does:
//! groups built per destination resource, a callback per statement kind,
//! context placed on the calling thread before execution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use common_error::{QuiltError, QuiltResult};
use quilt_execute::{ExecutionGroup, ExecutorDataMap, ExecutorKernel, GroupExecuteCallback};

fn callback<I, O, F>(f: F) -> Arc<dyn GroupExecuteCallback<I, O>>
where
    F: Fn(Vec<I>, bool, &ExecutorDataMap) -> QuiltResult<Vec<O>> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn groups(count: usize) -> Vec<ExecutionGroup<usize>> {
    (0..count).map(|i| ExecutionGroup::new(vec![i])).collect()
}

#[test]
fn test_outputs_follow_submission_order_not_completion_order() {
    let kernel = ExecutorKernel::new(4).unwrap();

    // Later groups finish first: delay is inversely proportional to index.
    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| {
            let index = inputs[0];
            thread::sleep(Duration::from_millis(((4 - index) * 30) as u64));
            Ok(inputs)
        },
    );

    let outputs = kernel.execute(groups(4), cb).unwrap();
    assert_eq!(outputs, vec![0, 1, 2, 3]);
    kernel.close();
}

#[test]
fn test_data_map_visible_in_every_worker() {
    let kernel = ExecutorKernel::new(3).unwrap();

    ExecutorDataMap::current().insert_value("trace_id", 7usize);
    let observations = Arc::new(AtomicUsize::new(0));

    let seen = Arc::clone(&observations);
    let cb = callback(
        move |inputs: Vec<usize>, _is_trunk: bool, data_map: &ExecutorDataMap| {
            if data_map.get_as::<usize>("trace_id").as_deref() == Some(&7) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
            Ok(inputs)
        },
    );

    kernel.execute(groups(5), cb).unwrap();
    assert_eq!(observations.load(Ordering::SeqCst), 5);
    kernel.close();
}

#[test]
fn test_trunk_runs_on_calling_thread() {
    let kernel = ExecutorKernel::new(2).unwrap();
    let caller = thread::current().id();
    let invocations = Arc::new(Mutex::new(Vec::new()));

    let record = Arc::clone(&invocations);
    let cb = callback(
        move |inputs: Vec<usize>, is_trunk: bool, _data_map: &ExecutorDataMap| {
            record
                .lock()
                .unwrap()
                .push((inputs[0], is_trunk, thread::current().id()));
            Ok(inputs)
        },
    );

    kernel.execute(groups(3), cb).unwrap();

    let invocations = invocations.lock().unwrap();
    assert_eq!(invocations.len(), 3);
    for (index, is_trunk, thread_id) in invocations.iter() {
        if *index == 0 {
            assert!(*is_trunk);
            assert_eq!(*thread_id, caller);
        } else {
            assert!(!*is_trunk);
            assert_ne!(*thread_id, caller);
        }
    }
    kernel.close();
}

#[test]
fn test_serial_mode_stays_on_calling_thread_in_order() {
    let kernel = ExecutorKernel::new(2).unwrap();
    let caller = thread::current().id();
    let order = Arc::new(Mutex::new(Vec::new()));

    let record = Arc::clone(&order);
    let cb = callback(
        move |inputs: Vec<usize>, is_trunk: bool, _data_map: &ExecutorDataMap| {
            assert!(is_trunk);
            assert_eq!(thread::current().id(), caller);
            record.lock().unwrap().push(inputs[0]);
            Ok(inputs)
        },
    );

    let outputs = kernel.execute_grouped(groups(4), None, cb, true).unwrap();
    assert_eq!(outputs, vec![0, 1, 2, 3]);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    kernel.close();
}

#[test]
fn test_first_callback_applies_to_first_group_only() {
    let kernel = ExecutorKernel::new(2).unwrap();

    let first = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| {
            Ok(inputs.into_iter().map(|i| i + 1000).collect())
        },
    );
    let rest = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| Ok(inputs),
    );

    let outputs = kernel
        .execute_grouped(groups(3), Some(first), rest, false)
        .unwrap();
    assert_eq!(outputs, vec![1000, 1, 2]);
    kernel.close();
}

#[test]
fn test_data_access_error_surfaces_unwrapped() {
    let kernel = ExecutorKernel::new(2).unwrap();

    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| {
            if inputs[0] == 2 {
                Err(QuiltError::data_access("connection reset by ds_2"))
            } else {
                Ok(inputs)
            }
        },
    );

    let err = kernel.execute(groups(4), cb).unwrap_err();
    match err {
        QuiltError::DataAccess(message) => assert!(message.contains("ds_2")),
        other => panic!("expected DataAccess, got {other:?}"),
    }
    kernel.close();
}

#[test]
fn test_trunk_data_access_error_surfaces_unwrapped() {
    let kernel = ExecutorKernel::new(2).unwrap();

    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| {
            if inputs[0] == 0 {
                Err(QuiltError::data_access("trunk connection lost"))
            } else {
                Ok(inputs)
            }
        },
    );

    let err = kernel.execute(groups(3), cb).unwrap_err();
    assert!(matches!(err, QuiltError::DataAccess(_)));
    kernel.close();
}

#[test]
fn test_other_errors_are_wrapped() {
    let kernel = ExecutorKernel::new(2).unwrap();

    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| {
            if inputs[0] == 1 {
                Err(QuiltError::invalid_parameter("malformed unit"))
            } else {
                Ok(inputs)
            }
        },
    );

    let err = kernel.execute(groups(2), cb).unwrap_err();
    assert!(matches!(err, QuiltError::ExecutionError(_)));
    kernel.close();
}

#[test]
fn test_first_drained_failure_masks_later_ones() {
    let kernel = ExecutorKernel::new(4).unwrap();

    // Both workers fail; the slower failure sits earlier in submission
    // order and must win.
    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| match inputs[0] {
            1 => {
                thread::sleep(Duration::from_millis(100));
                Err(QuiltError::data_access("failure in group 1"))
            }
            2 => Err(QuiltError::data_access("failure in group 2")),
            _ => Ok(inputs),
        },
    );

    let err = kernel.execute(groups(3), cb).unwrap_err();
    match err {
        QuiltError::DataAccess(message) => assert!(message.contains("group 1")),
        other => panic!("expected DataAccess, got {other:?}"),
    }
    kernel.close();
}

#[test]
fn test_empty_groups_yield_empty_outputs() {
    let kernel = ExecutorKernel::new(2).unwrap();
    let cb = callback(
        |inputs: Vec<usize>, _is_trunk: bool, _data_map: &ExecutorDataMap| Ok(inputs),
    );

    let outputs = kernel.execute(Vec::new(), cb).unwrap();
    assert!(outputs.is_empty());
    kernel.close();
}

#[test]
fn test_multi_unit_groups_concatenate_in_group_order() {
    let kernel = ExecutorKernel::new(2).unwrap();
    let cb = callback(
        |inputs: Vec<&'static str>, _is_trunk: bool, _data_map: &ExecutorDataMap| Ok(inputs),
    );

    let prepared = vec![
        ExecutionGroup::new(vec!["ds_0.t_0", "ds_0.t_1"]),
        ExecutionGroup::new(vec!["ds_1.t_0"]),
        ExecutionGroup::new(vec!["ds_2.t_0", "ds_2.t_1"]),
    ];
    let outputs = kernel.execute(prepared, cb).unwrap();
    assert_eq!(
        outputs,
        vec!["ds_0.t_0", "ds_0.t_1", "ds_1.t_0", "ds_2.t_0", "ds_2.t_1"]
    );
    kernel.close();
}
