//! Integration tests for mutation events.
//!
//! Each test subscribes a recorder to every event kind and checks the exact
//! sequence a mutation produces.

use ordo_array::{ArrayEvent, EventKind, Mutation, ObservableArray};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

/// Records every event as `add(item,index)`, `remove(item,index)`,
/// `reverse`, `sort` or `change:<op>`.
fn record(array: &ObservableArray<String>) -> Log {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = log.clone();
        array.on(kind, move |event| {
            let entry = match event {
                ArrayEvent::Add { item, index } => format!("add({},{})", item, index),
                ArrayEvent::Remove { item, index } => format!("remove({},{})", item, index),
                ArrayEvent::Change(mutation) => format!("change:{}", mutation.as_str()),
                other => other.kind().to_string(),
            };
            log.borrow_mut().push(entry);
        });
    }
    log
}

fn strings(items: &[&str]) -> ObservableArray<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_pop_scenario() {
    let array = strings(&["1", "2"]);
    let log = record(&array);

    assert_eq!(array.pop(), Some("2".to_string()));
    assert_eq!(array.to_vec(), vec!["1"]);
    assert_eq!(array.len(), 1);
    assert_eq!(*log.borrow(), vec!["remove(2,1)", "change:pop"]);
}

#[test]
fn test_splice_scenario() {
    let array = strings(&["1", "2", "3", "4"]);
    let log = record(&array);

    let removed = array.splice(1, Some(2), ["2.".to_string(), "3.".to_string()]);

    assert_eq!(removed, vec!["2", "3"]);
    assert_eq!(array.to_vec(), vec!["1", "2.", "3.", "4"]);
    assert_eq!(
        *log.borrow(),
        vec!["remove(2,1)", "remove(3,1)", "add(2.,1)", "add(3.,2)", "change:splice"]
    );
}

#[test]
fn test_splice_negative_start_to_end() {
    let array = strings(&["a", "b", "c", "d"]);
    let log = record(&array);

    let removed = array.splice(-2, None, []);

    assert_eq!(removed, vec!["c", "d"]);
    assert_eq!(array.to_vec(), vec!["a", "b"]);
    assert_eq!(*log.borrow(), vec!["remove(c,2)", "remove(d,2)", "change:splice"]);
}

#[test]
fn test_push_then_shift_then_unshift() {
    let array = strings(&["x"]);
    let log = record(&array);

    assert_eq!(array.push_many(["y".to_string(), "z".to_string()]), 3);
    assert_eq!(array.shift(), Some("x".to_string()));
    assert_eq!(array.unshift("w".to_string()), 3);

    assert_eq!(array.to_vec(), vec!["w", "y", "z"]);
    assert_eq!(
        *log.borrow(),
        vec![
            "add(y,1)",
            "add(z,2)",
            "change:push",
            "remove(x,0)",
            "change:shift",
            "add(w,0)",
            "change:unshift",
        ]
    );
}

#[test]
fn test_reverse_and_sort_events() {
    let array = strings(&["b", "c", "a"]);
    let log = record(&array);

    array.reverse();
    assert_eq!(array.to_vec(), vec!["a", "c", "b"]);
    array.sort();
    assert_eq!(array.to_vec(), vec!["a", "b", "c"]);

    assert_eq!(*log.borrow(), vec!["reverse", "change:reverse", "sort", "change:sort"]);
}

#[test]
fn test_empty_removals_are_silent() {
    let array = strings(&[]);
    let log = record(&array);

    assert_eq!(array.pop(), None);
    assert_eq!(array.shift(), None);
    assert!(array.splice(0, Some(3), []).is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listener_sees_updated_array() {
    let array = Rc::new(strings(&["a"]));
    let seen = Rc::new(RefCell::new(Vec::new()));

    let weak = Rc::downgrade(&array);
    let sink = seen.clone();
    array.on_add(move |item, index| {
        if let Some(array) = weak.upgrade() {
            sink.borrow_mut().push((item.clone(), index, array.len()));
        }
    });

    array.push("b".to_string());
    assert_eq!(*seen.borrow(), vec![("b".to_string(), 1, 2)]);
}

#[test]
fn test_nested_mutation_from_listener() {
    let array = Rc::new(strings(&[]));
    let log = record(&array);

    let weak = Rc::downgrade(&array);
    array.once(EventKind::Add, move |_| {
        if let Some(array) = weak.upgrade() {
            array.push("echo".to_string());
        }
    });

    array.push("call".to_string());

    assert_eq!(array.to_vec(), vec!["call", "echo"]);
    // the nested push completes before the outer burst continues
    assert_eq!(
        *log.borrow(),
        vec!["add(call,0)", "add(echo,1)", "change:push", "change:push"]
    );
}

#[test]
fn test_change_event_can_be_disabled() {
    let array = ObservableArray::builder()
        .items(["a".to_string()])
        .emit_change(false)
        .build();
    let log = record(&array);

    array.push("b".to_string());
    array.reverse();

    assert_eq!(*log.borrow(), vec!["add(b,1)", "reverse"]);
}

#[test]
fn test_change_carries_mutation() {
    let array = strings(&["a"]);
    let last = Rc::new(RefCell::new(None));

    let sink = last.clone();
    array.on(EventKind::Change, move |event| {
        if let ArrayEvent::Change(mutation) = event {
            *sink.borrow_mut() = Some(*mutation);
        }
    });

    array.pop();
    assert_eq!(*last.borrow(), Some(Mutation::Pop));
}

#[test]
fn test_off_stops_delivery() {
    let array = strings(&[]);
    let count = Rc::new(RefCell::new(0));

    let sink = count.clone();
    let id = array.on_add(move |_, _| *sink.borrow_mut() += 1);
    array.push("a".to_string());
    assert_eq!(array.off(EventKind::Add, Some(id)), 1);
    array.push("b".to_string());

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_round_trip_through_vec() {
    let array = strings(&["1", "2", "3"]);
    let rebuilt: ObservableArray<String> = array.to_vec().into();

    assert_eq!(rebuilt, array);
    assert_eq!(rebuilt.len(), array.len());
}
