use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder() -> (Rc<RefCell<Vec<MapEvent>>>, impl FnMut(&MapEvent) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, move |e: &MapEvent| sink.borrow_mut().push(e.clone()))
}

#[test]
fn new_list_is_empty() {
    let obs: Observers<MapEvent> = Observers::new();
    assert!(obs.is_empty());
    assert_eq!(obs.len(), 0);
}

#[test]
fn notify_reaches_every_subscriber_in_order() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut obs: Observers<MapEvent> = Observers::new();
    for tag in 0..3 {
        let order = Rc::clone(&order);
        obs.subscribe(move |_| order.borrow_mut().push(tag));
    }
    obs.notify(&MapEvent::GridStepChanged(10.0));
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn subscriber_sees_event_payload() {
    let (log, cb) = recorder();
    let mut obs = Observers::new();
    obs.subscribe(cb);
    obs.notify(&MapEvent::GridHOffsetChanged(-4));
    obs.notify(&MapEvent::GridColorChanged(Rgb::WHITE));
    assert_eq!(*log.borrow(), vec![MapEvent::GridHOffsetChanged(-4), MapEvent::GridColorChanged(Rgb::WHITE)]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let (log, cb) = recorder();
    let mut obs = Observers::new();
    let id = obs.subscribe(cb);
    assert!(obs.unsubscribe(id));
    obs.notify(&MapEvent::GridVOffsetChanged(1));
    assert!(log.borrow().is_empty());
}

#[test]
fn unsubscribe_twice_reports_false() {
    let mut obs: Observers<MapEvent> = Observers::new();
    let id = obs.subscribe(|_| {});
    assert!(obs.unsubscribe(id));
    assert!(!obs.unsubscribe(id));
}

#[test]
fn subscription_ids_are_unique() {
    let mut obs: Observers<MapEvent> = Observers::new();
    let a = obs.subscribe(|_| {});
    obs.unsubscribe(a);
    let b = obs.subscribe(|_| {});
    assert_ne!(a, b);
}
