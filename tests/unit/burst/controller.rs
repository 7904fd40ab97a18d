use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::content::{bitmap::Bitmap, raster::Sprite};
use crate::emission::cell::{CellParams, build_cell};
use crate::timeline::state::TimelinePhase;

type Calls = Rc<RefCell<Vec<bool>>>;

fn recorder() -> (Calls, Completion) {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    (calls, Box::new(move |finished| sink.borrow_mut().push(finished)))
}

fn cells(n: usize) -> Vec<EmissionCell> {
    (0..n)
        .map(|_| {
            build_cell(
                Sprite {
                    bitmap: Bitmap::empty(),
                    tint: None,
                },
                &CellParams::default(),
            )
        })
        .collect()
}

fn burst(duration: f64, completion: Option<Completion>) -> BurstController {
    BurstController::new(BurstId(1), cells(2), duration, 1.0, Rng64::new(9), completion)
}

#[test]
fn completion_fires_once_after_fade() {
    let (calls, done) = recorder();
    let mut b = burst(1.0, Some(done));
    for _ in 0..19 {
        assert_eq!(b.tick(0.1), BurstStatus::Active);
    }
    assert!(calls.borrow().is_empty());
    assert_eq!(b.tick(0.1 + 1e-9), BurstStatus::Finished);
    assert_eq!(*calls.borrow(), vec![true]);

    assert_eq!(b.tick(1.0), BurstStatus::Finished);
    b.cancel();
    b.interrupt();
    assert_eq!(*calls.borrow(), vec![true]);
}

#[test]
fn ramp_drives_emitter_birth_rate_and_opacity() {
    let mut b = burst(2.0, None);
    b.tick(0.5);
    assert_eq!(b.emitter().birth_rate(), 1.0);
    assert!(!b.emitter().particles().is_empty());
    b.tick(1.6);
    assert_eq!(b.timeline().phase(), TimelinePhase::FadingOut);
    assert_eq!(b.emitter().birth_rate(), 0.0);
    assert!(b.emitter().opacity() < 1.0);
}

#[test]
fn cancel_skips_completion() {
    let (calls, done) = recorder();
    let mut b = burst(1.0, Some(done));
    b.tick(0.5);
    b.cancel();
    b.cancel();
    assert_eq!(b.status(), BurstStatus::Cancelled);
    assert!(b.emitter().particles().is_empty());
    assert_eq!(b.tick(5.0), BurstStatus::Cancelled);
    assert!(calls.borrow().is_empty());
}

#[test]
fn interrupt_reports_unfinished() {
    let (calls, done) = recorder();
    let mut b = burst(3.0, Some(done));
    b.tick(1.0);
    b.interrupt();
    assert_eq!(b.status(), BurstStatus::Interrupted);
    assert_eq!(*calls.borrow(), vec![false]);
    b.interrupt();
    assert_eq!(*calls.borrow(), vec![false]);
}

#[test]
fn infinite_burst_never_completes() {
    let (calls, done) = recorder();
    let mut b = burst(f64::INFINITY, Some(done));
    for _ in 0..600 {
        assert_eq!(b.tick(0.5), BurstStatus::Active);
        assert_eq!(b.emitter().birth_rate(), 1.0);
    }
    b.interrupt();
    assert_eq!(b.status(), BurstStatus::Cancelled);
    assert!(calls.borrow().is_empty());
}

#[test]
fn burst_id_displays_with_prefix() {
    assert_eq!(BurstId(4).to_string(), "burst#4");
}
