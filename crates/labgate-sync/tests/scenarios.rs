use labgate_sync::{Admission, BlockingLabLock, Class, LabLock, Occupancy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const SETTLE: Duration = Duration::from_millis(50);
const DEADLINE: Duration = Duration::from_secs(10);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A thread blocked in `enter`, with a flag set once it gets in.
struct Visitor {
    entered: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Visitor {
    fn spawn<L: Admission + Send + 'static>(lock: &Arc<L>, class: Class) -> Self {
        let entered = Arc::new(AtomicBool::new(false));
        let handle = {
            let lock = Arc::clone(lock);
            let entered = Arc::clone(&entered);
            thread::spawn(move || {
                lock.enter(class);
                entered.store(true, Ordering::SeqCst);
            })
        };
        Self { entered, handle }
    }

    fn assert_blocked(&self) {
        thread::sleep(SETTLE);
        assert!(!self.entered.load(Ordering::SeqCst), "visitor got in early");
    }

    fn join(self) {
        self.handle.join().unwrap();
        assert!(self.entered.load(Ordering::SeqCst));
    }
}

fn wait_until<L: Admission>(lock: &L, what: &str, cond: impl Fn(&Occupancy) -> bool) {
    let start = Instant::now();
    while !cond(&lock.occupancy()) {
        assert!(start.elapsed() < DEADLINE, "timed out waiting for {}", what);
        thread::yield_now();
    }
}

fn twenty_first_student_waits_for_a_seat<L: Admission + Send + 'static>(lock: L) {
    init_logging();
    let lock = Arc::new(lock);
    for _ in 0..20 {
        lock.student_enter();
    }
    assert!(!lock.try_enter(Class::Student));

    let late = Visitor::spawn(&lock, Class::Student);
    late.assert_blocked();

    lock.student_exit().unwrap();
    late.join();
    assert_eq!(lock.occupancy().students_in_lab, 20);
}

fn professor_waits_for_ta<L: Admission + Send + 'static>(lock: L) {
    init_logging();
    let lock = Arc::new(lock);
    lock.ta_enter();

    let professor = Visitor::spawn(&lock, Class::Professor);
    wait_until(&*lock, "professor to queue", |o| o.professors_waiting == 1);
    professor.assert_blocked();

    lock.ta_exit().unwrap();
    professor.join();
    let occupancy = lock.occupancy();
    assert_eq!(occupancy.professors_in_lab, 1);
    assert_eq!(occupancy.professors_waiting, 0);
    assert_eq!(occupancy.tas_in_lab, 0);
}

fn ta_takes_last_seat_before_students<L: Admission + Send + 'static>(lock: L) {
    init_logging();
    let lock = Arc::new(lock);
    for _ in 0..19 {
        lock.student_enter();
    }
    lock.ta_enter();
    assert_eq!(lock.occupancy().shared(), 20);

    let student = Visitor::spawn(&lock, Class::Student);
    student.assert_blocked();

    lock.ta_exit().unwrap();
    student.join();
    assert_eq!(lock.occupancy().students_in_lab, 20);
}

fn queued_professor_shuts_out_students<L: Admission + Send + 'static>(lock: L) {
    init_logging();
    let lock = Arc::new(lock);
    lock.student_enter();

    let professor = Visitor::spawn(&lock, Class::Professor);
    wait_until(&*lock, "professor to queue", |o| o.professors_waiting == 1);

    // Plenty of seats, but the queued professor comes first
    let student = Visitor::spawn(&lock, Class::Student);
    student.assert_blocked();
    assert!(!lock.try_enter(Class::Student));

    lock.student_exit().unwrap();
    professor.join();
    student.assert_blocked();

    lock.professor_exit().unwrap();
    student.join();
    let occupancy = lock.occupancy();
    assert_eq!(occupancy.students_in_lab, 1);
    assert_eq!(occupancy.professors_in_lab, 0);
}

fn queued_ta_goes_before_students<L: Admission + Send + 'static>(lock: L) {
    init_logging();
    let lock = Arc::new(lock);
    lock.professor_enter();

    let ta = Visitor::spawn(&lock, Class::TeachingAssistant);
    wait_until(&*lock, "TA to queue", |o| o.tas_waiting == 1);
    let student = Visitor::spawn(&lock, Class::Student);
    student.assert_blocked();

    lock.professor_exit().unwrap();
    ta.join();
    student.join();
    let occupancy = lock.occupancy();
    assert_eq!(occupancy.tas_in_lab, 1);
    assert_eq!(occupancy.students_in_lab, 1);
}

fn unbalanced_exits_never_go_negative<L: Admission>(lock: L) {
    init_logging();
    for class in Class::ALL {
        lock.exit(class).unwrap();
        lock.exit(class).unwrap();
    }
    assert!(lock.occupancy().is_empty());

    lock.student_enter();
    assert_eq!(lock.occupancy().students_in_lab, 1);
}

macro_rules! scenarios {
    ($module:ident, $make:expr) => {
        mod $module {
            use super::*;

            #[test]
            fn twenty_first_student_blocks() {
                twenty_first_student_waits_for_a_seat($make);
            }

            #[test]
            fn professor_blocks_behind_ta() {
                professor_waits_for_ta($make);
            }

            #[test]
            fn ta_fills_lab_then_student_blocks() {
                ta_takes_last_seat_before_students($make);
            }

            #[test]
            fn waiting_professor_blocks_student() {
                queued_professor_shuts_out_students($make);
            }

            #[test]
            fn waiting_ta_blocks_student() {
                queued_ta_goes_before_students($make);
            }

            #[test]
            fn exits_clamp_at_zero() {
                unbalanced_exits_never_go_negative($make);
            }
        }
    };
}

scenarios!(spin, LabLock::new());
scenarios!(blocking, BlockingLabLock::new());
