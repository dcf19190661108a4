//! Test doubles shared by the unit tests.

extern crate std;

use crate::{GamepadReport, ReportSink, SinkError};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use embedded_hal_async::delay::DelayNs;
use std::collections::VecDeque;
use std::vec::Vec;

/// Sink that records every report and fails with queued errors first.
#[derive(Default)]
pub(crate) struct MockSink {
    pub(crate) sent: Vec<GamepadReport>,
    pub(crate) failures: VecDeque<SinkError>,
    pub(crate) attempts: usize,
}

impl MockSink {
    pub(crate) fn failing(failures: &[SinkError]) -> Self {
        Self {
            failures: failures.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl ReportSink for MockSink {
    fn send_report(
        &mut self,
        report: &GamepadReport,
    ) -> impl Future<Output = Result<(), SinkError>> {
        self.attempts += 1;
        let result = match self.failures.pop_front() {
            Some(e) => Err(e),
            None => {
                self.sent.push(*report);
                Ok(())
            }
        };
        core::future::ready(result)
    }
}

/// Delay that returns immediately and records what was asked for.
#[derive(Default)]
pub(crate) struct MockDelay {
    pub(crate) waited_ns: Vec<u64>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waited_ns.push(u64::from(ns));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waited_ns.push(u64::from(ms) * 1_000_000);
    }
}

/// Run a future to completion (simple blocking executor).
pub(crate) fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}
